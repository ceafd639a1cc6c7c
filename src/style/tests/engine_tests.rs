//! Tests for the override engine

extern crate std;

use crate::style::engine::{apply_overrides, apply_to_document};
use crate::style::overrides::OverrideTable;
use crate::style::types::{Element, Node};
use crate::style::writer::StyleWriter;

use super::test_utils::{parameter_text, parse, SAMPLE_STYLE};

fn table(args: &[&str]) -> OverrideTable {
    OverrideTable::from_assignments(args.iter().copied()).unwrap()
}

#[test]
fn test_specific_layer_wins_over_wildcard() {
    let mut doc = parse(SAMPLE_STYLE);
    let report = apply_to_document(&mut doc, &table(&["*:dbname=gis", "ocean_layer:dbname=natural_earth"]));

    std::assert_eq!(parameter_text(&doc, "ocean_layer", "dbname").as_deref(), Some("natural_earth"));
    std::assert_eq!(parameter_text(&doc, "land_layer", "dbname").as_deref(), Some("gis"));
    std::assert_eq!(report.rewritten(), 2);
    std::assert!(report.unused_keys.is_empty());
}

#[test]
fn test_argument_order_does_not_matter() {
    let mut doc = parse(SAMPLE_STYLE);
    apply_to_document(&mut doc, &table(&["ocean_layer:dbname=natural_earth", "*:dbname=gis"]));

    std::assert_eq!(parameter_text(&doc, "ocean_layer", "dbname").as_deref(), Some("natural_earth"));
    std::assert_eq!(parameter_text(&doc, "land_layer", "dbname").as_deref(), Some("gis"));
}

#[test]
fn test_wildcard_applies_to_every_layer() {
    let mut doc = parse(SAMPLE_STYLE);
    apply_to_document(&mut doc, &table(&["*:type=shape"]));

    std::assert_eq!(parameter_text(&doc, "ocean_layer", "type").as_deref(), Some("shape"));
    std::assert_eq!(parameter_text(&doc, "land_layer", "type").as_deref(), Some("shape"));
}

#[test]
fn test_unmatched_document_is_unchanged() {
    let original = parse(SAMPLE_STYLE);
    let mut doc = original.clone();
    let report = apply_to_document(&mut doc, &table(&["other_layer:dbname=x", "*:host=localhost"]));

    std::assert_eq!(doc, original);
    std::assert_eq!(report.rewritten(), 0);
    std::assert_eq!(report.unused_keys, vec!["*:host".to_string(), "other_layer:dbname".to_string()]);
}

#[test]
fn test_structure_survives_rewrite() {
    let original = parse(SAMPLE_STYLE);
    let mut doc = original.clone();
    apply_to_document(&mut doc, &table(&["*:dbname=gis", "*:table=planet"]));

    for tag in ["Layer", "Datasource", "Parameter"] {
        let before: Vec<_> = original.root().unwrap().descendants_named(tag)
            .into_iter().map(|e| e.attributes.clone()).collect();
        let after: Vec<_> = doc.root().unwrap().descendants_named(tag)
            .into_iter().map(|e| e.attributes.clone()).collect();
        std::assert_eq!(before, after);
    }
}

#[test]
fn test_cdata_parameter_is_replaced_by_text() {
    let mut doc = parse(SAMPLE_STYLE);
    let report = apply_to_document(&mut doc, &table(&["ocean_layer:table=(select 1) as t"]));

    std::assert_eq!(report.substitutions[0].previous.as_deref(), Some("(select way from ocean) as data"));
    let xml = StyleWriter::new().write_string(&doc).unwrap();
    std::assert!(xml.contains("<Parameter name=\"table\">(select 1) as t</Parameter>"));
    std::assert!(!xml.contains("CDATA"));
}

#[test]
fn test_layer_without_name_uses_none_sentinel() {
    let xml = "<Map><Layer><Datasource><Parameter name=\"dbname\">a</Parameter></Datasource></Layer></Map>";

    let mut doc = parse(xml);
    let report = apply_to_document(&mut doc, &table(&["None:dbname=sentinel"]));
    std::assert_eq!(report.substitutions[0].layer, "None");
    std::assert_eq!(report.substitutions[0].value, "sentinel");

    let mut doc = parse(xml);
    apply_to_document(&mut doc, &table(&["*:dbname=fallback"]));
    let param = &doc.root().unwrap().descendants_named("Parameter")[0];
    std::assert_eq!(param.text().as_deref(), Some("fallback"));
}

#[test]
fn test_parameter_outside_datasource_is_ignored() {
    let xml = "<Map><Layer name=\"a\"><Parameter name=\"dbname\">keep</Parameter></Layer>\
               <Datasource><Parameter name=\"dbname\">keep</Parameter></Datasource></Map>";
    let mut doc = parse(xml);
    let report = apply_to_document(&mut doc, &table(&["*:dbname=gis"]));

    std::assert_eq!(report.rewritten(), 0);
    for param in doc.root().unwrap().descendants_named("Parameter") {
        std::assert_eq!(param.text().as_deref(), Some("keep"));
    }
}

#[test]
fn test_deeply_nested_elements_are_matched() {
    let xml = "<Map><Group><Layer name=\"a\"><Wrapper><Datasource><Extra>\
               <Parameter name=\"dbname\">old</Parameter></Extra></Datasource></Wrapper></Layer></Group></Map>";
    let mut doc = parse(xml);
    apply_to_document(&mut doc, &table(&["a:dbname=new"]));

    let param = &doc.root().unwrap().descendants_named("Parameter")[0];
    std::assert_eq!(param.text().as_deref(), Some("new"));
}

#[test]
fn test_nested_layer_innermost_resolving_layer_wins() {
    let xml = "<Map><Layer name=\"outer\"><Datasource>\
               <Layer name=\"inner\"><Datasource><Parameter name=\"dbname\">old</Parameter></Datasource></Layer>\
               </Datasource></Layer></Map>";

    let mut doc = parse(xml);
    apply_to_document(&mut doc, &table(&["outer:dbname=o", "inner:dbname=i"]));
    std::assert_eq!(parameter_text(&doc, "inner", "dbname").as_deref(), Some("i"));

    // Only the outer layer resolves, so its value stays
    let mut doc = parse(xml);
    let report = apply_to_document(&mut doc, &table(&["outer:dbname=o"]));
    std::assert_eq!(parameter_text(&doc, "inner", "dbname").as_deref(), Some("o"));
    std::assert_eq!(report.rewritten(), 1);
}

#[test]
fn test_nested_layer_without_own_datasource_uses_outer_layer() {
    let xml = "<Map><Layer name=\"outer\"><Datasource>\
               <Layer name=\"inner\"><Parameter name=\"dbname\">old</Parameter></Layer>\
               </Datasource></Layer></Map>";
    let mut doc = parse(xml);
    apply_to_document(&mut doc, &table(&["outer:dbname=o", "inner:dbname=i"]));

    let param = &doc.root().unwrap().descendants_named("Parameter")[0];
    std::assert_eq!(param.text().as_deref(), Some("o"));
}

#[test]
fn test_empty_parameter_gains_text() {
    let mut root = Element::new("Layer").with_attribute("name", "a").with_child(Node::Element(
        Element::new("Datasource").with_child(Node::Element(Element::new("Parameter").with_attribute("name", "host"))),
    ));
    let report = apply_overrides(&mut root, &table(&["a:host=db.local"]));

    std::assert_eq!(report.substitutions[0].previous, None);
    let param = &root.descendants_named("Parameter")[0];
    std::assert_eq!(param.children, vec![Node::Text("db.local".to_string())]);
}

#[test]
fn test_rewrites_parameters_declared_through_entities() {
    let xml = "<?xml version=\"1.0\"?>\n<!DOCTYPE Map [\n<!ENTITY db \"old\">\n<!ENTITY host \"db.local\">\n]>\n\
               <Map><Layer name=\"a\"><Datasource>\
               <Parameter name=\"dbname\">&db;</Parameter>\
               <Parameter name=\"host\">&host;</Parameter>\
               </Datasource></Layer></Map>";
    let mut doc = parse(xml);
    let report = apply_to_document(&mut doc, &table(&["a:dbname=gis"]));

    std::assert_eq!(report.substitutions[0].previous.as_deref(), Some("old"));
    std::assert_eq!(parameter_text(&doc, "a", "dbname").as_deref(), Some("gis"));
    std::assert_eq!(parameter_text(&doc, "a", "host").as_deref(), Some("db.local"));

    let written = StyleWriter::new().write_string(&doc).unwrap();
    std::assert!(written.contains("<Parameter name=\"dbname\">gis</Parameter>"));
    std::assert!(written.contains("<Parameter name=\"host\">db.local</Parameter>"));
}
