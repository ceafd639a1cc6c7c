//! Datasource parameter rewriting
//!
//! Walks `Layer` → `Datasource` → `Parameter` anywhere in the tree and
//! replaces parameter text from an [`OverrideTable`].
//!
//! A parameter belongs to every enclosing layer that has a datasource between
//! itself and the parameter. When several such layers exist, the innermost
//! layer that resolves a value decides.

use std::collections::HashSet;
use std::fmt;

use log::debug;

use crate::style::constants::{tags, MISSING_NAME, NAME_ATTRIBUTE};
use crate::style::overrides::OverrideTable;
use crate::style::types::{Document, Element};

/// One rewritten parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    /// Layer name used for the lookup
    pub layer: String,
    /// Parameter name
    pub parameter: String,
    /// Table key that matched
    pub key: String,
    /// Text before the rewrite
    pub previous: Option<String>,
    /// Text after the rewrite
    pub value: String,
}

impl fmt::Display for Substitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{} = {:?} (was {:?}, via {})",
            self.layer,
            self.parameter,
            self.value,
            self.previous.as_deref().unwrap_or(""),
            self.key
        )
    }
}

/// Outcome of applying an override table to a document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverrideReport {
    /// Rewrites in document order
    pub substitutions: Vec<Substitution>,
    /// Table keys that matched no parameter, sorted
    pub unused_keys: Vec<String>,
}

impl OverrideReport {
    /// Number of parameters rewritten
    pub fn rewritten(&self) -> usize {
        self.substitutions.len()
    }
}

/// Applies overrides to every datasource parameter in the document
pub fn apply_to_document(document: &mut Document, table: &OverrideTable) -> OverrideReport {
    match document.root_mut() {
        Some(root) => apply_overrides(root, table),
        None => OverrideReport {
            substitutions: Vec::new(),
            unused_keys: table.keys().into_iter().map(str::to_string).collect(),
        },
    }
}

/// Applies overrides below (and including) `root`, mutating it in place
pub fn apply_overrides(root: &mut Element, table: &OverrideTable) -> OverrideReport {
    let mut substitutions = Vec::new();
    let mut layers = Vec::new();
    visit(root, table, &mut layers, 0, &mut substitutions);

    let used: HashSet<&str> = substitutions.iter().map(|s| s.key.as_str()).collect();
    let unused_keys = table
        .keys()
        .into_iter()
        .filter(|key| !used.contains(key))
        .map(str::to_string)
        .collect();

    OverrideReport {
        substitutions,
        unused_keys,
    }
}

/// Recursive walk
///
/// `layers` holds the names of enclosing layers, outermost first.
/// `active` is how many of them have a datasource between them and `element`;
/// those always form a prefix of `layers`.
fn visit(
    element: &mut Element,
    table: &OverrideTable,
    layers: &mut Vec<String>,
    active: usize,
    substitutions: &mut Vec<Substitution>,
) {
    let mut active = active;
    let is_layer = element.name == tags::LAYER;

    if is_layer {
        layers.push(name_of(element));
    } else if element.name == tags::DATASOURCE {
        active = layers.len();
    } else if element.name == tags::PARAMETER && active > 0 {
        if let Some(substitution) = rewrite_parameter(element, &layers[..active], table) {
            substitutions.push(substitution);
        }
    }

    for child in element.child_elements_mut() {
        visit(child, table, layers, active, substitutions);
    }

    if is_layer {
        layers.pop();
    }
}

fn rewrite_parameter(parameter: &mut Element, layers: &[String], table: &OverrideTable) -> Option<Substitution> {
    let parameter_name = name_of(parameter);
    let (layer, key, value) = layers.iter().rev().find_map(|layer| {
        table
            .resolve(layer, &parameter_name)
            .map(|(key, value)| (layer.clone(), key, value.to_string()))
    })?;

    let previous = parameter.text();
    parameter.set_text(value.clone());

    let substitution = Substitution {
        layer,
        parameter: parameter_name,
        key,
        previous,
        value,
    };
    debug!("Rewrote {}", substitution);
    Some(substitution)
}

fn name_of(element: &Element) -> String {
    element
        .attribute(NAME_ATTRIBUTE)
        .unwrap_or(MISSING_NAME)
        .to_string()
}
