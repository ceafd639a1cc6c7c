//! Element names, key syntax and help text for style overrides

/// Tag names walked by the override engine
pub mod tags {
    pub const LAYER: &str = "Layer";
    pub const DATASOURCE: &str = "Datasource";
    pub const PARAMETER: &str = "Parameter";
}

/// Attribute carrying layer and parameter names
pub const NAME_ATTRIBUTE: &str = "name";

/// Key segment used when a Layer or Parameter has no `name` attribute
pub const MISSING_NAME: &str = "None";

/// Layer segment matching any layer
pub const WILDCARD_LAYER: &str = "*";

/// Separates the layer segment from the parameter segment of a key
pub const KEY_SEPARATOR: char = ':';

/// Separates a key from its value in an override argument
pub const VALUE_SEPARATOR: char = '=';

pub(crate) const EXAMPLE_INVOCATION: &str =
    "input.xml output.xml \"*:dbname=gis\" \"ocean_layer:dbname=natural_earth\"";

pub(crate) const KEY_SYNTAX_HELP: &str = "Each of the key-value pairs will replace parameters in the \
datasources in the layers in the input file, with the key being <layer name>:<parameter name>. \
Optionally the layer name can be '*', in which case it applies as a default when there is no more \
specific key.";
