//! Custom error types for style override processing

use std::fmt;
use std::io;

use crate::style::constants::{EXAMPLE_INVOCATION, KEY_SYNTAX_HELP};

/// Errors raised while parsing arguments, loading, rewriting or writing a style
#[derive(Debug)]
pub enum OverrideError {
    /// Too few command-line arguments
    Usage {
        /// Program name used in the usage line
        program: String,
    },
    /// Override argument without a `=` separator
    InvalidArgument(String),
    /// Override key without a `:` separating layer and parameter
    InvalidKey(String),
    /// I/O error
    Io(io::Error),
    /// Malformed XML document
    Xml(String),
    /// Unusable override file
    Config(String),
    /// Command-line parsing failure reported by clap
    Cli(clap::Error),
}

impl OverrideError {
    /// Whether this error comes from bad command-line input
    pub fn is_argument_error(&self) -> bool {
        matches!(
            self,
            OverrideError::Usage { .. } | OverrideError::InvalidArgument(_) | OverrideError::InvalidKey(_)
        )
    }
}

impl fmt::Display for OverrideError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverrideError::Usage { program } => {
                writeln!(f, "Usage: {} <input file> <output file> [<key=val>, <key=val>, ...]", program)?;
                writeln!(f)?;
                writeln!(f, "E.g: {} {}", program, EXAMPLE_INVOCATION)?;
                writeln!(f)?;
                write!(f, "{}", KEY_SYNTAX_HELP)
            }
            OverrideError::InvalidArgument(arg) => write!(
                f,
                "Value for argument {:?} is missing. The arguments should be of the form \"key=value\".",
                arg
            ),
            OverrideError::InvalidKey(key) => write!(
                f,
                "Key {:?} does not contain a colon separating the layer name from the datasource parameter name. \
                 Keys are expected to be of the form \"<layer name>:<parameter name>\" where the layer name \
                 can optionally be the wildcard '*'.",
                key
            ),
            OverrideError::Io(e) => write!(f, "I/O error: {}", e),
            OverrideError::Xml(msg) => write!(f, "XML error: {}", msg),
            OverrideError::Config(msg) => write!(f, "Override file error: {}", msg),
            OverrideError::Cli(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for OverrideError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OverrideError::Io(e) => Some(e),
            OverrideError::Cli(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for OverrideError {
    fn from(error: io::Error) -> Self {
        OverrideError::Io(error)
    }
}

impl From<quick_xml::Error> for OverrideError {
    fn from(error: quick_xml::Error) -> Self {
        match error {
            quick_xml::Error::Io(e) => OverrideError::Io(io::Error::new(e.kind(), e.to_string())),
            other => OverrideError::Xml(other.to_string()),
        }
    }
}

impl From<quick_xml::events::attributes::AttrError> for OverrideError {
    fn from(error: quick_xml::events::attributes::AttrError) -> Self {
        OverrideError::Xml(error.to_string())
    }
}

impl From<toml::de::Error> for OverrideError {
    fn from(error: toml::de::Error) -> Self {
        OverrideError::Config(error.to_string())
    }
}

impl From<clap::Error> for OverrideError {
    fn from(error: clap::Error) -> Self {
        OverrideError::Cli(error)
    }
}

/// Result type for override operations
pub type OverrideResult<T> = Result<T, OverrideError>;
