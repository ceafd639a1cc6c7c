pub mod style;
pub mod utils;
pub mod config;
pub mod commands;
pub mod cli;

pub use style::{Document, Element, Node, OverrideError, OverrideReport, OverrideResult, OverrideTable};
pub use style::{StyleReader, StyleWriter, apply_overrides, apply_to_document};
pub use commands::{Invocation, OverrideCommand};
