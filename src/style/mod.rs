//! Map style document handling
//!
//! This module loads map style XML documents, rewrites datasource
//! parameters from an override table and writes the result back out.

pub mod errors;
pub mod types;
pub mod reader;
pub mod writer;
pub mod overrides;
pub mod engine;
pub mod constants;
#[cfg(test)]
mod tests;

pub use errors::{OverrideError, OverrideResult};
pub use types::{Document, Element, Node};
pub use reader::StyleReader;
pub use writer::StyleWriter;
pub use overrides::OverrideTable;
pub use engine::{apply_overrides, apply_to_document, OverrideReport, Substitution};
