//! Override file loading
//!
//! Overrides can be collected in a TOML file instead of repeating them on
//! the command line:
//!
//! ```toml
//! [overrides]
//! "*:dbname" = "gis"
//! "ocean_layer:dbname" = "natural_earth"
//! "*:port" = 5432
//! ```

use std::fs;
use std::path::Path;

use log::debug;

use crate::style::errors::{OverrideError, OverrideResult};
use crate::style::overrides::OverrideTable;

/// Name of the table holding override entries
const OVERRIDES_TABLE: &str = "overrides";

/// Entries read from an override file, in file order
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OverrideFile {
    pub entries: Vec<(String, String)>,
}

impl OverrideFile {
    /// Reads and parses an override file
    pub fn load<P: AsRef<Path>>(path: P) -> OverrideResult<Self> {
        let path = path.as_ref();
        debug!("Reading override file {}", path.display());
        let content = fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parses override file content
    pub fn from_str(content: &str) -> OverrideResult<Self> {
        let toml_value: toml::Value = content.parse()?;

        let table = match toml_value.get(OVERRIDES_TABLE) {
            Some(toml::Value::Table(table)) => table,
            Some(_) => {
                return Err(OverrideError::Config(format!("[{}] must be a table", OVERRIDES_TABLE)));
            }
            None => return Ok(OverrideFile::default()),
        };

        let mut entries = Vec::with_capacity(table.len());
        for (key, value) in table {
            let value = scalar_to_string(value).ok_or_else(|| {
                OverrideError::Config(format!(
                    "value for {:?} must be a string, number or boolean, found {}",
                    key,
                    value.type_str()
                ))
            })?;
            entries.push((key.clone(), value));
        }

        Ok(OverrideFile { entries })
    }

    /// Inserts every entry into `table`, replacing values already present
    pub fn apply_to(&self, table: &mut OverrideTable) -> OverrideResult<()> {
        for (key, value) in &self.entries {
            table.insert(key.as_str(), value.as_str())?;
        }
        Ok(())
    }
}

fn scalar_to_string(value: &toml::Value) -> Option<String> {
    match value {
        toml::Value::String(s) => Some(s.clone()),
        toml::Value::Integer(i) => Some(i.to_string()),
        toml::Value::Float(f) => Some(f.to_string()),
        toml::Value::Boolean(b) => Some(b.to_string()),
        _ => None,
    }
}
