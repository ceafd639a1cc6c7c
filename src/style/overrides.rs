//! Override table and `key=value` argument parsing
//!
//! Keys have the form `<layer>:<parameter>`, where the layer may be the
//! wildcard `*`. Lookups prefer an exact layer key over the wildcard key.

use std::collections::HashMap;

use log::debug;

use crate::style::constants::{KEY_SEPARATOR, VALUE_SEPARATOR, WILDCARD_LAYER};
use crate::style::errors::{OverrideError, OverrideResult};

/// Replacement values keyed by `<layer>:<parameter>`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverrideTable {
    entries: HashMap<String, String>,
}

impl OverrideTable {
    /// Creates an empty table
    pub fn new() -> Self {
        OverrideTable::default()
    }

    /// Builds a table from `key=value` arguments in command-line order
    pub fn from_assignments<I, S>(args: I) -> OverrideResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table = OverrideTable::new();
        table.extend_from_assignments(args)?;
        Ok(table)
    }

    /// Parses and inserts `key=value` arguments; later keys overwrite earlier ones
    pub fn extend_from_assignments<I, S>(&mut self, args: I) -> OverrideResult<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for arg in args {
            let (key, value) = parse_assignment(arg.as_ref())?;
            self.insert(key, value)?;
        }
        Ok(())
    }

    /// Inserts a validated key; an existing value for the key is replaced
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> OverrideResult<()> {
        let key = key.into();
        validate_key(&key)?;
        let value = value.into();
        if let Some(previous) = self.entries.insert(key.clone(), value) {
            debug!("Override {} replaces earlier value {:?}", key, previous);
        }
        Ok(())
    }

    /// Value stored under an exact key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Resolves the value for a parameter of a layer
    ///
    /// Returns the matched key together with its value. `<layer>:<parameter>`
    /// always wins over `*:<parameter>`.
    pub fn resolve(&self, layer: &str, parameter: &str) -> Option<(String, &str)> {
        let layer_key = format_key(layer, parameter);
        if let Some(value) = self.get(&layer_key) {
            return Some((layer_key, value));
        }

        let generic_key = format_key(WILDCARD_LAYER, parameter);
        self.get(&generic_key).map(|value| (generic_key, value))
    }

    /// All keys in sorted order
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Joins a layer and parameter name into a lookup key
pub fn format_key(layer: &str, parameter: &str) -> String {
    format!("{}{}{}", layer, KEY_SEPARATOR, parameter)
}

/// Splits an override argument on its first `=`
pub fn parse_assignment(arg: &str) -> OverrideResult<(String, String)> {
    let (key, value) = arg
        .split_once(VALUE_SEPARATOR)
        .ok_or_else(|| OverrideError::InvalidArgument(arg.to_string()))?;
    validate_key(key)?;
    Ok((key.to_string(), value.to_string()))
}

/// Checks that a key separates layer and parameter with a colon
pub fn validate_key(key: &str) -> OverrideResult<()> {
    if key.contains(KEY_SEPARATOR) {
        Ok(())
    } else {
        Err(OverrideError::InvalidKey(key.to_string()))
    }
}
