//! Datasource override command
//!
//! This module implements the command that loads a style document,
//! rewrites its datasource parameters and writes the result.

use log::{debug, info, warn};

use crate::commands::command_traits::Command;
use crate::commands::invocation::Invocation;
use crate::style::engine::{apply_to_document, OverrideReport};
use crate::style::errors::OverrideResult;
use crate::style::reader::StyleReader;
use crate::style::writer::StyleWriter;

/// Command for rewriting datasource parameters
pub struct OverrideCommand {
    /// Paths and overrides for this run
    invocation: Invocation,
}

impl OverrideCommand {
    /// Create a new override command
    pub fn new(invocation: Invocation) -> Self {
        OverrideCommand { invocation }
    }

    /// Runs load, rewrite and write, returning what was changed
    pub fn run(&self) -> OverrideResult<OverrideReport> {
        let Invocation {
            input_file,
            output_file,
            overrides,
        } = &self.invocation;

        let mut document = StyleReader::new().read_file(input_file)?;
        let report = apply_to_document(&mut document, overrides);
        StyleWriter::new().write_file(&document, output_file)?;

        Ok(report)
    }

    fn log_report(&self, report: &OverrideReport) {
        for substitution in &report.substitutions {
            debug!("  {}", substitution);
        }
        for key in &report.unused_keys {
            warn!("Override {} did not match any datasource parameter", key);
        }
        info!(
            "Rewrote {} parameter(s) using {} override(s)",
            report.rewritten(),
            self.invocation.overrides.len()
        );
    }
}

impl Command for OverrideCommand {
    fn execute(&self) -> OverrideResult<()> {
        info!(
            "Applying overrides from {} to {}",
            self.invocation.input_file.display(),
            self.invocation.output_file.display()
        );

        let report = self.run()?;
        self.log_report(&report);

        Ok(())
    }
}
