//! CLI command implementations
//!
//! This module contains the commands supported by the CLI application
//! using the Command pattern.

pub mod command_traits;
pub mod invocation;
pub mod override_command;

pub use command_traits::{Command, CommandFactory};
pub use invocation::Invocation;
pub use override_command::OverrideCommand;

use clap::ArgMatches;
use crate::style::errors::OverrideResult;

/// Factory for creating command instances based on CLI arguments
pub struct OverrideCommandFactory;

impl OverrideCommandFactory {
    /// Create a new factory instance
    pub fn new() -> Self {
        OverrideCommandFactory
    }
}

impl Default for OverrideCommandFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandFactory for OverrideCommandFactory {
    fn create_command(&self, program: &str, args: &ArgMatches) -> OverrideResult<Box<dyn Command>> {
        let invocation = Invocation::from_matches(program, args)?;
        Ok(Box::new(OverrideCommand::new(invocation)))
    }
}
