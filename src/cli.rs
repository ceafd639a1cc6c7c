//! Command-line interface definition

use clap::{Arg, ArgAction, Command as ClapCommand};

use crate::style::constants::{EXAMPLE_INVOCATION, KEY_SYNTAX_HELP};

/// Builds the clap command for `override-xml`
///
/// Input and output are declared optional so that a missing path is reported
/// with the tool's own usage message rather than clap's. Overrides may start
/// with `-`, so options have to come before the first override.
pub fn build_cli() -> ClapCommand {
    ClapCommand::new("override-xml")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Override datasource parameters in a map style XML file")
        .after_help(format!("E.g: override-xml {}\n\n{}", EXAMPLE_INVOCATION, KEY_SYNTAX_HELP))
        .arg(
            Arg::new("input")
                .help("Input style XML file")
                .value_name("INPUT")
                .index(1),
        )
        .arg(
            Arg::new("output")
                .help("Output style XML file")
                .value_name("OUTPUT")
                .index(2),
        )
        .arg(
            Arg::new("overrides")
                .help("Overrides of the form <layer name>:<parameter name>=<value>")
                .value_name("KEY=VALUE")
                .index(3)
                .num_args(0..)
                .allow_hyphen_values(true)
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("TOML file with an [overrides] table, applied before command-line overrides")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .help("Also write log records to this file")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue),
        )
}
