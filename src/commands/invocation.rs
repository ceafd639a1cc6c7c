//! Decoding of command-line arguments into an override run

use std::ffi::OsString;
use std::path::PathBuf;

use clap::ArgMatches;
use log::debug;

use crate::cli::build_cli;
use crate::config::OverrideFile;
use crate::style::errors::{OverrideError, OverrideResult};
use crate::style::overrides::OverrideTable;

/// Program name used when the argument list is empty
const DEFAULT_PROGRAM: &str = "override-xml";

/// Everything one override run needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Style document to read
    pub input_file: PathBuf,
    /// Destination of the rewritten document
    pub output_file: PathBuf,
    /// Overrides from the override file and the command line
    pub overrides: OverrideTable,
}

impl Invocation {
    /// Parses a full argument list, program name first
    pub fn from_args<I, T>(args: I) -> OverrideResult<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
        let program = program_name(&args);
        let matches = build_cli().try_get_matches_from(args)?;
        Self::from_matches(&program, &matches)
    }

    /// Builds an invocation from already parsed matches
    ///
    /// Override file entries go into the table first, so command-line
    /// arguments with the same key replace them.
    pub fn from_matches(program: &str, matches: &ArgMatches) -> OverrideResult<Self> {
        let usage = || OverrideError::Usage {
            program: program.to_string(),
        };
        let input_file = matches.get_one::<String>("input").ok_or_else(usage)?;
        let output_file = matches.get_one::<String>("output").ok_or_else(usage)?;

        let mut overrides = OverrideTable::new();
        if let Some(config) = matches.get_one::<String>("config") {
            OverrideFile::load(config)?.apply_to(&mut overrides)?;
        }
        if let Some(assignments) = matches.get_many::<String>("overrides") {
            overrides.extend_from_assignments(assignments)?;
        }
        debug!("Collected {} override(s)", overrides.len());

        Ok(Invocation {
            input_file: PathBuf::from(input_file),
            output_file: PathBuf::from(output_file),
            overrides,
        })
    }
}

/// Name the program was invoked as
pub fn program_name(args: &[OsString]) -> String {
    args.first()
        .map(|arg| arg.to_string_lossy().into_owned())
        .unwrap_or_else(|| DEFAULT_PROGRAM.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_args_builds_table() {
        let invocation = Invocation::from_args([
            "override-xml", "in.xml", "out.xml", "*:dbname=gis", "ocean_layer:dbname=natural_earth",
        ])
        .unwrap();

        assert_eq!(invocation.input_file, PathBuf::from("in.xml"));
        assert_eq!(invocation.output_file, PathBuf::from("out.xml"));
        assert_eq!(invocation.overrides.get("*:dbname"), Some("gis"));
        assert_eq!(invocation.overrides.get("ocean_layer:dbname"), Some("natural_earth"));
    }

    #[test]
    fn test_without_overrides_table_is_empty() {
        let invocation = Invocation::from_args(["override-xml", "in.xml", "out.xml"]).unwrap();
        assert!(invocation.overrides.is_empty());
    }

    #[test]
    fn test_too_few_arguments_is_usage_error() {
        for args in [vec!["./override-xml"], vec!["./override-xml", "in.xml"]] {
            match Invocation::from_args(args) {
                Err(OverrideError::Usage { program }) => assert_eq!(program, "./override-xml"),
                other => panic!("unexpected result: {:?}", other),
            }
        }
    }

    #[test]
    fn test_malformed_overrides_are_rejected() {
        assert!(matches!(
            Invocation::from_args(["override-xml", "in.xml", "out.xml", "*:dbname"]),
            Err(OverrideError::InvalidArgument(arg)) if arg == "*:dbname"
        ));
        assert!(matches!(
            Invocation::from_args(["override-xml", "in.xml", "out.xml", "dbname=gis"]),
            Err(OverrideError::InvalidKey(key)) if key == "dbname"
        ));
    }

    #[test]
    fn test_command_line_beats_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("overrides.toml");
        std::fs::write(&config, "[overrides]\n\"*:dbname\" = \"from_file\"\n\"*:host\" = \"db\"\n").unwrap();

        let invocation = Invocation::from_args([
            "override-xml".to_string(),
            "--config".to_string(),
            config.display().to_string(),
            "in.xml".to_string(),
            "out.xml".to_string(),
            "*:dbname=from_cli".to_string(),
        ])
        .unwrap();

        assert_eq!(invocation.overrides.get("*:dbname"), Some("from_cli"));
        assert_eq!(invocation.overrides.get("*:host"), Some("db"));
    }

    #[test]
    fn test_program_name_defaults() {
        assert_eq!(program_name(&[]), "override-xml");
    }
}
