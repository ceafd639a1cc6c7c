use std::path::Path;
use std::process;
use log::LevelFilter;

use override_xml::cli::build_cli;
use override_xml::commands::invocation::program_name;
use override_xml::commands::{CommandFactory, OverrideCommandFactory};
use override_xml::utils::logger::Logger;
use override_xml::OverrideError;

fn main() {
    let args: Vec<_> = std::env::args_os().collect();
    let program = program_name(&args);

    let matches = match build_cli().try_get_matches_from(args) {
        Ok(matches) => matches,
        Err(e) => e.exit(),
    };

    let level = if matches.get_flag("verbose") {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let log_file = matches.get_one::<String>("log-file").map(Path::new);
    if let Err(e) = Logger::init_global_logger(log_file, level) {
        eprintln!("Error initializing logger: {}", e);
        process::exit(1);
    }

    let factory = OverrideCommandFactory::new();

    match factory.create_command(&program, &matches) {
        Ok(command) => {
            if let Err(e) = command.execute() {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        }
        Err(OverrideError::Cli(e)) => e.exit(),
        Err(e) if e.is_argument_error() => {
            eprintln!("{}", e);
            process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
