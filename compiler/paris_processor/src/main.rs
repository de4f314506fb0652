//! parisc: run the Paris processor over serialized rounds.

use std::process::ExitCode;

use paris_processor::{run, CliOptions, DriverError};

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let options = match CliOptions::parse(&args) {
        Ok(options) => options,
        Err(err) => {
            eprintln!("error: {err}");
            eprintln!("{}", CliOptions::USAGE);
            return ExitCode::from(2);
        }
    };

    match run(&options) {
        Ok(0) => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(DriverError::Usage(message)) => {
            eprintln!("error: {message}");
            eprintln!("{}", CliOptions::USAGE);
            ExitCode::from(2)
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
