use std::process::ExitCode;

use opusc_drv::{Config, Session};

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let config = match Config::from_args(&args) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("{}", error);
            return ExitCode::from(error.exit_code() as u8);
        }
    };

    let mut session = Session::new(config);
    match session.compile() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{}", error);
            ExitCode::from(error.exit_code() as u8)
        }
    }
}
