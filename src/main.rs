use clap::Parser;
use pwa_icons::cli::Cli;
use simple_logger::SimpleLogger;
use std::error::Error as _;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = SimpleLogger::new().with_level(cli.log_level()).init() {
        eprintln!("couldn't initialize logger: {}", e);
        return ExitCode::FAILURE;
    }

    match cli.run() {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Error: {}", e);
            let mut source = e.source();
            while let Some(cause) = source {
                log::error!("  caused by: {}", cause);
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}
