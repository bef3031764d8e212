use clap::Parser;
use coinkit_cli_lib::{Args, modules};
use coinkit_core::error;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Args::parse();
    if let Err(err) = coinkit_core::log::init_logger(args.log_dir.as_deref(), &args.log_level) {
        eprintln!("Error: {err}");
        return ExitCode::FAILURE;
    }

    match modules::run(&args.command) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{err}");
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
