use crate::args::Command;
use crate::result::Result;

pub mod address;
pub mod derive;
pub mod key;
pub mod seed;

/// Runs `command` and returns the text to print.
pub fn run(command: &Command) -> Result<String> {
    match command {
        Command::Seed => seed::run(),
        Command::Derive(args) => derive::run(args),
        Command::Key(args) => key::run(args),
        Command::Address(args) => address::run(args),
    }
}
