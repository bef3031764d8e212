pub mod args;
pub mod error;
pub mod modules;
pub mod result;

pub use args::{Args, Command};
