extern crate self as coinkit_core;

pub mod log;

pub use ::log::{debug, error, info, trace, warn};
