//! Check execution engine
//!
//! Runs planned checks sequentially and builds the run summary.

mod runner;

pub use runner::CheckRunner;
