//! Output formatting module
//!
//! Renders check results and run summaries.

mod formatter;

pub use formatter::{OutputFormat, ResultFormatter};
