//! Endpoint checks for the translation service
//!
//! ## Surfaces
//!
//! ### Basic
//! - Health (`GET /health`)
//! - Version (`GET /version`)
//! - Language list (`GET /languages`)
//!
//! ### Translate
//! - Single translate (`POST /translate`)
//! - Batch translate (`POST /translate/batch`)
//! - Google-compatible (`POST /language/translate/v2`)
//!
//! ### Plugins
//! - Immersive Translate (`POST /imme`, token in query)
//! - KISS Translator (`POST /kiss`, token in `KEY` header)
//!
//! ### Performance
//! - Latency benchmark (repeated `POST /translate`, fail-fast)

mod benchmark;
pub mod endpoints;
mod harness;
mod metrics;

pub use harness::Harness;
