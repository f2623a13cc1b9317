//! Data models for the translation service harness
//!
//! This module contains all data structures used throughout the application.

mod auth;
mod check;

pub use auth::AuthPlacement;
pub use check::{Check, CheckKind, CheckResult, LangPair, RunSummary, Section};
