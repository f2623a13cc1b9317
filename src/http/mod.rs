//! HTTP client module
//!
//! Provides the HTTP client used by every check.

mod client;

pub use client::{HttpClient, HttpError, HttpRequest};
