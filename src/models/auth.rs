//! Credential placement per endpoint surface
//!
//! The native API, the Google-compatible endpoint and the plugin protocols
//! each expect the API token in a different place.

use std::fmt;

/// Where a request carries the API token
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthPlacement {
    /// Never send credentials
    None,
    /// `Authorization: Bearer <token>`
    Bearer,
    /// `Authorization: <scheme> <token>` with a non-bearer scheme
    Scheme(&'static str),
    /// Token as the value of a custom header
    Header(&'static str),
    /// Token appended as a query parameter
    Query(&'static str),
}

impl AuthPlacement {
    /// Header to attach for the given token, if any
    pub fn header(&self, token: Option<&str>) -> Option<(String, String)> {
        let token = token.filter(|t| !t.is_empty())?;
        match self {
            AuthPlacement::Bearer => Some(("Authorization".to_string(), format!("Bearer {token}"))),
            AuthPlacement::Scheme(scheme) => {
                Some(("Authorization".to_string(), format!("{scheme} {token}")))
            }
            AuthPlacement::Header(name) => Some((name.to_string(), token.to_string())),
            AuthPlacement::None | AuthPlacement::Query(_) => None,
        }
    }

    /// Query pair to append for the given token, if any
    pub fn query(&self, token: Option<&str>) -> Option<(String, String)> {
        let token = token.filter(|t| !t.is_empty())?;
        match self {
            AuthPlacement::Query(name) => Some((name.to_string(), token.to_string())),
            _ => None,
        }
    }
}

impl fmt::Display for AuthPlacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthPlacement::None => write!(f, "none"),
            AuthPlacement::Bearer => write!(f, "bearer header"),
            AuthPlacement::Scheme(scheme) => write!(f, "{scheme} header"),
            AuthPlacement::Header(name) => write!(f, "header {name}"),
            AuthPlacement::Query(name) => write!(f, "query ?{name}="),
        }
    }
}
