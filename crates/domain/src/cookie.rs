//! Response cookies.
//!
//! The request executor parses every `Set-Cookie` header into a [`Cookie`];
//! the runner then collapses them into a name to value mapping with
//! [`capture_cookies`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The `name=value` pair of one `Set-Cookie` header.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Cookie {
    /// Name before the first `=`
    pub name: String,
    /// Value, with surrounding quotes removed
    pub value: String,
}

impl Cookie {
    /// Creates a cookie.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Parses a `Set-Cookie` header value.
    ///
    /// Attributes after the first `;` (`Path`, `Max-Age`, flags, ...) are
    /// not interpreted. Returns `None` when the header has no `name=value`
    /// pair.
    #[must_use]
    pub fn from_set_cookie(header: &str) -> Option<Self> {
        let pair = header.split(';').next()?;
        let (name, value) = pair.split_once('=')?;
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        Some(Self::new(name, value.trim().trim_matches('"')))
    }
}

/// Collapses cookies into a name to value mapping.
///
/// Later cookies overwrite earlier ones with the same name.
#[must_use]
pub fn capture_cookies(cookies: &[Cookie]) -> BTreeMap<String, String> {
    cookies
        .iter()
        .map(|c| (c.name.clone(), c.value.clone()))
        .collect()
}
