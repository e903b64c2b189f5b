//! Common types used throughout listing-pager
//!
//! Query parameter values, the per-request parameter set, and a few
//! utility extensions shared by the listing and pagination modules.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// Query parameter carrying the page size hint
pub const LIMIT_PARAM: &str = "limit";

/// Query parameter carrying the pagination cursor
pub const AFTER_PARAM: &str = "after";

// ============================================================================
// Parameter Values
// ============================================================================

/// A single query parameter value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Integer value (e.g. `limit=100`)
    Int(i64),
    /// String value (e.g. `after=t3_abc`)
    Str(String),
}

impl ParamValue {
    /// Borrow the value as a string, if it is one
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            Self::Int(_) => None,
        }
    }

    /// Get the value as an integer, if it is one
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            Self::Str(_) => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Str(s) => f.write_str(s),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<usize> for ParamValue {
    fn from(value: usize) -> Self {
        Self::Int(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

// ============================================================================
// Request Parameters
// ============================================================================

/// Query parameters sent with a single listing request
///
/// A value of this type describes exactly one request. Moving to the next
/// page derives a new set with [`RequestParams::with_after`] instead of
/// mutating the one that was just sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestParams {
    values: BTreeMap<String, ParamValue>,
}

impl RequestParams {
    /// Create an empty parameter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a parameter
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Add or replace a parameter in place
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        self.values.insert(key.into(), value.into());
    }

    /// Look up a parameter
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.values.get(key)
    }

    /// The cursor this request resumes from, if any
    pub fn after(&self) -> Option<&str> {
        self.get(AFTER_PARAM).and_then(ParamValue::as_str)
    }

    /// The page size hint sent with this request
    pub fn limit(&self) -> Option<i64> {
        self.get(LIMIT_PARAM).and_then(ParamValue::as_int)
    }

    /// Derive the parameters of the request that follows a page with `after`
    #[must_use]
    pub fn with_after(&self, after: impl Into<String>) -> Self {
        self.clone().with(AFTER_PARAM, after.into())
    }

    /// Render as string pairs for a query string
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        self.values
            .iter()
            .map(|(k, v)| (k.clone(), v.to_string()))
            .collect()
    }

    /// Parse a `key=value` pair; the value is kept verbatim as a string
    pub fn parse_pair(pair: &str) -> Result<(String, ParamValue)> {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| Error::invalid_param(format!("expected key=value, got '{pair}'")))?;

        let key = key.trim();
        if key.is_empty() {
            return Err(Error::invalid_param(format!(
                "empty parameter name in '{pair}'"
            )));
        }

        Ok((key.to_string(), ParamValue::Str(value.to_string())))
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for RequestParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

// ============================================================================
// Utilities
// ============================================================================

/// Extension trait for Option<String> to handle empty strings
pub trait OptionStringExt {
    /// Returns None if the string is empty
    fn none_if_empty(self) -> Option<String>;
}

impl OptionStringExt for Option<String> {
    fn none_if_empty(self) -> Option<String> {
        self.filter(|s| !s.is_empty())
    }
}

impl OptionStringExt for String {
    fn none_if_empty(self) -> Option<String> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}
