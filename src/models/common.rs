use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::error::{Error, Result};

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 20;
pub const MAX_LIMIT: u32 = 100;

/// Free-form JSON attached to calls and conversations.
pub type Metadata = HashMap<String, Value>;

/// Tri-state helper for update fields that can be omitted, cleared, or set.
///
/// Wrap in `Option`: `None` omits the key, `Some(Nullable::Null)` sends `null`,
/// `Some(Nullable::Value(v))` sends `v`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Nullable<T> {
    Value(T),
    Null,
}

impl<T> Nullable<T> {
    #[must_use]
    pub const fn as_ref(&self) -> Option<&T> {
        match self {
            Self::Value(value) => Some(value),
            Self::Null => None,
        }
    }
}

impl<T> From<T> for Nullable<T> {
    fn from(value: T) -> Self {
        Self::Value(value)
    }
}

/// # Errors
/// Returns a validation error unless `page >= 1` and `1 <= limit <= 100`.
#[allow(clippy::result_large_err)]
pub fn validate_pagination(page: u32, limit: u32) -> Result<()> {
    if page == 0 {
        return Err(Error::Validation("page must be at least 1".to_string()));
    }
    if limit == 0 || limit > MAX_LIMIT {
        return Err(Error::Validation(format!(
            "limit must be between 1 and {MAX_LIMIT}, got {limit}"
        )));
    }
    Ok(())
}

#[allow(clippy::result_large_err)]
pub(crate) fn require_non_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::Validation(format!("`{field}` must not be empty")));
    }
    Ok(())
}
