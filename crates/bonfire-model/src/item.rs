// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Items travel and persist as schemaless JSON objects; the model never
/// forces a struct shape onto them. Field vocabularies in [`crate::schema`]
/// describe which keys count toward validation, not which keys may exist.
pub type Document = serde_json::Map<String, serde_json::Value>;

/// Length of an item identifier in characters.
pub const ITEM_ID_LEN: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError(pub String);

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Error for ValidationError {}

/// Server-assigned item identity: exactly 32 lowercase hex characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Parses an identifier taken from a request path. Uppercase hex is
    /// rejected so that the stored form stays canonical.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        if input.len() != ITEM_ID_LEN {
            return Err(ValidationError(format!(
                "item id must be {ITEM_ID_LEN} characters, got {}",
                input.len()
            )));
        }
        if !input
            .chars()
            .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase())
        {
            return Err(ValidationError(
                "item id must be lowercase hex".to_string(),
            ));
        }
        Ok(Self(input.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

const _: fn() = || {
    fn assert_traits<T: Serialize + for<'de> Deserialize<'de> + Send + Sync>() {}
    assert_traits::<ItemId>();
};
