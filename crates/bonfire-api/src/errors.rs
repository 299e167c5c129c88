// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of error codes clients may branch on. Wire form is
/// snake_case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum ApiErrorCode {
    InvalidPayload,
    InvalidId,
    NotFound,
    Storage,
}

impl ApiErrorCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidPayload => "invalid_payload",
            Self::InvalidId => "invalid_id",
            Self::NotFound => "not_found",
            Self::Storage => "storage",
        }
    }
}

impl fmt::Display for ApiErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of the error envelope. Serialized under the top-level `"error"`
/// key by the server; the message is human text and not a stable contract,
/// the code is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiError {
    pub code: ApiErrorCode,
    pub message: String,
}

impl ApiError {
    #[must_use]
    pub fn new(code: ApiErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn invalid_payload(message: impl Into<String>) -> Self {
        Self::new(ApiErrorCode::InvalidPayload, message)
    }

    #[must_use]
    pub fn invalid_id(value: &str) -> Self {
        Self::new(ApiErrorCode::InvalidId, format!("invalid item id: {value}"))
    }

    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ApiErrorCode::NotFound, message)
    }

    /// Storage failures always carry this fixed message; the underlying
    /// reason stays in the server logs.
    #[must_use]
    pub fn storage() -> Self {
        Self::new(ApiErrorCode::Storage, "storage operation failed")
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

const _: fn() = || {
    fn assert_traits<T: Serialize + for<'de> Deserialize<'de> + Send + Sync>() {}
    assert_traits::<ApiErrorCode>();
    assert_traits::<ApiError>();
};

#[cfg(test)]
mod tests {
    use super::{ApiError, ApiErrorCode};
    use serde_json::json;

    #[test]
    fn codes_serialize_as_snake_case() {
        for (code, wire) in [
            (ApiErrorCode::InvalidPayload, "invalid_payload"),
            (ApiErrorCode::InvalidId, "invalid_id"),
            (ApiErrorCode::NotFound, "not_found"),
            (ApiErrorCode::Storage, "storage"),
        ] {
            let encoded = serde_json::to_value(code).expect("encode code");
            assert_eq!(encoded, json!(wire));
            assert_eq!(code.as_str(), wire);
        }
    }

    #[test]
    fn envelope_body_round_trips() {
        let err = ApiError::invalid_payload("must provide required data for ds1 weapon");
        let encoded = serde_json::to_value(&err).expect("encode error");
        assert_eq!(
            encoded,
            json!({
                "code": "invalid_payload",
                "message": "must provide required data for ds1 weapon"
            })
        );
        let decoded: ApiError =
            serde_json::from_value(encoded).expect("decode error");
        assert_eq!(decoded, err);
    }

    #[test]
    fn envelope_body_rejects_unknown_fields() {
        let raw = r#"{"code":"storage","message":"x","hint":"nope"}"#;
        assert!(serde_json::from_str::<ApiError>(raw).is_err());
    }

    #[test]
    fn storage_message_is_fixed_and_reason_free() {
        assert_eq!(
            ApiError::storage().message,
            "storage operation failed"
        );
        assert_eq!(
            ApiError::invalid_id("abc").message,
            "invalid item id: abc"
        );
    }
}
