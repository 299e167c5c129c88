#![forbid(unsafe_code)]
//! Wire-level error vocabulary for the bonfire catalog API. Every non-2xx
//! JSON response is `{"error": {"code": ..., "message": ...}}` with a code
//! from the closed [`ApiErrorCode`] set.

mod errors;

pub use errors::{ApiError, ApiErrorCode};

pub const CRATE_NAME: &str = "bonfire-api";
