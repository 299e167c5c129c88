// SPDX-License-Identifier: Apache-2.0

use serde::Serialize;

/// Request-path configuration for the catalog service. Startup-only
/// concerns (bind address, store URI) are read and validated in `main`
/// and never travel with requests.
#[derive(Debug, Clone, Serialize)]
pub struct ServerConfig {
    /// Hard cap on request body size, enforced before JSON parsing.
    pub max_body_bytes: usize,
    /// When set, `/readyz` reports ready only while the store answers
    /// pings. Disabled only in tests that run without a working store.
    pub readiness_requires_store: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: 64 * 1024,
            readiness_requires_store: true,
        }
    }
}

/// Startup contract for values that would otherwise fail far from their
/// source. Violations are fatal before the listener binds.
pub fn validate_startup_config_contract(api: &ServerConfig) -> Result<(), String> {
    if api.max_body_bytes == 0 {
        return Err("max body bytes must be greater than zero".to_string());
    }
    if api.max_body_bytes > 16 * 1024 * 1024 {
        return Err(format!(
            "max body bytes {} exceeds the 16 MiB ceiling",
            api.max_body_bytes
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{validate_startup_config_contract, ServerConfig};

    #[test]
    fn default_config_passes_the_contract() {
        let api = ServerConfig::default();
        assert_eq!(api.max_body_bytes, 65536);
        assert!(api.readiness_requires_store);
        validate_startup_config_contract(&api).expect("default config");
    }

    #[test]
    fn zero_body_cap_is_rejected() {
        let api = ServerConfig {
            max_body_bytes: 0,
            ..ServerConfig::default()
        };
        let err = validate_startup_config_contract(&api).expect_err("zero cap");
        assert!(err.contains("greater than zero"));
    }

    #[test]
    fn oversized_body_cap_is_rejected() {
        let api = ServerConfig {
            max_body_bytes: 64 * 1024 * 1024,
            ..ServerConfig::default()
        };
        let err = validate_startup_config_contract(&api).expect_err("oversized cap");
        assert!(err.contains("ceiling"));
    }
}
