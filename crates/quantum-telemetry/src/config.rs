//! Telemetry configuration from environment variables.

use std::env;

/// Subsystem identifier used when none is configured.
pub const DEFAULT_SUBSYSTEM_ID: &str = "18";

/// Logging configuration for a keyshare node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// Service name attached to every log line
    pub service_name: String,

    /// Subsystem identifier
    pub subsystem_id: String,

    /// Log filter directive (trace, debug, info, warn, error, or a full `EnvFilter`)
    pub log_level: String,

    /// Emit JSON lines instead of human-readable output
    pub json_logs: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "quantum-chain".to_string(),
            subsystem_id: DEFAULT_SUBSYSTEM_ID.to_string(),
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `QC_SERVICE_NAME`: Service name (default: quantum-chain)
    /// - `QC_SUBSYSTEM_ID`: Subsystem ID (default: 18)
    /// - `QC_LOG_LEVEL` or `RUST_LOG`: Log filter (default: info)
    /// - `QC_LOG_JSON`: Enable JSON logs (default: false)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            service_name: env::var("QC_SERVICE_NAME").unwrap_or(defaults.service_name),

            subsystem_id: env::var("QC_SUBSYSTEM_ID").unwrap_or(defaults.subsystem_id),

            log_level: env::var("QC_LOG_LEVEL")
                .or_else(|_| env::var("RUST_LOG"))
                .unwrap_or(defaults.log_level),

            json_logs: env::var("QC_LOG_JSON")
                .map(|v| parse_flag(&v))
                .unwrap_or(defaults.json_logs),
        }
    }

    /// Get the full service name including subsystem.
    pub fn full_service_name(&self) -> String {
        format!("{}-{}", self.service_name, self.subsystem_id)
    }
}

fn parse_flag(value: &str) -> bool {
    value.eq_ignore_ascii_case("true") || value == "1"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TelemetryConfig::default();
        assert_eq!(config.subsystem_id, "18");
        assert_eq!(config.log_level, "info");
        assert!(!config.json_logs);
    }

    #[test]
    fn test_full_service_name() {
        let config = TelemetryConfig::default();
        assert_eq!(config.full_service_name(), "quantum-chain-18");
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("TRUE"));
        assert!(parse_flag("1"));
        assert!(!parse_flag("false"));
        assert!(!parse_flag("yes"));
    }
}
