//! Session configuration from environment variables.

use std::env;

/// Protocol version reported in every `welcome`
pub const PROTOCOL_VERSION: &str = "1.0.0";

const DEFAULT_LOG_FILTER: &str = "info";

/// Session configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Send an observation after every accepted state change.
    pub stream_observations: bool,
    /// `tracing` filter directive for the binary's subscriber.
    pub log_filter: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            stream_observations: true,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl SessionConfig {
    /// Create from `BULLING_*` environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Create from an arbitrary key lookup, falling back to defaults for
    /// missing or unparsable values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let stream_observations = lookup("BULLING_STREAM_OBSERVATIONS")
            .and_then(|v| parse_flag(&v))
            .unwrap_or(defaults.stream_observations);

        let log_filter = lookup("BULLING_LOG")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.log_filter);

        Self {
            stream_observations,
            log_filter,
        }
    }
}

fn parse_flag(v: &str) -> Option<bool> {
    match v.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = SessionConfig::from_lookup(|_| None);
        assert_eq!(config, SessionConfig::default());
        assert!(config.stream_observations);
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_stream_observations_flag() {
        let config = SessionConfig::from_lookup(lookup_from(&[("BULLING_STREAM_OBSERVATIONS", "0")]));
        assert!(!config.stream_observations);

        let config =
            SessionConfig::from_lookup(lookup_from(&[("BULLING_STREAM_OBSERVATIONS", " FALSE ")]));
        assert!(!config.stream_observations);

        let config =
            SessionConfig::from_lookup(lookup_from(&[("BULLING_STREAM_OBSERVATIONS", "maybe")]));
        assert!(config.stream_observations);
    }

    #[test]
    fn test_log_filter() {
        let config = SessionConfig::from_lookup(lookup_from(&[("BULLING_LOG", "bulling_core=debug")]));
        assert_eq!(config.log_filter, "bulling_core=debug");

        let config = SessionConfig::from_lookup(lookup_from(&[("BULLING_LOG", "  ")]));
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_from_env_does_not_panic() {
        let _config = SessionConfig::from_env();
    }
}
