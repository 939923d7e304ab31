//! Application configuration loaded from environment variables.

use notifications::FailurePolicy;

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format: {other}")),
        }
    }
}

/// Application configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `RUST_LOG`: tracing filter directive (default: `"info"`)
/// - `LOG_FORMAT`: `pretty` or `json` (default: `pretty`)
/// - `APP_NAME`: prefix of domain event log lines (default: `"todo-events"`)
/// - `DISPATCH_FAILURE_POLICY`: `continue` or `abort` (default: `continue`)
/// - `SEED_DEFAULT_DATA`: seed the default list on startup (default: `true`)
///
/// Values that fail to parse fall back to their default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub log_level: String,
    pub log_format: LogFormat,
    pub app_name: String,
    pub failure_policy: FailurePolicy,
    pub seed_default_data: bool,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            log_level: lookup("RUST_LOG")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.log_level),
            log_format: lookup("LOG_FORMAT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.log_format),
            app_name: lookup("APP_NAME")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.app_name),
            failure_policy: lookup("DISPATCH_FAILURE_POLICY")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.failure_policy),
            seed_default_data: lookup("SEED_DEFAULT_DATA")
                .and_then(|v| parse_flag(&v))
                .unwrap_or(defaults.seed_default_data),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            app_name: "todo-events".to_string(),
            failure_policy: FailurePolicy::Continue,
            seed_default_data: true,
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(config.app_name, "todo-events");
        assert_eq!(config.failure_policy, FailurePolicy::Continue);
        assert!(config.seed_default_data);
    }

    #[test]
    fn test_empty_environment_gives_defaults() {
        assert_eq!(Config::from_lookup(lookup_from(&[])), Config::default());
    }

    #[test]
    fn test_reads_every_variable() {
        let config = Config::from_lookup(lookup_from(&[
            ("RUST_LOG", "debug,store=trace"),
            ("LOG_FORMAT", "JSON"),
            ("APP_NAME", "MTT_backend"),
            ("DISPATCH_FAILURE_POLICY", "abort"),
            ("SEED_DEFAULT_DATA", "no"),
        ]));

        assert_eq!(config.log_level, "debug,store=trace");
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.app_name, "MTT_backend");
        assert_eq!(config.failure_policy, FailurePolicy::Abort);
        assert!(!config.seed_default_data);
    }

    #[test]
    fn test_unparseable_values_fall_back() {
        let config = Config::from_lookup(lookup_from(&[
            ("LOG_FORMAT", "xml"),
            ("APP_NAME", "   "),
            ("DISPATCH_FAILURE_POLICY", "retry"),
            ("SEED_DEFAULT_DATA", "maybe"),
        ]));

        assert_eq!(config, Config::default());
    }
}
