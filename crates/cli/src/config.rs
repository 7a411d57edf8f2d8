//! Application configuration loaded from environment variables.

use domain::Money;
use serde::Serialize;
use workflow::WorkflowConfig;

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Some(LogFormat::Pretty),
            "json" => Some(LogFormat::Json),
            _ => None,
        }
    }
}

/// Driver configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `RUST_LOG`: tracing filter directive (default: `"info"`)
/// - `LOG_FORMAT`: `pretty` or `json` (default: `pretty`)
/// - `DISCOUNT_PERCENTAGE`: percentage discount step (default: `10`)
/// - `DISCOUNT_FIXED_CENTS`: fixed discount step in cents (default: `5000`)
/// - `PRINT_METRICS`: print Prometheus metrics after the run (default: `false`)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Config {
    pub log_level: String,
    pub log_format: LogFormat,
    pub percentage_discount: f64,
    pub fixed_discount_cents: i64,
    pub print_metrics: bool,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through `lookup`, falling back to defaults for
    /// missing or malformed values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            log_level: lookup("RUST_LOG").unwrap_or(defaults.log_level),
            log_format: lookup("LOG_FORMAT")
                .and_then(|v| LogFormat::parse(&v))
                .unwrap_or(defaults.log_format),
            percentage_discount: lookup("DISCOUNT_PERCENTAGE")
                .and_then(|v| v.trim().parse::<f64>().ok())
                .filter(|p| p.is_finite())
                .unwrap_or(defaults.percentage_discount),
            fixed_discount_cents: lookup("DISCOUNT_FIXED_CENTS")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.fixed_discount_cents),
            print_metrics: lookup("PRINT_METRICS")
                .and_then(|v| parse_bool(&v))
                .unwrap_or(defaults.print_metrics),
        }
    }

    /// Returns the discount settings for the workflow service.
    pub fn workflow_config(&self) -> WorkflowConfig {
        WorkflowConfig {
            percentage_discount: self.percentage_discount,
            fixed_discount: Money::from_cents(self.fixed_discount_cents),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let workflow = WorkflowConfig::default();
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            percentage_discount: workflow.percentage_discount,
            fixed_discount_cents: workflow.fixed_discount.cents(),
            print_metrics: false,
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
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
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(config.percentage_discount, 10.0);
        assert_eq!(config.fixed_discount_cents, 5000);
        assert!(!config.print_metrics);
    }

    #[test]
    fn test_empty_environment_gives_defaults() {
        assert_eq!(Config::from_lookup(|_| None), Config::default());
    }

    #[test]
    fn test_reads_all_variables() {
        let config = Config::from_lookup(lookup_from(&[
            ("RUST_LOG", "debug"),
            ("LOG_FORMAT", "JSON"),
            ("DISCOUNT_PERCENTAGE", "15.5"),
            ("DISCOUNT_FIXED_CENTS", "2500"),
            ("PRINT_METRICS", "yes"),
        ]));

        assert_eq!(config.log_level, "debug");
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.percentage_discount, 15.5);
        assert_eq!(config.fixed_discount_cents, 2500);
        assert!(config.print_metrics);
    }

    #[test]
    fn test_malformed_values_fall_back() {
        let config = Config::from_lookup(lookup_from(&[
            ("LOG_FORMAT", "xml"),
            ("DISCOUNT_PERCENTAGE", "ten"),
            ("DISCOUNT_FIXED_CENTS", "5.5"),
            ("PRINT_METRICS", "maybe"),
        ]));

        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_non_finite_percentage_falls_back() {
        for value in ["NaN", "inf", "-infinity"] {
            let config = Config::from_lookup(lookup_from(&[("DISCOUNT_PERCENTAGE", value)]));
            assert_eq!(config.percentage_discount, 10.0, "value {value}");
        }
    }

    #[test]
    fn test_workflow_config() {
        let config = Config {
            fixed_discount_cents: 1234,
            percentage_discount: 20.0,
            ..Config::default()
        };
        let workflow = config.workflow_config();
        assert_eq!(workflow.percentage_discount, 20.0);
        assert_eq!(workflow.fixed_discount.to_string(), "$12.34");
    }
}
