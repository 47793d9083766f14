//! Simulated-latency configuration.
//!
//! # Responsibility
//! - Hold every fixed delay used to simulate asynchronous behavior.
//! - Apply `ELDEREASE_*_MS` environment overrides.
//!
//! # Invariants
//! - `Default` reproduces the stock app timings.
//! - Override values must be non-negative integers (milliseconds).

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const ENV_CHAT_LISTEN_WINDOW_MS: &str = "ELDEREASE_CHAT_LISTEN_WINDOW_MS";
pub const ENV_DASHBOARD_LISTEN_WINDOW_MS: &str = "ELDEREASE_DASHBOARD_LISTEN_WINDOW_MS";
pub const ENV_REPLY_DELAY_MS: &str = "ELDEREASE_REPLY_DELAY_MS";
pub const ENV_SPEAKING_DELAY_MS: &str = "ELDEREASE_SPEAKING_DELAY_MS";
pub const ENV_SPEAKING_DURATION_MS: &str = "ELDEREASE_SPEAKING_DURATION_MS";
pub const ENV_ALERT_SEND_DELAY_MS: &str = "ELDEREASE_ALERT_SEND_DELAY_MS";

/// Fixed delays, all in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationTimings {
    pub chat_listen_window_ms: i64,
    pub dashboard_listen_window_ms: i64,
    pub reply_delay_ms: i64,
    pub speaking_delay_ms: i64,
    pub speaking_duration_ms: i64,
    pub alert_send_delay_ms: i64,
}

impl Default for SimulationTimings {
    fn default() -> Self {
        Self {
            chat_listen_window_ms: 5_000,
            dashboard_listen_window_ms: 3_000,
            reply_delay_ms: 1_000,
            speaking_delay_ms: 1_000,
            speaking_duration_ms: 3_000,
            alert_send_delay_ms: 1_500,
        }
    }
}

/// Configuration override errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidDuration { key: &'static str, value: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDuration { key, value } => write!(
                f,
                "`{key}` must be a non-negative integer millisecond value, got `{value}`"
            ),
        }
    }
}

impl Error for ConfigError {}

impl SimulationTimings {
    /// Defaults with overrides read from process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from `lookup`; blank values are ignored.
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let slots: [(&'static str, &mut i64); 6] = [
            (ENV_CHAT_LISTEN_WINDOW_MS, &mut self.chat_listen_window_ms),
            (
                ENV_DASHBOARD_LISTEN_WINDOW_MS,
                &mut self.dashboard_listen_window_ms,
            ),
            (ENV_REPLY_DELAY_MS, &mut self.reply_delay_ms),
            (ENV_SPEAKING_DELAY_MS, &mut self.speaking_delay_ms),
            (ENV_SPEAKING_DURATION_MS, &mut self.speaking_duration_ms),
            (ENV_ALERT_SEND_DELAY_MS, &mut self.alert_send_delay_ms),
        ];

        for (key, slot) in slots {
            let Some(raw) = lookup(key) else {
                continue;
            };
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                continue;
            }
            *slot = parse_duration_ms(key, trimmed)?;
        }

        Ok(self)
    }
}

fn parse_duration_ms(key: &'static str, value: &str) -> Result<i64, ConfigError> {
    match value.parse::<i64>() {
        Ok(parsed) if parsed >= 0 => Ok(parsed),
        _ => Err(ConfigError::InvalidDuration {
            key,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, SimulationTimings, ENV_ALERT_SEND_DELAY_MS, ENV_REPLY_DELAY_MS};

    #[test]
    fn defaults_match_stock_timings() {
        let timings = SimulationTimings::default();
        assert_eq!(timings.chat_listen_window_ms, 5_000);
        assert_eq!(timings.dashboard_listen_window_ms, 3_000);
        assert_eq!(timings.reply_delay_ms, 1_000);
        assert_eq!(timings.speaking_delay_ms, 1_000);
        assert_eq!(timings.speaking_duration_ms, 3_000);
        assert_eq!(timings.alert_send_delay_ms, 1_500);
    }

    #[test]
    fn overrides_apply_and_blank_values_are_ignored() {
        let timings = SimulationTimings::default()
            .with_overrides(|key| match key {
                ENV_REPLY_DELAY_MS => Some(" 250 ".to_string()),
                ENV_ALERT_SEND_DELAY_MS => Some("   ".to_string()),
                _ => None,
            })
            .expect("overrides should parse");
        assert_eq!(timings.reply_delay_ms, 250);
        assert_eq!(timings.alert_send_delay_ms, 1_500);
    }

    #[test]
    fn rejects_negative_and_non_numeric_overrides() {
        let err = SimulationTimings::default()
            .with_overrides(|key| (key == ENV_REPLY_DELAY_MS).then(|| "-5".to_string()))
            .expect_err("negative delay must fail");
        assert_eq!(
            err,
            ConfigError::InvalidDuration {
                key: ENV_REPLY_DELAY_MS,
                value: "-5".to_string(),
            }
        );

        let err = SimulationTimings::default()
            .with_overrides(|key| (key == ENV_REPLY_DELAY_MS).then(|| "1s".to_string()))
            .expect_err("unit suffix must fail");
        assert!(err.to_string().contains("ELDEREASE_REPLY_DELAY_MS"));
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let timings: SimulationTimings =
            serde_json::from_str(r#"{ "reply_delay_ms": 10 }"#).expect("partial config");
        assert_eq!(timings.reply_delay_ms, 10);
        assert_eq!(timings.chat_listen_window_ms, 5_000);
    }
}
