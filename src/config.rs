use std::path::{Path, PathBuf};

use serde::Deserialize;

pub const DEFAULT_SOURCE: &str = "libinput_touch_parser";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("{field} {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Recognizer tuning. Durations are seconds, distances millimeters, angles
/// degrees.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GestureConfig {
    pub source: String,
    pub seconds_to_keep: f64,
    pub tap_hold_threshold: f64,
    pub jitter_threshold: f64,
    pub axis_threshold: f64,
    pub movement_angle_threshold: f64,
    pub direction_angle_width: f64,
    pub angle_threshold: f64,
    pub event_expire_time: f64,
    pub timer_interval: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            source: DEFAULT_SOURCE.to_string(),
            seconds_to_keep: 100.0,
            tap_hold_threshold: 0.5,
            jitter_threshold: 5.0,
            axis_threshold: 2.0,
            movement_angle_threshold: 30.0,
            direction_angle_width: 45.0,
            angle_threshold: 0.1,
            event_expire_time: 2.0,
            timer_interval: 0.1,
        }
    }
}

/// Config embedded in a larger file under a `[touchscreen]` table.
#[derive(Deserialize)]
struct SectionedConfig {
    touchscreen: GestureConfig,
}

impl GestureConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let table: toml::Table = toml::from_str(raw)?;
        let config = if table.contains_key("touchscreen") {
            toml::from_str::<SectionedConfig>(raw)?.touchscreen
        } else {
            toml::from_str::<GestureConfig>(raw)?
        };
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.source.trim().is_empty() {
            return Err(invalid("source", "must not be empty"));
        }

        for (field, value) in [
            ("seconds_to_keep", self.seconds_to_keep),
            ("tap_hold_threshold", self.tap_hold_threshold),
            ("jitter_threshold", self.jitter_threshold),
            ("axis_threshold", self.axis_threshold),
            ("movement_angle_threshold", self.movement_angle_threshold),
            ("direction_angle_width", self.direction_angle_width),
            ("event_expire_time", self.event_expire_time),
            ("timer_interval", self.timer_interval),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(invalid(field, "must be a positive number"));
            }
        }

        if !self.angle_threshold.is_finite() || self.angle_threshold < 0.0 {
            return Err(invalid("angle_threshold", "must be >= 0"));
        }
        if self.direction_angle_width > 90.0 {
            return Err(invalid(
                "direction_angle_width",
                "must be <= 90 so direction sectors do not overlap",
            ));
        }
        if self.movement_angle_threshold > 180.0 {
            return Err(invalid("movement_angle_threshold", "must be <= 180"));
        }
        Ok(())
    }

    pub fn keep_ms(&self) -> u64 {
        secs_to_ms(self.seconds_to_keep)
    }

    pub fn tap_hold_threshold_ms(&self) -> u64 {
        secs_to_ms(self.tap_hold_threshold)
    }

    pub fn event_expire_ms(&self) -> u64 {
        secs_to_ms(self.event_expire_time)
    }

    pub fn timer_interval_ms(&self) -> u64 {
        secs_to_ms(self.timer_interval).max(1)
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.to_string(),
    }
}

pub fn secs_to_ms(seconds: f64) -> u64 {
    if !seconds.is_finite() || seconds <= 0.0 {
        return 0;
    }
    (seconds * 1000.0).round() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = GestureConfig::default();
        assert_eq!(config.source, "libinput_touch_parser");
        assert_eq!(config.keep_ms(), 100_000);
        assert_eq!(config.tap_hold_threshold_ms(), 500);
        assert_eq!(config.event_expire_ms(), 2_000);
        assert_eq!(config.timer_interval_ms(), 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_document_yields_defaults() {
        let config = GestureConfig::from_toml_str("").expect("empty config is valid");
        assert_eq!(config, GestureConfig::default());
    }

    #[test]
    fn sectioned_and_flat_documents_are_equivalent() {
        let flat = GestureConfig::from_toml_str("jitter_threshold = 3.5\n").expect("flat");
        let sectioned =
            GestureConfig::from_toml_str("[touchscreen]\njitter_threshold = 3.5\n").expect("table");
        assert_eq!(flat, sectioned);
        assert_eq!(flat.jitter_threshold, 3.5);
    }

    #[test]
    fn rejects_overlapping_sectors() {
        let err = GestureConfig::from_toml_str("direction_angle_width = 120.0\n")
            .expect_err("sectors overlap");
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "direction_angle_width",
                ..
            }
        ));
    }

    #[test]
    fn secs_to_ms_rounds_and_clamps() {
        assert_eq!(secs_to_ms(0.5), 500);
        assert_eq!(secs_to_ms(0.0004), 0);
        assert_eq!(secs_to_ms(-1.0), 0);
        assert_eq!(secs_to_ms(f64::NAN), 0);
    }
}
