//! Tunables for detection, placement, timing and insertion.
//!
//! The defaults are empirically tuned thresholds, not correctness
//! constraints; everything can be overridden from a TOML file with one table
//! per concern:
//!
//! ```toml
//! [viability]
//! min_width = 240.0
//!
//! [insertion]
//! mode = "append"
//! ```

use crate::error::ConfigError;
use core_types::Millis;
use serde::Deserialize;
use std::path::Path;

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct PickerConfig {
    pub viability: ViabilityConfig,
    pub scoring: ScoringConfig,
    pub overlay: OverlayConfig,
    pub timing: TimingConfig,
    pub insertion: InsertionConfig,
}

impl PickerConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(ConfigError::Parse)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}

/// Minimum size and maximum distance from the viewport center for a
/// candidate to be scored at all.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ViabilityConfig {
    pub min_width: f32,
    pub min_height: f32,
    /// Fraction of the viewport dimension, per axis.
    pub max_center_offset: f32,
}

impl Default for ViabilityConfig {
    fn default() -> Self {
        Self {
            min_width: 200.0,
            min_height: 30.0,
            max_center_offset: 0.4,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ScoringConfig {
    pub baseline: f32,
    /// Area band (px²) that counts as a plausible chat input.
    pub area_min: f32,
    pub area_max: f32,
    pub area_bonus: f32,
    /// Awarded in full at the viewport center, falling to zero at the corners.
    pub centrality_bonus: f32,
    pub placeholder_bonus: f32,
    pub test_id_bonus: f32,
    pub contenteditable_bonus: f32,
    pub lower_half_bonus: f32,
    /// Element centers below this fraction of the viewport height get `lower_half_bonus`.
    pub lower_fraction: f32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            baseline: 100.0,
            area_min: 20_000.0,
            area_max: 600_000.0,
            area_bonus: 30.0,
            centrality_bonus: 40.0,
            placeholder_bonus: 15.0,
            test_id_bonus: 10.0,
            contenteditable_bonus: 10.0,
            lower_half_bonus: 20.0,
            lower_fraction: 0.5,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct OverlayConfig {
    /// Minimum distance kept between the overlay and the viewport edges.
    pub margin: f32,
    pub toggle_size: f32,
    pub dropdown_width: f32,
    pub dropdown_max_height: f32,
    pub row_height: f32,
    /// Below this much free space under the toggle the dropdown may open upward.
    pub dropdown_min_space: f32,
    /// Fallback toggle position, measured from the viewport's bottom-right corner.
    pub fallback_x: f32,
    pub fallback_y: f32,
    /// Space between the toggle and the dropdown.
    pub gap: f32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            margin: 8.0,
            toggle_size: 32.0,
            dropdown_width: 320.0,
            dropdown_max_height: 480.0,
            row_height: 28.0,
            dropdown_min_space: 400.0,
            fallback_x: 20.0,
            fallback_y: 20.0,
            gap: 6.0,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct TimingConfig {
    pub tick_interval_ms: Millis,
    /// Overrides the site profile's init-delay hint.
    pub startup_delay_ms: Option<Millis>,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 500,
            startup_delay_ms: None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InsertionMode {
    /// The template replaces whatever is in the target.
    #[default]
    Replace,
    /// The template is appended after the existing content and `separator`.
    Append,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct InsertionConfig {
    pub mode: InsertionMode,
    pub separator: String,
}

impl Default for InsertionConfig {
    fn default() -> Self {
        Self {
            mode: InsertionMode::Replace,
            separator: "\n\n".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        assert_eq!(PickerConfig::from_toml_str("").expect("parse"), PickerConfig::default());
    }

    #[test]
    fn partial_tables_override_only_named_fields() {
        let cfg = PickerConfig::from_toml_str(
            r#"
            [viability]
            min_width = 240.0

            [timing]
            startup_delay_ms = 0

            [insertion]
            mode = "append"
            "#,
        )
        .expect("parse");
        assert_eq!(cfg.viability.min_width, 240.0);
        assert_eq!(cfg.viability.min_height, 30.0);
        assert_eq!(cfg.timing.startup_delay_ms, Some(0));
        assert_eq!(cfg.timing.tick_interval_ms, 500);
        assert_eq!(cfg.insertion.mode, InsertionMode::Append);
        assert_eq!(cfg.insertion.separator, "\n\n");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = PickerConfig::from_toml_str("[viability]\nmin_widht = 1.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = PickerConfig::from_path(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
