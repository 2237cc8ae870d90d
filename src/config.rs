//! Tool configuration.
//!
//! Everything has a default, so `install()` with no argument behaves like the
//! classic bookmarklet. A host page may pass a JSON object overriding any
//! subset of fields; unknown fields are rejected so typos surface in the log.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::{
    BANNER_FADE_MS, BANNER_TEXT, BANNER_VISIBLE_MS, CONTAINER_MIN_SIDE_PX, CONTAINER_TAGS, FLOATING_Z_INDEX,
    FORBIDDEN_OUTLINE, ID_PREFIX, SKIPPED_TAGS, SNAP_THRESHOLD_PX, VIEWPORT_PADDING_PX,
};
use crate::error::ConfigError;

/// Class names the tool toggles. The stylesheet in [`crate::cosmetics`] keys
/// off the same names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Markers {
    pub hover: String,
    pub dragging: String,
    pub floating: String,
    /// Elements carrying this class are restricted drop zones.
    pub restricted: String,
    pub instrumented: String,
    pub banner: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            hover: "hover-highlight".into(),
            dragging: "dragging".into(),
            floating: "floating-freely".into(),
            restricted: "no-drop".into(),
            instrumented: "free-float-ready".into(),
            banner: "layout-tool-alert".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BannerConfig {
    pub enabled: bool,
    pub text: String,
    pub visible_ms: u32,
    pub fade_ms: u32,
}

impl Default for BannerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            text: BANNER_TEXT.into(),
            visible_ms: BANNER_VISIBLE_MS,
            fade_ms: BANNER_FADE_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DragConfig {
    pub snap_threshold: f64,
    pub viewport_padding: f64,
    pub container_min_side: f64,
    pub container_tags: Vec<String>,
    pub skipped_tags: Vec<String>,
    pub id_prefix: String,
    pub z_index: i32,
    pub forbidden_outline: String,
    /// Wire the Escape key to the cancel transition while a drag is active.
    pub cancel_on_escape: bool,
    pub log_level: String,
    pub markers: Markers,
    pub banner: BannerConfig,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            snap_threshold: SNAP_THRESHOLD_PX,
            viewport_padding: VIEWPORT_PADDING_PX,
            container_min_side: CONTAINER_MIN_SIDE_PX,
            container_tags: CONTAINER_TAGS.iter().map(|t| (*t).to_owned()).collect(),
            skipped_tags: SKIPPED_TAGS.iter().map(|t| (*t).to_owned()).collect(),
            id_prefix: ID_PREFIX.into(),
            z_index: FLOATING_Z_INDEX,
            forbidden_outline: FORBIDDEN_OUTLINE.into(),
            cancel_on_escape: false,
            log_level: "info".into(),
            markers: Markers::default(),
            banner: BannerConfig::default(),
        }
    }
}

impl DragConfig {
    /// Parse a JSON override object and validate the result.
    ///
    /// # Errors
    ///
    /// Returns `Parse` for malformed JSON or unknown fields and `Invalid` for
    /// values that fail [`DragConfig::validate`].
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns `Invalid` naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_distance("snap_threshold", self.snap_threshold)?;
        check_distance("viewport_padding", self.viewport_padding)?;
        check_distance("container_min_side", self.container_min_side)?;
        if self.id_prefix.is_empty() {
            return Err(invalid("id_prefix", "must not be empty"));
        }
        if self.id_prefix.chars().any(char::is_whitespace) {
            return Err(invalid("id_prefix", "must not contain whitespace"));
        }
        let m = &self.markers;
        for (field, name) in [
            ("markers.hover", &m.hover),
            ("markers.dragging", &m.dragging),
            ("markers.floating", &m.floating),
            ("markers.restricted", &m.restricted),
            ("markers.instrumented", &m.instrumented),
            ("markers.banner", &m.banner),
        ] {
            check_class_name(field, name)?;
        }
        self.level()?;
        Ok(())
    }

    /// The configured log level.
    ///
    /// # Errors
    ///
    /// Returns `Invalid` when `log_level` is not a `log::Level` name.
    pub fn level(&self) -> Result<log::Level, ConfigError> {
        log::Level::from_str(&self.log_level).map_err(|_| invalid("log_level", format!("unknown level `{}`", self.log_level)))
    }

    #[must_use]
    pub fn is_skipped_tag(&self, tag: &str) -> bool {
        self.skipped_tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid { field, reason: reason.into() }
}

fn check_distance(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(invalid(field, "must be finite"));
    }
    if value < 0.0 {
        return Err(invalid(field, format!("must be non-negative, got {value}")));
    }
    Ok(())
}

fn check_class_name(field: &'static str, name: &str) -> Result<(), ConfigError> {
    if name.is_empty() {
        return Err(invalid(field, "must not be empty"));
    }
    if name.chars().any(char::is_whitespace) {
        return Err(invalid(field, format!("`{name}` is not a single class name")));
    }
    Ok(())
}
