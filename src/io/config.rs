// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Application configuration.
//!
//! Every setting has a built-in default; a YAML or JSON file can override
//! any subset of them. The file is taken from the first command-line
//! argument, or from `FOLIO_CONFIG` when no argument is given.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::navigation::navigator::{NavigatorOptions, DEFAULT_NAV_ALLOWANCE};
use crate::navigation::SelectionPolicy;
use crate::tracking::tracker::DEFAULT_GRACE;
use crate::tracking::{ObservationConfig, Support};
use crate::util::geometry::RootMargin;

/// Environment variable naming a config file.
pub const CONFIG_ENV: &str = "FOLIO_CONFIG";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window: WindowConfig,
    /// Directory image references are resolved against
    pub assets_dir: PathBuf,
    pub grace_period_ms: u64,
    /// Space kept clear for the nav bar when centering a section
    pub nav_allowance: f32,
    /// When false, every tracker runs without intersection observation
    pub observe_visibility: bool,
    pub selection_policy: SelectionPolicy,
    /// Screenshot rows
    #[serde(deserialize_with = "reveal_slot")]
    pub reveal: ObservationConfig,
    /// Section enter/exit animation
    #[serde(deserialize_with = "section_slot")]
    pub sections: ObservationConfig,
    /// Active section detection
    #[serde(deserialize_with = "active_section_slot")]
    pub active_section: ObservationConfig,
}

/// An observation block as written in a config file. Fields left out keep
/// the preset of the slot the block belongs to.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ObservationOverrides {
    threshold: Option<f32>,
    root_margin: Option<RootMargin>,
}

impl ObservationOverrides {
    fn over(self, preset: ObservationConfig) -> ObservationConfig {
        // Not clamped here so `validate` can reject out-of-range values
        ObservationConfig {
            threshold: self.threshold.unwrap_or(preset.threshold),
            root_margin: self.root_margin.unwrap_or(preset.root_margin),
        }
    }
}

fn reveal_slot<'de, D: Deserializer<'de>>(deserializer: D) -> Result<ObservationConfig, D::Error> {
    ObservationOverrides::deserialize(deserializer).map(|o| o.over(ObservationConfig::reveal()))
}

fn section_slot<'de, D: Deserializer<'de>>(deserializer: D) -> Result<ObservationConfig, D::Error> {
    ObservationOverrides::deserialize(deserializer).map(|o| o.over(ObservationConfig::section()))
}

fn active_section_slot<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<ObservationConfig, D::Error> {
    ObservationOverrides::deserialize(deserializer).map(|o| o.over(ObservationConfig::center_band()))
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            assets_dir: PathBuf::from("assets"),
            grace_period_ms: DEFAULT_GRACE.as_millis() as u64,
            nav_allowance: DEFAULT_NAV_ALLOWANCE,
            observe_visibility: true,
            selection_policy: SelectionPolicy::default(),
            reveal: ObservationConfig::reveal(),
            sections: ObservationConfig::section(),
            active_section: ObservationConfig::center_band(),
        }
    }
}

impl AppConfig {
    pub fn grace(&self) -> Duration {
        Duration::from_millis(self.grace_period_ms)
    }

    pub fn support(&self) -> Support {
        if self.observe_visibility {
            Support::Available
        } else {
            Support::Unavailable
        }
    }

    pub fn navigator_options(&self) -> NavigatorOptions {
        NavigatorOptions {
            config: self.active_section,
            policy: self.selection_policy,
            nav_allowance: self.nav_allowance,
            grace: self.grace(),
            support: self.support(),
        }
    }

    /// Reject values that cannot be meant.
    pub fn validate(self) -> Result<Self> {
        for (name, config) in [
            ("reveal", &self.reveal),
            ("sections", &self.sections),
            ("active_section", &self.active_section),
        ] {
            if !(0.0..=1.0).contains(&config.threshold) {
                bail!(
                    "{}.threshold must be between 0.0 and 1.0, got {}",
                    name,
                    config.threshold
                );
            }
        }

        if self.window.width <= 0.0 || self.window.height <= 0.0 {
            bail!(
                "window size must be positive, got {}x{}",
                self.window.width,
                self.window.height
            );
        }

        Ok(self)
    }
}

/// Load configuration from YAML format.
pub fn import_yaml(path: &Path) -> Result<AppConfig> {
    let yaml = std::fs::read_to_string(path)?;
    let config: AppConfig = serde_yaml::from_str(&yaml)?;
    config.validate()
}

/// Load configuration from JSON format.
pub fn import_json(path: &Path) -> Result<AppConfig> {
    let json = std::fs::read_to_string(path)?;
    let config: AppConfig = serde_json::from_str(&json)?;
    config.validate()
}

/// Load a config file, picking the format from its extension.
pub fn load(path: &Path) -> Result<AppConfig> {
    let extension = path.extension().and_then(|s| s.to_str());
    let config = match extension {
        Some("yaml") | Some("yml") => import_yaml(path),
        Some("json") => import_json(path),
        _ => bail!("Unsupported config extension: {:?}", extension),
    }
    .with_context(|| format!("Failed to load config {}", path.display()))?;

    log::info!("Loaded config from {}", path.display());
    Ok(config)
}

/// Resolve the config from an explicit path or the environment, falling
/// back to defaults.
pub fn resolve(arg: Option<PathBuf>, env: Option<PathBuf>) -> Result<AppConfig> {
    match arg.or(env) {
        Some(path) => load(&path),
        None => {
            log::debug!("No config file given, using defaults");
            Ok(AppConfig::default())
        }
    }
}

/// [`resolve`] using the process arguments and environment.
pub fn from_env() -> Result<AppConfig> {
    let arg = std::env::args_os().nth(1).map(PathBuf::from);
    let env = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
    resolve(arg, env)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::geometry::Length;

    fn write(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_defaults_match_tracker_presets() {
        let config = AppConfig::default();
        assert_eq!(config.grace(), Duration::from_millis(200));
        assert_eq!(config.nav_allowance, 200.0);
        assert_eq!(config.active_section, ObservationConfig::center_band());
        assert_eq!(config.support(), Support::Available);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "folio.yaml",
            "grace_period_ms: 350\n\
             selection_policy: greatest_ratio\n\
             reveal:\n  threshold: 0.4\n  root_margin: \"-10px 0px\"\n",
        );

        let config = load(&path).unwrap();
        assert_eq!(config.grace_period_ms, 350);
        assert_eq!(config.selection_policy, SelectionPolicy::GreatestRatio);
        assert_eq!(config.reveal.threshold, 0.4);
        assert_eq!(config.reveal.root_margin.top, Length::Px(-10.0));
        assert_eq!(config.sections, ObservationConfig::section());
    }

    #[test]
    fn test_partial_block_keeps_slot_preset() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "folio.yaml",
            "active_section:\n  root_margin: \"-40% 0px\"\n\
             sections:\n  threshold: 0.6\n",
        );

        let config = load(&path).unwrap();
        assert_eq!(config.active_section.threshold, 0.5);
        assert_eq!(config.active_section.root_margin.top, Length::Percent(-40.0));
        assert_eq!(config.sections.threshold, 0.6);
        assert_eq!(config.sections.root_margin, ObservationConfig::section().root_margin);
        assert_eq!(config.reveal, ObservationConfig::reveal());
    }

    #[test]
    fn test_unknown_observation_field_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "folio.json", r#"{ "reveal": { "treshold": 0.3 } }"#);
        assert!(load(&path).is_err());
    }

    #[test]
    fn test_json_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "folio.json",
            r#"{ "observe_visibility": false, "window": { "width": 900 } }"#,
        );

        let config = load(&path).unwrap();
        assert_eq!(config.support(), Support::Unavailable);
        assert_eq!(config.window.width, 900.0);
        assert_eq!(config.window.height, 800.0);
    }

    #[test]
    fn test_bad_margin_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "folio.yaml", "sections:\n  root_margin: \"12em\"\n");
        assert!(load(&path).is_err());
    }

    #[test]
    fn test_out_of_range_threshold_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "folio.yaml", "active_section:\n  threshold: 1.5\n");
        let err = load(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("active_section.threshold"));
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "folio.toml", "");
        assert!(load(&path).is_err());
    }

    #[test]
    fn test_resolve_prefers_argument() {
        let dir = tempfile::tempdir().unwrap();
        let arg = write(&dir, "arg.yaml", "nav_allowance: 64\n");
        let env = write(&dir, "env.yaml", "nav_allowance: 10\n");

        let config = resolve(Some(arg), Some(env.clone())).unwrap();
        assert_eq!(config.nav_allowance, 64.0);

        let config = resolve(None, Some(env)).unwrap();
        assert_eq!(config.nav_allowance, 10.0);

        assert_eq!(resolve(None, None).unwrap(), AppConfig::default());
    }
}
