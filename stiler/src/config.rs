use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use stiler_layout::{DecorationInsets, Padding, WidthTables};

use crate::error::StilerError;

pub fn config_file() -> PathBuf {
    dirs::config_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(std::env::temp_dir)
        .join("stiler")
        .join("config.toml")
}

pub fn default_state_file() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("stiler")
        .join("winlist.json")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub top_padding: i32,
    pub bottom_padding: i32,
    pub left_padding: i32,
    pub right_padding: i32,
    /// Height of the window manager's title bar.
    pub win_title: i32,
    /// Width of the window manager's border. Must be non-zero.
    pub win_border: i32,
    /// Share of the screen width given to the master window.
    pub mw_factor: f64,
    /// Number of monitors placed side by side.
    pub monitors: u32,
    /// Seed ratios for corner and edge placements.
    pub grid_widths: Vec<f64>,
    pub width_adjustment: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_file: Option<PathBuf>,
    /// Skip docks, desktops, utility and minimized windows.
    pub window_filter: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            top_padding: 3,
            bottom_padding: 3,
            left_padding: 3,
            right_padding: 3,
            win_title: 21,
            win_border: 2,
            mw_factor: 0.5,
            monitors: 1,
            grid_widths: vec![0.5],
            width_adjustment: 0.0,
            state_file: None,
            window_filter: true,
        }
    }
}

impl Config {
    /// Reads the config at `path`, writing the defaults there first if the
    /// file does not exist yet.
    pub fn load_or_create(path: &Path) -> Result<Config> {
        if !path.exists() {
            tracing::info!("Writing new config file to {}", path.display());
            let config = Config::default();
            config.save(path)?;
            return Ok(config);
        }

        let buf = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::parse(&buf).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn parse(buf: &str) -> Result<Config> {
        let config: Config = toml::from_str(buf)?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let toml_string = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, toml_string.as_bytes())
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }

    /// Returns every problem found, empty when the config is usable.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        for (name, value) in [
            ("top_padding", self.top_padding),
            ("bottom_padding", self.bottom_padding),
            ("left_padding", self.left_padding),
            ("right_padding", self.right_padding),
            ("win_title", self.win_title),
        ] {
            if value < 0 {
                issues.push(format!("{} must not be negative (got {})", name, value));
            }
        }

        if self.win_border <= 0 {
            issues.push(format!(
                "win_border must be at least 1 (got {})",
                self.win_border
            ));
        }
        if !(0.0..=1.0).contains(&self.mw_factor) {
            issues.push(format!(
                "mw_factor must be between 0 and 1 (got {})",
                self.mw_factor
            ));
        }
        if self.monitors == 0 {
            issues.push("monitors must be at least 1".to_string());
        }
        if self.grid_widths.is_empty() {
            issues.push("grid_widths must contain at least one ratio".to_string());
        }
        for width in &self.grid_widths {
            if !(0.0..=1.0).contains(width) {
                issues.push(format!(
                    "grid_widths entries must be between 0 and 1 (got {})",
                    width
                ));
            }
        }
        if !self.width_adjustment.is_finite() {
            issues.push("width_adjustment must be a finite number".to_string());
        }

        issues
    }

    pub fn validated(self) -> Result<Config, StilerError> {
        let issues = self.validate();
        if issues.is_empty() {
            Ok(self)
        } else {
            Err(StilerError::Config(issues))
        }
    }

    pub fn padding(&self) -> Padding {
        Padding {
            top: self.top_padding,
            bottom: self.bottom_padding,
            left: self.left_padding,
            right: self.right_padding,
        }
    }

    pub fn decoration(&self) -> DecorationInsets {
        DecorationInsets::new(self.win_title, self.win_border)
    }

    pub fn width_tables(&self) -> Result<WidthTables, StilerError> {
        WidthTables::from_seeds(&self.grid_widths, self.monitors, self.width_adjustment).ok_or_else(
            || StilerError::Config(vec!["grid_widths produced an empty width table".to_string()]),
        )
    }

    pub fn state_file(&self) -> PathBuf {
        self.state_file.clone().unwrap_or_else(default_state_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_empty());
        assert_eq!(config.decoration(), DecorationInsets::new(21, 2));
    }

    #[test]
    fn test_parse_partial_file() {
        let config = Config::parse(
            r#"
            mw_factor = 0.6
            monitors = 2
            grid_widths = [0.33, 0.5]
            window_filter = false
            "#,
        )
        .unwrap();

        assert_eq!(config.mw_factor, 0.6);
        assert_eq!(config.monitors, 2);
        assert_eq!(config.grid_widths, vec![0.33, 0.5]);
        assert!(!config.window_filter);
        assert_eq!(config.top_padding, 3);
        assert_eq!(config.win_title, 21);
    }

    #[test]
    fn test_parse_rejects_unknown_keys() {
        assert!(Config::parse("MwFactor = 0.5").is_err());
    }

    #[test]
    fn test_validate_reports_every_issue() {
        let config = Config {
            monitors: 0,
            mw_factor: 1.5,
            grid_widths: vec![],
            win_border: 0,
            ..Config::default()
        };
        let issues = config.validate();
        assert_eq!(issues.len(), 4, "{:?}", issues);

        let err = config.validated().unwrap_err();
        assert!(matches!(err, StilerError::Config(_)));
        assert!(err.to_string().contains("monitors"));
    }

    #[test]
    fn test_validate_grid_width_range() {
        let config = Config {
            grid_widths: vec![0.5, 1.2],
            ..Config::default()
        };
        assert_eq!(config.validate().len(), 1);
    }

    #[test]
    fn test_load_or_create_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_or_create(&path).unwrap();
        assert_eq!(config, Config::default());
        assert!(path.exists());

        // Second run reads what the first one wrote
        assert_eq!(Config::load_or_create(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_width_tables_from_config() {
        let config = Config {
            grid_widths: vec![0.33],
            ..Config::default()
        };
        let tables = config.width_tables().unwrap();
        assert_eq!(tables.corner.ratios(), &[0.33, 0.67]);
        assert_eq!(tables.center.ratios(), &[0.34, 1.0]);
    }

    #[test]
    fn test_state_file_override() {
        let config = Config {
            state_file: Some(PathBuf::from("/tmp/tile_winlist.json")),
            ..Config::default()
        };
        assert_eq!(config.state_file(), PathBuf::from("/tmp/tile_winlist.json"));
    }
}
