//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.panenav/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{LevelFilter, debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::core::navigator::{DEFAULT_LEFT_PANE_RATIO, NavigatorConfig};
use crate::core::state::DEFAULT_MAX_EXPAND_DEPTH;
use crate::render::theme::{Palette, Theme};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PanenavConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub theme: ThemeConfig,
    /// Item type → section header, e.g. `resource = "Resources"`.
    #[serde(default)]
    pub sections: HashMap<String, String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub headless: Option<bool>,
    pub log_file: Option<String>,
    pub log_level: Option<String>,
    pub refresh_interval_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LayoutConfig {
    pub left_pane_ratio: Option<f64>,
    pub max_expand_depth: Option<usize>,
    pub title: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ThemeConfig {
    pub palette: Option<Palette>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_LOG_FILE: &str = "panenav.log";
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Info;
pub const DEFAULT_REFRESH_INTERVAL_MS: u64 = 1500;

pub const ENV_PALETTE: &str = "PANENAV_PALETTE";
pub const ENV_HEADLESS: &str = "PANENAV_HEADLESS";
pub const ENV_LOG_LEVEL: &str = "PANENAV_LOG_LEVEL";

fn default_section_names() -> HashMap<String, String> {
    [
        ("resource", "Resources"),
        ("child", "Child Blueprints"),
        ("link", "Links"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub left_pane_ratio: f64,
    pub max_expand_depth: usize,
    pub title: Option<String>,
    pub palette: Palette,
    /// `None` means "detect from the terminal".
    pub headless: Option<bool>,
    pub log_file: PathBuf,
    pub log_level: LevelFilter,
    pub refresh_interval: Duration,
    pub section_names: HashMap<String, String>,
}

impl ResolvedConfig {
    pub fn navigator_config(&self) -> NavigatorConfig {
        NavigatorConfig {
            title: self.title.clone(),
            left_pane_ratio: self.left_pane_ratio,
            max_expand_depth: self.max_expand_depth,
            theme: Theme::new(self.palette),
        }
        .normalized()
    }
}

/// Values given on the command line; `None` means "not specified".
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub palette: Option<Palette>,
    pub headless: Option<bool>,
    pub max_expand_depth: Option<usize>,
    pub title: Option<String>,
    pub log_level: Option<LevelFilter>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.panenav/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".panenav").join("config.toml"))
}

/// Load config from `~/.panenav/config.toml`.
pub fn load_config() -> Result<PanenavConfig, ConfigError> {
    match config_path() {
        Some(path) => load_config_from(&path),
        None => {
            warn!("Could not determine home directory, using default config");
            Ok(PanenavConfig::default())
        }
    }
}

/// Load config from `path`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `PanenavConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config_from(path: &Path) -> Result<PanenavConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(PanenavConfig::default());
    }

    let contents = fs::read_to_string(path)?;
    let config: PanenavConfig = toml::from_str(&contents)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# panenav configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [layout]
# left_pane_ratio = 0.4              # share of the width given to the list pane
# max_expand_depth = 2               # deeper items drill down instead of expanding
# title = "Deployment"

# [theme]
# palette = "bluelink"               # "bluelink" or "celerity" (or PANENAV_PALETTE)

# [general]
# headless = false                   # print one snapshot and exit (or PANENAV_HEADLESS)
# log_file = "panenav.log"
# log_level = "info"                 # error, warn, info, debug, trace (or PANENAV_LOG_LEVEL)
# refresh_interval_ms = 1500         # demo feed refresh rate

# [sections]
# resource = "Resources"
# child = "Child Blueprints"
# link = "Links"
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &PanenavConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with(config, cli, |key| std::env::var(key).ok())
}

/// [`resolve`] with an injectable environment lookup.
pub fn resolve_with(
    config: &PanenavConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Palette: CLI → env → config → default
    let palette = cli
        .palette
        .or_else(|| env(ENV_PALETTE).and_then(|v| parse_logged(ENV_PALETTE, &v)))
        .or(config.theme.palette)
        .unwrap_or_default();

    // Headless: CLI → env → config → detect
    let headless = cli
        .headless
        .or_else(|| env(ENV_HEADLESS).and_then(|v| parse_bool(&v)))
        .or(config.general.headless);

    // Log level: CLI → env → config → default
    let log_level = cli
        .log_level
        .or_else(|| env(ENV_LOG_LEVEL).and_then(|v| parse_logged(ENV_LOG_LEVEL, &v)))
        .or_else(|| {
            config
                .general
                .log_level
                .as_deref()
                .and_then(|v| parse_logged("log_level", v))
        })
        .unwrap_or(DEFAULT_LOG_LEVEL);

    let mut section_names = default_section_names();
    section_names.extend(config.sections.clone());

    ResolvedConfig {
        left_pane_ratio: config
            .layout
            .left_pane_ratio
            .unwrap_or(DEFAULT_LEFT_PANE_RATIO),
        max_expand_depth: cli
            .max_expand_depth
            .or(config.layout.max_expand_depth)
            .unwrap_or(DEFAULT_MAX_EXPAND_DEPTH),
        title: cli.title.clone().or_else(|| config.layout.title.clone()),
        palette,
        headless,
        log_file: PathBuf::from(
            config
                .general
                .log_file
                .as_deref()
                .unwrap_or(DEFAULT_LOG_FILE),
        ),
        log_level,
        refresh_interval: Duration::from_millis(
            config
                .general
                .refresh_interval_ms
                .unwrap_or(DEFAULT_REFRESH_INTERVAL_MS),
        ),
        section_names,
    }
}

fn parse_logged<T: std::str::FromStr>(source: &str, value: &str) -> Option<T> {
    match value.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!("Ignoring invalid value '{}' for {}", value, source);
            None
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        other => {
            warn!("Ignoring invalid value '{}' for {}", other, ENV_HEADLESS);
            None
        }
    }
}
