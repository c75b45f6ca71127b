//! Configuration loading from TOML files and environment variables.
//!
//! Config is loaded in this order of precedence (highest wins):
//! 1. Environment variables (`THEMEPORT_OUTPUT_DIR`,
//!    `THEMEPORT_SKIP_COLOR_PROFILE_CORRECTION`, `THEMEPORT_FETCH_TIMEOUT_SECS`)
//! 2. TOML file specified via the --config CLI flag
//! 3. ./themeport.toml in the current directory
//! 4. $XDG_CONFIG_HOME/themeport/themeport.toml (or ~/.config/themeport/themeport.toml)
//! 5. Built-in defaults
//!
//! CLI flags are applied on top by `main` after loading.

use std::path::PathBuf;

use serde::Deserialize;

use crate::error::ConfigError;

/// Where Xcode picks up user themes.
const DEFAULT_OUTPUT_DIR: &str = "~/Library/Developer/Xcode/UserData/FontAndColorThemes";
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 20;

/// Top-level runtime configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Directory converted themes are written to.
    pub output_dir: String,
    /// Copy color components verbatim instead of display-profile matching.
    pub skip_color_profile_correction: bool,
    /// Hard timeout for each remote fetch, in seconds.
    pub fetch_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: DEFAULT_OUTPUT_DIR.into(),
            skip_color_profile_correction: false,
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
        }
    }
}

/// On-disk config shape; every field optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    output_dir: Option<String>,
    skip_color_profile_correction: Option<bool>,
    fetch_timeout_secs: Option<u64>,
}

/// Load configuration using the precedence order above.
pub fn load_config(path_override: Option<&str>) -> Result<Config, ConfigError> {
    let mut config = Config::default();

    if let Some(path) = first_existing_config(path_override) {
        tracing::debug!("loading config from {}", path.display());
        let text = std::fs::read_to_string(&path)?;
        let file: FileConfig = toml::from_str(&text)?;
        apply_file(&mut config, file);
    }

    apply_env(&mut config, |key| std::env::var(key).ok());
    Ok(config)
}

fn first_existing_config(path_override: Option<&str>) -> Option<PathBuf> {
    if let Some(path) = path_override {
        return Some(PathBuf::from(path));
    }

    let local = PathBuf::from("themeport.toml");
    if local.is_file() {
        return Some(local);
    }

    let global = dirs::home_dir()
        .map(|home| home.join(".config"))
        .or_else(dirs::config_dir)?
        .join("themeport")
        .join("themeport.toml");
    global.is_file().then_some(global)
}

fn apply_file(config: &mut Config, file: FileConfig) {
    if let Some(output_dir) = file.output_dir {
        config.output_dir = output_dir;
    }
    if let Some(skip) = file.skip_color_profile_correction {
        config.skip_color_profile_correction = skip;
    }
    if let Some(secs) = file.fetch_timeout_secs {
        config.fetch_timeout_secs = secs;
    }
}

fn apply_env(config: &mut Config, var: impl Fn(&str) -> Option<String>) {
    if let Some(output_dir) = var("THEMEPORT_OUTPUT_DIR") {
        config.output_dir = output_dir;
    }
    if let Some(skip) = var("THEMEPORT_SKIP_COLOR_PROFILE_CORRECTION") {
        config.skip_color_profile_correction = matches!(skip.as_str(), "1" | "true" | "yes");
    }
    if let Some(secs) = var("THEMEPORT_FETCH_TIMEOUT_SECS") {
        if let Ok(secs) = secs.parse() {
            config.fetch_timeout_secs = secs;
        }
    }
}
