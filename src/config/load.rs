use std::{env, path::PathBuf};

use super::schema::Settings;

const ENV_PREFIX: &str = "BARLINE";
const APP_DIR: &str = "barline";

/// Highest refresh rate that still leaves a whole millisecond per frame.
pub const MAX_FRAME_RATE: u32 = 1000;

/// Configuration loading helpers.
///
/// `Settings::load` layers environment variables (prefix `BARLINE__`) over an
/// optional config file and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        let v = &self.visualizer;
        if !v.fft_size.is_power_of_two() || !(32..=32768).contains(&v.fft_size) {
            return Err(format!(
                "visualizer.fft_size must be a power of two in 32..=32768 (got {})",
                v.fft_size
            ));
        }
        if !(0.0..=1.0).contains(&v.smoothing) {
            return Err("visualizer.smoothing must be within [0, 1]".to_string());
        }
        if v.min_db >= v.max_db {
            return Err("visualizer.min_db must be lower than visualizer.max_db".to_string());
        }
        if !(1..=MAX_FRAME_RATE).contains(&v.frame_rate) {
            return Err(format!(
                "visualizer.frame_rate must be within 1..={MAX_FRAME_RATE} (got {})",
                v.frame_rate
            ));
        }
        if v.width <= 0.0 || v.height <= 0.0 {
            return Err("visualizer.width and visualizer.height must be positive".to_string());
        }
        if !(0.0..=1.0).contains(&self.audio.default_volume) {
            return Err("audio.default_volume must be within [0, 1]".to_string());
        }
        Ok(())
    }
}

/// Resolve the config path from `BARLINE_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("BARLINE_CONFIG_PATH") {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/barline/config.toml`
/// or `~/.config/barline/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    xdg_dir("XDG_CONFIG_HOME", ".config").map(|d| d.join(APP_DIR).join("config.toml"))
}

/// Compute the default log file under `$XDG_STATE_HOME/barline/barline.log`
/// or `~/.local/state/barline/barline.log`.
pub fn default_log_path() -> Option<PathBuf> {
    xdg_dir("XDG_STATE_HOME", ".local/state").map(|d| d.join(APP_DIR).join("barline.log"))
}

fn xdg_dir(var: &str, home_fallback: &str) -> Option<PathBuf> {
    if let Some(xdg) = env::var_os(var) {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(home_fallback))
    }
}
