use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/barline/config.toml` or `~/.config/barline/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `BARLINE__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub audio: AudioSettings,
    pub visualizer: VisualizerSettings,
    pub controls: ControlsSettings,
    pub ui: UiSettings,
    pub library: LibrarySettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Volume applied before the first track is loaded, in `[0, 1]`.
    pub default_volume: f32,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            default_volume: 0.5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VisualizerSettings {
    /// Analyser window size. Must be a power of two in `32..=32768`.
    /// The number of drawn bars is `fft_size / 2`.
    pub fft_size: usize,
    /// Averaging constant between consecutive frames, in `[0, 1]`.
    pub smoothing: f32,
    /// Magnitude (dB) mapped to 0.
    pub min_db: f32,
    /// Magnitude (dB) mapped to 255.
    pub max_db: f32,
    /// `bars` or `line`.
    pub style: VisualStyle,
    /// Logical width of the drawing surface.
    pub width: f64,
    /// Logical height of the drawing surface.
    pub height: f64,
    /// Redraws per second while something is playing.
    pub frame_rate: u32,
}

impl Default for VisualizerSettings {
    fn default() -> Self {
        Self {
            fft_size: 256,
            smoothing: 0.8,
            min_db: -100.0,
            max_db: -30.0,
            style: VisualStyle::Bars,
            width: 600.0,
            height: 400.0,
            frame_rate: 30,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VisualStyle {
    #[default]
    #[serde(alias = "bar", alias = "frequency-bars")]
    Bars,
    #[serde(alias = "waveform", alias = "lines")]
    Line,
}

impl VisualStyle {
    pub fn toggled(self) -> Self {
        match self {
            Self::Bars => Self::Line,
            Self::Line => Self::Bars,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Number of seconds to scrub when pressing `H` / `L`.
    pub scrub_seconds: u64,
    /// Volume change applied by `+` / `-`.
    pub volume_step: f32,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self {
            scrub_seconds: 5,
            volume_step: 0.05,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ Music Player ~ ".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// File extensions to treat as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks during scanning.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether to recurse into subdirectories.
    pub recursive: bool,
    /// Optional cap on directory recursion depth.
    pub max_depth: Option<usize>,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            extensions: vec!["mp3".into(), "flac".into(), "wav".into(), "ogg".into()],
            follow_links: true,
            include_hidden: false,
            recursive: true,
            max_depth: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Write a log file at all.
    pub enabled: bool,
    /// `tracing` filter directive, e.g. `info` or `barline=debug`.
    /// `RUST_LOG` wins when set.
    pub level: String,
    /// Log file location. Defaults to `$XDG_STATE_HOME/barline/barline.log`.
    pub file: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            level: "info".to_string(),
            file: None,
        }
    }
}
