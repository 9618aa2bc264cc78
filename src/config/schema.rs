use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/meditar/config.toml`, else
/// `~/.config/meditar/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `MEDITAR__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub catalog: CatalogSettings,
    pub controls: ControlsSettings,
    pub audio: AudioSettings,
    pub ui: UiSettings,
    pub log: LogSettings,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CatalogMode {
    /// Compose the file name from duration, level and music.
    #[serde(alias = "facet", alias = "composed")]
    Facets,
    /// Pick from a fixed list of recordings.
    #[serde(alias = "list", alias = "static")]
    Enumerated,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogEntrySetting {
    /// File name, also the key the entry is selected by.
    pub name: String,
    /// Defaults to `<asset_root>/<name>`.
    pub path: Option<PathBuf>,
    /// Defaults to the file stem of `name`.
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    pub mode: CatalogMode,
    /// Directory the recordings live in.
    pub asset_root: PathBuf,
    /// Identifier prefix for composed file names.
    pub prefix: String,

    /// Explicit list for the enumerated mode.
    pub entries: Vec<CatalogEntrySetting>,
    /// Name of the entry selected at startup.
    pub default_entry: Option<String>,
    /// Build the enumerated list from `asset_root` when `entries` is empty.
    pub scan_when_empty: bool,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            mode: CatalogMode::Facets,
            asset_root: PathBuf::from("assets"),
            prefix: crate::catalog::DEFAULT_PREFIX.to_string(),
            entries: Vec::new(),
            default_entry: None,
            scan_when_empty: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Number of seconds to seek when pressing Left / Right.
    pub seek_seconds: u64,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self { seek_seconds: 10 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Fade-out duration when quitting (milliseconds).
    /// Set to 0 to stop immediately.
    pub quit_fade_out_ms: u64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            quit_fade_out_ms: 500,
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
            header_text: " ~ Respira. Escucha. ~ ".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// `tracing` filter directive, e.g. `info` or `meditar=debug`.
    /// `MEDITAR_LOG` takes precedence.
    pub level: String,
    /// Log file. Defaults to `$XDG_STATE_HOME/meditar/meditar.log`.
    pub file: Option<PathBuf>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}
