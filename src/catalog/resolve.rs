use std::path::{Path, PathBuf};

use super::facets::{DurationBucket, Facet, FacetSelection, Level, Music};

/// Default identifier prefix of the rendered recordings.
pub const DEFAULT_PREFIX: &str = "meditacion_kokoro";

/// A concrete recording: its file name and where to find it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAsset {
    pub identifier: String,
    pub path: PathBuf,
}

/// Maps complete facet selections to files under a fixed asset root.
///
/// Resolution is purely syntactic: no file system access happens here, so a
/// resolved path may not exist. That shows up later as a playback error.
#[derive(Debug, Clone)]
pub struct CatalogResolver {
    asset_root: PathBuf,
    prefix: String,
}

impl CatalogResolver {
    pub fn new(asset_root: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            asset_root: asset_root.into(),
            prefix: prefix.into(),
        }
    }

    pub fn asset_root(&self) -> &Path {
        &self.asset_root
    }

    /// Resolve `selection`, or `None` while any facet is unset.
    pub fn resolve(&self, selection: &FacetSelection) -> Option<ResolvedAsset> {
        let duration = selection.duration?;
        let level = selection.level?;
        let music = selection.music?;

        let identifier = asset_identifier(&self.prefix, duration, level, music);
        let path = self.asset_root.join(&identifier);
        Some(ResolvedAsset { identifier, path })
    }
}

/// `<prefix>_<minutes>_<level>_<music>.wav`
pub fn asset_identifier(
    prefix: &str,
    duration: DurationBucket,
    level: Level,
    music: Music,
) -> String {
    format!(
        "{}_{}_{}_{}.wav",
        prefix,
        duration.token(),
        level.token(),
        music.token()
    )
}
