use std::path::PathBuf;

use super::resolve::ResolvedAsset;

/// File name of the single recording shipped with the web player.
pub const BUILTIN_ENTRY_NAME: &str = "voz_kokoro.wav";

/// One pre-built recording in an enumerated catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticCatalogEntry {
    /// Key the entry is selected by (the file name).
    pub name: String,
    pub path: PathBuf,
    pub display_name: String,
}

impl StaticCatalogEntry {
    pub fn to_asset(&self) -> ResolvedAsset {
        ResolvedAsset {
            identifier: self.name.clone(),
            path: self.path.clone(),
        }
    }
}

/// A fixed list of recordings with exactly one selected at all times.
///
/// The list never changes after construction, and selecting a key that does
/// not exist keeps the current selection.
#[derive(Debug, Clone)]
pub struct EnumeratedCatalog {
    entries: Vec<StaticCatalogEntry>,
    selected: usize,
}

impl EnumeratedCatalog {
    /// Build a catalog selecting `default_name`, or the first entry when that
    /// name is absent. Returns `None` for an empty list.
    pub fn new(entries: Vec<StaticCatalogEntry>, default_name: Option<&str>) -> Option<Self> {
        if entries.is_empty() {
            return None;
        }
        let selected = default_name
            .and_then(|name| entries.iter().position(|e| e.name == name))
            .unwrap_or(0);
        Some(Self { entries, selected })
    }

    /// A catalog holding only the bundled recording.
    pub fn builtin(asset_root: &std::path::Path) -> Self {
        let entry = StaticCatalogEntry {
            name: BUILTIN_ENTRY_NAME.to_string(),
            path: asset_root.join(BUILTIN_ENTRY_NAME),
            display_name: "Meditación guiada (Kokoro)".to_string(),
        };
        Self {
            entries: vec![entry],
            selected: 0,
        }
    }

    pub fn entries(&self) -> &[StaticCatalogEntry] {
        &self.entries
    }

    pub fn selected(&self) -> &StaticCatalogEntry {
        &self.entries[self.selected]
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// Select the entry named `key`. Unknown keys leave the selection as is.
    pub fn select(&mut self, key: &str) -> &StaticCatalogEntry {
        if let Some(pos) = self.entries.iter().position(|e| e.name == key) {
            self.selected = pos;
        }
        self.selected()
    }
}
