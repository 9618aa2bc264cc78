use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::app::App;
use crate::catalog::{CatalogResolver, EnumeratedCatalog, StaticCatalogEntry, scan_entries};
use crate::config::{CatalogEntrySetting, CatalogMode, CatalogSettings};

fn entry_from_setting(setting: &CatalogEntrySetting, root: &Path) -> StaticCatalogEntry {
    let display_name = setting.display_name.clone().unwrap_or_else(|| {
        Path::new(&setting.name)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| setting.name.clone())
    });
    StaticCatalogEntry {
        name: setting.name.clone(),
        path: setting
            .path
            .clone()
            .unwrap_or_else(|| root.join(&setting.name)),
        display_name,
    }
}

/// Configured entries first, then whatever sits in `root`, then the builtin
/// recording.
fn enumerated_catalog(settings: &CatalogSettings, root: &Path) -> EnumeratedCatalog {
    let mut entries: Vec<StaticCatalogEntry> = settings
        .entries
        .iter()
        .map(|e| entry_from_setting(e, root))
        .collect();
    if entries.is_empty() && settings.scan_when_empty {
        entries = scan_entries(root);
    }

    match EnumeratedCatalog::new(entries, settings.default_entry.as_deref()) {
        Some(catalog) => catalog,
        None => {
            info!(root = %root.display(), "no recordings listed, using the builtin entry");
            EnumeratedCatalog::builtin(root)
        }
    }
}

/// Build the app model for the configured catalog mode. `asset_root`
/// overrides the configured directory.
pub fn build_app(settings: &CatalogSettings, asset_root: Option<PathBuf>) -> App {
    let root = asset_root.unwrap_or_else(|| settings.asset_root.clone());
    if !root.is_dir() {
        warn!(root = %root.display(), "asset root is not a directory");
    }

    match settings.mode {
        CatalogMode::Facets => {
            info!(
                root = %root.display(),
                prefix = %settings.prefix,
                "composing recordings from facets"
            );
            App::with_facets(CatalogResolver::new(root, settings.prefix.clone()))
        }
        CatalogMode::Enumerated => {
            let catalog = enumerated_catalog(settings, &root);
            info!(entries = catalog.entries().len(), "using an enumerated catalog");
            App::with_catalog(catalog)
        }
    }
}
