use std::path::Path;

use lofty::prelude::{Accessor, TaggedFileExt};
use tracing::debug;
use walkdir::WalkDir;

use super::enumerated::StaticCatalogEntry;

const AUDIO_EXTENSIONS: [&str; 4] = ["wav", "mp3", "flac", "ogg"];

fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            AUDIO_EXTENSIONS.iter().any(|e| *e == ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Prefer the embedded title tag, then the file stem.
fn display_name_for(path: &Path) -> String {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("UNKNOWN")
        .to_string();

    let Ok(tagged) = lofty::read_from_path(path) else {
        return stem;
    };
    tagged
        .primary_tag()
        .or_else(|| tagged.first_tag())
        .and_then(|tag| tag.title().map(|t| t.trim().to_string()))
        .filter(|t| !t.is_empty())
        .unwrap_or(stem)
}

/// Build an enumerated catalog from the audio files directly inside `root`.
///
/// Subdirectories and hidden files are skipped. Entries are sorted by display
/// name, case-insensitively.
pub fn scan_entries(root: &Path) -> Vec<StaticCatalogEntry> {
    let mut entries: Vec<StaticCatalogEntry> = Vec::new();

    for entry in WalkDir::new(root)
        .max_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if !path.is_file() || is_hidden(path) || !is_audio_file(path) {
            continue;
        }
        let Some(name) = path.file_name().and_then(|s| s.to_str()) else {
            continue;
        };

        entries.push(StaticCatalogEntry {
            name: name.to_string(),
            path: path.to_path_buf(),
            display_name: display_name_for(path),
        });
    }

    entries.sort_by(|a, b| {
        a.display_name
            .to_lowercase()
            .cmp(&b.display_name.to_lowercase())
    });
    debug!(root = %root.display(), count = entries.len(), "scanned asset root");
    entries
}
