//! Log setup.
//!
//! The terminal is in the alternate screen while the player runs, so log
//! records go to a file instead of stderr.

use std::ffi::OsString;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::LogSettings;

/// Environment variable overriding `log.level`.
pub const LOG_ENV: &str = "MEDITAR_LOG";

/// Pick the log file: explicit path, then `$XDG_STATE_HOME/meditar/meditar.log`,
/// then `~/.local/state/meditar/meditar.log`.
fn log_path_from(
    explicit: Option<&Path>,
    state_home: Option<OsString>,
    home: Option<OsString>,
) -> Option<PathBuf> {
    if let Some(p) = explicit {
        return Some(p.to_path_buf());
    }
    let state_home = match state_home {
        Some(dir) => Some(PathBuf::from(dir)),
        None => home.map(|h| PathBuf::from(h).join(".local").join("state")),
    };
    state_home.map(|d| d.join("meditar").join("meditar.log"))
}

fn resolve_log_path(settings: &LogSettings) -> Option<PathBuf> {
    log_path_from(
        settings.file.as_deref(),
        std::env::var_os("XDG_STATE_HOME"),
        std::env::var_os("HOME"),
    )
}

/// Install the global subscriber. Returns the log file in use, or `None`
/// when no file could be opened (logging is then off).
pub fn init(settings: &LogSettings) -> Option<PathBuf> {
    let path = resolve_log_path(settings)?;
    if let Some(dir) = path.parent() {
        if fs::create_dir_all(dir).is_err() {
            return None;
        }
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .ok()?;

    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .ok()?;

    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_file_wins() {
        let p = log_path_from(
            Some(Path::new("/tmp/explicit.log")),
            Some("/tmp/state".into()),
            Some("/tmp/home".into()),
        );
        assert_eq!(p, Some(PathBuf::from("/tmp/explicit.log")));
    }

    #[test]
    fn xdg_state_home_before_home() {
        let p = log_path_from(None, Some("/tmp/state".into()), Some("/tmp/home".into()));
        assert_eq!(p, Some(PathBuf::from("/tmp/state/meditar/meditar.log")));
    }

    #[test]
    fn falls_back_to_home_local_state() {
        let p = log_path_from(None, None, Some("/tmp/home".into()));
        assert_eq!(
            p,
            Some(PathBuf::from("/tmp/home/.local/state/meditar/meditar.log"))
        );
        assert_eq!(log_path_from(None, None, None), None);
    }
}
