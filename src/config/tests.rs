use super::load::{default_config_path, resolve_config_path};
use super::*;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_meditar_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("MEDITAR_CONFIG_PATH", "/tmp/meditar-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        PathBuf::from("/tmp/meditar-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    assert_eq!(
        default_config_path().unwrap(),
        PathBuf::from("/tmp/xdg-config-home")
            .join("meditar")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    assert_eq!(
        default_config_path().unwrap(),
        PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("meditar")
            .join("config.toml")
    );
}

#[test]
fn defaults_match_the_stock_catalog() {
    let s = Settings::default();
    assert_eq!(s.catalog.mode, CatalogMode::Facets);
    assert_eq!(s.catalog.asset_root, PathBuf::from("assets"));
    assert_eq!(s.catalog.prefix, "meditacion_kokoro");
    assert!(s.catalog.scan_when_empty);
    assert_eq!(s.controls.seek_seconds, 10);
    assert_eq!(s.audio.quit_fade_out_ms, 500);
    assert_eq!(s.log.level, "info");
    assert!(s.validate().is_ok());
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[catalog]
mode = "list"
asset_root = "/srv/meditaciones"
default_entry = "b.wav"
scan_when_empty = false

[[catalog.entries]]
name = "a.wav"

[[catalog.entries]]
name = "b.wav"
path = "/elsewhere/b.wav"
display_name = "Respiración"

[controls]
seek_seconds = 15

[audio]
quit_fade_out_ms = 0

[ui]
header_text = "hola"

[log]
level = "debug"
file = "/tmp/meditar.log"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("MEDITAR_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("MEDITAR__CONTROLS__SEEK_SECONDS");

    let s = Settings::load().unwrap();
    assert_eq!(s.catalog.mode, CatalogMode::Enumerated);
    assert_eq!(s.catalog.asset_root, PathBuf::from("/srv/meditaciones"));
    assert_eq!(s.catalog.prefix, "meditacion_kokoro");
    assert_eq!(s.catalog.default_entry.as_deref(), Some("b.wav"));
    assert!(!s.catalog.scan_when_empty);
    assert_eq!(s.catalog.entries.len(), 2);
    assert_eq!(s.catalog.entries[0].name, "a.wav");
    assert!(s.catalog.entries[0].path.is_none());
    assert_eq!(
        s.catalog.entries[1].path.as_deref(),
        Some(std::path::Path::new("/elsewhere/b.wav"))
    );
    assert_eq!(s.catalog.entries[1].display_name.as_deref(), Some("Respiración"));
    assert_eq!(s.controls.seek_seconds, 15);
    assert_eq!(s.audio.quit_fade_out_ms, 0);
    assert_eq!(s.ui.header_text, "hola");
    assert_eq!(s.log.level, "debug");
    assert_eq!(s.log.file, Some(PathBuf::from("/tmp/meditar.log")));
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[controls]
seek_seconds = 10
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("MEDITAR_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("MEDITAR__CONTROLS__SEEK_SECONDS", "30");

    let s = Settings::load().unwrap();
    assert_eq!(s.controls.seek_seconds, 30);
}

#[test]
fn missing_config_file_yields_defaults() {
    let _lock = env_lock();
    let dir = tempfile::tempdir().unwrap();
    let _g1 = EnvGuard::set(
        "MEDITAR_CONFIG_PATH",
        dir.path().join("absent.toml").to_str().unwrap(),
    );
    let _g2 = EnvGuard::remove("MEDITAR__CONTROLS__SEEK_SECONDS");

    let s = Settings::load().unwrap();
    assert_eq!(s.catalog.mode, CatalogMode::Facets);
    assert_eq!(s.controls.seek_seconds, 10);
}

#[test]
fn validate_rejects_zero_seek_and_empty_prefix() {
    let mut s = Settings::default();
    s.controls.seek_seconds = 0;
    assert_eq!(s.validate(), Err(ConfigError::ZeroSeek));

    let mut s = Settings::default();
    s.catalog.prefix = "  ".to_string();
    assert_eq!(s.validate(), Err(ConfigError::EmptyPrefix));
}
