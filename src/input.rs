//! Transport key routing.
//!
//! Space, Left and Right drive the bound recording. The runtime owns one
//! `TransportKeys` and attaches it while a recording is bound; detached, it
//! routes nothing and those keys fall through to the selection controls.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::playback::Command;

#[derive(Debug, Clone)]
pub struct TransportKeys {
    seek_seconds: i64,
    attached: bool,
}

impl TransportKeys {
    /// A detached routing table seeking by `seek_seconds`.
    pub fn new(seek_seconds: u64) -> Self {
        Self {
            seek_seconds: seek_seconds.min(i64::MAX as u64) as i64,
            attached: false,
        }
    }

    pub fn attach(&mut self) {
        self.attached = true;
    }

    pub fn detach(&mut self) {
        self.attached = false;
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Map `key` to a transport command. A routed key is consumed.
    pub fn route(&self, key: &KeyEvent) -> Option<Command> {
        if !self.attached {
            return None;
        }
        if key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return None;
        }

        match key.code {
            KeyCode::Char(' ') => Some(Command::TogglePlay),
            KeyCode::Right => Some(Command::SeekRelative(self.seek_seconds)),
            KeyCode::Left => Some(Command::SeekRelative(-self.seek_seconds)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn attached_routes_space_and_arrows() {
        let mut keys = TransportKeys::new(10);
        keys.attach();
        assert_eq!(keys.route(&key(KeyCode::Char(' '))), Some(Command::TogglePlay));
        assert_eq!(keys.route(&key(KeyCode::Right)), Some(Command::SeekRelative(10)));
        assert_eq!(keys.route(&key(KeyCode::Left)), Some(Command::SeekRelative(-10)));
    }

    #[test]
    fn other_keys_are_ignored() {
        let mut keys = TransportKeys::new(10);
        keys.attach();
        for code in [KeyCode::Char('p'), KeyCode::Up, KeyCode::Enter, KeyCode::Esc] {
            assert_eq!(keys.route(&key(code)), None);
        }
        let ctrl_space = KeyEvent::new(KeyCode::Char(' '), KeyModifiers::CONTROL);
        assert_eq!(keys.route(&ctrl_space), None);
    }

    #[test]
    fn detached_routes_nothing() {
        let mut keys = TransportKeys::new(5);
        assert!(!keys.is_attached());
        assert_eq!(keys.route(&key(KeyCode::Char(' '))), None);

        keys.attach();
        assert_eq!(keys.route(&key(KeyCode::Left)), Some(Command::SeekRelative(-5)));
        keys.detach();
        assert_eq!(keys.route(&key(KeyCode::Left)), None);
    }
}
