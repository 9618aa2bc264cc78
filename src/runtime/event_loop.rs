use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{debug, info};

use crate::app::{App, Rebind};
use crate::audio::{AudioPlayer, SurfaceEvent};
use crate::config;
use crate::input::TransportKeys;
use crate::mpris::{ControlCmd, MprisHandle};
use crate::playback::{Command, PlaybackController, PlaybackState, PlaybackSurface};
use crate::runtime::mpris_sync::{MprisSnapshot, update_mpris};
use crate::ui;

/// Everything the loop drives, borrowed from `run`.
pub struct Session<'a> {
    pub settings: &'a config::Settings,
    pub app: &'a mut App,
    pub controller: &'a mut PlaybackController<AudioPlayer>,
    pub keys: &'a mut TransportKeys,
    pub mpris: &'a MprisHandle,
}

/// Bind, rebind or unbind after the selection changed, and keep the
/// transport keys attached only while something is bound.
pub fn apply_rebind<S: PlaybackSurface>(
    rebind: Rebind,
    controller: &mut PlaybackController<S>,
    keys: &mut TransportKeys,
) {
    match rebind {
        Rebind::To(asset) => {
            controller.bind(asset.path);
            keys.attach();
        }
        Rebind::Unbind => {
            controller.unbind();
            keys.detach();
        }
        Rebind::Keep => {}
    }
}

/// Main terminal event loop: handles input, UI drawing, media events from
/// the audio thread and MPRIS. Returns `Ok(())` when shutdown is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    session: &mut Session<'_>,
    events: &mpsc::Receiver<SurfaceEvent>,
    control_rx: &mpsc::Receiver<ControlCmd>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut last_mpris = MprisSnapshot::default();

    loop {
        while let Ok(SurfaceEvent { binding, event }) = events.try_recv() {
            session.controller.handle_event(&binding, event);
        }

        // Keep MPRIS in sync even when playback changes come from media keys.
        let snapshot = MprisSnapshot::capture(&*session.app, &*session.controller);
        if snapshot != last_mpris {
            update_mpris(session.mpris, &*session.app, &*session.controller);
            last_mpris = snapshot;
        }

        terminal.draw(|f| {
            ui::draw(
                f,
                &*session.app,
                &*session.controller,
                &session.settings.ui,
                &session.settings.controls,
            )
        })?;

        while let Ok(cmd) = control_rx.try_recv() {
            if handle_control_cmd(cmd, session) {
                return Ok(());
            }
        }

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, session) {
                    break;
                }
            }
        }
    }

    Ok(())
}

fn quit(session: &Session<'_>) {
    info!("quitting");
    session.controller.surface().quit_softly(Duration::from_millis(
        session.settings.audio.quit_fade_out_ms,
    ));
}

/// Apply an MPRIS command to the controller. `Play` only starts a recording
/// that is not playing and `Pause` only stops one that is. Returns `true` for
/// `Quit`.
pub fn control_command<S: PlaybackSurface>(
    cmd: ControlCmd,
    controller: &mut PlaybackController<S>,
) -> bool {
    let playing = *controller.state() == PlaybackState::Playing;
    match cmd {
        ControlCmd::Quit => return true,
        ControlCmd::Play if !playing => {
            controller.command(Command::TogglePlay);
        }
        ControlCmd::Pause if playing => {
            controller.command(Command::TogglePlay);
        }
        ControlCmd::Play | ControlCmd::Pause => {}
        ControlCmd::PlayPause => {
            controller.command(Command::TogglePlay);
        }
        ControlCmd::SeekBy(secs) => {
            controller.command(Command::SeekRelative(secs));
        }
    }
    false
}

/// Returns `true` when the loop should stop.
fn handle_control_cmd(cmd: ControlCmd, session: &mut Session<'_>) -> bool {
    debug!(?cmd, "MPRIS command");
    if control_command(cmd, session.controller) {
        quit(session);
        return true;
    }
    false
}

/// Returns `true` when the loop should stop.
fn handle_key_event(key: KeyEvent, session: &mut Session<'_>) -> bool {
    if key.code == KeyCode::Char('q') {
        quit(session);
        return true;
    }

    if let Some(command) = session.keys.route(&key) {
        session.controller.command(command);
        return false;
    }

    let app = &mut *session.app;
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.move_down(),
        KeyCode::Char('k') | KeyCode::Up => app.move_up(),
        KeyCode::Enter | KeyCode::Tab => app.activate(),
        KeyCode::Backspace => app.clear_focused(),
        _ => return false,
    }

    apply_rebind(app.sync(), session.controller, session.keys);
    false
}
