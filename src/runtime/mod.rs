use std::env;
use std::path::PathBuf;
use std::sync::mpsc;

use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};

use crate::audio::AudioPlayer;
use crate::input::TransportKeys;
use crate::logging;
use crate::mpris::ControlCmd;
use crate::playback::PlaybackController;

mod event_loop;
mod mpris_sync;
mod settings;
mod startup;

/// Run `setup`; if it fails, run `undo` before handing the error back.
fn undo_on_error<T, E>(
    setup: impl FnOnce() -> Result<T, E>,
    undo: impl FnOnce(),
) -> Result<T, E> {
    let result = setup();
    if result.is_err() {
        undo();
    }
    result
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (settings, problem) = settings::load_settings();
    let log_file = logging::init(&settings.log);
    if let Some(problem) = problem {
        warn!("{problem}");
    }
    info!(log_file = ?log_file, "meditar starting");

    // Optional first argument overrides the configured asset root.
    let asset_root = env::args().nth(1).map(PathBuf::from);
    let mut app = startup::build_app(&settings.catalog, asset_root);

    let (audio_player, surface_events) = AudioPlayer::new();
    let mut controller = PlaybackController::new(audio_player);
    let mut keys = TransportKeys::new(settings.controls.seek_seconds);

    let (control_tx, control_rx) = mpsc::channel::<ControlCmd>();
    let mpris = crate::mpris::spawn_mpris(control_tx);

    event_loop::apply_rebind(app.sync(), &mut controller, &mut keys);
    mpris_sync::update_mpris(&mpris, &app, &controller);

    enable_raw_mode()?;
    let mut terminal = undo_on_error(
        || -> Result<_, Box<dyn std::error::Error>> {
            let mut stdout = std::io::stdout();
            execute!(stdout, EnterAlternateScreen)?;
            let backend = CrosstermBackend::new(stdout);
            Ok(Terminal::new(backend)?)
        },
        || {
            let _ = execute!(std::io::stdout(), LeaveAlternateScreen);
            let _ = disable_raw_mode();
        },
    )?;

    let run_result: Result<(), Box<dyn std::error::Error>> = {
        let mut session = event_loop::Session {
            settings: &settings,
            app: &mut app,
            controller: &mut controller,
            keys: &mut keys,
            mpris: &mpris,
        };
        event_loop::run(&mut terminal, &mut session, &surface_events, &control_rx)
    };

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    run_result
}
