//! Playback state machine.

use std::path::PathBuf;

/// Playback state of the currently bound recording.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PlaybackState {
    /// Nothing bound.
    #[default]
    Idle,
    Loading,
    Ready,
    Playing,
    Paused,
    Ended,
    /// The surface could not fetch or decode the recording.
    Errored(String),
}

impl PlaybackState {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Loading => "Loading",
            Self::Ready => "Ready",
            Self::Playing => "Playing",
            Self::Paused => "Paused",
            Self::Ended => "Ended",
            Self::Errored(_) => "Error",
        }
    }
}

/// A recording bound to the surface.
///
/// `generation` grows with every bind so that events from an earlier binding
/// of the same path are told apart from the current one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub path: PathBuf,
    pub generation: u64,
}

/// Signals reported by the playback surface.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    LoadStart,
    /// Duration in seconds; NaN when the surface cannot tell.
    MetadataLoaded { duration: f64 },
    CanPlay,
    /// Echo of a play command.
    Playing,
    /// Echo of a pause command.
    Paused,
    Ended,
    Error(String),
}

/// User commands from the keyboard or media keys.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Command {
    TogglePlay,
    /// Move the position by this many seconds.
    SeekRelative(i64),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Command(Command),
    Event(MediaEvent),
}

/// Side effect requested by a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Play,
    Pause,
    SeekBy(i64),
    ShowLoading,
    ClearLoading,
    ShowDuration(f64),
    ShowError(String),
    /// Observational echo: nothing changes, but it is reported.
    Observe,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    /// Enter `to`, then run `effect`.
    Move {
        to: PlaybackState,
        effect: Option<Effect>,
    },
    /// Keep the state, run `effect`.
    Stay(Effect),
    /// Input is not accepted in this state.
    Rejected,
}

/// The playback state machine.
pub fn transition(state: &PlaybackState, input: &Input) -> Transition {
    use PlaybackState as S;

    match input {
        Input::Command(Command::TogglePlay) => match state {
            S::Ready | S::Paused | S::Ended => Transition::Move {
                to: S::Playing,
                effect: Some(Effect::Play),
            },
            S::Playing => Transition::Move {
                to: S::Paused,
                effect: Some(Effect::Pause),
            },
            S::Idle | S::Loading | S::Errored(_) => Transition::Rejected,
        },
        Input::Command(Command::SeekRelative(secs)) => match state {
            S::Idle | S::Errored(_) => Transition::Rejected,
            _ => Transition::Stay(Effect::SeekBy(*secs)),
        },
        Input::Event(event) => match (state, event) {
            (S::Idle, _) => Transition::Rejected,
            (_, MediaEvent::Error(reason)) => Transition::Move {
                to: S::Errored(reason.clone()),
                effect: Some(Effect::ShowError(reason.clone())),
            },
            (S::Errored(_), _) => Transition::Rejected,
            (_, MediaEvent::LoadStart) => Transition::Stay(Effect::ShowLoading),
            (_, MediaEvent::CanPlay) => Transition::Stay(Effect::ClearLoading),
            (S::Loading, MediaEvent::MetadataLoaded { duration }) => Transition::Move {
                to: S::Ready,
                effect: Some(Effect::ShowDuration(*duration)),
            },
            (_, MediaEvent::MetadataLoaded { .. }) => Transition::Rejected,
            (S::Playing, MediaEvent::Ended) => Transition::Move {
                to: S::Ended,
                effect: None,
            },
            (_, MediaEvent::Ended) => Transition::Rejected,
            (_, MediaEvent::Playing | MediaEvent::Paused) => Transition::Stay(Effect::Observe),
        },
    }
}
