//! Audio-related small types and handles.
//!
//! Commands sent to the audio thread, the events it reports back and the
//! shared playback info the UI reads between events.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::playback::{Binding, MediaEvent};

#[derive(Debug)]
pub enum AudioCmd {
    /// Drop the current recording and load this one, paused at 0.
    Bind(Binding),
    /// Drop the current recording.
    Unbind,
    Play,
    Pause,
    /// Jump to this position, in seconds.
    SeekTo(f64),
    /// Quit the audio thread, optionally fading out over `fade_out_ms` milliseconds.
    Quit { fade_out_ms: u64 },
}

/// An event reported by the audio thread for a given binding.
#[derive(Debug, Clone)]
pub struct SurfaceEvent {
    pub binding: Binding,
    pub event: MediaEvent,
}

#[derive(Debug, Clone, Default)]
/// Runtime playback information shared with the UI.
pub struct PlaybackInfo {
    /// Binding last handed to the player. Reset as soon as a bind or
    /// unbind is issued, before the audio thread gets to it.
    pub binding: Option<Binding>,
    /// Elapsed playback time for the current recording.
    pub elapsed: Duration,
    /// Length of the current recording, once known.
    pub duration: Option<Duration>,
}

pub type PlaybackHandle = Arc<Mutex<PlaybackInfo>>;
