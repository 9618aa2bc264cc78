use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use tracing::warn;

use crate::playback::{Binding, PlaybackSurface};

use super::sink::duration_secs;
use super::thread::spawn_audio_thread;
use super::types::{AudioCmd, PlaybackHandle, PlaybackInfo, SurfaceEvent};

pub struct AudioPlayer {
    tx: Sender<AudioCmd>,
    playback: PlaybackHandle,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl AudioPlayer {
    /// Start the audio thread. Media events arrive on the returned receiver.
    pub fn new() -> (Self, Receiver<SurfaceEvent>) {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let (events_tx, events_rx) = mpsc::channel::<SurfaceEvent>();
        let playback_info: PlaybackHandle = Arc::new(Mutex::new(PlaybackInfo::default()));

        let audio_handle = spawn_audio_thread(rx, events_tx, playback_info.clone());

        let player = Self {
            tx,
            playback: playback_info,
            join: Mutex::new(Some(audio_handle)),
        };
        (player, events_rx)
    }

    /// A player whose commands go to `tx` and no audio thread.
    #[cfg(test)]
    pub(super) fn detached(tx: Sender<AudioCmd>, playback: PlaybackHandle) -> Self {
        Self {
            tx,
            playback,
            join: Mutex::new(None),
        }
    }

    /// Replace the shared info so nothing of the previous recording leaks
    /// into position or duration reads.
    fn reset_info(&self, binding: Option<&Binding>) {
        if let Ok(mut info) = self.playback.lock() {
            *info = PlaybackInfo {
                binding: binding.cloned(),
                ..PlaybackInfo::default()
            };
        }
    }

    fn send(&self, cmd: AudioCmd) {
        if let Err(e) = self.tx.send(cmd) {
            warn!(cmd = ?e.0, "audio thread is gone");
        }
    }

    /// Stop the audio thread, fading out first, and wait for it to finish.
    pub fn quit_softly(&self, fade_out: Duration) {
        self.send(AudioCmd::Quit {
            fade_out_ms: fade_out.as_millis() as u64,
        });

        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }
}

impl PlaybackSurface for AudioPlayer {
    fn bind(&mut self, binding: &Binding) {
        self.reset_info(Some(binding));
        self.send(AudioCmd::Bind(binding.clone()));
    }

    fn unbind(&mut self) {
        self.reset_info(None);
        self.send(AudioCmd::Unbind);
    }

    fn play(&mut self) {
        self.send(AudioCmd::Play);
    }

    fn pause(&mut self) {
        self.send(AudioCmd::Pause);
    }

    fn current_time(&self) -> f64 {
        self.playback
            .lock()
            .ok()
            .filter(|info| info.binding.is_some())
            .map(|info| info.elapsed.as_secs_f64())
            .unwrap_or(0.0)
    }

    fn set_current_time(&mut self, seconds: f64) {
        // Publish the target right away so a quick second seek builds on it.
        if let Ok(at) = Duration::try_from_secs_f64(seconds) {
            if let Ok(mut info) = self.playback.lock() {
                info.elapsed = at;
            }
        }
        self.send(AudioCmd::SeekTo(seconds));
    }

    fn duration(&self) -> f64 {
        self.playback
            .lock()
            .map(|info| duration_secs(info.duration))
            .unwrap_or(f64::NAN)
    }
}
