use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use rodio::{OutputStream, OutputStreamBuilder, Sink};
use tracing::{debug, info, warn};

use crate::playback::{Binding, MediaEvent, clamp_position};
use crate::time::format_duration;

use super::error::LoadError;
use super::sink::{create_sink_at, duration_secs, read_duration};
use super::types::{AudioCmd, PlaybackHandle, PlaybackInfo, SurfaceEvent};

/// How often the thread publishes elapsed time and checks for the end of the
/// recording.
const TICK: Duration = Duration::from_millis(200);

/// The recording currently held by the audio thread.
pub(super) struct Loaded {
    binding: Binding,
    sink: Sink,
    duration: Option<Duration>,
    paused: bool,
    ended: bool,
    started_at: Option<Instant>,
    accumulated: Duration,
}

impl Loaded {
    #[cfg(test)]
    pub(super) fn playing(binding: Binding, sink: Sink) -> Self {
        Self {
            binding,
            sink,
            duration: None,
            paused: false,
            ended: false,
            started_at: Some(Instant::now()),
            accumulated: Duration::ZERO,
        }
    }

    #[cfg(test)]
    pub(super) fn is_ended(&self) -> bool {
        self.ended
    }

    fn elapsed(&self) -> Duration {
        let e = self.accumulated + self.started_at.map_or(Duration::ZERO, |st| st.elapsed());
        match self.duration {
            Some(d) => e.min(d),
            None => e,
        }
    }

    /// Replace the sink with a fresh one starting at `at`, keeping the
    /// paused/playing intent.
    fn reopen_at(&mut self, stream: &OutputStream, at: Duration) -> Result<(), LoadError> {
        let (new_sink, _) = create_sink_at(stream, &self.binding.path, at)?;
        self.sink.stop();
        if self.paused {
            self.started_at = None;
        } else {
            new_sink.play();
            self.started_at = Some(Instant::now());
        }
        self.sink = new_sink;
        self.accumulated = at;
        self.ended = false;
        Ok(())
    }
}

fn emit(events: &Sender<SurfaceEvent>, binding: &Binding, event: MediaEvent) {
    let _ = events.send(SurfaceEvent {
        binding: binding.clone(),
        event,
    });
}

/// Update the shared info, but only while `binding` is the one the player
/// last published. The player resets it on bind and unbind before this thread
/// catches up.
fn update_current(
    playback_info: &PlaybackHandle,
    binding: &Binding,
    f: impl FnOnce(&mut PlaybackInfo),
) {
    if let Ok(mut info) = playback_info.lock() {
        if info.binding.as_ref() == Some(binding) {
            f(&mut info);
        }
    }
}

fn fade_out_sink(sink: &Sink, fade_out_ms: u64) {
    if fade_out_ms == 0 {
        sink.set_volume(0.0);
        return;
    }
    let steps: u64 = 20;
    let step_ms = (fade_out_ms / steps).max(1);
    sink.set_volume(1.0);
    for step in 1..=steps {
        let t = step as f32 / steps as f32;
        sink.set_volume(1.0 - t);
        thread::sleep(Duration::from_millis(step_ms));
    }
    sink.set_volume(0.0);
}

/// Load `binding`, reporting progress as media events. Returns the loaded
/// recording, or `None` after reporting an error.
pub(super) fn load(
    stream: &Result<OutputStream, String>,
    binding: Binding,
    events: &Sender<SurfaceEvent>,
    playback_info: &PlaybackHandle,
) -> Option<Loaded> {
    emit(events, &binding, MediaEvent::LoadStart);

    let opened = match stream {
        Ok(stream) => create_sink_at(stream, &binding.path, Duration::ZERO),
        Err(reason) => Err(LoadError::NoOutput(reason.clone())),
    };

    match opened {
        Ok((sink, total)) => {
            let duration = total.or_else(|| read_duration(&binding.path));
            update_current(playback_info, &binding, |info| info.duration = duration);
            debug!(
                path = %binding.path.display(),
                duration = %format_duration(duration),
                "recording loaded"
            );

            emit(
                events,
                &binding,
                MediaEvent::MetadataLoaded {
                    duration: duration_secs(duration),
                },
            );
            emit(events, &binding, MediaEvent::CanPlay);

            Some(Loaded {
                binding,
                sink,
                duration,
                paused: true,
                ended: false,
                started_at: None,
                accumulated: Duration::ZERO,
            })
        }
        Err(e) => {
            warn!(path = %binding.path.display(), error = %e, "failed to load recording");
            emit(events, &binding, MediaEvent::Error(e.to_string()));
            None
        }
    }
}

/// Publish the elapsed time of a playing recording and report `Ended` once
/// its sink has drained.
pub(super) fn tick(
    cur: &mut Loaded,
    events: &Sender<SurfaceEvent>,
    playback_info: &PlaybackHandle,
) {
    if cur.paused {
        return;
    }

    let elapsed = cur.elapsed();
    update_current(playback_info, &cur.binding, |info| info.elapsed = elapsed);
    if cur.sink.empty() {
        cur.ended = true;
        cur.paused = true;
        cur.started_at = None;
        cur.accumulated = elapsed;
        emit(events, &cur.binding, MediaEvent::Ended);
    }
}

pub(super) fn spawn_audio_thread(
    rx: Receiver<AudioCmd>,
    events: Sender<SurfaceEvent>,
    playback_info: PlaybackHandle,
) -> JoinHandle<()> {
    thread::spawn(move || {
        // rodio logs to stderr when OutputStream is dropped. That's useful in debugging,
        // but noisy for a TUI app.
        let stream: Result<OutputStream, String> = OutputStreamBuilder::open_default_stream()
            .map(|mut s| {
                s.log_on_drop(false);
                s
            })
            .map_err(|e| e.to_string());
        if let Err(reason) = &stream {
            warn!(%reason, "no audio output device; every recording will fail to load");
        }

        let mut current: Option<Loaded> = None;
        let mut last_tick = Instant::now();

        loop {
            // Ticks run on schedule even while commands keep arriving.
            if last_tick.elapsed() >= TICK {
                last_tick = Instant::now();
                if let Some(cur) = current.as_mut() {
                    tick(cur, &events, &playback_info);
                }
            }

            match rx.recv_timeout(TICK.saturating_sub(last_tick.elapsed())) {
                Ok(cmd) => match cmd {
                    AudioCmd::Bind(binding) => {
                        if let Some(old) = current.take() {
                            old.sink.stop();
                        }
                        current = load(&stream, binding, &events, &playback_info);
                    }

                    AudioCmd::Unbind => {
                        if let Some(old) = current.take() {
                            old.sink.stop();
                        }
                    }

                    AudioCmd::Play => {
                        let Some(cur) = current.as_mut() else {
                            continue;
                        };
                        if !cur.paused {
                            continue;
                        }
                        // Playing again after the end starts from the top.
                        if cur.ended || cur.sink.empty() {
                            let reopened = match &stream {
                                Ok(s) => cur.reopen_at(s, Duration::ZERO),
                                Err(reason) => Err(LoadError::NoOutput(reason.clone())),
                            };
                            if let Err(e) = reopened {
                                emit(&events, &cur.binding, MediaEvent::Error(e.to_string()));
                                current = None;
                                continue;
                            }
                        }

                        cur.sink.play();
                        cur.paused = false;
                        cur.started_at = Some(Instant::now());
                        let elapsed = cur.elapsed();
                        update_current(&playback_info, &cur.binding, |info| info.elapsed = elapsed);
                        emit(&events, &cur.binding, MediaEvent::Playing);
                    }

                    AudioCmd::Pause => {
                        let Some(cur) = current.as_mut() else {
                            continue;
                        };
                        if cur.paused {
                            continue;
                        }
                        cur.sink.pause();
                        cur.accumulated = cur.elapsed();
                        cur.started_at = None;
                        cur.paused = true;
                        let elapsed = cur.accumulated;
                        update_current(&playback_info, &cur.binding, |info| info.elapsed = elapsed);
                        emit(&events, &cur.binding, MediaEvent::Paused);
                    }

                    AudioCmd::SeekTo(secs) => {
                        // Scrubbing: rebuild the current sink and skip into the file.
                        let Some(cur) = current.as_mut() else {
                            continue;
                        };
                        let target = clamp_position(secs, duration_secs(cur.duration));
                        let at = Duration::try_from_secs_f64(target).unwrap_or(Duration::ZERO);

                        let reopened = match &stream {
                            Ok(s) => cur.reopen_at(s, at),
                            Err(reason) => Err(LoadError::NoOutput(reason.clone())),
                        };
                        match reopened {
                            Ok(()) => {
                                debug!(position = target, "seeked");
                                update_current(&playback_info, &cur.binding, |info| {
                                    info.elapsed = at
                                });
                            }
                            Err(e) => {
                                emit(&events, &cur.binding, MediaEvent::Error(e.to_string()));
                                current = None;
                            }
                        }
                    }

                    AudioCmd::Quit { fade_out_ms } => {
                        if let Some(cur) = current.as_ref() {
                            if !cur.paused {
                                // Fade out gently before stopping.
                                fade_out_sink(&cur.sink, fade_out_ms);
                            }
                            cur.sink.stop();
                        }
                        info!("audio thread stopped");
                        break;
                    }
                },
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}
