use std::path::PathBuf;

use tracing::{debug, error, info, warn};

use crate::time::format_time;

use super::state::{
    Binding, Command, Effect, Input, MediaEvent, PlaybackState, Transition, transition,
};
use super::surface::{PlaybackSurface, clamp_position};

/// Status text shown when the surface fails to load the recording.
pub const LOAD_ERROR_TEXT: &str = "Error: Could not load audio file";

/// The two pieces of text the controller owns on screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusDisplay {
    /// Duration line, or the load error.
    pub status_text: String,
    /// Loading indicator.
    pub loading: bool,
}

/// How an input was handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The event belonged to a binding that is no longer current.
    Stale,
    /// Not accepted in the current state.
    Rejected,
    Applied,
    /// A play/pause echo from the surface, reported without a state change.
    Observed,
}

/// Owns the playback state of one bound recording at a time.
pub struct PlaybackController<S> {
    surface: S,
    binding: Option<Binding>,
    generation: u64,
    state: PlaybackState,
    display: StatusDisplay,
}

impl<S: PlaybackSurface> PlaybackController<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            binding: None,
            generation: 0,
            state: PlaybackState::Idle,
            display: StatusDisplay::default(),
        }
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn binding(&self) -> Option<&Binding> {
        self.binding.as_ref()
    }

    pub fn display(&self) -> &StatusDisplay {
        &self.display
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Current position in seconds, or `None` while nothing is bound.
    pub fn position(&self) -> Option<f64> {
        self.binding.as_ref().map(|_| self.surface.current_time())
    }

    /// Duration in seconds, NaN while unknown.
    pub fn duration(&self) -> f64 {
        self.surface.duration()
    }

    /// Bind `path`, discarding everything about the previous recording.
    pub fn bind(&mut self, path: PathBuf) -> Binding {
        self.generation += 1;
        let binding = Binding {
            path,
            generation: self.generation,
        };
        info!(
            path = %binding.path.display(),
            generation = binding.generation,
            previous = self.state.label(),
            "binding recording"
        );

        self.binding = Some(binding.clone());
        self.state = PlaybackState::Loading;
        self.display = StatusDisplay {
            status_text: String::new(),
            loading: true,
        };
        self.surface.bind(&binding);
        binding
    }

    /// Drop the bound recording and go back to idle.
    pub fn unbind(&mut self) {
        if self.binding.take().is_none() {
            return;
        }
        info!("unbinding recording");
        self.state = PlaybackState::Idle;
        self.display = StatusDisplay::default();
        self.surface.unbind();
    }

    pub fn command(&mut self, command: Command) -> Outcome {
        self.apply(Input::Command(command))
    }

    /// Handle an event from the surface. Events for any binding other than
    /// the current one are dropped.
    pub fn handle_event(&mut self, binding: &Binding, event: MediaEvent) -> Outcome {
        if self.binding.as_ref() != Some(binding) {
            debug!(
                path = %binding.path.display(),
                generation = binding.generation,
                ?event,
                "dropping event for stale binding"
            );
            return Outcome::Stale;
        }
        self.apply(Input::Event(event))
    }

    fn apply(&mut self, input: Input) -> Outcome {
        match transition(&self.state, &input) {
            Transition::Rejected => {
                debug!(state = self.state.label(), ?input, "input rejected");
                Outcome::Rejected
            }
            Transition::Stay(effect) => {
                let observed = effect == Effect::Observe;
                self.run(effect, &input);
                if observed {
                    Outcome::Observed
                } else {
                    Outcome::Applied
                }
            }
            Transition::Move { to, effect } => {
                debug!(from = self.state.label(), to = to.label(), "state change");
                self.state = to;
                if self.state == PlaybackState::Ended {
                    info!("audio finished playing");
                }
                if let Some(effect) = effect {
                    self.run(effect, &input);
                }
                Outcome::Applied
            }
        }
    }

    fn run(&mut self, effect: Effect, input: &Input) {
        match effect {
            Effect::Play => self.surface.play(),
            Effect::Pause => self.surface.pause(),
            Effect::SeekBy(secs) => {
                let target = self.surface.current_time() + secs as f64;
                let clamped = clamp_position(target, self.surface.duration());
                debug!(secs, position = clamped, "seeking");
                self.surface.set_current_time(clamped);
            }
            Effect::ShowLoading => self.display.loading = true,
            Effect::ClearLoading => self.display.loading = false,
            Effect::ShowDuration(duration) => {
                self.display.status_text = format!("Duration: {}", format_time(duration));
            }
            Effect::ShowError(reason) => {
                error!(%reason, "audio loading error");
                self.display.status_text = LOAD_ERROR_TEXT.to_string();
                self.display.loading = false;
            }
            Effect::Observe => match input {
                Input::Event(MediaEvent::Playing) => info!("audio started playing"),
                Input::Event(MediaEvent::Paused) => info!("audio paused"),
                other => warn!(?other, "unexpected observation"),
            },
        }
    }
}
