use crate::app::App;
use crate::mpris::MprisHandle;
use crate::playback::{PlaybackController, PlaybackState, PlaybackSurface};

/// What MPRIS last saw, so the loop only pushes real changes.
#[derive(Debug, Default, PartialEq)]
pub struct MprisSnapshot {
    state: PlaybackState,
    identifier: Option<String>,
    duration_known: bool,
}

impl MprisSnapshot {
    pub fn capture<S: PlaybackSurface>(app: &App, controller: &PlaybackController<S>) -> Self {
        Self {
            state: controller.state().clone(),
            identifier: app.bound().map(|a| a.identifier.clone()),
            duration_known: controller.duration().is_finite(),
        }
    }
}

pub fn update_mpris<S: PlaybackSurface>(
    mpris: &MprisHandle,
    app: &App,
    controller: &PlaybackController<S>,
) {
    mpris.set_asset(app.bound(), controller.duration());
    mpris.set_playback(controller.state());
}
