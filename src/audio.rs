//! Native playback surface built on `rodio`.
//!
//! `AudioPlayer` is a `PlaybackSurface` whose work happens on a dedicated
//! audio thread. Commands go over a channel; load progress, echoes and
//! errors come back as `SurfaceEvent`s tagged with their binding.

mod error;
mod player;
mod sink;
mod thread;
mod types;

pub use error::LoadError;
pub use player::AudioPlayer;
pub use types::*;

#[cfg(test)]
mod tests;
