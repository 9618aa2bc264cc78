//! Playback control for the bound recording.
//!
//! `state` holds the tagged playback state and its single transition
//! function, `surface` the trait the native player implements, and
//! `controller` glues them together and keeps the status text current.

mod controller;
mod state;
mod surface;

pub use controller::*;
pub use state::*;
pub use surface::*;
