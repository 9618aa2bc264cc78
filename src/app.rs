//! Application module: exposes the app model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and holds the facet selection (or
//! the enumerated catalog) and the recording last handed to the player.

mod model;

pub use model::*;

#[cfg(test)]
mod tests;
