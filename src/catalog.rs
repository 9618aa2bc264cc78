//! The recording catalog.
//!
//! Recordings are addressed either by composing three facets (duration, level
//! and background music) into a file name, or by picking an entry from a fixed
//! list. Both paths end in a `ResolvedAsset` the player can bind.

mod enumerated;
mod facets;
mod resolve;
mod scan;

pub use enumerated::*;
pub use facets::*;
pub use resolve::*;
pub use scan::scan_entries;
