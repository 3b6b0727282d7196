//! Playback engine: one media handle behind the `MediaBackend` seam, with
//! the rodio implementation used at runtime.

mod backend;
mod context;
mod player;
mod rodio_backend;
mod sink;
mod types;

#[cfg(test)]
pub(crate) mod fake;

pub use backend::MediaBackend;
pub use player::PlaybackEngine;
pub use rodio_backend::RodioBackend;
pub use types::{MediaEvent, PlayerError};

#[cfg(test)]
mod tests;
