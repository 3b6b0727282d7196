use std::sync::Arc;
use std::time::Duration;

use crate::library::TrackSource;
use crate::visualizer::SampleTap;

use super::types::{MediaEvent, PlayerError};

/// One media-playback handle: the device side of the playback engine.
///
/// Implementations hold at most one open source. Position and duration
/// changes are reported through `poll_events`, never pushed.
pub trait MediaBackend {
    /// Replace the current source with `source`, paused at the start.
    ///
    /// The new handle's tap carries `generation`. On error the previous
    /// source stays open and untouched.
    fn open(&mut self, source: &TrackSource, generation: u64) -> Result<(), PlayerError>;

    /// Drop the current source, if any.
    fn close(&mut self);

    fn play(&mut self) -> Result<(), PlayerError>;

    fn pause(&mut self);

    /// Request a new position. Applied asynchronously.
    fn seek(&mut self, position: Duration);

    fn set_volume(&mut self, volume: f32);

    /// Analyser tap point of the current handle.
    fn tap(&self) -> Option<&Arc<SampleTap>>;

    /// Drain events that happened since the last call.
    fn poll_events(&mut self) -> Vec<MediaEvent>;
}
