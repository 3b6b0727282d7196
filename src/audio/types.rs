//! Audio-related small types.
//!
//! This module defines the playback state exposed to the UI, the events a
//! media backend reports, and the playback error taxonomy.

use thiserror::Error;

/// Snapshot of the engine's playback state. Read by the UI every frame.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    pub is_playing: bool,
    /// Seconds since the start of the track, never negative.
    pub current_time: f64,
    /// Seconds; `None` until the backend reports metadata.
    pub duration: Option<f64>,
    /// Output gain in `[0, 1]`.
    pub volume: f32,
}

impl PlaybackState {
    pub fn new(volume: f32) -> Self {
        Self {
            is_playing: false,
            current_time: 0.0,
            duration: None,
            volume: volume.clamp(0.0, 1.0),
        }
    }

    /// Played fraction in `[0, 1]`; 0 while the duration is unknown.
    pub fn progress(&self) -> f64 {
        match self.duration {
            Some(d) if d > 0.0 => (self.current_time / d).clamp(0.0, 1.0),
            _ => 0.0,
        }
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::new(1.0)
    }
}

/// Asynchronous notifications from a media backend.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum MediaEvent {
    /// Playback position moved, in seconds. Delivered often and coalesced.
    TimeUpdate(f64),
    /// Duration became known, in seconds.
    LoadedMetadata(f64),
    /// The source ran out.
    Ended,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlayerError {
    /// The source could not be opened or decoded.
    #[error("could not load {source_name}: {reason}")]
    LoadFailure { source_name: String, reason: String },
    /// The output refused to start.
    #[error("could not start playback: {0}")]
    PlaybackRejected(String),
    #[error("no track loaded")]
    NothingLoaded,
}
