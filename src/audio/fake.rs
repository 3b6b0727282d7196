//! In-memory `MediaBackend` for tests.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use crate::library::TrackSource;
use crate::visualizer::SampleTap;

use super::backend::MediaBackend;
use super::types::{MediaEvent, PlayerError};

#[derive(Debug, Default)]
pub(crate) struct FakeBackend {
    pub(crate) open: Option<TrackSource>,
    pub(crate) tap: Option<Arc<SampleTap>>,
    pub(crate) playing: bool,
    pub(crate) volume: f32,
    pub(crate) seeks: Vec<Duration>,
    pub(crate) events: Vec<MediaEvent>,
    /// Sources whose `open` fails.
    pub(crate) broken: HashSet<String>,
    /// Make `play` fail as if no output device were available.
    pub(crate) reject_play: bool,
    pub(crate) opens: usize,
}

impl FakeBackend {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn break_source(&mut self, source: &str) {
        self.broken.insert(source.to_string());
    }

    pub(crate) fn emit(&mut self, event: MediaEvent) {
        self.events.push(event);
    }
}

impl MediaBackend for FakeBackend {
    fn open(&mut self, source: &TrackSource, generation: u64) -> Result<(), PlayerError> {
        let name = source.to_string();
        if self.broken.contains(&name) {
            return Err(PlayerError::LoadFailure {
                source_name: name,
                reason: "unsupported format".into(),
            });
        }
        self.open = Some(source.clone());
        self.tap = Some(SampleTap::new(generation, 1024));
        self.playing = false;
        self.events.clear();
        self.opens += 1;
        Ok(())
    }

    fn close(&mut self) {
        self.open = None;
        self.tap = None;
        self.playing = false;
        self.events.clear();
    }

    fn play(&mut self) -> Result<(), PlayerError> {
        if self.open.is_none() {
            return Err(PlayerError::NothingLoaded);
        }
        if self.reject_play {
            return Err(PlayerError::PlaybackRejected("no output device".into()));
        }
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn seek(&mut self, position: Duration) {
        self.seeks.push(position);
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
    }

    fn tap(&self) -> Option<&Arc<SampleTap>> {
        self.tap.as_ref()
    }

    fn poll_events(&mut self) -> Vec<MediaEvent> {
        std::mem::take(&mut self.events)
    }
}
