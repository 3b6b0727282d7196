use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use crate::library::{ObjectUrls, Track, TrackId};
use crate::visualizer::SampleTap;

use super::backend::MediaBackend;
use super::types::{MediaEvent, PlaybackState, PlayerError};

/// The track currently held by the engine's backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedTrack {
    pub id: TrackId,
    pub name: String,
    pub generation: u64,
}

/// Play/pause/seek/volume state on top of one `MediaBackend` handle.
pub struct PlaybackEngine<B: MediaBackend> {
    backend: B,
    state: PlaybackState,
    loaded: Option<LoadedTrack>,
    ended: bool,
    next_generation: u64,
}

impl<B: MediaBackend> PlaybackEngine<B> {
    pub fn new(mut backend: B, volume: f32) -> Self {
        let state = PlaybackState::new(volume);
        backend.set_volume(state.volume);
        Self {
            backend,
            state,
            loaded: None,
            ended: false,
            next_generation: 1,
        }
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn loaded(&self) -> Option<&LoadedTrack> {
        self.loaded.as_ref()
    }

    /// Analyser tap point of the current handle.
    pub fn tap(&self) -> Option<&Arc<SampleTap>> {
        self.backend.tap()
    }

    #[cfg(test)]
    pub(crate) fn backend(&self) -> &B {
        &self.backend
    }

    #[cfg(test)]
    pub(crate) fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Swap the backend handle for `track`, opening whatever its object URL
    /// resolves to in `urls`. On failure nothing changes.
    pub fn load(&mut self, track: &Track, urls: &ObjectUrls) -> Result<(), PlayerError> {
        let href = track.url().to_string();
        let source = urls.resolve(&href).ok_or_else(|| PlayerError::LoadFailure {
            source_name: href.clone(),
            reason: "object url has been revoked".to_string(),
        })?;

        let generation = self.next_generation;
        self.backend.open(&source, generation)?;
        self.next_generation += 1;

        self.loaded = Some(LoadedTrack {
            id: track.id(),
            name: track.display_name().to_string(),
            generation,
        });
        self.state.is_playing = false;
        self.state.current_time = 0.0;
        self.state.duration = None;
        self.ended = false;
        info!(track = %track.id(), name = track.display_name(), generation, "loaded");
        Ok(())
    }

    /// Release the current handle, keeping the volume.
    pub fn unload(&mut self) {
        if let Some(loaded) = self.loaded.take() {
            self.backend.close();
            debug!(track = %loaded.id, "unloaded");
        }
        self.state = PlaybackState::new(self.state.volume);
        self.ended = false;
    }

    pub fn play(&mut self) -> Result<(), PlayerError> {
        if self.loaded.is_none() {
            return Err(PlayerError::NothingLoaded);
        }
        if self.state.is_playing {
            return Ok(());
        }
        if self.ended {
            // an ended track starts over
            self.seek(0.0);
        }
        self.backend.play()?;
        self.state.is_playing = true;
        Ok(())
    }

    pub fn pause(&mut self) {
        if self.state.is_playing {
            self.backend.pause();
            self.state.is_playing = false;
        }
    }

    /// Play if paused, pause if playing. Returns the new `is_playing`.
    pub fn toggle(&mut self) -> Result<bool, PlayerError> {
        if self.state.is_playing {
            self.pause();
        } else {
            self.play()?;
        }
        Ok(self.state.is_playing)
    }

    /// Jump to `seconds`, clamped to the known duration. Returns the
    /// position actually requested.
    pub fn seek(&mut self, seconds: f64) -> f64 {
        if self.loaded.is_none() {
            return self.state.current_time;
        }
        let limit = self.state.duration.unwrap_or(0.0);
        let target = if seconds.is_finite() {
            seconds.clamp(0.0, limit)
        } else {
            0.0
        };
        self.state.current_time = target;
        self.ended = false;
        self.backend.seek(Duration::from_secs_f64(target));
        target
    }

    pub fn seek_by(&mut self, delta: f64) -> f64 {
        self.seek(self.state.current_time + delta)
    }

    /// Set the output gain, clamped to `[0, 1]`. Returns the applied value.
    pub fn set_volume(&mut self, volume: f32) -> f32 {
        let volume = if volume.is_nan() {
            self.state.volume
        } else {
            volume.clamp(0.0, 1.0)
        };
        self.state.volume = volume;
        self.backend.set_volume(volume);
        volume
    }

    /// Apply pending backend events. Returns them for callers that react to
    /// `Ended`.
    pub fn pump(&mut self) -> Vec<MediaEvent> {
        let events = self.backend.poll_events();
        for event in &events {
            self.apply(*event);
        }
        events
    }

    fn apply(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::TimeUpdate(t) => {
                let t = t.max(0.0);
                self.state.current_time = match self.state.duration {
                    Some(d) => t.min(d),
                    None => t,
                };
            }
            MediaEvent::LoadedMetadata(d) => {
                self.state.duration = Some(d.max(0.0));
                debug!(duration = d, "metadata loaded");
            }
            MediaEvent::Ended => {
                self.state.is_playing = false;
                if let Some(d) = self.state.duration {
                    self.state.current_time = d;
                }
                self.ended = true;
            }
        }
    }
}
