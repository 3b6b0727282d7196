use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use rodio::Sink;
use tracing::{debug, info, warn};

use crate::library::TrackSource;
use crate::visualizer::SampleTap;

use super::backend::MediaBackend;
use super::context::AudioContext;
use super::sink::{TappedSource, create_sink_at, open_tapped, probe_duration};
use super::types::{MediaEvent, PlayerError};

/// `MediaBackend` on top of rodio: decoder → tap → sink.
pub struct RodioBackend {
    context: AudioContext,
    tap_capacity: usize,
    volume: f32,
    current: Option<Handle>,
    events: Vec<MediaEvent>,
}

/// One opened track.
struct Handle {
    path: PathBuf,
    tap: Arc<SampleTap>,
    /// Decoded but not yet handed to a sink.
    pending: Option<TappedSource>,
    sink: Option<Sink>,
    /// Offset the sink started from; `get_pos` counts from here.
    start_at: Duration,
    playing: bool,
    ended: bool,
}

impl RodioBackend {
    /// `tap_capacity` is the number of mono samples the analysis tap keeps.
    pub fn new(tap_capacity: usize) -> Self {
        Self {
            context: AudioContext::new(),
            tap_capacity,
            volume: 1.0,
            current: None,
            events: Vec::new(),
        }
    }

    #[cfg(test)]
    pub fn is_output_open(&self) -> bool {
        self.context.is_running()
    }
}

/// Make sure `handle` has a (paused) sink, reopening the file if needed.
fn ensure_sink<'h>(
    context: &mut AudioContext,
    handle: &'h mut Handle,
    volume: f32,
) -> Result<&'h Sink, PlayerError> {
    if handle.sink.is_none() {
        let stream = context.resume()?;
        let source = match handle.pending.take() {
            Some(source) => source,
            None => open_tapped(&handle.path, Arc::clone(&handle.tap))?,
        };
        handle.sink = Some(create_sink_at(stream, source, handle.start_at, volume));
        debug!(path = %handle.path.display(), start_at = ?handle.start_at, "sink created");
    }
    handle
        .sink
        .as_ref()
        .ok_or_else(|| PlayerError::PlaybackRejected("sink unavailable".into()))
}

impl MediaBackend for RodioBackend {
    fn open(&mut self, source: &TrackSource, generation: u64) -> Result<(), PlayerError> {
        let Some(path) = source.path() else {
            return Err(PlayerError::LoadFailure {
                source_name: source.to_string(),
                reason: "remote streams are not supported".into(),
            });
        };

        let tap = SampleTap::new(generation, self.tap_capacity);
        let decoded = open_tapped(path, Arc::clone(&tap))?;
        let duration = probe_duration(path, &decoded);

        self.close();
        if let Some(d) = duration {
            self.events.push(MediaEvent::LoadedMetadata(d.as_secs_f64()));
        }
        info!(path = %path.display(), generation, duration = ?duration, "track opened");

        self.current = Some(Handle {
            path: path.to_path_buf(),
            tap,
            pending: Some(decoded),
            sink: None,
            start_at: Duration::ZERO,
            playing: false,
            ended: false,
        });
        Ok(())
    }

    fn close(&mut self) {
        if let Some(handle) = self.current.take() {
            if let Some(sink) = &handle.sink {
                sink.stop();
            }
            debug!(generation = handle.tap.generation(), "track closed");
        }
        self.events.clear();
    }

    fn play(&mut self) -> Result<(), PlayerError> {
        let handle = self.current.as_mut().ok_or(PlayerError::NothingLoaded)?;
        if handle.ended {
            handle.sink = None;
            handle.start_at = Duration::ZERO;
            handle.ended = false;
        }
        ensure_sink(&mut self.context, handle, self.volume)?.play();
        handle.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        if let Some(handle) = self.current.as_mut() {
            if let Some(sink) = &handle.sink {
                sink.pause();
            }
            handle.playing = false;
        }
    }

    fn seek(&mut self, position: Duration) {
        let Some(handle) = self.current.as_mut() else {
            return;
        };
        handle.ended = false;

        if let Some(sink) = handle.sink.as_ref().filter(|s| !s.empty()) {
            match sink.try_seek(position) {
                Ok(()) => {
                    // the sink now reports absolute positions
                    handle.start_at = Duration::ZERO;
                    return;
                }
                Err(e) => warn!(error = %e, position = ?position, "seek failed, reopening"),
            }
        }

        // No live sink: restart from `position` on the next sink.
        if let Some(sink) = handle.sink.take() {
            sink.stop();
        }
        handle.start_at = position;
        if handle.playing {
            match ensure_sink(&mut self.context, handle, self.volume) {
                Ok(sink) => sink.play(),
                Err(e) => {
                    warn!(error = %e, "could not resume after seek");
                    handle.playing = false;
                }
            }
        }
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
        if let Some(sink) = self.current.as_ref().and_then(|h| h.sink.as_ref()) {
            sink.set_volume(volume);
        }
    }

    fn tap(&self) -> Option<&Arc<SampleTap>> {
        self.current.as_ref().map(|h| &h.tap)
    }

    fn poll_events(&mut self) -> Vec<MediaEvent> {
        let mut events = std::mem::take(&mut self.events);
        let Some(handle) = self.current.as_mut() else {
            return events;
        };
        let Some(sink) = handle.sink.as_ref() else {
            return events;
        };
        if !handle.playing {
            return events;
        }
        if sink.empty() {
            handle.playing = false;
            handle.ended = true;
            debug!(path = %handle.path.display(), "track ended");
            events.push(MediaEvent::Ended);
        } else {
            events.push(MediaEvent::TimeUpdate(
                (handle.start_at + sink.get_pos()).as_secs_f64(),
            ));
        }
        events
    }
}
