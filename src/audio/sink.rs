//! Utilities for building tapped `rodio` sources and sinks.
//!
//! Opening a track decodes the file and wraps the decoder in a `TapSource`;
//! the sink is only created once the output stream exists.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use lofty::file::AudioFile;
use rodio::{Decoder, OutputStream, Sink, Source};
use tracing::{debug, warn};

use crate::visualizer::{SampleTap, TapSource};

use super::types::PlayerError;

pub(super) type TappedSource = TapSource<Decoder<BufReader<File>>>;

/// Decode `path` and route its samples through `tap`.
pub(super) fn open_tapped(path: &Path, tap: Arc<SampleTap>) -> Result<TappedSource, PlayerError> {
    let failure = |reason: String| PlayerError::LoadFailure {
        source_name: path.display().to_string(),
        reason,
    };
    let file = File::open(path).map_err(|e| failure(e.to_string()))?;
    let decoder = Decoder::new(BufReader::new(file)).map_err(|e| failure(e.to_string()))?;
    Ok(TapSource::new(decoder, tap))
}

/// Track length from the decoder, falling back to the file's tags.
pub(super) fn probe_duration(path: &Path, source: &impl Source) -> Option<Duration> {
    if let Some(d) = source.total_duration().filter(|d| !d.is_zero()) {
        return Some(d);
    }
    match lofty::read_from_path(path) {
        Ok(file) => Some(file.properties().duration()).filter(|d| !d.is_zero()),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "no duration in file properties");
            None
        }
    }
}

/// Create a paused `Sink` playing `source` from `start_at`.
pub(super) fn create_sink_at(
    stream: &OutputStream,
    mut source: TappedSource,
    start_at: Duration,
    volume: f32,
) -> Sink {
    // Seeking the decoder before it reaches the mixer never blocks.
    if !start_at.is_zero() {
        if let Err(e) = source.try_seek(start_at) {
            warn!(error = %e, position = ?start_at, "initial seek failed");
        }
    }
    let sink = Sink::connect_new(stream.mixer());
    sink.pause();
    sink.set_volume(volume);
    sink.append(source);
    sink
}
