use rodio::{OutputStream, OutputStreamBuilder};
use tracing::{debug, info};

use super::types::PlayerError;

/// Lazily opened output stream.
///
/// Nothing touches the audio device until the first `resume`, so a
/// machine without sound can still browse and edit the playlist.
#[derive(Default)]
pub struct AudioContext {
    stream: Option<OutputStream>,
}

impl AudioContext {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn is_running(&self) -> bool {
        self.stream.is_some()
    }

    /// Open the default output on first use and return it.
    pub fn resume(&mut self) -> Result<&OutputStream, PlayerError> {
        if self.stream.is_none() {
            let mut stream = OutputStreamBuilder::open_default_stream()
                .map_err(|e| PlayerError::PlaybackRejected(e.to_string()))?;
            // rodio logs to stderr when the stream is dropped, which would
            // scribble over the terminal UI.
            stream.log_on_drop(false);
            info!("audio output opened");
            self.stream = Some(stream);
        }
        self.stream
            .as_ref()
            .ok_or_else(|| PlayerError::PlaybackRejected("output stream unavailable".into()))
    }
}

impl Drop for AudioContext {
    fn drop(&mut self) {
        if self.stream.take().is_some() {
            debug!("audio output closed");
        }
    }
}
