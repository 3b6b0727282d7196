use std::sync::Arc;

use tracing::debug;

use super::analyser::Analyser;
use super::tap::{AnalysisError, SampleTap};

/// One analyser connected to exactly one playback handle's tap.
///
/// Dropping the session disconnects the tap, which stops the audio thread
/// from copying samples.
pub struct AnalysisSession {
    tap: Arc<SampleTap>,
    analyser: Analyser,
    scratch: Vec<f32>,
}

impl AnalysisSession {
    pub fn connect(tap: Arc<SampleTap>, analyser: Analyser) -> Result<Self, AnalysisError> {
        tap.connect()?;
        debug!(generation = tap.generation(), fft_size = analyser.fft_size(), "analysis session connected");
        let scratch = vec![0.0; analyser.fft_size()];
        Ok(Self {
            tap,
            analyser,
            scratch,
        })
    }

    pub fn generation(&self) -> u64 {
        self.tap.generation()
    }

    pub fn frequency_bin_count(&self) -> usize {
        self.analyser.frequency_bin_count()
    }

    /// Read the current frequency-bin magnitudes into `out`.
    pub fn read(&mut self, out: &mut [u8]) {
        self.tap.snapshot(&mut self.scratch);
        self.analyser.byte_frequency_data(&self.scratch, out);
    }
}

impl Drop for AnalysisSession {
    fn drop(&mut self) {
        self.tap.disconnect();
        debug!(generation = self.tap.generation(), "analysis session released");
    }
}
