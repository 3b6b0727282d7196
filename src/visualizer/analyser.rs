use std::f32::consts::PI;
use std::sync::Arc;

use rustfft::{Fft, FftPlanner, num_complex::Complex};

use crate::config::VisualizerSettings;

/// Frequency analyser with byte-scaled output.
///
/// Each call windows the latest `fft_size` time-domain samples (Blackman),
/// transforms them, scales magnitudes by `1 / fft_size`, blends them with
/// the previous frame by `smoothing`, converts to decibels and maps
/// `[min_db, max_db]` linearly onto `0..=255`.
pub struct Analyser {
    fft_size: usize,
    smoothing: f32,
    min_db: f32,
    max_db: f32,
    window: Vec<f32>,
    input: Vec<Complex<f32>>,
    smoothed: Vec<f32>,
    fft: Arc<dyn Fft<f32>>,
}

impl Analyser {
    pub fn new(fft_size: usize, smoothing: f32, min_db: f32, max_db: f32) -> Self {
        let fft_size = fft_size.max(2);
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(fft_size);

        Self {
            fft_size,
            smoothing: smoothing.clamp(0.0, 1.0),
            min_db,
            max_db,
            window: blackman(fft_size),
            input: vec![Complex::new(0.0, 0.0); fft_size],
            smoothed: vec![0.0; fft_size / 2],
            fft,
        }
    }

    pub fn from_settings(settings: &VisualizerSettings) -> Self {
        Self::new(
            settings.fft_size,
            settings.smoothing,
            settings.min_db,
            settings.max_db,
        )
    }

    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    /// Number of frequency bins: half the FFT size.
    pub fn frequency_bin_count(&self) -> usize {
        self.fft_size / 2
    }

    /// Compute one frame of byte magnitudes from `samples` into `out`.
    ///
    /// `samples` shorter than `fft_size` are zero-padded at the front; extra
    /// samples at the front are ignored. Only the first
    /// `min(out.len(), frequency_bin_count())` entries of `out` are written.
    pub fn byte_frequency_data(&mut self, samples: &[f32], out: &mut [u8]) {
        let n = self.fft_size;
        let take = samples.len().min(n);
        let pad = n - take;
        let recent = &samples[samples.len() - take..];

        for (i, slot) in self.input.iter_mut().enumerate() {
            let s = if i < pad { 0.0 } else { recent[i - pad] };
            *slot = Complex::new(s * self.window[i], 0.0);
        }

        self.fft.process(&mut self.input);

        let scale = 1.0 / n as f32;
        let tau = self.smoothing;
        let range = self.max_db - self.min_db;
        for (k, slot) in out.iter_mut().take(self.smoothed.len()).enumerate() {
            let magnitude = self.input[k].norm() * scale;
            let s = tau * self.smoothed[k] + (1.0 - tau) * magnitude;
            self.smoothed[k] = if s.is_finite() { s } else { 0.0 };
            *slot = to_byte(self.smoothed[k], self.min_db, range);
        }
    }
}

fn to_byte(magnitude: f32, min_db: f32, range: f32) -> u8 {
    if magnitude <= 0.0 {
        return 0;
    }
    let db = 20.0 * magnitude.log10();
    let scaled = (255.0 / range) * (db - min_db);
    scaled.floor().clamp(0.0, 255.0) as u8
}

fn blackman(n: usize) -> Vec<f32> {
    const ALPHA: f32 = 0.16;
    let a0 = 0.5 * (1.0 - ALPHA);
    let a1 = 0.5;
    let a2 = 0.5 * ALPHA;
    (0..n)
        .map(|i| {
            let x = i as f32 / n as f32;
            a0 - a1 * (2.0 * PI * x).cos() + a2 * (4.0 * PI * x).cos()
        })
        .collect()
}
