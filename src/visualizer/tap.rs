//! Non-destructive analysis tap on the playback path.
//!
//! `TapSource` sits between the decoder and the sink. Every sample goes to
//! the output unchanged; while an analysis session is connected a mono
//! downmix is also copied into the `SampleTap` ring buffer.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use rodio::source::SeekError;
use rodio::{ChannelCount, SampleRate, Source};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("an analysis session is already connected to playback handle {generation}")]
    AlreadyConnected { generation: u64 },
}

/// Shared end of the tap: one per playback handle.
#[derive(Debug)]
pub struct SampleTap {
    generation: u64,
    capacity: usize,
    connected: AtomicBool,
    samples: Mutex<VecDeque<f32>>,
}

impl SampleTap {
    pub fn new(generation: u64, capacity: usize) -> Arc<Self> {
        Arc::new(Self {
            generation,
            capacity: capacity.max(1),
            connected: AtomicBool::new(false),
            samples: Mutex::new(VecDeque::with_capacity(capacity.max(1))),
        })
    }

    /// Identity of the playback handle this tap belongs to.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }

    /// Claim the tap for one session.
    pub(crate) fn connect(&self) -> Result<(), AnalysisError> {
        self.connected
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| ())
            .map_err(|_| AnalysisError::AlreadyConnected {
                generation: self.generation,
            })
    }

    pub(crate) fn disconnect(&self) {
        self.connected.store(false, Ordering::Release);
        if let Ok(mut buf) = self.samples.lock() {
            buf.clear();
        }
    }

    /// Called from the audio thread. Never blocks: a contended frame is dropped.
    pub fn push(&self, sample: f32) {
        if !self.is_connected() {
            return;
        }
        if let Ok(mut buf) = self.samples.try_lock() {
            if buf.len() >= self.capacity {
                buf.pop_front();
            }
            buf.push_back(sample);
        }
    }

    /// Copy the newest `out.len()` samples into `out`, oldest first.
    /// Missing history is zero-filled at the front.
    pub fn snapshot(&self, out: &mut [f32]) {
        out.fill(0.0);
        let Ok(buf) = self.samples.lock() else {
            return;
        };
        let n = buf.len().min(out.len());
        let dst_start = out.len() - n;
        for (dst, src) in out[dst_start..].iter_mut().zip(buf.range(buf.len() - n..)) {
            *dst = *src;
        }
    }
}

/// Pass-through `Source` feeding a `SampleTap`.
pub struct TapSource<S>
where
    S: Source<Item = f32>,
{
    inner: S,
    tap: Arc<SampleTap>,
    frame_sum: f32,
    frame_pos: ChannelCount,
}

impl<S> TapSource<S>
where
    S: Source<Item = f32>,
{
    pub fn new(inner: S, tap: Arc<SampleTap>) -> Self {
        Self {
            inner,
            tap,
            frame_sum: 0.0,
            frame_pos: 0,
        }
    }
}

impl<S> Iterator for TapSource<S>
where
    S: Source<Item = f32>,
{
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        let sample = self.inner.next()?;

        let channels = self.inner.channels().max(1);
        self.frame_sum += sample;
        self.frame_pos += 1;
        if self.frame_pos >= channels {
            self.tap.push(self.frame_sum / f32::from(channels));
            self.frame_sum = 0.0;
            self.frame_pos = 0;
        }

        Some(sample)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<S> Source for TapSource<S>
where
    S: Source<Item = f32>,
{
    fn current_span_len(&self) -> Option<usize> {
        self.inner.current_span_len()
    }

    fn channels(&self) -> ChannelCount {
        self.inner.channels()
    }

    fn sample_rate(&self) -> SampleRate {
        self.inner.sample_rate()
    }

    fn total_duration(&self) -> Option<Duration> {
        self.inner.total_duration()
    }

    fn try_seek(&mut self, pos: Duration) -> Result<(), SeekError> {
        self.frame_sum = 0.0;
        self.frame_pos = 0;
        self.inner.try_seek(pos)
    }
}
