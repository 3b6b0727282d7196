use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::config::{VisualStyle, VisualizerSettings};

use super::analyser::Analyser;
use super::frame::FrameLoop;
use super::session::AnalysisSession;
use super::surface::{BarCanvas, draw_bars, draw_line};
use super::tap::SampleTap;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum VisualizerState {
    /// No analysis session exists.
    Uninitialized,
    /// Session connected to the current playback handle, not drawing.
    Armed,
    /// A frame is scheduled on every refresh.
    Drawing,
}

/// Owns the analysis session and the redraw loop for one view.
///
/// The session always belongs to the playback handle passed to `tick`: a new
/// handle tears the old session down before connecting a fresh one. Frames
/// are only scheduled while playback is running.
pub struct Visualizer {
    settings: VisualizerSettings,
    style: VisualStyle,
    state: VisualizerState,
    session: Option<AnalysisSession>,
    frames: FrameLoop,
    play_requested: bool,
    refused_generation: Option<u64>,
    bins: Vec<u8>,
    canvas: BarCanvas,
    frames_drawn: u64,
}

impl Visualizer {
    pub fn new(settings: &VisualizerSettings) -> Self {
        Self {
            settings: settings.clone(),
            style: settings.style,
            state: VisualizerState::Uninitialized,
            session: None,
            frames: FrameLoop::new(),
            play_requested: false,
            refused_generation: None,
            bins: vec![0; settings.fft_size / 2],
            canvas: BarCanvas::new(settings.width, settings.height),
            frames_drawn: 0,
        }
    }

    pub fn state(&self) -> VisualizerState {
        self.state
    }

    pub fn style(&self) -> VisualStyle {
        self.style
    }

    pub fn toggle_style(&mut self) {
        self.style = self.style.toggled();
    }

    pub fn canvas(&self) -> &BarCanvas {
        &self.canvas
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    pub fn is_scheduled(&self) -> bool {
        self.frames.is_scheduled()
    }

    /// Generation of the playback handle the session is connected to.
    pub fn session_generation(&self) -> Option<u64> {
        self.session.as_ref().map(AnalysisSession::generation)
    }

    /// Playback started (the engine has already resumed its output context).
    pub fn on_play(&mut self) {
        self.play_requested = true;
        if self.state == VisualizerState::Armed {
            self.start_drawing();
        }
    }

    /// Playback paused or ended: stop scheduling frames.
    pub fn on_pause(&mut self) {
        self.play_requested = false;
        if self.frames.cancel() {
            trace!("pending frame cancelled");
        }
        if self.state == VisualizerState::Drawing {
            self.state = VisualizerState::Armed;
        }
    }

    /// One display refresh. Returns whether a frame was drawn.
    pub fn tick(&mut self, tap: Option<&Arc<SampleTap>>, is_playing: bool) -> bool {
        self.attach(tap);

        if self.frames.take_due().is_none() {
            return false;
        }

        self.draw_frame();

        if is_playing {
            self.frames.request();
        } else {
            self.play_requested = false;
            self.state = VisualizerState::Armed;
        }
        true
    }

    /// Follow the current playback handle. Called by `tick`, and directly
    /// right after a handle swap so the old session never outlives it.
    pub fn attach(&mut self, tap: Option<&Arc<SampleTap>>) {
        match (tap, self.session_generation()) {
            (Some(tap), Some(current)) if current == tap.generation() => {}
            (Some(tap), None) if self.refused_generation == Some(tap.generation()) => {}
            (Some(tap), _) => {
                self.teardown();
                let analyser = Analyser::from_settings(&self.settings);
                match AnalysisSession::connect(Arc::clone(tap), analyser) {
                    Ok(session) => {
                        self.bins = vec![0; session.frequency_bin_count()];
                        self.session = Some(session);
                        self.state = VisualizerState::Armed;
                        if self.play_requested {
                            self.start_drawing();
                        }
                    }
                    Err(e) => {
                        warn!(error = %e, "could not attach analyser");
                        self.refused_generation = Some(tap.generation());
                    }
                }
            }
            (None, Some(_)) => self.teardown(),
            (None, None) => {}
        }
    }

    fn start_drawing(&mut self) {
        self.state = VisualizerState::Drawing;
        self.frames.request();
        debug!(generation = ?self.session_generation(), "visualizer drawing");
    }

    fn teardown(&mut self) {
        self.frames.cancel();
        self.session = None;
        self.state = VisualizerState::Uninitialized;
        self.bins.fill(0);
    }

    fn draw_frame(&mut self) {
        match self.session.as_mut() {
            Some(session) => session.read(&mut self.bins),
            None => self.bins.fill(0),
        }
        match self.style {
            VisualStyle::Bars => draw_bars(&mut self.canvas, &self.bins),
            VisualStyle::Line => draw_line(&mut self.canvas, &self.bins),
        }
        self.frames_drawn += 1;
    }
}

impl Drop for Visualizer {
    fn drop(&mut self) {
        self.frames.cancel();
        if self.session.take().is_some() {
            debug!("visualizer dropped, session released");
        }
    }
}
