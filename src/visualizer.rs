//! Frequency visualizer: analyser tap, analysis session, frame loop and
//! the drawing surface.

mod analyser;
mod frame;
mod pipeline;
mod session;
mod surface;
mod tap;

pub use pipeline::{Visualizer, VisualizerState};
pub use surface::{BarCanvas, DrawSurface};
pub use tap::{SampleTap, TapSource};
