//! 2D drawing surface and the two frame renderers.
//!
//! Coordinates follow screen convention: origin top-left, `y` grows down.

/// Axis-aligned rectangle in surface units.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BarRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

pub trait DrawSurface {
    /// Logical `(width, height)`.
    fn size(&self) -> (f64, f64);
    fn clear(&mut self);
    fn fill_rect(&mut self, rect: BarRect);
    fn stroke_polyline(&mut self, points: &[(f64, f64)]);
}

/// Surface that records the last frame's primitives for the terminal
/// renderer to paint.
#[derive(Debug, Clone)]
pub struct BarCanvas {
    width: f64,
    height: f64,
    rects: Vec<BarRect>,
    polyline: Vec<(f64, f64)>,
}

impl BarCanvas {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            rects: Vec::new(),
            polyline: Vec::new(),
        }
    }

    pub fn rects(&self) -> &[BarRect] {
        &self.rects
    }

    pub fn polyline(&self) -> &[(f64, f64)] {
        &self.polyline
    }
}

impl DrawSurface for BarCanvas {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.rects.clear();
        self.polyline.clear();
    }

    fn fill_rect(&mut self, rect: BarRect) {
        self.rects.push(rect);
    }

    fn stroke_polyline(&mut self, points: &[(f64, f64)]) {
        self.polyline.clear();
        self.polyline.extend_from_slice(points);
    }
}

/// Draw one bar per bin: `height = magnitude * 2`,
/// `width = surface_width / bins * 2.5`, one unit of gap between bars.
///
/// Bars are anchored to the bottom edge. Bars past the right edge are still
/// emitted; clipping is the renderer's job.
pub fn draw_bars(surface: &mut impl DrawSurface, data: &[u8]) {
    surface.clear();
    if data.is_empty() {
        return;
    }

    let (width, height) = surface.size();
    let bar_width = (width / data.len() as f64) * 2.5;
    let mut x = 0.0;

    for &magnitude in data {
        let bar_height = f64::from(magnitude) * 2.0;
        surface.fill_rect(BarRect {
            x,
            y: height - bar_height,
            width: bar_width,
            height: bar_height,
        });
        x += bar_width + 1.0;
    }
}

/// Draw the bins as a polyline: `y = magnitude / 128 * height / 2`, evenly
/// spaced across the width, closed at `(width, height / 2)`.
pub fn draw_line(surface: &mut impl DrawSurface, data: &[u8]) {
    surface.clear();
    if data.is_empty() {
        return;
    }

    let (width, height) = surface.size();
    let slice_width = width / data.len() as f64;

    let mut points: Vec<(f64, f64)> = data
        .iter()
        .enumerate()
        .map(|(i, &m)| {
            let v = f64::from(m) / 128.0;
            (i as f64 * slice_width, v * height / 2.0)
        })
        .collect();
    points.push((width, height / 2.0));

    surface.stroke_polyline(&points);
}
