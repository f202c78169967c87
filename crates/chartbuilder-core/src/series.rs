// File: crates/chartbuilder-core/src/series.rs
// Summary: Drawable marks in data coordinates: markers, polylines, bar columns and pie wedges.

use skia_safe as skia;

use crate::marker::Marker;

/// Vertical bar from the zero baseline, `[left, right]` wide.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Column {
    pub left: f64,
    pub right: f64,
    pub height: f64,
}

impl Column {
    /// Column of `width` centered on `x`.
    pub fn centered(x: f64, width: f64, height: f64) -> Self {
        Self { left: x - width * 0.5, right: x + width * 0.5, height }
    }
}

/// Pie slice. Angles are in degrees, counter-clockwise from the positive x axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Slice {
    pub start: f32,
    pub sweep: f32,
    pub color: skia::Color,
    pub percent: f64,
}

impl Slice {
    /// Direction of the slice bisector, as a unit vector in data space (y up).
    pub fn bisector(&self) -> (f64, f64) {
        let mid = f64::from(self.start + self.sweep * 0.5).to_radians();
        (mid.cos(), mid.sin())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Mark {
    Points { points: Vec<(f64, f64)>, color: skia::Color, marker: Marker },
    Polyline { points: Vec<(f64, f64)>, color: skia::Color },
    Columns { columns: Vec<Column>, color: skia::Color },
    /// Slices of a unit-radius pie centered on the origin.
    Wedges { slices: Vec<Slice>, shadow: bool },
}

impl Mark {
    /// Data-space x values the mark occupies, for autoscaling.
    pub fn x_values(&self) -> Vec<f64> {
        match self {
            Mark::Points { points, .. } | Mark::Polyline { points, .. } => points.iter().map(|p| p.0).collect(),
            Mark::Columns { columns, .. } => columns.iter().flat_map(|c| [c.left, c.right]).collect(),
            Mark::Wedges { .. } => vec![-1.0, 1.0],
        }
    }

    /// Data-space y values the mark occupies, for autoscaling. Columns include their baseline.
    pub fn y_values(&self) -> Vec<f64> {
        match self {
            Mark::Points { points, .. } | Mark::Polyline { points, .. } => points.iter().map(|p| p.1).collect(),
            Mark::Columns { columns, .. } => columns.iter().flat_map(|c| [0.0, c.height]).collect(),
            Mark::Wedges { .. } => vec![-1.0, 1.0],
        }
    }
}

/// Lay out pie slices starting at `start_angle`, counter-clockwise, one per share.
/// Colors come from `color_for(index)`.
pub fn slices(shares: &[f64], start_angle: f32, color_for: impl Fn(usize) -> skia::Color) -> Vec<Slice> {
    let mut theta = start_angle;
    shares
        .iter()
        .enumerate()
        .map(|(i, &share)| {
            let sweep = (share * 360.0) as f32;
            let s = Slice { start: theta, sweep, color: color_for(i), percent: share * 100.0 };
            theta += sweep;
            s
        })
        .collect()
}
