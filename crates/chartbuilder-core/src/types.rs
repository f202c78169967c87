// File: crates/chartbuilder-core/src/types.rs
// Summary: Shared defaults (canvas size, resolution) and figure margins.

/// Default canvas width in pixels.
pub const WIDTH: u32 = 800;
/// Default canvas height in pixels (per panel for stacked charts).
pub const HEIGHT: u32 = 600;
/// Default resolution; font and stroke sizes are given in points and scale with it.
pub const DPI: u32 = 90;

/// Vertical gap between stacked panels, as a fraction of one panel's height.
pub const PANEL_HSPACE: f32 = 0.2;

/// Figure margins as fractions of the canvas.
/// `left`/`right` are measured from the left edge, `top`/`bottom` from the bottom edge.
/// Contract: `left < right` and `bottom < top`, all within [0, 1].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Margins {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Margins {
    pub const fn new(left: f32, right: f32, top: f32, bottom: f32) -> Self {
        Self { left, right, top, bottom }
    }

    /// Tight margins used by scatter, line, histogram and bar charts.
    pub const CARTESIAN: Margins = Margins::new(0.084, 0.920, 0.900, 0.092);

    /// Stock subplot margins; pie charts keep these.
    pub const STOCK: Margins = Margins::new(0.125, 0.900, 0.880, 0.110);
}

impl Default for Margins {
    fn default() -> Self {
        Self::CARTESIAN
    }
}

/// Convert a size in points to pixels at `dpi`.
#[inline]
pub fn points_to_px(points: f32, dpi: u32) -> f32 {
    points * dpi as f32 / 72.0
}
