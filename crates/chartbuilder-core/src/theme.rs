// File: crates/chartbuilder-core/src/theme.rs
// Summary: Fixed styling for figures: neutral colors plus font/stroke sizes in points.

use skia_safe as skia;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    pub figure_background: skia::Color,
    pub axes_background: skia::Color,
    pub axes_edge: skia::Color,
    pub grid: skia::Color,
    /// Text that the font-color setting does not cover (legend entries, wedge percentages).
    pub legend_text: skia::Color,
    pub legend_frame: skia::Color,
    pub legend_fill: skia::Color,
    pub shadow: skia::Color,
    // sizes in points
    pub title_size: f32,
    pub label_size: f32,
    pub tick_size: f32,
    pub legend_size: f32,
    pub tick_length: f32,
    pub tick_pad: f32,
    pub label_pad: f32,
    pub title_pad: f32,
    pub marker_size: f32,
    pub line_width: f32,
    pub edge_width: f32,
    pub grid_width: f32,
}

impl Theme {
    pub fn classic() -> Self {
        Self {
            figure_background: skia::Color::WHITE,
            axes_background: skia::Color::WHITE,
            axes_edge: skia::Color::BLACK,
            grid: skia::Color::from_rgb(0xB0, 0xB0, 0xB0),
            legend_text: skia::Color::BLACK,
            legend_frame: skia::Color::from_rgb(0xCC, 0xCC, 0xCC),
            legend_fill: skia::Color::from_argb(204, 255, 255, 255),
            shadow: skia::Color::from_argb(110, 0, 0, 0),
            title_size: 12.0,
            label_size: 10.0,
            tick_size: 10.0,
            legend_size: 10.0,
            tick_length: 3.5,
            tick_pad: 3.5,
            label_pad: 4.0,
            title_pad: 6.0,
            marker_size: 6.0,
            line_width: 1.5,
            edge_width: 0.8,
            grid_width: 0.8,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::classic()
    }
}
