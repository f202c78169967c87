// File: crates/chartbuilder-core/src/figure.rs
// Summary: Declarative figure scene built by the chart facades and consumed by the renderer.

use std::path::PathBuf;

use skia_safe as skia;

use crate::axis::Axis;
use crate::marker::Marker;
use crate::series::Mark;
use crate::theme::Theme;

/// Colored text.
#[derive(Clone, Debug, PartialEq)]
pub struct Label {
    pub text: String,
    pub color: skia::Color,
}

impl Label {
    pub fn new(text: impl Into<String>, color: skia::Color) -> Self {
        Self { text: text.into(), color }
    }
}

/// Key glyph drawn next to a legend entry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Glyph {
    Marker(Marker),
    Line,
    Patch,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub color: skia::Color,
    pub glyph: Glyph,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LegendPlacement {
    /// Inside the panel, upper right corner.
    UpperRight,
    /// Top-left corner of the legend box, in fractions of the panel (x from left, y from bottom).
    Anchor { x: f32, y: f32 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Legend {
    pub entries: Vec<LegendEntry>,
    pub placement: LegendPlacement,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelKind {
    /// Framed axes with ticks and grid.
    Cartesian,
    /// Frameless equal-aspect panel.
    Pie,
}

/// One set of axes.
#[derive(Clone, Debug, PartialEq)]
pub struct Panel {
    pub kind: PanelKind,
    /// Axes rectangle in canvas pixels.
    pub rect: skia::Rect,
    pub x: Axis,
    pub y: Axis,
    pub background: Option<skia::Color>,
    pub title: Option<Label>,
    pub x_label: Option<Label>,
    pub y_label: Option<Label>,
    pub grid: bool,
    /// Color of tick marks and tick labels.
    pub tick_color: skia::Color,
    pub marks: Vec<Mark>,
    pub legend: Option<Legend>,
}

impl Panel {
    pub fn new(kind: PanelKind, rect: skia::Rect, x: Axis, y: Axis) -> Self {
        Self {
            kind,
            rect,
            x,
            y,
            background: None,
            title: None,
            x_label: None,
            y_label: None,
            grid: false,
            tick_color: skia::Color::BLACK,
            marks: Vec::new(),
            legend: None,
        }
    }
}

/// Everything needed to paint one artifact.
#[derive(Clone, Debug, PartialEq)]
pub struct Figure {
    pub width: u32,
    pub height: u32,
    pub dpi: u32,
    pub face: skia::Color,
    pub suptitle: Option<Label>,
    /// Drawn stretched over every panel; skipped if it cannot be read.
    pub bg_image: Option<PathBuf>,
    pub panels: Vec<Panel>,
    pub theme: Theme,
}

impl Figure {
    /// Size in pixels of `points` at this figure's resolution.
    pub fn px(&self, points: f32) -> f32 {
        crate::types::points_to_px(points, self.dpi)
    }
}
