// File: crates/chartbuilder-core/src/chart.rs
// Summary: Chart facades (scatter, line, histogram, bar, pie). Each turns its datasets plus the
//          shared options into a `Figure` and hands it to the exporter.

use log::{debug, warn};
use skia_safe as skia;

use crate::axis::{Axis, Extent, AUTOSCALE_MARGIN};
use crate::dataset::{BarData, HistData, LineData, PieData, ScatterData};
use crate::error::{ChartError, Result};
use crate::export;
use crate::figure::{Figure, Glyph, Label, Legend, LegendEntry, LegendPlacement, Panel, PanelKind};
use crate::geometry::{panel_rects, square_in};
use crate::options::{ChartOptions, Configure, Fill};
use crate::palette;
use crate::series::{slices, Column, Mark};
use crate::theme::Theme;
use crate::types::Margins;

/// x-axis label shown on a bar panel whose custom tick labels do not match its values.
pub const TICKS_MISMATCH: &str = "Error: count of custom x-ticks and count of values doesn't match";
/// Bar width in x units.
pub const BAR_WIDTH: f64 = 0.8;
/// Share of each histogram bin covered by its bar.
pub const HIST_RWIDTH: f64 = 0.8;
/// Pie slices start at 12 o'clock.
pub const PIE_START_ANGLE: f32 = 90.0;
/// Half-extent of the pie panel's data space; the pie itself has radius 1.
pub const PIE_LIMIT: f64 = 1.25;

/// A chart type: builds a figure from its datasets and delivers it.
pub trait Chart: Configure {
    type Data;

    /// Lay out the figure without painting it.
    fn figure(&self, data: &[Self::Data]) -> Result<Figure>;

    /// Paint the figure into an RGBA buffer.
    fn render_rgba(&self, data: &[Self::Data]) -> Result<image::RgbaImage> {
        export::rasterize(&self.figure(data)?)
    }

    /// Render and write to the configured file, or present the figure when none is set.
    fn plot(&self, data: &[Self::Data]) -> Result<()> {
        let figure = self.figure(data)?;
        export::deliver(&figure, &self.options().output())
    }
}

fn series_color(name: Option<&str>, index: usize) -> skia::Color {
    name.and_then(palette::lookup).unwrap_or_else(|| palette::cycle(index))
}

fn label(text: Option<&str>, color: skia::Color) -> Option<Label> {
    text.map(|t| Label::new(t, color))
}

fn empty_figure(o: &ChartOptions, theme: Theme, panels: usize, face: Option<&Fill>) -> Figure {
    Figure {
        width: o.width(),
        height: o.height().saturating_mul(panels.max(1) as u32),
        dpi: o.dpi(),
        face: face.map(Fill::color).unwrap_or(theme.figure_background),
        suptitle: None,
        bg_image: o.bg_image().map(Into::into),
        panels: Vec::new(),
        theme,
    }
}

/// Autoscaled axis, or one without ticks when ticks are hidden.
fn axis(o: &ChartOptions, extent: Extent) -> Axis {
    if o.ticks() { Axis::new(extent) } else { Axis::bare(extent) }
}

/// Framed panel carrying the shared options; axes and marks are filled in by the caller.
fn cartesian_panel(o: &ChartOptions, theme: &Theme, rect: skia::Rect, x: Axis, y: Axis) -> Panel {
    let font = o.font_color();
    let mut panel = Panel::new(PanelKind::Cartesian, rect, x, y);
    panel.background = Some(o.bg_color().map(Fill::color).unwrap_or(theme.axes_background));
    panel.x_label = label(o.x_label(), font);
    panel.y_label = label(o.y_label(), font);
    panel.grid = o.grid();
    panel.tick_color = font;
    panel
}

fn padded_extent(values: impl IntoIterator<Item = f64>) -> Extent {
    Extent::of(values).unwrap_or(Extent::UNIT).padded(AUTOSCALE_MARGIN)
}

/// Extent for bar-like marks: the zero baseline stays flush with the axis.
fn baseline_extent(values: impl IntoIterator<Item = f64>) -> Extent {
    Extent::of(values).unwrap_or(Extent::UNIT).padded_sticky(AUTOSCALE_MARGIN, 0.0)
}

/// Scatter and line charts: every dataset in one panel, titled by the chart title.
fn overlay_figure(o: &ChartOptions, theme: Theme, marks: Vec<Mark>, entries: Vec<LegendEntry>) -> Figure {
    let mut figure = empty_figure(o, theme, 1, o.face_color());
    let rect = panel_rects(figure.width as f32, figure.height as f32, Margins::CARTESIAN, 1)[0];
    let x = axis(o, padded_extent(marks.iter().flat_map(Mark::x_values)));
    let y = axis(o, padded_extent(marks.iter().flat_map(Mark::y_values)));
    let mut panel = cartesian_panel(o, &theme, rect, x, y);
    panel.title = label(o.title(), o.font_color());
    panel.marks = marks;
    if !entries.is_empty() {
        panel.legend = Some(Legend { entries, placement: LegendPlacement::UpperRight });
    }
    figure.panels.push(panel);
    figure
}

/// Histogram, bar and pie charts: one panel per dataset, the chart title becomes a suptitle.
fn stacked_figure(o: &ChartOptions, theme: Theme, count: usize, margins: Margins, face: Option<&Fill>) -> Result<(Figure, Vec<skia::Rect>)> {
    if count == 0 {
        return Err(ChartError::NoDatasets);
    }
    let mut figure = empty_figure(o, theme, count, face);
    figure.suptitle = label(o.title(), o.font_color());
    let rects = panel_rects(figure.width as f32, figure.height as f32, margins, count);
    Ok((figure, rects))
}

macro_rules! facade {
    ($name:ident) => {
        impl $name {
            pub fn new() -> Self {
                Self::default()
            }

            /// Chart with title and axis labels; empty strings leave them unset.
            pub fn with_labels(title: &str, x_label: &str, y_label: &str) -> Self {
                Self { options: ChartOptions::with_labels(title, x_label, y_label), ..Self::default() }
            }

            pub fn with_theme(mut self, theme: Theme) -> Self {
                self.theme = theme;
                self
            }

            pub fn theme(&self) -> &Theme {
                &self.theme
            }
        }
    };
}

macro_rules! configure {
    ($name:ident) => {
        impl Configure for $name {
            fn options(&self) -> &ChartOptions { &self.options }
            fn options_mut(&mut self) -> &mut ChartOptions { &mut self.options }
        }
    };
}

/// Scatter plot: markers for every dataset in one panel.
#[derive(Clone, Debug, Default)]
pub struct Scatter {
    options: ChartOptions,
    theme: Theme,
}

facade!(Scatter);
configure!(Scatter);

impl Chart for Scatter {
    type Data = ScatterData;

    fn figure(&self, data: &[ScatterData]) -> Result<Figure> {
        let mut marks = Vec::with_capacity(data.len());
        let mut entries = Vec::new();
        for (i, d) in data.iter().enumerate() {
            let color = series_color(d.color(), i);
            if let Some(text) = d.label() {
                entries.push(LegendEntry { label: text.to_string(), color, glyph: Glyph::Marker(d.marker()) });
            }
            marks.push(Mark::Points { points: d.points().to_vec(), color, marker: d.marker() });
        }
        Ok(overlay_figure(&self.options, self.theme, marks, entries))
    }
}

/// Line graph: one polyline per dataset in one panel.
#[derive(Clone, Debug, Default)]
pub struct LineGraph {
    options: ChartOptions,
    theme: Theme,
}

facade!(LineGraph);
configure!(LineGraph);

impl Chart for LineGraph {
    type Data = LineData;

    fn figure(&self, data: &[LineData]) -> Result<Figure> {
        let mut marks = Vec::with_capacity(data.len());
        let mut entries = Vec::new();
        for (i, d) in data.iter().enumerate() {
            let color = series_color(d.color(), i);
            if let Some(text) = d.label() {
                entries.push(LegendEntry { label: text.to_string(), color, glyph: Glyph::Line });
            }
            marks.push(Mark::Polyline { points: d.points().to_vec(), color });
        }
        Ok(overlay_figure(&self.options, self.theme, marks, entries))
    }
}

/// Histograms stacked vertically, one per dataset.
#[derive(Clone, Debug, Default)]
pub struct Histogram {
    options: ChartOptions,
    theme: Theme,
}

facade!(Histogram);
configure!(Histogram);

impl Chart for Histogram {
    type Data = HistData;

    fn figure(&self, data: &[HistData]) -> Result<Figure> {
        let o = &self.options;
        let (mut figure, rects) = stacked_figure(o, self.theme, data.len(), Margins::CARTESIAN, o.face_color())?;
        for (i, (d, rect)) in data.iter().zip(rects).enumerate() {
            let columns: Vec<Column> = d
                .bins()
                .iter()
                .map(|b| Column::centered((b.start + b.end) * 0.5, (b.end - b.start) * HIST_RWIDTH, b.count as f64))
                .collect();
            debug!("histogram panel {i}: {} bins of width {}", columns.len(), d.step());
            let mark = Mark::Columns { columns, color: series_color(d.color(), i) };
            let x = axis(o, padded_extent(mark.x_values()));
            let y = axis(o, baseline_extent(mark.y_values()));
            let mut panel = cartesian_panel(o, &self.theme, rect, x, y);
            panel.title = label(d.title(), o.font_color());
            panel.marks.push(mark);
            figure.panels.push(panel);
        }
        Ok(figure)
    }
}

/// Bar charts stacked vertically, one per dataset.
#[derive(Clone, Debug, Default)]
pub struct Bar {
    options: ChartOptions,
    theme: Theme,
}

facade!(Bar);
configure!(Bar);

impl Chart for Bar {
    type Data = BarData;

    fn figure(&self, data: &[BarData]) -> Result<Figure> {
        let o = &self.options;
        let (mut figure, rects) = stacked_figure(o, self.theme, data.len(), Margins::CARTESIAN, o.face_color())?;
        for (i, (d, rect)) in data.iter().zip(rects).enumerate() {
            let columns = d
                .x_values()
                .iter()
                .zip(d.y_values())
                .map(|(&x, &y)| Column::centered(x, BAR_WIDTH, y))
                .collect();
            let mark = Mark::Columns { columns, color: series_color(d.color(), i) };
            let mut x = axis(o, padded_extent(mark.x_values()));
            let y = axis(o, baseline_extent(mark.y_values()));
            let mut x_label = label(o.x_label(), o.font_color());
            if let (true, Some(custom)) = (o.ticks(), o.custom_x_ticks()) {
                if custom.len() == d.x_values().len() {
                    x = x.with_ticks(d.x_values().iter().copied().zip(custom.iter().cloned()));
                } else {
                    warn!(
                        "bar panel {i}: {} custom x-ticks for {} values, ticks left numeric",
                        custom.len(),
                        d.x_values().len()
                    );
                    x_label = Some(Label::new(TICKS_MISMATCH, skia::Color::BLACK));
                }
            }
            let mut panel = cartesian_panel(o, &self.theme, rect, x, y);
            panel.x_label = x_label;
            panel.title = label(d.title(), o.font_color());
            panel.marks.push(mark);
            figure.panels.push(panel);
        }
        Ok(figure)
    }
}

/// Pie charts stacked vertically, one per dataset.
///
/// Grid, tick and x-tick settings do not apply and their setters do nothing.
/// The background color fills the whole figure rather than the axes.
#[derive(Clone, Debug, Default)]
pub struct Pie {
    options: ChartOptions,
    theme: Theme,
    item_names: Option<Vec<String>>,
}

facade!(Pie);

impl Pie {
    /// Replacement names for the items of every dataset, in sorted-name order.
    /// Only applied to datasets with exactly as many items.
    pub fn set_item_names<S: Into<String>>(&mut self, names: impl IntoIterator<Item = S>) -> &mut Self {
        self.item_names = Some(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn item_names(&self) -> Option<&[String]> {
        self.item_names.as_deref()
    }
}

impl Configure for Pie {
    fn options(&self) -> &ChartOptions { &self.options }
    fn options_mut(&mut self) -> &mut ChartOptions { &mut self.options }

    fn enable_grid(&mut self) -> &mut Self { self }
    fn disable_grid(&mut self) -> &mut Self { self }
    fn hide_ticks(&mut self) -> &mut Self { self }
    fn set_x_ticks<S: Into<String>>(&mut self, _labels: impl IntoIterator<Item = S>) -> &mut Self { self }
}

impl Chart for Pie {
    type Data = PieData;

    fn figure(&self, data: &[PieData]) -> Result<Figure> {
        let o = &self.options;
        let face = o.bg_color().or(o.face_color());
        let (mut figure, rects) = stacked_figure(o, self.theme, data.len(), Margins::STOCK, face)?;
        let limits = Extent::new(-PIE_LIMIT, PIE_LIMIT);
        for (d, rect) in data.iter().zip(rects) {
            let wedges = d.wedges(self.item_names());
            let shares: Vec<f64> = wedges.iter().map(|w| w.share).collect();
            let slices = slices(&shares, PIE_START_ANGLE, palette::cycle);
            let entries = wedges
                .iter()
                .zip(&slices)
                .map(|(w, s)| LegendEntry { label: w.legend_label(), color: s.color, glyph: Glyph::Patch })
                .collect();

            let mut panel = Panel::new(PanelKind::Pie, square_in(&rect), Axis::bare(limits), Axis::bare(limits));
            panel.title = label(d.title(), o.font_color());
            panel.marks.push(Mark::Wedges { slices, shadow: true });
            panel.legend = Some(Legend { entries, placement: LegendPlacement::Anchor { x: -0.16, y: 0.70 } });
            figure.panels.push(panel);
        }
        Ok(figure)
    }
}
