// File: crates/chartbuilder-core/src/render.rs
// Summary: Paints a `Figure` onto any Skia canvas (raster surface or SVG canvas).
// Notes:
// - Panel order: background, background image, grid, marks (clipped), frame, ticks, labels, legend.
// - Sizes in the theme are points; everything here is pixels.

use std::path::Path;

use log::debug;
use skia_safe as skia;

use crate::figure::{Figure, Glyph, Label, Legend, LegendPlacement, Panel, PanelKind};
use crate::marker::Marker;
use crate::scale::Projection;
use crate::series::{Mark, Slice};
use crate::text::{Anchor, TextShaper};

/// Pie shadow offset, in units of the pie radius.
const SHADOW_OFFSET: f32 = 0.02;
/// Distance of the percentage labels from the pie center, in units of the radius.
const PCT_DISTANCE: f64 = 0.6;
/// Top edge of the suptitle, as a fraction of the figure height.
const SUPTITLE_TOP: f32 = 0.02;

fn fill_paint(color: skia::Color) -> skia::Paint {
    let mut p = skia::Paint::default();
    p.set_anti_alias(true);
    p.set_style(skia::paint::Style::Fill);
    p.set_color(color);
    p
}

fn stroke_paint(color: skia::Color, width: f32) -> skia::Paint {
    let mut p = skia::Paint::default();
    p.set_anti_alias(true);
    p.set_style(skia::paint::Style::Stroke);
    p.set_stroke_width(width);
    p.set_color(color);
    p
}

/// Decode an image file into a Skia image. Any failure is logged and skipped.
pub fn load_background(path: &Path) -> Option<skia::Image> {
    let rgba = match image::open(path) {
        Ok(img) => img.to_rgba8(),
        Err(err) => {
            debug!("background image {} skipped: {err}", path.display());
            return None;
        }
    };
    let (w, h) = rgba.dimensions();
    let info = skia::ImageInfo::new(
        (w as i32, h as i32),
        skia::ColorType::RGBA8888,
        skia::AlphaType::Unpremul,
        None,
    );
    let image = skia::images::raster_from_data(&info, skia::Data::new_copy(rgba.as_raw()), w as usize * 4);
    if image.is_none() {
        debug!("background image {} skipped: {w}x{h} pixels rejected by skia", path.display());
    }
    image
}

/// Paint `figure` onto `canvas`, which must be at least `figure.width` x `figure.height`.
pub fn paint(canvas: &skia::Canvas, figure: &Figure) {
    let shaper = TextShaper::new();
    canvas.clear(figure.face);

    let background = figure.bg_image.as_deref().and_then(load_background);
    for panel in &figure.panels {
        PanelPainter { canvas, shaper: &shaper, figure, panel }.paint(background.as_ref());
    }

    if let Some(sup) = &figure.suptitle {
        shaper.draw(
            canvas,
            &sup.text,
            figure.width as f32 * 0.5,
            figure.height as f32 * SUPTITLE_TOP,
            figure.px(figure.theme.title_size),
            sup.color,
            Anchor::Middle,
        );
    }
}

struct PanelPainter<'a> {
    canvas: &'a skia::Canvas,
    shaper: &'a TextShaper,
    figure: &'a Figure,
    panel: &'a Panel,
}

impl PanelPainter<'_> {
    fn paint(&self, background: Option<&skia::Image>) {
        let rect = self.panel.rect;
        let projection = Projection::new(&rect, &self.panel.x, &self.panel.y);

        if let Some(color) = self.panel.background {
            self.canvas.draw_rect(rect, &fill_paint(color));
        }
        if let Some(image) = background {
            self.canvas.draw_image_rect(image, None, rect, &skia::Paint::default());
        }

        match self.panel.kind {
            PanelKind::Cartesian => {
                if self.panel.grid {
                    self.grid(&projection);
                }
                self.canvas.save();
                self.canvas.clip_rect(rect, skia::ClipOp::Intersect, true);
                for mark in &self.panel.marks {
                    self.mark(&projection, mark);
                }
                self.canvas.restore();
                self.frame();
                let (x_extent, y_extent) = self.ticks(&projection);
                self.axis_labels(x_extent, y_extent);
            }
            PanelKind::Pie => {
                for mark in &self.panel.marks {
                    self.mark(&projection, mark);
                }
            }
        }

        if let Some(title) = &self.panel.title {
            self.title(title);
        }
        if let Some(legend) = &self.panel.legend {
            self.legend(legend);
        }
    }

    fn px(&self, points: f32) -> f32 {
        self.figure.px(points)
    }

    fn grid(&self, projection: &Projection) {
        let theme = &self.figure.theme;
        let paint = stroke_paint(theme.grid, self.px(theme.grid_width));
        let r = self.panel.rect;
        for t in visible(&self.panel.x) {
            let x = projection.x.to_px(t);
            self.canvas.draw_line((x, r.top), (x, r.bottom), &paint);
        }
        for t in visible(&self.panel.y) {
            let y = projection.y.to_px(t);
            self.canvas.draw_line((r.left, y), (r.right, y), &paint);
        }
    }

    fn frame(&self) {
        let theme = &self.figure.theme;
        let paint = stroke_paint(theme.axes_edge, self.px(theme.edge_width));
        self.canvas.draw_rect(self.panel.rect, &paint);
    }

    /// Draw tick marks and labels. Returns the space they take below and left of the panel.
    fn ticks(&self, projection: &Projection) -> (f32, f32) {
        let theme = &self.figure.theme;
        let r = self.panel.rect;
        let color = self.panel.tick_color;
        let len = self.px(theme.tick_length);
        let pad = self.px(theme.tick_pad);
        let size = self.px(theme.tick_size);
        let paint = stroke_paint(color, self.px(theme.edge_width));

        let mut below = 0.0_f32;
        for tick in self.panel.x.ticks.iter().filter(|t| in_range(&self.panel.x, t.value)) {
            let x = projection.x.to_px(tick.value);
            self.canvas.draw_line((x, r.bottom), (x, r.bottom + len), &paint);
            let h = self.shaper.draw(self.canvas, &tick.label, x, r.bottom + len + pad, size, color, Anchor::Middle);
            below = below.max(len + pad + h);
        }

        let mut left = 0.0_f32;
        for tick in self.panel.y.ticks.iter().filter(|t| in_range(&self.panel.y, t.value)) {
            let y = projection.y.to_px(tick.value);
            self.canvas.draw_line((r.left - len, y), (r.left, y), &paint);
            self.shaper.draw_centered_v(self.canvas, &tick.label, r.left - len - pad, y, size, color, Anchor::End);
            let (w, _) = self.shaper.measure(&tick.label, size);
            left = left.max(len + pad + w);
        }
        (below, left)
    }

    fn axis_labels(&self, below: f32, left: f32) {
        let theme = &self.figure.theme;
        let r = self.panel.rect;
        let size = self.px(theme.label_size);
        let pad = self.px(theme.label_pad);
        if let Some(label) = &self.panel.x_label {
            self.shaper.draw(self.canvas, &label.text, r.center_x(), r.bottom + below + pad, size, label.color, Anchor::Middle);
        }
        if let Some(label) = &self.panel.y_label {
            let (_, h) = self.shaper.measure(&label.text, size);
            let cx = r.left - left - pad - h * 0.5;
            self.shaper.draw_vertical(self.canvas, &label.text, cx, r.center_y(), size, label.color);
        }
    }

    fn title(&self, title: &Label) {
        let theme = &self.figure.theme;
        let size = self.px(theme.title_size);
        let (_, h) = self.shaper.measure(&title.text, size);
        let top = self.panel.rect.top - self.px(theme.title_pad) - h;
        self.shaper.draw(self.canvas, &title.text, self.panel.rect.center_x(), top, size, title.color, Anchor::Middle);
    }

    fn mark(&self, projection: &Projection, mark: &Mark) {
        let theme = &self.figure.theme;
        match mark {
            Mark::Points { points, color, marker } => {
                let size = self.px(theme.marker_size);
                for &(x, y) in points.iter().filter(|p| p.0.is_finite() && p.1.is_finite()) {
                    draw_marker(self.canvas, *marker, projection.point(x, y), size, *color);
                }
            }
            Mark::Polyline { points, color } => {
                let mut path = skia::Path::new();
                let mut started = false;
                for &(x, y) in points {
                    if !(x.is_finite() && y.is_finite()) {
                        started = false;
                        continue;
                    }
                    let p = projection.point(x, y);
                    if started {
                        path.line_to(p);
                    } else {
                        path.move_to(p);
                        started = true;
                    }
                }
                self.canvas.draw_path(&path, &stroke_paint(*color, self.px(theme.line_width)));
            }
            Mark::Columns { columns, color } => {
                let paint = fill_paint(*color);
                for c in columns {
                    let (l, y0) = projection.point(c.left, 0.0);
                    let (r, y1) = projection.point(c.right, c.height);
                    self.canvas.draw_rect(skia::Rect::from_ltrb(l, y0.min(y1), r, y0.max(y1)), &paint);
                }
            }
            Mark::Wedges { slices, shadow } => self.wedges(projection, slices, *shadow),
        }
    }

    fn wedges(&self, projection: &Projection, slices: &[Slice], shadow: bool) {
        let theme = &self.figure.theme;
        let (cx, cy) = projection.point(0.0, 0.0);
        let radius = projection.x.to_px(1.0) - cx;
        let oval = |dx: f32, dy: f32| skia::Rect::from_ltrb(cx - radius + dx, cy - radius + dy, cx + radius + dx, cy + radius + dy);

        if shadow {
            // Shadow sits down and to the left of the pie.
            let offset = radius * SHADOW_OFFSET;
            let paint = fill_paint(theme.shadow);
            for s in slices {
                self.canvas.draw_arc(oval(-offset, offset), -s.start, -s.sweep, true, &paint);
            }
        }
        for s in slices {
            self.canvas.draw_arc(oval(0.0, 0.0), -s.start, -s.sweep, true, &fill_paint(s.color));
        }

        let size = self.px(theme.legend_size);
        for s in slices {
            let (ux, uy) = s.bisector();
            let (x, y) = projection.point(ux * PCT_DISTANCE, uy * PCT_DISTANCE);
            let text = format!("{:.1}%", s.percent);
            self.shaper.draw_centered_v(self.canvas, &text, x, y, size, theme.legend_text, Anchor::Middle);
        }
    }

    fn legend(&self, legend: &Legend) {
        if legend.entries.is_empty() {
            return;
        }
        let theme = &self.figure.theme;
        let r = self.panel.rect;
        let fs = self.px(theme.legend_size);
        let pad = 0.4 * fs;
        let handle = 2.0 * fs;
        let gap = 0.8 * fs;
        let spacing = 0.5 * fs;

        let sizes: Vec<(f32, f32)> = legend.entries.iter().map(|e| self.shaper.measure(&e.label, fs)).collect();
        let text_w = sizes.iter().map(|s| s.0).fold(0.0, f32::max);
        let row_h = sizes.iter().map(|s| s.1).fold(0.0, f32::max);
        let n = legend.entries.len() as f32;
        let box_w = 2.0 * pad + handle + gap + text_w;
        let box_h = 2.0 * pad + n * row_h + (n - 1.0) * spacing;

        let (left, top) = match legend.placement {
            LegendPlacement::UpperRight => (r.right - 0.5 * fs - box_w, r.top + 0.5 * fs),
            LegendPlacement::Anchor { x, y } => (r.left + x * r.width(), r.bottom - y * r.height()),
        };
        let frame = skia::Rect::from_xywh(left, top, box_w, box_h);
        self.canvas.draw_rect(frame, &fill_paint(theme.legend_fill));
        self.canvas.draw_rect(frame, &stroke_paint(theme.legend_frame, self.px(theme.edge_width)));

        for (i, entry) in legend.entries.iter().enumerate() {
            let row_top = top + pad + i as f32 * (row_h + spacing);
            let cy = row_top + row_h * 0.5;
            let hx = left + pad;
            match entry.glyph {
                Glyph::Marker(marker) => {
                    draw_marker(self.canvas, marker, (hx + handle * 0.5, cy), self.px(theme.marker_size), entry.color)
                }
                Glyph::Line => {
                    let paint = stroke_paint(entry.color, self.px(theme.line_width));
                    self.canvas.draw_line((hx, cy), (hx + handle, cy), &paint);
                }
                Glyph::Patch => {
                    let h = row_h * 0.7;
                    self.canvas.draw_rect(skia::Rect::from_xywh(hx, cy - h * 0.5, handle, h), &fill_paint(entry.color));
                }
            }
            self.shaper.draw(self.canvas, &entry.label, hx + handle + gap, row_top, fs, theme.legend_text, Anchor::Start);
        }
    }
}

fn in_range(axis: &crate::axis::Axis, v: f64) -> bool {
    let eps = (axis.max - axis.min).abs() * 1e-9;
    v >= axis.min - eps && v <= axis.max + eps
}

fn visible(axis: &crate::axis::Axis) -> impl Iterator<Item = f64> + '_ {
    axis.ticks.iter().map(|t| t.value).filter(|&v| in_range(axis, v))
}

/// Closed polygon through `points`.
fn polygon(points: impl IntoIterator<Item = (f32, f32)>) -> skia::Path {
    let mut path = skia::Path::new();
    for (i, p) in points.into_iter().enumerate() {
        if i == 0 {
            path.move_to(p);
        } else {
            path.line_to(p);
        }
    }
    path.close();
    path
}

/// Vertices of a regular `n`-gon of circumradius `r`, first vertex at `rotation` degrees (y up).
fn regular(n: usize, r: f32, rotation: f32, (cx, cy): (f32, f32)) -> Vec<(f32, f32)> {
    (0..n)
        .map(|k| {
            let a = (rotation + k as f32 * 360.0 / n as f32).to_radians();
            (cx + r * a.cos(), cy - r * a.sin())
        })
        .collect()
}

fn star(r: f32, (cx, cy): (f32, f32)) -> Vec<(f32, f32)> {
    (0..10)
        .map(|k| {
            let rad = if k % 2 == 0 { r } else { r * 0.38 };
            let a = (90.0 + k as f32 * 36.0_f32).to_radians();
            (cx + rad * a.cos(), cy - rad * a.sin())
        })
        .collect()
}

/// Filled plus sign with arm half-width `r / 3`, rotated by `rotation` degrees.
fn cross(r: f32, rotation: f32, (cx, cy): (f32, f32)) -> Vec<(f32, f32)> {
    let w = r / 3.0;
    let local = [
        (w, r), (w, w), (r, w), (r, -w), (w, -w), (w, -r),
        (-w, -r), (-w, -w), (-r, -w), (-r, w), (-w, w), (-w, r),
    ];
    let (sin, cos) = rotation.to_radians().sin_cos();
    local
        .iter()
        .map(|&(x, y)| (cx + x * cos - y * sin, cy - (x * sin + y * cos)))
        .collect()
}

fn spokes(canvas: &skia::Canvas, angles: &[f32], r: f32, (cx, cy): (f32, f32), paint: &skia::Paint) {
    for a in angles {
        let rad = a.to_radians();
        canvas.draw_line((cx, cy), (cx + r * rad.cos(), cy - r * rad.sin()), paint);
    }
}

/// Draw `marker` centered on `center`; `size` is the nominal glyph diameter in pixels.
pub fn draw_marker(canvas: &skia::Canvas, marker: Marker, center: (f32, f32), size: f32, color: skia::Color) {
    let r = size * marker.scale() * 0.5;
    let (cx, cy) = center;
    let fill = fill_paint(color);
    let stroke = stroke_paint(color, (size / 6.0).max(1.0));
    let shape = |pts: Vec<(f32, f32)>| canvas.draw_path(&polygon(pts), &fill);

    match marker {
        Marker::Pixel => {
            canvas.draw_rect(skia::Rect::from_xywh(cx - 0.5, cy - 0.5, 1.0, 1.0), &fill);
        }
        Marker::Point | Marker::Circle => {
            canvas.draw_circle(center, r, &fill);
        }
        Marker::TriangleUp => { shape(regular(3, r, 90.0, center)); }
        Marker::TriangleDown => { shape(regular(3, r, 270.0, center)); }
        Marker::TriangleLeft => { shape(regular(3, r, 180.0, center)); }
        Marker::TriangleRight => { shape(regular(3, r, 0.0, center)); }
        Marker::Octagon => { shape(regular(8, r, 22.5, center)); }
        Marker::Square => { shape(regular(4, r * std::f32::consts::SQRT_2, 45.0, center)); }
        Marker::Pentagon => { shape(regular(5, r, 90.0, center)); }
        Marker::Hexagon1 => { shape(regular(6, r, 90.0, center)); }
        Marker::Hexagon2 => { shape(regular(6, r, 0.0, center)); }
        Marker::Diamond => { shape(regular(4, r, 90.0, center)); }
        Marker::ThinDiamond => { shape(vec![(cx, cy - r), (cx + 0.6 * r, cy), (cx, cy + r), (cx - 0.6 * r, cy)]); }
        Marker::Star => { shape(star(r, center)); }
        Marker::PlusFilled => { shape(cross(r, 0.0, center)); }
        Marker::XFilled => { shape(cross(r, 45.0, center)); }
        Marker::TriDown => spokes(canvas, &[270.0, 30.0, 150.0], r, center, &stroke),
        Marker::TriUp => spokes(canvas, &[90.0, 210.0, 330.0], r, center, &stroke),
        Marker::TriLeft => spokes(canvas, &[180.0, 300.0, 60.0], r, center, &stroke),
        Marker::TriRight => spokes(canvas, &[0.0, 120.0, 240.0], r, center, &stroke),
        Marker::Plus => spokes(canvas, &[0.0, 90.0, 180.0, 270.0], r, center, &stroke),
        Marker::X => spokes(canvas, &[45.0, 135.0, 225.0, 315.0], r, center, &stroke),
        Marker::VLine => spokes(canvas, &[90.0, 270.0], r, center, &stroke),
        Marker::HLine => spokes(canvas, &[0.0, 180.0], r, center, &stroke),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regular_polygon_vertices_on_circle() {
        for (x, y) in regular(5, 10.0, 90.0, (50.0, 50.0)) {
            let d = ((x - 50.0).powi(2) + (y - 50.0).powi(2)).sqrt();
            assert!((d - 10.0).abs() < 1e-4);
        }
        // First vertex of an upward triangle is straight above the center.
        let top = regular(3, 10.0, 90.0, (0.0, 0.0))[0];
        assert!(top.0.abs() < 1e-4 && (top.1 + 10.0).abs() < 1e-4);
    }

    #[test]
    fn missing_background_is_skipped() {
        assert!(load_background(Path::new("definitely/not/here.png")).is_none());
    }
}
