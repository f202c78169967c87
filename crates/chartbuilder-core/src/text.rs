// File: crates/chartbuilder-core/src/text.rs
// Summary: Text shaper/renderer on Skia textlayout: measuring, anchored and rotated drawing.

use skia_safe as skia;
use skia::textlayout::{FontCollection, Paragraph, ParagraphBuilder, ParagraphStyle, TextStyle};

/// Horizontal anchoring of a text run relative to its `x` coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

pub struct TextShaper {
    fonts: FontCollection,
}

impl TextShaper {
    pub fn new() -> Self {
        let mut fc = FontCollection::new();
        // Use system manager fallback
        fc.set_default_font_manager(skia::FontMgr::default(), None);
        Self { fonts: fc }
    }

    fn make_style(size: f32, color: skia::Color) -> TextStyle {
        let mut ts = TextStyle::new();
        ts.set_font_size(size.max(1.0));
        ts.set_color(color);
        ts.set_font_families(&["DejaVu Sans", "Segoe UI", "Arial", "Helvetica", "Roboto", "sans-serif"]);
        ts
    }

    pub fn layout(&self, text: &str, size: f32, color: skia::Color) -> Paragraph {
        let mut pstyle = ParagraphStyle::new();
        pstyle.set_text_align(skia::textlayout::TextAlign::Left);
        let mut builder = ParagraphBuilder::new(&pstyle, &self.fonts);
        let style = Self::make_style(size, color);
        builder.push_style(&style);
        builder.add_text(text);
        let mut paragraph = builder.build();
        paragraph.layout(10_000.0);
        paragraph
    }

    /// (width, height) of `text` at `size` pixels.
    pub fn measure(&self, text: &str, size: f32) -> (f32, f32) {
        let p = self.layout(text, size, skia::Color::TRANSPARENT);
        (p.longest_line(), p.height())
    }

    /// Draw `text` with its top edge at `top`, anchored horizontally at `x`. Returns the text height.
    pub fn draw(
        &self,
        canvas: &skia::Canvas,
        text: &str,
        x: f32,
        top: f32,
        size: f32,
        color: skia::Color,
        anchor: Anchor,
    ) -> f32 {
        let mut p = self.layout(text, size, color);
        let w = p.longest_line();
        let left = match anchor {
            Anchor::Start => x,
            Anchor::Middle => x - w * 0.5,
            Anchor::End => x - w,
        };
        p.paint(canvas, (left, top));
        p.height()
    }

    /// Draw `text` vertically centered on `cy`, horizontally anchored at `x`.
    pub fn draw_centered_v(
        &self,
        canvas: &skia::Canvas,
        text: &str,
        x: f32,
        cy: f32,
        size: f32,
        color: skia::Color,
        anchor: Anchor,
    ) {
        let h = self.layout(text, size, color).height();
        self.draw(canvas, text, x, cy - h * 0.5, size, color, anchor);
    }

    /// Draw `text` rotated 90 degrees counter-clockwise, centered on (`cx`, `cy`).
    pub fn draw_vertical(&self, canvas: &skia::Canvas, text: &str, cx: f32, cy: f32, size: f32, color: skia::Color) {
        let mut p = self.layout(text, size, color);
        let w = p.longest_line();
        let h = p.height();
        canvas.save();
        canvas.translate((cx, cy));
        canvas.rotate(-90.0, None);
        p.paint(canvas, (-w * 0.5, -h * 0.5));
        canvas.restore();
    }
}

impl Default for TextShaper {
    fn default() -> Self {
        Self::new()
    }
}
