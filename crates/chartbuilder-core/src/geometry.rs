// File: crates/chartbuilder-core/src/geometry.rs
// Summary: Pixel-space layout helpers: stacked panel rects and equal-aspect fitting.

use skia_safe::Rect;

use crate::types::{Margins, PANEL_HSPACE};

/// Split the canvas into `count` vertically stacked panels inside `margins`.
/// Panels are returned top to bottom and all share the same height.
pub fn panel_rects(width: f32, height: f32, margins: Margins, count: usize) -> Vec<Rect> {
    let left = width * margins.left;
    let right = width * margins.right;
    let top = height * (1.0 - margins.top);
    let bottom = height * (1.0 - margins.bottom);

    let n = count.max(1) as f32;
    let cell = (bottom - top) / (n + PANEL_HSPACE * (n - 1.0));
    let gap = cell * PANEL_HSPACE;

    (0..count.max(1))
        .map(|i| {
            let y = top + i as f32 * (cell + gap);
            Rect::from_ltrb(left, y, right, y + cell)
        })
        .collect()
}

/// Largest square centered inside `rect`.
pub fn square_in(rect: &Rect) -> Rect {
    let side = rect.width().min(rect.height());
    let cx = rect.center_x();
    let cy = rect.center_y();
    Rect::from_ltrb(cx - side * 0.5, cy - side * 0.5, cx + side * 0.5, cy + side * 0.5)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_panel_fills_margins() {
        let rects = panel_rects(1000.0, 500.0, Margins::new(0.1, 0.9, 0.9, 0.1), 1);
        assert_eq!(rects.len(), 1);
        let r = rects[0];
        assert!((r.left - 100.0).abs() < 1e-3);
        assert!((r.right - 900.0).abs() < 1e-3);
        assert!((r.top - 50.0).abs() < 1e-3);
        assert!((r.bottom - 450.0).abs() < 1e-3);
    }

    #[test]
    fn stacked_panels_do_not_overlap() {
        let rects = panel_rects(800.0, 1800.0, Margins::CARTESIAN, 3);
        assert_eq!(rects.len(), 3);
        for pair in rects.windows(2) {
            assert!(pair[0].bottom < pair[1].top);
            assert!((pair[0].height() - pair[1].height()).abs() < 1e-3);
        }
    }

    #[test]
    fn square_is_centered() {
        let sq = square_in(&Rect::from_ltrb(0.0, 0.0, 200.0, 100.0));
        assert_eq!(sq.width(), 100.0);
        assert_eq!(sq.height(), 100.0);
        assert_eq!(sq.center_x(), 100.0);
    }
}
