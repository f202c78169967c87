// File: crates/chartbuilder-core/src/scale.rs
// Summary: Linear data-to-pixel transforms for one panel.

use skia_safe::Rect;

use crate::axis::Axis;

/// Maps a data interval onto a pixel interval. `px_lo` corresponds to `vmin`;
/// a vertical scale passes the panel bottom as `px_lo` so values grow upward.
#[derive(Clone, Copy, Debug)]
pub struct LinearScale {
    pub px_lo: f32,
    pub px_hi: f32,
    pub vmin: f64,
    pub vmax: f64,
}

impl LinearScale {
    pub fn new(px_lo: f32, px_hi: f32, vmin: f64, vmax: f64) -> Self {
        let mut s = Self { px_lo, px_hi, vmin, vmax };
        if (s.vmax - s.vmin).abs() < 1e-12 { s.vmax = s.vmin + 1.0; }
        s
    }

    #[inline]
    pub fn to_px(&self, v: f64) -> f32 {
        let span = self.vmax - self.vmin;
        self.px_lo + ((v - self.vmin) / span) as f32 * (self.px_hi - self.px_lo)
    }
}

/// X and Y scales of a panel rect.
#[derive(Clone, Copy, Debug)]
pub struct Projection {
    pub x: LinearScale,
    pub y: LinearScale,
}

impl Projection {
    pub fn new(rect: &Rect, x: &Axis, y: &Axis) -> Self {
        Self {
            x: LinearScale::new(rect.left, rect.right, x.min, x.max),
            y: LinearScale::new(rect.bottom, rect.top, y.min, y.max),
        }
    }

    #[inline]
    pub fn point(&self, x: f64, y: f64) -> (f32, f32) {
        (self.x.to_px(x), self.y.to_px(y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::Extent;

    #[test]
    fn y_grows_upward() {
        let rect = Rect::from_ltrb(10.0, 20.0, 110.0, 220.0);
        let p = Projection::new(&rect, &Axis::new(Extent::new(0.0, 10.0)), &Axis::new(Extent::new(0.0, 100.0)));
        assert_eq!(p.point(0.0, 0.0), (10.0, 220.0));
        assert_eq!(p.point(10.0, 100.0), (110.0, 20.0));
        assert_eq!(p.point(5.0, 50.0), (60.0, 120.0));
    }
}
