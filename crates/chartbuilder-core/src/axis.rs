// File: crates/chartbuilder-core/src/axis.rs
// Summary: Axis model: data extent with autoscale margins and the ticks shown along it.

use crate::grid::{format_tick, nice_step, nice_ticks, MAX_TICKS};

/// Fraction of the data span added on each side when autoscaling.
pub const AUTOSCALE_MARGIN: f64 = 0.05;

/// Closed data interval `[min, max]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Extent {
    pub min: f64,
    pub max: f64,
}

impl Extent {
    /// Range used when there is nothing to scale to.
    pub const UNIT: Extent = Extent { min: 0.0, max: 1.0 };

    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Smallest extent covering every finite value, or `None` if there is none.
    pub fn of(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold(None, |acc: Option<Extent>, v| match acc {
                None => Some(Extent::new(v, v)),
                Some(e) => Some(e.include(v)),
            })
    }

    pub fn include(self, v: f64) -> Self {
        Self { min: self.min.min(v), max: self.max.max(v) }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Widen a zero-width extent so it can be mapped to pixels.
    fn widened(self) -> Self {
        if self.span().abs() < 1e-12 {
            let half = if self.min == 0.0 { 0.5 } else { self.min.abs() * 0.05 };
            Self { min: self.min - half, max: self.max + half }
        } else {
            self
        }
    }

    /// Pad by `frac` of the span on both sides.
    pub fn padded(self, frac: f64) -> Self {
        let e = self.widened();
        let m = e.span() * frac;
        Self { min: e.min - m, max: e.max + m }
    }

    /// Pad like [`Extent::padded`], but never move an edge that sits exactly on `sticky`.
    /// Bars and histogram counts keep their baseline flush with the axis this way.
    pub fn padded_sticky(self, frac: f64, sticky: f64) -> Self {
        let e = self.widened();
        let m = e.span() * frac;
        Self {
            min: if e.min == sticky { e.min } else { e.min - m },
            max: if e.max == sticky { e.max } else { e.max + m },
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Tick {
    pub value: f64,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Axis {
    pub min: f64,
    pub max: f64,
    pub ticks: Vec<Tick>,
}

impl Axis {
    /// Axis over `extent` with automatically placed, numerically labelled ticks.
    pub fn new(extent: Extent) -> Self {
        let step = nice_step(extent.min, extent.max, MAX_TICKS);
        let ticks = nice_ticks(extent.min, extent.max, MAX_TICKS)
            .into_iter()
            .map(|value| Tick { value, label: format_tick(value, step) })
            .collect();
        Self { min: extent.min, max: extent.max, ticks }
    }

    /// Axis without ticks, for panels that draw no frame (pie charts).
    pub fn bare(extent: Extent) -> Self {
        Self { min: extent.min, max: extent.max, ticks: Vec::new() }
    }

    /// Replace automatic ticks with explicit `(position, label)` pairs.
    pub fn with_ticks(mut self, ticks: impl IntoIterator<Item = (f64, String)>) -> Self {
        self.ticks = ticks.into_iter().map(|(value, label)| Tick { value, label }).collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extent_skips_non_finite() {
        let e = Extent::of([1.0, f64::NAN, -2.0, f64::INFINITY, 4.0]).unwrap();
        assert_eq!(e, Extent::new(-2.0, 4.0));
        assert!(Extent::of(std::iter::empty()).is_none());
    }

    #[test]
    fn padding_keeps_sticky_edge() {
        let e = Extent::new(0.0, 10.0).padded_sticky(0.05, 0.0);
        assert_eq!(e.min, 0.0);
        assert!((e.max - 10.5).abs() < 1e-12);
    }

    #[test]
    fn single_value_is_widened() {
        let e = Extent::new(2.0, 2.0).padded(0.0);
        assert!(e.min < 2.0 && e.max > 2.0);
    }

    #[test]
    fn ticks_cover_padded_data() {
        let axis = Axis::new(Extent::of([0.0, 3.0, 7.5]).unwrap().padded(AUTOSCALE_MARGIN));
        assert!(axis.min < 0.0 && axis.max > 7.5);
        assert!(axis.ticks.iter().all(|t| t.value >= axis.min && t.value <= axis.max));
    }

    #[test]
    fn timestamp_sized_values_get_finite_ticks() {
        let axis = Axis::new(Extent::of([1.7e18, 1.7e18 + 256.0]).unwrap().padded(AUTOSCALE_MARGIN));
        assert!(!axis.ticks.is_empty());
        assert!(axis.ticks.len() <= 2 * MAX_TICKS + 2);
    }
}
