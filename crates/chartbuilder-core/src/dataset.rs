// File: crates/chartbuilder-core/src/dataset.rs
// Summary: Typed, immutable datasets for each chart type (scatter, line, histogram, bar, pie).
// Notes:
// - Builders come in pairs: `with_*` ignores bad input (logged), `try_*` rejects it.
// - A missing color resolves to the default cycle at render time.

use std::fmt::Display;

use log::{debug, warn};
use num_traits::ToPrimitive;

use crate::data::{histogram_bins, sort_by_first, well_formed_pairs, Bin};
use crate::error::{ChartError, Result};
use crate::marker::Marker;
use crate::palette;

/// Default histogram bucket width.
pub const DEFAULT_STEP: f64 = 10.0;

fn numeric_pairs<X: ToPrimitive, Y: ToPrimitive>(pairs: impl IntoIterator<Item = (X, Y)>) -> Vec<(f64, f64)> {
    pairs
        .into_iter()
        .filter_map(|(x, y)| Some((x.to_f64()?, y.to_f64()?)))
        .collect()
}

fn lenient_color(name: &str) -> Option<String> {
    if palette::is_known(name) {
        Some(name.to_string())
    } else {
        warn!("dataset color: unknown color `{name}`, using the default cycle");
        None
    }
}

fn strict_color(name: &str) -> Result<String> {
    if palette::is_known(name) {
        Ok(name.to_string())
    } else {
        Err(ChartError::UnknownColor(name.to_string()))
    }
}

/// Strict row reader: every row must be exactly two finite numbers.
fn strict_pairs<R: AsRef<[f64]>>(rows: impl IntoIterator<Item = R>) -> Result<Vec<(f64, f64)>> {
    rows.into_iter()
        .enumerate()
        .map(|(index, row)| match row.as_ref() {
            &[x, y] if x.is_finite() && y.is_finite() => Ok((x, y)),
            other => Err(ChartError::MalformedRow {
                index,
                len: other.iter().filter(|v| v.is_finite()).count(),
            }),
        })
        .collect()
}

/// Point cloud for [`crate::Scatter`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScatterData {
    points: Vec<(f64, f64)>,
    label: Option<String>,
    color: Option<String>,
    marker: Marker,
}

impl ScatterData {
    /// Points from any numeric pairs; pairs that do not convert to `f64` are dropped.
    pub fn new<X: ToPrimitive, Y: ToPrimitive>(points: impl IntoIterator<Item = (X, Y)>) -> Self {
        Self { points: numeric_pairs(points), ..Self::default() }
    }

    /// Points from loosely shaped rows; rows that are not two finite numbers are dropped.
    pub fn from_rows<R: AsRef<[f64]>>(rows: impl IntoIterator<Item = R>) -> Self {
        Self { points: well_formed_pairs(rows), ..Self::default() }
    }

    pub fn try_from_rows<R: AsRef<[f64]>>(rows: impl IntoIterator<Item = R>) -> Result<Self> {
        Ok(Self { points: strict_pairs(rows)?, ..Self::default() })
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_color(mut self, name: &str) -> Self {
        self.color = lenient_color(name);
        self
    }

    pub fn try_color(mut self, name: &str) -> Result<Self> {
        self.color = Some(strict_color(name)?);
        Ok(self)
    }

    /// Marker by code; an unknown code falls back to the default marker.
    pub fn with_marker(mut self, code: &str) -> Self {
        self.marker = Marker::from_code(code).unwrap_or_else(|| {
            warn!("scatter marker: unknown marker `{code}`, using `{}`", Marker::default());
            Marker::default()
        });
        self
    }

    pub fn try_marker(mut self, code: &str) -> Result<Self> {
        self.marker = code.parse()?;
        Ok(self)
    }

    pub fn points(&self) -> &[(f64, f64)] { &self.points }
    pub fn label(&self) -> Option<&str> { self.label.as_deref() }
    pub fn color(&self) -> Option<&str> { self.color.as_deref() }
    pub fn marker(&self) -> Marker { self.marker }
}

/// Polyline for [`crate::LineGraph`]; points are kept sorted by x.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LineData {
    points: Vec<(f64, f64)>,
    label: Option<String>,
    color: Option<String>,
}

impl LineData {
    pub fn new<X: ToPrimitive, Y: ToPrimitive>(points: impl IntoIterator<Item = (X, Y)>) -> Self {
        Self { points: sort_by_first(numeric_pairs(points)), ..Self::default() }
    }

    pub fn from_rows<R: AsRef<[f64]>>(rows: impl IntoIterator<Item = R>) -> Self {
        Self { points: sort_by_first(well_formed_pairs(rows)), ..Self::default() }
    }

    pub fn try_from_rows<R: AsRef<[f64]>>(rows: impl IntoIterator<Item = R>) -> Result<Self> {
        Ok(Self { points: sort_by_first(strict_pairs(rows)?), ..Self::default() })
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_color(mut self, name: &str) -> Self {
        self.color = lenient_color(name);
        self
    }

    pub fn try_color(mut self, name: &str) -> Result<Self> {
        self.color = Some(strict_color(name)?);
        Ok(self)
    }

    pub fn points(&self) -> &[(f64, f64)] { &self.points }
    pub fn label(&self) -> Option<&str> { self.label.as_deref() }
    pub fn color(&self) -> Option<&str> { self.color.as_deref() }
}

/// Raw values for one [`crate::Histogram`] panel.
#[derive(Clone, Debug, PartialEq)]
pub struct HistData {
    values: Vec<f64>,
    step: f64,
    title: Option<String>,
    color: Option<String>,
}

impl HistData {
    pub fn new<V: ToPrimitive>(values: impl IntoIterator<Item = V>) -> Self {
        Self {
            values: values.into_iter().filter_map(|v| v.to_f64()).collect(),
            step: DEFAULT_STEP,
            title: None,
            color: None,
        }
    }

    /// Bucket width; a step that is not positive and finite keeps the current one.
    pub fn with_step(mut self, step: f64) -> Self {
        if step.is_finite() && step > 0.0 {
            self.step = step;
        } else {
            warn!("histogram step: ignoring {step}, keeping {}", self.step);
        }
        self
    }

    pub fn try_with_step(mut self, step: f64) -> Result<Self> {
        if !(step.is_finite() && step > 0.0) {
            return Err(ChartError::InvalidStep(step));
        }
        self.step = step;
        Ok(self)
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_color(mut self, name: &str) -> Self {
        self.color = lenient_color(name);
        self
    }

    pub fn try_color(mut self, name: &str) -> Result<Self> {
        self.color = Some(strict_color(name)?);
        Ok(self)
    }

    pub fn values(&self) -> &[f64] { &self.values }
    pub fn step(&self) -> f64 { self.step }
    pub fn title(&self) -> Option<&str> { self.title.as_deref() }
    pub fn color(&self) -> Option<&str> { self.color.as_deref() }

    pub fn bins(&self) -> Vec<Bin> {
        histogram_bins(&self.values, self.step)
    }
}

/// Bars for one [`crate::Bar`] panel: parallel x/y columns sorted by x.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BarData {
    x_values: Vec<f64>,
    y_values: Vec<f64>,
    title: Option<String>,
    color: Option<String>,
}

impl BarData {
    pub fn new<X: ToPrimitive, Y: ToPrimitive>(pairs: impl IntoIterator<Item = (X, Y)>) -> Self {
        let (x_values, y_values) = sort_by_first(numeric_pairs(pairs)).into_iter().unzip();
        Self { x_values, y_values, ..Self::default() }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_color(mut self, name: &str) -> Self {
        self.color = lenient_color(name);
        self
    }

    pub fn try_color(mut self, name: &str) -> Result<Self> {
        self.color = Some(strict_color(name)?);
        Ok(self)
    }

    pub fn x_values(&self) -> &[f64] { &self.x_values }
    pub fn y_values(&self) -> &[f64] { &self.y_values }
    pub fn title(&self) -> Option<&str> { self.title.as_deref() }
    pub fn color(&self) -> Option<&str> { self.color.as_deref() }
}

/// One visible pie slice after filtering.
#[derive(Clone, Debug, PartialEq)]
pub struct Wedge {
    pub label: String,
    pub value: f64,
    /// Fraction of the filtered total, in [0, 1].
    pub share: f64,
}

impl Wedge {
    pub fn percent(&self) -> f64 {
        self.share * 100.0
    }

    /// Legend text, e.g. `apples (42.0%)`.
    pub fn legend_label(&self) -> String {
        format!("{} ({:.1}%)", self.label, self.percent())
    }
}

/// Named values for one [`crate::Pie`] panel, sorted by name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PieData {
    labels: Vec<String>,
    values: Vec<f64>,
    min_value: f64,
    title: Option<String>,
}

impl PieData {
    /// `(name, value)` items. Names sort in their own order before being turned into text.
    pub fn new<L, V>(items: impl IntoIterator<Item = (L, V)>) -> Self
    where
        L: PartialOrd + Display,
        V: ToPrimitive,
    {
        let (labels, values) = sort_by_first(items.into_iter().collect())
            .into_iter()
            .filter_map(|(name, v)| Some((name.to_string(), v.to_f64()?)))
            .unzip();
        Self { labels, values, ..Self::default() }
    }

    /// Hide items below `percent` of the unfiltered total.
    pub fn with_min_percent(mut self, percent: f64) -> Self {
        let sum: f64 = self.values.iter().sum();
        self.min_value = percent * sum / 100.0;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn labels(&self) -> &[String] { &self.labels }
    pub fn values(&self) -> &[f64] { &self.values }
    pub fn min_value(&self) -> f64 { self.min_value }
    pub fn title(&self) -> Option<&str> { self.title.as_deref() }

    /// Slices that survive the minimum-share cutoff, with shares of the surviving total.
    /// `names` replaces the item names only when it has exactly one entry per item.
    pub fn wedges(&self, names: Option<&[String]>) -> Vec<Wedge> {
        let labels: &[String] = match names {
            Some(names) if names.len() == self.labels.len() => names,
            Some(names) => {
                debug!("pie item names: got {}, need {}; keeping data names", names.len(), self.labels.len());
                &self.labels
            }
            None => &self.labels,
        };
        let kept: Vec<(&String, f64)> = labels
            .iter()
            .zip(self.values.iter().copied())
            .filter(|&(_, v)| v >= self.min_value && v >= 0.0)
            .collect();
        let total: f64 = kept.iter().map(|&(_, v)| v).sum();
        kept.into_iter()
            .map(|(label, value)| Wedge {
                label: label.clone(),
                value,
                share: if total > 0.0 { value / total } else { 0.0 },
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_points_are_sorted() {
        let line = LineData::new([(3, 1), (1, 2), (2, 3)]);
        assert_eq!(line.points(), &[(1.0, 2.0), (2.0, 3.0), (3.0, 1.0)]);
    }

    #[test]
    fn strict_rows_report_index() {
        let rows = vec![vec![1.0, 2.0], vec![3.0]];
        match ScatterData::try_from_rows(&rows) {
            Err(ChartError::MalformedRow { index, len }) => assert_eq!((index, len), (1, 1)),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn unknown_color_falls_back() {
        let d = ScatterData::new([(0, 0)]).with_color("red").with_color("nope");
        assert_eq!(d.color(), None);
        assert!(ScatterData::new([(0, 0)]).try_color("nope").is_err());
        assert_eq!(BarData::new([(1, 1)]).with_color("tab:blue").color(), None);
    }

    #[test]
    fn unknown_marker_falls_back() {
        let d = ScatterData::new([(0, 0)]).with_marker("o").with_marker("??");
        assert_eq!(d.marker(), Marker::Point);
        assert_eq!(ScatterData::new([(0, 0)]).with_marker("s").marker(), Marker::Square);
    }

    #[test]
    fn strict_marker_rejects_unknown_code() {
        let d = ScatterData::new([(0, 0)]).try_marker("^").unwrap();
        assert_eq!(d.marker(), Marker::TriangleUp);
        match ScatterData::new([(0, 0)]).try_marker("q") {
            Err(ChartError::UnknownMarker(code)) => assert_eq!(code, "q"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn line_rows_drop_malformed_and_sort() {
        let rows: Vec<Vec<f64>> = vec![vec![3.0, 1.0], vec![1.0], vec![2.0, 2.0, 2.0], vec![1.0, f64::NAN], vec![0.0, 5.0]];
        let line = LineData::from_rows(&rows);
        assert_eq!(line.points(), &[(0.0, 5.0), (3.0, 1.0)]);
        assert!(matches!(LineData::try_from_rows(&rows), Err(ChartError::MalformedRow { index: 1, .. })));
    }

    #[test]
    fn bad_step_is_kept_or_rejected() {
        assert_eq!(HistData::new([1, 2]).with_step(-1.0).step(), DEFAULT_STEP);
        assert!(matches!(HistData::new([1, 2]).try_with_step(0.0), Err(ChartError::InvalidStep(_))));
    }

    #[test]
    fn bar_columns_follow_x_order() {
        let bar = BarData::new([(2, 20), (1, 10)]);
        assert_eq!(bar.x_values(), &[1.0, 2.0]);
        assert_eq!(bar.y_values(), &[10.0, 20.0]);
    }

    #[test]
    fn pie_filters_and_renormalises() {
        let pie = PieData::new([("c", 5), ("a", 60), ("b", 35)]).with_min_percent(10.0);
        assert_eq!(pie.labels(), &["a", "b", "c"]);
        let wedges = pie.wedges(None);
        assert_eq!(wedges.len(), 2);
        assert!((wedges[0].share - 60.0 / 95.0).abs() < 1e-12);
        assert_eq!(wedges[1].legend_label(), "b (36.8%)");
    }

    #[test]
    fn pie_names_need_matching_count() {
        let pie = PieData::new([("a", 1), ("b", 1)]);
        let two = vec!["x".to_string(), "y".to_string()];
        let one = vec!["x".to_string()];
        assert_eq!(pie.wedges(Some(&two))[1].label, "y");
        assert_eq!(pie.wedges(Some(&one))[1].label, "b");
    }
}
