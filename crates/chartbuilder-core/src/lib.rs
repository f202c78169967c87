// File: crates/chartbuilder-core/src/lib.rs
// Summary: Core library entry point; exports chart facades, datasets, data helpers and the render pipeline.

pub mod chart;
pub mod dataset;
pub mod data;
pub mod map;
pub mod options;
pub mod error;
pub mod palette;
pub mod marker;
pub mod figure;
pub mod series;
pub mod axis;
pub mod grid;
pub mod types;
pub mod geometry;
pub mod scale;
pub mod theme;
pub mod text;
pub mod render;
pub mod export;
#[cfg(feature = "window")]
pub mod window;

pub use chart::{Bar, Chart, Histogram, LineGraph, Pie, Scatter};
pub use dataset::{BarData, HistData, LineData, PieData, ScatterData, Wedge};
pub use data::{
    bucket_starts, count_occurrences, crop, histogram_bins, sort_by_first, sort_by_second, to_percentages,
    to_ranges, well_formed_pairs, Bin,
};
pub use map::{prepare_map, PreparedMap};
pub use options::{ChartOptions, Configure, Fill, Output, Validation};
pub use error::{ChartError, Result};
pub use marker::Marker;
pub use figure::Figure;
pub use axis::Axis;
pub use theme::Theme;
pub use text::TextShaper;
