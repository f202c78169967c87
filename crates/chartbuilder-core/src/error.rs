// File: crates/chartbuilder-core/src/error.rs
// Summary: Error type shared by configuration, data helpers and rendering.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChartError {
    /// Color name found in neither the base nor the CSS4 palette (strict validation only).
    #[error("unknown color name `{0}`")]
    UnknownColor(String),

    /// Marker code outside the supported vocabulary (strict validation only).
    #[error("unknown marker `{0}`")]
    UnknownMarker(String),

    /// Row that cannot be read as an (x, y) pair (strict constructors only).
    #[error("row {index} has {len} finite components, expected 2")]
    MalformedRow { index: usize, len: usize },

    #[error("histogram step must be positive and finite, got {0}")]
    InvalidStep(f64),

    #[error("nothing to plot: at least one dataset is required")]
    NoDatasets,

    #[error("unsupported output format `{0}`")]
    UnsupportedFormat(String),

    #[error("failed to allocate a {width}x{height} drawing surface")]
    Surface { width: i32, height: i32 },

    #[error("failed to read back pixels from the drawing surface")]
    ReadPixels,

    #[error("display window: {0}")]
    Display(String),

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ChartError>;
