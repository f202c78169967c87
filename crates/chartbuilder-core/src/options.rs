// File: crates/chartbuilder-core/src/options.rs
// Summary: Shared configuration surface (labels, size, colors, grid/ticks, background, output)
//          and the `Configure` trait through which every chart facade exposes it.

use std::path::{Path, PathBuf};

use log::warn;
use skia_safe as skia;

use crate::error::{ChartError, Result};
use crate::marker::Marker;
use crate::palette;
use crate::types::{DPI, HEIGHT, WIDTH};

/// How setters react to values they cannot accept.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Validation {
    /// Keep the previous value, log a warning and return `Ok`.
    #[default]
    Lenient,
    /// Keep the previous value and return an error.
    Strict,
}

/// A validated palette color name with an opacity in [0, 1].
#[derive(Clone, Debug, PartialEq)]
pub struct Fill {
    pub name: String,
    pub alpha: f32,
}

impl Fill {
    pub fn color(&self) -> skia::Color {
        let base = palette::lookup(&self.name).unwrap_or(skia::Color::BLACK);
        palette::with_alpha(base, self.alpha)
    }
}

/// Where a rendered figure goes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Output {
    File(PathBuf),
    Display,
}

/// Clamp an opacity to [0, 1]; NaN falls back to fully opaque.
pub fn clamp_alpha(alpha: f32) -> f32 {
    if alpha.is_nan() { 1.0 } else { alpha.clamp(0.0, 1.0) }
}

#[derive(Clone, Debug)]
pub struct ChartOptions {
    title: Option<String>,
    x_label: Option<String>,
    y_label: Option<String>,
    filename: Option<PathBuf>,
    bg_image: Option<PathBuf>,
    face: Option<Fill>,
    background: Option<Fill>,
    font_color: String,
    grid: bool,
    ticks: bool,
    custom_x_ticks: Option<Vec<String>>,
    width: u32,
    height: u32,
    dpi: u32,
    validation: Validation,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            title: None,
            x_label: None,
            y_label: None,
            filename: None,
            bg_image: None,
            face: None,
            background: None,
            font_color: "black".to_string(),
            grid: true,
            ticks: true,
            custom_x_ticks: None,
            width: WIDTH,
            height: HEIGHT,
            dpi: DPI,
            validation: Validation::Lenient,
        }
    }
}

impl ChartOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options with title and axis labels set; empty strings leave them unset.
    pub fn with_labels(title: &str, x_label: &str, y_label: &str) -> Self {
        let non_empty = |s: &str| (!s.is_empty()).then(|| s.to_string());
        Self {
            title: non_empty(title),
            x_label: non_empty(x_label),
            y_label: non_empty(y_label),
            ..Self::default()
        }
    }

    pub fn title(&self) -> Option<&str> { self.title.as_deref() }
    pub fn x_label(&self) -> Option<&str> { self.x_label.as_deref() }
    pub fn y_label(&self) -> Option<&str> { self.y_label.as_deref() }
    pub fn filename(&self) -> Option<&Path> { self.filename.as_deref() }
    pub fn bg_image(&self) -> Option<&Path> { self.bg_image.as_deref() }
    pub fn face_color(&self) -> Option<&Fill> { self.face.as_ref() }
    pub fn bg_color(&self) -> Option<&Fill> { self.background.as_ref() }
    pub fn font_color_name(&self) -> &str { &self.font_color }
    pub fn grid(&self) -> bool { self.grid }
    pub fn ticks(&self) -> bool { self.ticks }
    pub fn custom_x_ticks(&self) -> Option<&[String]> { self.custom_x_ticks.as_deref() }
    pub fn width(&self) -> u32 { self.width }
    pub fn height(&self) -> u32 { self.height }
    pub fn dpi(&self) -> u32 { self.dpi }
    pub fn validation(&self) -> Validation { self.validation }

    pub fn font_color(&self) -> skia::Color {
        palette::lookup(&self.font_color).unwrap_or(skia::Color::BLACK)
    }

    pub fn output(&self) -> Output {
        match &self.filename {
            Some(path) => Output::File(path.clone()),
            None => Output::Display,
        }
    }

    /// Gate a color name through the validation policy. `Ok(true)` means "store it".
    fn accept_color(&self, name: &str, setting: &str) -> Result<bool> {
        if palette::is_known(name) {
            return Ok(true);
        }
        match self.validation {
            Validation::Strict => Err(ChartError::UnknownColor(name.to_string())),
            Validation::Lenient => {
                warn!("{setting}: ignoring unknown color `{name}`, keeping previous value");
                Ok(false)
            }
        }
    }
}

/// Configuration setters shared by all chart types.
///
/// Every method has a default implementation over [`Configure::options_mut`];
/// chart types that have no use for a setting override it with a no-op.
pub trait Configure: Sized {
    fn options(&self) -> &ChartOptions;
    fn options_mut(&mut self) -> &mut ChartOptions;

    fn set_title(&mut self, title: impl Into<String>) -> &mut Self {
        self.options_mut().title = Some(title.into());
        self
    }

    fn set_x_label(&mut self, label: impl Into<String>) -> &mut Self {
        self.options_mut().x_label = Some(label.into());
        self
    }

    fn set_y_label(&mut self, label: impl Into<String>) -> &mut Self {
        self.options_mut().y_label = Some(label.into());
        self
    }

    /// Canvas size in pixels; stacked charts use `height` per panel.
    fn set_size(&mut self, width: u32, height: u32) -> &mut Self {
        let o = self.options_mut();
        o.width = width;
        o.height = height;
        self
    }

    fn set_dpi(&mut self, dpi: u32) -> &mut Self {
        self.options_mut().dpi = dpi;
        self
    }

    /// Write the figure to `path` instead of presenting it; the extension picks the format.
    fn file_to_save(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        self.options_mut().filename = Some(path.into());
        self
    }

    fn enable_grid(&mut self) -> &mut Self {
        self.options_mut().grid = true;
        self
    }

    fn disable_grid(&mut self) -> &mut Self {
        self.options_mut().grid = false;
        self
    }

    /// Hide ticks and tick labels on both axes. Grid lines follow the ticks, so they go too.
    fn hide_ticks(&mut self) -> &mut Self {
        self.options_mut().ticks = false;
        self
    }

    /// Custom x tick labels, one per data value.
    fn set_x_ticks<S: Into<String>>(&mut self, labels: impl IntoIterator<Item = S>) -> &mut Self {
        self.options_mut().custom_x_ticks = Some(labels.into_iter().map(Into::into).collect());
        self
    }

    /// Figure background color and opacity.
    fn set_face_color(&mut self, name: &str, alpha: f32) -> Result<&mut Self> {
        let o = self.options_mut();
        if o.accept_color(name, "face color")? {
            o.face = Some(Fill { name: name.to_string(), alpha: clamp_alpha(alpha) });
        }
        Ok(self)
    }

    /// Axes (plot area) background color and opacity.
    fn set_bg_color(&mut self, name: &str, alpha: f32) -> Result<&mut Self> {
        let o = self.options_mut();
        if o.accept_color(name, "background color")? {
            o.background = Some(Fill { name: name.to_string(), alpha: clamp_alpha(alpha) });
        }
        Ok(self)
    }

    /// Color of titles, axis labels, ticks and tick labels.
    fn set_font_color(&mut self, name: &str) -> Result<&mut Self> {
        let o = self.options_mut();
        if o.accept_color(name, "font color")? {
            o.font_color = name.to_string();
        }
        Ok(self)
    }

    /// Image stretched behind the data. Unreadable files are skipped at render time.
    fn set_bg_image(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        self.options_mut().bg_image = Some(path.into());
        self
    }

    fn set_validation(&mut self, validation: Validation) -> &mut Self {
        self.options_mut().validation = validation;
        self
    }

    /// Every accepted color name.
    fn colors_list() -> Vec<&'static str> {
        palette::names().collect()
    }

    /// Every accepted marker code.
    fn markers_list() -> Vec<&'static str> {
        Marker::codes().collect()
    }
}

impl Configure for ChartOptions {
    fn options(&self) -> &ChartOptions { self }
    fn options_mut(&mut self) -> &mut ChartOptions { self }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let o = ChartOptions::default();
        assert_eq!((o.width(), o.height(), o.dpi()), (800, 600, 90));
        assert!(o.grid() && o.ticks());
        assert_eq!(o.font_color_name(), "black");
        assert_eq!(o.output(), Output::Display);
    }

    #[test]
    fn with_labels_skips_empty() {
        let o = ChartOptions::with_labels("T", "", "Y");
        assert_eq!(o.title(), Some("T"));
        assert_eq!(o.x_label(), None);
        assert_eq!(o.y_label(), Some("Y"));
    }

    #[test]
    fn nan_alpha_is_opaque() {
        assert_eq!(clamp_alpha(f32::NAN), 1.0);
    }
}
