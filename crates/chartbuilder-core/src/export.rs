// File: crates/chartbuilder-core/src/export.rs
// Summary: Turns a painted figure into an artifact: raster buffer, image file, SVG document or on-screen view.

use std::fs;
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat, RgbaImage};
use log::info;
use skia_safe as skia;

use crate::error::{ChartError, Result};
use crate::figure::Figure;
use crate::options::Output;
use crate::render;

/// Output encoding picked from a file extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Raster(ImageFormat),
    Svg,
}

impl Format {
    /// Format for `path`'s extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();
        let format = match ext.as_str() {
            "png" => Format::Raster(ImageFormat::Png),
            "jpg" | "jpeg" => Format::Raster(ImageFormat::Jpeg),
            "bmp" => Format::Raster(ImageFormat::Bmp),
            "gif" => Format::Raster(ImageFormat::Gif),
            "tif" | "tiff" => Format::Raster(ImageFormat::Tiff),
            "webp" => Format::Raster(ImageFormat::WebP),
            "svg" => Format::Svg,
            _ => return Err(ChartError::UnsupportedFormat(path.display().to_string())),
        };
        Ok(format)
    }
}

/// Paint `figure` on a CPU raster surface and read it back as unpremultiplied RGBA.
pub fn rasterize(figure: &Figure) -> Result<RgbaImage> {
    let (w, h) = (figure.width as i32, figure.height as i32);
    let mut surface = skia::surfaces::raster_n32_premul((w, h))
        .ok_or(ChartError::Surface { width: w, height: h })?;
    render::paint(surface.canvas(), figure);

    let info = skia::ImageInfo::new((w, h), skia::ColorType::RGBA8888, skia::AlphaType::Unpremul, None);
    let row_bytes = figure.width as usize * 4;
    let mut pixels = vec![0u8; row_bytes * figure.height as usize];
    if !surface.read_pixels(&info, &mut pixels, row_bytes, (0, 0)) {
        return Err(ChartError::ReadPixels);
    }
    RgbaImage::from_raw(figure.width, figure.height, pixels).ok_or(ChartError::ReadPixels)
}

/// Paint `figure` through Skia's SVG canvas and return the document.
pub fn svg_bytes(figure: &Figure) -> Vec<u8> {
    let bounds = skia::Rect::from_iwh(figure.width as i32, figure.height as i32);
    let canvas = skia::svg::Canvas::new(bounds, None);
    render::paint(&canvas, figure);
    canvas.end().as_bytes().to_vec()
}

/// Write `figure` to `path`, creating parent directories. The extension picks the format.
pub fn save(figure: &Figure, path: &Path) -> Result<()> {
    let format = Format::from_path(path)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    match format {
        Format::Svg => fs::write(path, svg_bytes(figure))?,
        // No alpha channel in JPEG.
        Format::Raster(ImageFormat::Jpeg) => {
            DynamicImage::ImageRgba8(rasterize(figure)?).to_rgb8().save_with_format(path, ImageFormat::Jpeg)?
        }
        Format::Raster(fmt) => rasterize(figure)?.save_with_format(path, fmt)?,
    }
    info!("wrote {}x{} figure to {}", figure.width, figure.height, path.display());
    Ok(())
}

/// Send `figure` to its configured destination.
pub fn deliver(figure: &Figure, output: &Output) -> Result<()> {
    match output {
        Output::File(path) => save(figure, path),
        Output::Display => present(figure),
    }
}

fn window_title(figure: &Figure) -> String {
    figure
        .suptitle
        .as_ref()
        .or_else(|| figure.panels.first().and_then(|p| p.title.as_ref()))
        .map(|l| l.text.clone())
        .unwrap_or_else(|| "chartbuilder".to_string())
}

#[cfg(feature = "window")]
fn present(figure: &Figure) -> Result<()> {
    let frame = rasterize(figure)?;
    crate::window::show(&window_title(figure), &frame)
}

/// Without a window backend the figure is written to a timestamped PNG in the temp directory.
#[cfg(not(feature = "window"))]
fn present(figure: &Figure) -> Result<()> {
    let path = preview_path(&window_title(figure));
    save(figure, &path)?;
    info!("no display backend compiled in; preview saved to {}", path.display());
    Ok(())
}

#[cfg_attr(feature = "window", allow(dead_code))]
fn preview_path(title: &str) -> PathBuf {
    let slug: String = title
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
        .collect();
    let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S%.3f");
    std::env::temp_dir().join(format!("{}-{stamp}.png", slug.trim_matches('-')))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_picks_format() {
        assert_eq!(Format::from_path(Path::new("a/b.PNG")).unwrap(), Format::Raster(ImageFormat::Png));
        assert_eq!(Format::from_path(Path::new("c.jpeg")).unwrap(), Format::Raster(ImageFormat::Jpeg));
        assert_eq!(Format::from_path(Path::new("c.svg")).unwrap(), Format::Svg);
        assert!(matches!(Format::from_path(Path::new("c.pdf")), Err(ChartError::UnsupportedFormat(_))));
        assert!(Format::from_path(Path::new("noext")).is_err());
    }

    #[test]
    fn preview_name_is_slugged() {
        let p = preview_path("Sales: 2024");
        let name = p.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("sales--2024-"));
        assert!(name.ends_with(".png"));
    }
}
