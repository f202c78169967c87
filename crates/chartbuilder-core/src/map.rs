// File: crates/chartbuilder-core/src/map.rs
// Summary: Map-image preparation so a map lines up with autoscaled axes when used as a chart background.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use image::{imageops, Rgb, RgbImage};
use log::info;

use crate::error::Result;

/// Border as a fraction of the larger side (1/20), matching the autoscale margin on each axis.
pub const MARGIN_RATIO: u32 = 20;
/// JPEG quality of the prepared file.
pub const JPEG_QUALITY: u8 = 80;

/// Result of [`prepare_map`]. `width`/`height` are the dimensions of the source map.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreparedMap {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    /// `(0,0), (0,h), (w,0), (w,h)` in map pixel coordinates.
    pub corners: [(u32, u32); 4],
}

/// Pad `path` with a white border, crop it back to a window one margin wider than the map
/// on every side, and save it next to the source as `prepared_map_<w>_<h>.jpg`.
///
/// Scatter the corners over the result and its autoscaled extent matches the map's pixel grid.
pub fn prepare_map(path: impl AsRef<Path>) -> Result<PreparedMap> {
    let map = image::open(path.as_ref())?.to_rgb8();
    // Symlinks are kept: the output lands next to the path as given.
    let source = std::path::absolute(path.as_ref())?;
    let (width, height) = map.dimensions();

    let border = width.max(height) / MARGIN_RATIO;
    let mut padded = RgbImage::from_pixel(width + 2 * border, height + 2 * border, Rgb([255, 255, 255]));
    imageops::replace(&mut padded, &map, i64::from(border), i64::from(border));

    let (left, out_w) = centered_window(padded.width(), width);
    let (top, out_h) = centered_window(padded.height(), height);
    // Parts of the window outside the padded image stay black.
    let mut prepared = RgbImage::new(out_w, out_h);
    imageops::replace(&mut prepared, &padded, -left, -top);

    let dir = source.parent().unwrap_or_else(|| Path::new("."));
    let out_path = dir.join(format!("prepared_map_{width}_{height}.jpg"));
    let writer = BufWriter::new(File::create(&out_path)?);
    JpegEncoder::new_with_quality(writer, JPEG_QUALITY).encode_image(&prepared)?;
    info!("prepared map {} ({out_w}x{out_h}) from {}", out_path.display(), source.display());

    Ok(PreparedMap {
        path: out_path,
        width,
        height,
        corners: [(0, 0), (0, height), (width, 0), (width, height)],
    })
}

/// Offset and size of a window of `side + 2 * side / MARGIN_RATIO` centered in `padded`.
/// The offset is floored, so an odd surplus leaves the extra pixel on the far side.
fn centered_window(padded: u32, side: u32) -> (i64, u32) {
    let window = (f64::from(side) + 2.0 * f64::from(side) / f64::from(MARGIN_RATIO)) as i64;
    let offset = (i64::from(padded) - window).div_euclid(2);
    let size = i64::from(padded) - 2 * offset;
    (offset, size.max(1) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_for_longest_side_matches_padding() {
        // 100 px side, 5 px border: the window is exactly the padded width.
        assert_eq!(centered_window(110, 100), (0, 110));
    }

    #[test]
    fn window_for_shorter_side_is_cropped() {
        // 60 px side inside a 70 px padded height: 66 px window, 2 px trimmed on each edge.
        assert_eq!(centered_window(70, 60), (2, 66));
    }

    #[test]
    fn odd_surplus_floors_offset() {
        // 119 px side: border 5, padded 129, window 130 -> one pixel short, offset -1.
        assert_eq!(centered_window(129, 119), (-1, 131));
    }
}
