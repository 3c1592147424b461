//! Pixel-format boundary between the capture and the PDF collaborator.

use std::path::Path;

use image::{DynamicImage, RgbImage, RgbaImage};

/// Bytes per pixel of the format the PDF collaborator receives.
pub const RGB_BYTES_PER_PIXEL: usize = 3;

/// Fixed filenames for the two opt-in debug snapshots.
pub const CAPTURE_SNAPSHOT_PATH: &str = "capture_debug.png";
pub const FLATTENED_SNAPSHOT_PATH: &str = "flattened_debug.png";

/// Flatten a captured RGBA raster to the 3-channel format embedded in the
/// PDF. Dimensions are preserved exactly.
///
/// The returned buffer is checked against the `width × height × 3` contract
/// before it may be copied into the collaborator's bitmap; a violation is a
/// programming error on our side of the boundary and aborts the conversion
/// rather than proceeding with a short or oversized copy.
pub fn flatten_to_rgb(image: &RgbaImage) -> Result<RgbImage, String> {
    let (width, height) = image.dimensions();
    let rgb = DynamicImage::ImageRgba8(image.clone()).to_rgb8();

    if rgb.dimensions() != (width, height) {
        return Err(format!(
            "flattening changed dimensions: {}x{} -> {}x{}",
            width,
            height,
            rgb.width(),
            rgb.height()
        ));
    }

    let expected = width as usize * height as usize * RGB_BYTES_PER_PIXEL;
    if rgb.as_raw().len() != expected {
        return Err(format!(
            "flattened buffer is {} bytes, contract requires {} ({}x{}x{})",
            rgb.as_raw().len(),
            expected,
            width,
            height,
            RGB_BYTES_PER_PIXEL
        ));
    }

    Ok(rgb)
}

/// Write a PNG snapshot of an intermediate raster. Snapshots are a debug
/// aid; a failed write is logged and otherwise ignored.
pub fn save_snapshot(image: &DynamicImage, path: impl AsRef<Path>) {
    let path = path.as_ref();
    match image.save(path) {
        Ok(()) => log::info!("wrote debug snapshot '{}'", path.display()),
        Err(e) => log::warn!("could not write debug snapshot '{}': {e}", path.display()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn checkered(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            if (x + y) % 2 == 0 {
                Rgba([255, 0, 0, 255])
            } else {
                Rgba([0, 0, 255, 128])
            }
        })
    }

    #[test]
    fn flattening_preserves_dimensions() {
        for (w, h) in [(1, 1), (3, 7), (640, 480)] {
            let rgb = flatten_to_rgb(&checkered(w, h)).unwrap();
            assert_eq!(rgb.dimensions(), (w, h));
        }
    }

    #[test]
    fn flattened_buffer_matches_contract() {
        let rgb = flatten_to_rgb(&checkered(33, 17)).unwrap();
        assert_eq!(rgb.as_raw().len(), 33 * 17 * RGB_BYTES_PER_PIXEL);
    }

    #[test]
    fn flattening_drops_the_alpha_channel_only() {
        let mut rgba = RgbaImage::new(2, 1);
        rgba.put_pixel(0, 0, Rgba([10, 20, 30, 255]));
        rgba.put_pixel(1, 0, Rgba([40, 50, 60, 255]));

        let rgb = flatten_to_rgb(&rgba).unwrap();
        assert_eq!(rgb.get_pixel(0, 0).0, [10, 20, 30]);
        assert_eq!(rgb.get_pixel(1, 0).0, [40, 50, 60]);
    }
}
