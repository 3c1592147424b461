//! PDF assembler – wraps one raster image into a single fixed-geometry page
//! and produces PDF bytes using `printpdf` (v0.8 ops-based API).

use printpdf::*;

use crate::error::ConvertError;
use crate::pipeline::ConvertConfig;
use crate::raster::{self, FLATTENED_SNAPSHOT_PATH};

/// Fixed page target: US Letter in points. The capture is stretched to fill
/// the page regardless of its aspect ratio.
pub const PAGE_WIDTH_PT: f32 = 612.0;
pub const PAGE_HEIGHT_PT: f32 = 792.0;

const PT_TO_MM: f32 = 0.352778;

/// Pure-scale transform mapping an image of `width x height` pixels onto the
/// full page: no rotation, no skew, zero translation.
///
/// At dpi=72 printpdf renders 1 px = 1 pt, so scale = page_pt / px_dim.
pub fn page_scale(width: u32, height: u32) -> (f32, f32) {
    (
        PAGE_WIDTH_PT / width as f32,
        PAGE_HEIGHT_PT / height as f32,
    )
}

/// Assemble a one-page document holding `image` as its only content object.
///
/// The capture is flattened to 3-channel RGB before embedding; conversion
/// failure or a violated buffer contract aborts assembly. All collaborator
/// values are owned here and dropped on every exit path.
pub fn assemble_pdf(
    image: &::image::RgbaImage,
    config: &ConvertConfig,
) -> Result<Vec<u8>, ConvertError> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(ConvertError::Assembly(format!(
            "cannot embed a zero-size raster ({width}x{height})"
        )));
    }

    let rgb = raster::flatten_to_rgb(image).map_err(ConvertError::Assembly)?;

    if config.debug_snapshots {
        raster::save_snapshot(
            &::image::DynamicImage::ImageRgb8(rgb.clone()),
            FLATTENED_SNAPSHOT_PATH,
        );
    }

    let raw = RawImage {
        pixels: RawImageData::U8(rgb.into_raw()),
        width: width as usize,
        height: height as usize,
        data_format: RawImageFormat::RGB8,
        tag: Vec::new(),
    };

    let mut doc = PdfDocument::new(&config.title);
    let xobj_id = doc.add_image(&raw);

    let (scale_x, scale_y) = page_scale(width, height);
    let ops = vec![Op::UseXobject {
        id: xobj_id,
        transform: XObjectTransform {
            translate_x: Some(Pt(0.0)),
            translate_y: Some(Pt(0.0)),
            dpi: Some(72.0),
            scale_x: Some(scale_x),
            scale_y: Some(scale_y),
            rotate: None,
        },
    }];

    let page_w = Mm(PAGE_WIDTH_PT * PT_TO_MM);
    let page_h = Mm(PAGE_HEIGHT_PT * PT_TO_MM);
    doc.with_pages(vec![PdfPage::new(page_w, page_h, ops)]);

    Ok(doc.save(&PdfSaveOptions::default(), &mut Vec::new()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::ConvertConfig;

    fn solid(width: u32, height: u32) -> ::image::RgbaImage {
        ::image::RgbaImage::from_pixel(width, height, ::image::Rgba([200, 10, 10, 255]))
    }

    #[test]
    fn scale_maps_pixels_onto_the_full_page() {
        let (sx, sy) = page_scale(612, 792);
        assert_eq!((sx, sy), (1.0, 1.0));

        let (sx, sy) = page_scale(1224, 396);
        assert_eq!((sx, sy), (0.5, 2.0));

        let (sx, sy) = page_scale(816, 1056);
        assert!((sx - 612.0 / 816.0).abs() < f32::EPSILON);
        assert!((sy - 792.0 / 1056.0).abs() < f32::EPSILON);
    }

    #[test]
    fn assembles_a_valid_pdf_from_a_raster() {
        let bytes = assemble_pdf(&solid(64, 48), &ConvertConfig::default()).unwrap();
        assert!(bytes.len() > 100, "PDF should have content");
        assert_eq!(&bytes[0..5], b"%PDF-");
    }

    #[test]
    fn rejects_a_zero_size_raster() {
        let empty = ::image::RgbaImage::new(0, 0);
        let err = assemble_pdf(&empty, &ConvertConfig::default()).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }
}
