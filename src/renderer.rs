//! Rendering collaborator seam.
//!
//! The pipeline only ever talks to the browser engine through [`Renderer`],
//! so tests can drive the orchestration with a scripted fake and the real
//! Chrome backend stays confined to [`crate::chrome`].

use image::RgbaImage;

/// Natural size of the rendered document, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
pub struct ContentSize {
    pub width: u32,
    pub height: u32,
}

impl ContentSize {
    /// True when either dimension is zero, i.e. nothing can be captured.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// One renderable view of the external browser engine.
///
/// Methods mirror the steps the orchestrator takes, in order. Errors are
/// plain messages; the orchestrator maps them into the conversion error
/// taxonomy.
pub trait Renderer {
    /// Hand HTML text to the engine and block until it reports the document
    /// loaded. Malformed HTML is not rejected (the engine degrades
    /// gracefully), but a load *failure* must surface as `Err`.
    fn load_html(&mut self, html: &str) -> Result<(), String>;

    /// Ask the engine to repaint its current content.
    fn request_repaint(&mut self) -> Result<(), String>;

    /// Query the natural content size of the loaded document.
    fn content_size(&mut self) -> Result<ContentSize, String>;

    /// Instruct the view to size itself to `size` before capture.
    fn resize_view(&mut self, size: ContentSize) -> Result<(), String>;

    /// Rasterize the current visual content into an RGBA buffer of exactly
    /// `size`. Whatever the engine painted is accepted as-is; mismatches
    /// between the queried size and the actual paint extent are not
    /// reconciled.
    fn capture(&mut self, size: ContentSize) -> Result<RgbaImage, String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(width: u32, height: u32) -> ContentSize {
        ContentSize { width, height }
    }

    #[test]
    fn empty_when_either_dimension_is_zero() {
        assert!(size(0, 100).is_empty());
        assert!(size(640, 0).is_empty());
        assert!(!size(640, 480).is_empty());
    }

    #[test]
    fn deserializes_from_protocol_json() {
        let size: ContentSize = serde_json::from_str(r#"{"width":816,"height":1056}"#).unwrap();
        assert_eq!(size.width, 816);
        assert_eq!(size.height, 1056);
    }
}
