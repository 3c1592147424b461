//! Render orchestrator – drives a [`Renderer`] from "HTML text" to one
//! finished raster image.
//!
//! The engine's load notification is not authoritative for "fully painted",
//! so the orchestrator inserts a fixed two-stage wait: a short delay before
//! requesting a repaint, then a longer settle delay before capturing. The
//! race with actual paint completion is accepted; there is no settle signal
//! to poll for.

use std::thread;

use image::RgbaImage;

use crate::error::ConvertError;
use crate::pipeline::ConvertConfig;
use crate::renderer::Renderer;

/// Load `html` in the renderer and capture its content as an RGBA raster.
///
/// Never retries. Failures map onto the render class of the error taxonomy:
/// load failures, an empty content size, and capture problems all abort the
/// conversion with no image.
pub fn capture_page<R: Renderer>(
    renderer: &mut R,
    html: &str,
    config: &ConvertConfig,
) -> Result<RgbaImage, ConvertError> {
    renderer.load_html(html).map_err(ConvertError::Load)?;
    log::info!("HTML content loaded successfully");

    thread::sleep(config.repaint_delay);
    renderer.request_repaint().map_err(ConvertError::Capture)?;

    thread::sleep(config.settle_delay);

    let size = renderer.content_size().map_err(ConvertError::Capture)?;
    log::info!("content size: {}x{}", size.width, size.height);

    if size.is_empty() {
        return Err(ConvertError::EmptyContent {
            width: size.width,
            height: size.height,
        });
    }

    // Size the view to the content first; whatever the engine then paints
    // into the capture buffer is accepted as-is.
    renderer.resize_view(size).map_err(ConvertError::Capture)?;
    renderer.capture(size).map_err(ConvertError::Capture)
}
