//! # pdf-snap – headless-browser HTML → single-page raster PDF
//!
//! This crate converts an HTML document into a PDF containing one full-page
//! raster image of the rendered content. The pipeline stages are:
//!
//! 1. **Capture** – load the HTML in headless Chrome, wait a fixed two-stage
//!    settle delay, rasterize at natural content size ([`capture`], [`chrome`])
//! 2. **Flatten** – reduce the RGBA capture to 3-channel RGB ([`raster`])
//! 3. **Assemble** – build a one-page 612×792 pt document with the raster
//!    stretched to fill via printpdf ([`assemble`])
//! 4. **Serialize** – stream the document bytes to disk through a block
//!    sink ([`serialize`])
//!
//! The browser engine sits behind the [`renderer::Renderer`] trait, so the
//! pipeline is testable without Chrome.

pub mod assemble;
pub mod capture;
pub mod chrome;
pub mod error;
pub mod pipeline;
pub mod raster;
pub mod renderer;
pub mod serialize;
pub mod templates;

// Re-exports for convenience
pub use chrome::ChromeRenderer;
pub use error::ConvertError;
pub use pipeline::{convert, run, CompletionSignal, ConversionRequest, ConvertConfig};
pub use renderer::{ContentSize, Renderer};
