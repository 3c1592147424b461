//! Pipeline – ties capture, flattening, assembly, and serialization into a
//! single run with a single completion signal.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use crate::assemble::assemble_pdf;
use crate::capture::capture_page;
use crate::error::ConvertError;
use crate::raster::{self, CAPTURE_SNAPSHOT_PATH};
use crate::renderer::Renderer;
use crate::serialize;

/// One conversion: HTML text in, PDF file out. Immutable for the run.
#[derive(Debug, Clone)]
pub struct ConversionRequest {
    pub html: String,
    pub output: PathBuf,
}

/// Configuration for the conversion pipeline.
#[derive(Debug, Clone)]
pub struct ConvertConfig {
    /// Document title embedded in the PDF metadata.
    pub title: String,
    /// Wait after the load notification before requesting a repaint.
    pub repaint_delay: Duration,
    /// Wait after the repaint request before capturing. Over-generous on
    /// purpose: the engine offers no "paint settled" signal, so a fixed wait
    /// stands in for one.
    pub settle_delay: Duration,
    /// Write PNG snapshots of the raster at both pipeline stages.
    pub debug_snapshots: bool,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            title: "pdf-snap output".to_string(),
            repaint_delay: Duration::from_millis(1_000),
            settle_delay: Duration::from_millis(10_000),
            debug_snapshots: false,
        }
    }
}

/// Single-fire completion latch.
///
/// A run fires this exactly once on every path, success and failure alike,
/// so whoever is waiting on the run can never hang on a notification that
/// will never arrive. Tests assert the exactly-once invariant.
#[derive(Debug, Default)]
pub struct CompletionSignal {
    fired: AtomicU32,
}

impl CompletionSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one completion. Returns `true` only for the first call.
    pub fn fire(&self) -> bool {
        self.fired.fetch_add(1, Ordering::SeqCst) == 0
    }

    pub fn times_fired(&self) -> u32 {
        self.fired.load(Ordering::SeqCst)
    }
}

/// Full pipeline up to the in-memory document: HTML string → PDF bytes.
pub fn convert<R: Renderer>(
    renderer: &mut R,
    html: &str,
    config: &ConvertConfig,
) -> Result<Vec<u8>, ConvertError> {
    let capture = capture_page(renderer, html, config)?;

    if config.debug_snapshots {
        raster::save_snapshot(
            &::image::DynamicImage::ImageRgba8(capture.clone()),
            CAPTURE_SNAPSHOT_PATH,
        );
    }

    assemble_pdf(&capture, config)
}

/// Run one conversion end to end and signal completion exactly once.
///
/// The first failing stage halts the pipeline; no PDF is produced, the
/// failure is logged, and the completion signal still fires.
pub fn run<R: Renderer>(
    renderer: &mut R,
    request: &ConversionRequest,
    config: &ConvertConfig,
    done: &CompletionSignal,
) -> Result<(), ConvertError> {
    let result = convert(renderer, &request.html, config)
        .and_then(|bytes| serialize::save_pdf(&bytes, &request.output));

    let first = done.fire();
    debug_assert!(first, "completion must fire exactly once per run");

    match &result {
        Ok(()) => log::info!("conversion finished: '{}'", request.output.display()),
        Err(e) => log::error!("conversion failed: {e}"),
    }

    result
}
