//! Byte-stream serialization of an assembled document.
//!
//! The document bytes are pushed through a [`BlockSink`] one block at a
//! time: the sink reports success or failure per call, and the first failed
//! call aborts the whole save. There is no temp-file-then-rename discipline: on
//! failure the destination's contents are undefined.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::error::ConvertError;

/// Block size used when streaming the document out.
pub const WRITE_BLOCK_SIZE: usize = 64 * 1024;

/// A byte sink fed in sequential blocks.
pub trait BlockSink {
    /// Append one block. Returns `false` on failure; the caller stops
    /// streaming after the first failed call.
    fn write_block(&mut self, block: &[u8]) -> bool;
}

/// Stream `bytes` into `sink` in [`WRITE_BLOCK_SIZE`] blocks.
pub fn stream_document(bytes: &[u8], sink: &mut dyn BlockSink) -> Result<(), String> {
    for (index, block) in bytes.chunks(WRITE_BLOCK_SIZE).enumerate() {
        if !sink.write_block(block) {
            return Err(format!(
                "sink rejected block {} (offset {})",
                index,
                index * WRITE_BLOCK_SIZE
            ));
        }
    }
    Ok(())
}

/// [`BlockSink`] over a freshly created (or truncated) file.
pub struct FileSink {
    file: File,
    error: Option<io::Error>,
}

impl FileSink {
    /// Open `path` for binary writing. An unopenable path fails here, before
    /// any block is produced.
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        Ok(Self {
            file: File::create(path)?,
            error: None,
        })
    }

    fn into_error(self) -> Option<io::Error> {
        self.error
    }
}

impl BlockSink for FileSink {
    fn write_block(&mut self, block: &[u8]) -> bool {
        match self.file.write_all(block) {
            Ok(()) => true,
            Err(e) => {
                self.error = Some(e);
                false
            }
        }
    }
}

/// Serialize the assembled document to `path` through a [`FileSink`].
pub fn save_pdf(bytes: &[u8], path: &Path) -> Result<(), ConvertError> {
    let write_error = |source: io::Error| ConvertError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut sink = FileSink::create(path).map_err(write_error)?;

    match stream_document(bytes, &mut sink) {
        Ok(()) => {
            log::info!("saved PDF ({} bytes) to '{}'", bytes.len(), path.display());
            Ok(())
        }
        Err(msg) => {
            let source = sink
                .into_error()
                .unwrap_or_else(|| io::Error::new(io::ErrorKind::Other, msg));
            Err(write_error(source))
        }
    }
}
