//! Conversion error taxonomy.
//!
//! Each variant maps to one failure class of the pipeline and carries a
//! distinct process exit code, so a caller (or a shell script) can tell where
//! a run died. Input-file errors never reach this type; the binary handles
//! them before the pipeline starts and exits with code 1.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Everything that can halt a conversion after the input HTML is in hand.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The engine reported that the document failed to load.
    #[error("page load failed: {0}")]
    Load(String),

    /// The rendered document has no paintable extent.
    #[error("rendered content is empty ({width}x{height}), nothing to capture")]
    EmptyContent { width: u32, height: u32 },

    /// Rasterizing the rendered page failed (repaint, size query, resize,
    /// screenshot, or screenshot decode).
    #[error("raster capture failed: {0}")]
    Capture(String),

    /// PDF assembly failed (pixel-format conversion or a violated
    /// buffer-size contract).
    #[error("PDF assembly failed: {0}")]
    Assembly(String),

    /// The output sink could not be opened or a block write failed.
    #[error("writing '{}' failed: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ConvertError {
    /// Process exit code for this failure class.
    ///
    /// Code 1 is reserved for unreadable input, reported by the binary
    /// itself; 0 is success.
    pub fn exit_code(&self) -> i32 {
        match self {
            ConvertError::Load(_)
            | ConvertError::EmptyContent { .. }
            | ConvertError::Capture(_) => 2,
            ConvertError::Assembly(_) => 3,
            ConvertError::Write { .. } => 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct_per_class() {
        let render = ConvertError::Load("boom".into());
        let empty = ConvertError::EmptyContent {
            width: 0,
            height: 14,
        };
        let assembly = ConvertError::Assembly("bad buffer".into());
        let write = ConvertError::Write {
            path: "out.pdf".into(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };

        assert_eq!(render.exit_code(), 2);
        assert_eq!(empty.exit_code(), 2);
        assert_eq!(assembly.exit_code(), 3);
        assert_eq!(write.exit_code(), 4);
    }

    #[test]
    fn messages_name_the_failing_stage() {
        let e = ConvertError::EmptyContent {
            width: 0,
            height: 600,
        };
        assert!(e.to_string().contains("0x600"));

        let e = ConvertError::Load("net::ERR_FAILED".into());
        assert!(e.to_string().contains("load"));
    }
}
