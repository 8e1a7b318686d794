use std::path::PathBuf;

/// Errors that can occur in the editing pipeline.
///
/// Every failure is reported to the caller immediately; nothing in the
/// pipeline retries or recovers locally.
#[derive(Debug, thiserror::Error)]
pub enum EditError {
    /// The selection mask bitstring has the wrong number of pixels.
    #[error("invalid mask length: expected {expected} characters, got {found}")]
    InvalidMaskLength {
        /// Required number of mask characters (one per pixel)
        expected: usize,
        /// Number of characters actually supplied
        found: usize,
    },

    /// The selection mask contains a character other than '0' or '1'.
    #[error("invalid mask character {found:?} at index {index}")]
    InvalidMaskCharacter {
        /// Position of the offending character in the bitstring
        index: usize,
        /// The character found there
        found: char,
    },

    /// The rankings response has no score series for the requested feature.
    #[error("no ranking series found for feature {0:?}")]
    FeatureNotFound(String),

    /// The remote service failed or returned something unusable.
    #[error("remote service error: {0}")]
    RemoteService(String),

    /// The generated image payload could not be decoded.
    #[error("payload decode error: {0}")]
    PayloadDecode(String),

    /// Mask raster encoding error (wraps the image crate).
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// Failed to write the generated image to disk.
    #[error("failed to write {path}: {source}")]
    WriteImage {
        /// Destination path of the failed write
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, EditError>;
