//! Error kinds returned by the texture build pipeline.
//!
//! The variants mirror the taxonomy a caller needs to react to: a bad input,
//! an out-of-range option, a failure in one of the third-party collaborators,
//! or an I/O failure from the sink the caller supplied. Nothing is retried by
//! this crate; the pipeline aborts on the first error it sees.

use thiserror::Error;

/// Every way [`crate::pipeline::convert`] (and the stage functions it calls)
/// can fail.
#[derive(Debug, Error)]
pub enum Error {
    #[error("input could not be decoded or disagreed with the declared color space: {0}")]
    InvalidInput(String),

    #[error("allocation failed")]
    OutOfMemory,

    #[error("invalid option: {0}")]
    InvalidOption(String),

    #[error("BC7 encoder failed: {0}")]
    EncoderFailed(String),

    #[error("supercompressor failed: {0}")]
    CompressorFailed(String),

    #[error("writer failed: {0}")]
    WriterFailed(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn invalid_option(message: impl Into<String>) -> Self {
        Error::InvalidOption(message.into())
    }
}
