//! Error type for set-up operations.

use alloc::string::String;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A host sample rate of 0 Hz was requested.
    #[error("host sample rate must be greater than 0 Hz")]
    InvalidSampleRate,

    /// `init` was called on an instance that already owns its buffers.
    #[error("instance is already initialized at {0} Hz")]
    AlreadyInitialized(u32),

    /// The sample rate converter could not be constructed.
    #[error("sample rate converter construction failed: {0}")]
    Converter(String),
}
