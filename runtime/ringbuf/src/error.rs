//! Status outcomes for ring buffer operations

use thiserror::Error;

/// Ring buffer error types
///
/// Every failure is returned as a value and leaves the buffer usable.
/// `Full` and `Empty` are guaranteed no-ops on the buffer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RingError {
    /// Write rejected, usable capacity exhausted
    #[error("Ring buffer full")]
    Full,

    /// Read rejected, no data available
    #[error("Ring buffer empty")]
    Empty,

    /// Batch length outside the range the operation accepts
    #[error("Invalid batch length: {len}")]
    InvalidArgument { len: usize },
}

pub type Result<T> = core::result::Result<T, RingError>;
