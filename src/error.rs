//! Error types for fragment encoding

use thiserror::Error;

/// Largest fragment counter representable in a frame header
pub const MAX_FRAGMENT_COUNTER: usize = u16::MAX as usize;

/// Errors that can occur while encoding a data block into fragments
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Fragment size must be at least one byte
    #[error("Invalid fragment size {0}: fragments must carry at least 1 byte")]
    InvalidFragmentSize(usize),

    /// Redundancy requested for an input that produced no data rows
    #[error("Cannot build redundancy rows: input produced 0 data rows")]
    DegenerateRowCount,

    /// Data rows plus redundancy rows do not fit the 16-bit fragment counter
    #[error("{total} rows exceed the 16-bit fragment counter (max 65535)")]
    CounterOverflow { total: usize },

    /// The session header stores the fragment size in a single byte
    #[error("Fragment size {size} does not fit the one-byte session header field")]
    FragmentSizeTooLarge { size: usize },

    /// Header serialisation failed
    #[error("Header serialisation failed: {0}")]
    Serialization(String),

    /// I/O error while emitting rows
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<binrw::Error> for EncodeError {
    fn from(error: binrw::Error) -> Self {
        EncodeError::Serialization(error.to_string())
    }
}

/// Total number of framed rows, rejected if it overflows the fragment counter
pub fn checked_total_rows(data_row_count: usize, redundancy: usize) -> Result<usize> {
    data_row_count
        .checked_add(redundancy)
        .filter(|&total| total <= MAX_FRAGMENT_COUNTER)
        .ok_or(EncodeError::CounterOverflow {
            total: data_row_count.saturating_add(redundancy),
        })
}

/// Type alias for Result with EncodeError
pub type Result<T> = std::result::Result<T, EncodeError>;
