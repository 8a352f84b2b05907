//! Fragmentation session header
//!
//! The receiver must be configured with the number of data rows and the
//! fragment size before it can decode. This module builds the 11-byte
//! descriptor used by device test harnesses:
//!
//! ```text
//! [0x02, 0x00, rows_lo, rows_hi, frag_size, 0x00, padding, 0x00, 0x00, 0x00, 0x00]
//! ```

use crate::error::{EncodeError, Result};
use binrw::BinWrite;
use std::io::Cursor;

/// Serialised size of the session header
pub const SESSION_HEADER_LEN: usize = 11;

/// Session descriptor for a compatible decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq, BinWrite)]
#[bw(little, magic = b"\x02\x00")]
pub struct SessionHeader {
    pub data_row_count: u16,
    pub fragment_size: u8,
    #[bw(pad_before = 1, pad_after = 4)]
    pub padding: u8,
}

impl SessionHeader {
    /// Build a header, rejecting values that do not fit their fields.
    /// `padding` is always smaller than `fragment_size`, so it fits a byte
    /// whenever the fragment size does.
    pub fn new(data_row_count: usize, fragment_size: usize, padding: usize) -> Result<Self> {
        let data_row_count = u16::try_from(data_row_count).map_err(|_| {
            EncodeError::CounterOverflow {
                total: data_row_count,
            }
        })?;
        let fragment_size = u8::try_from(fragment_size)
            .map_err(|_| EncodeError::FragmentSizeTooLarge {
                size: fragment_size,
            })?;
        debug_assert!(padding < usize::from(fragment_size).max(1));

        Ok(Self {
            data_row_count,
            fragment_size,
            padding: padding as u8,
        })
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut cursor = Cursor::new(Vec::with_capacity(SESSION_HEADER_LEN));
        self.write(&mut cursor)?;
        Ok(cursor.into_inner())
    }
}
