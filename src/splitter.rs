//! Splitting an input block into fixed-size data rows
//!
//! The input is zero-padded up to a multiple of the fragment size and then
//! sliced into equal rows, preserving byte order.

use crate::domain::FragmentSize;
use log::debug;

/// The padded input, viewed as `len()` rows of `fragment_size` bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataRows {
    buffer: Vec<u8>,
    fragment_size: usize,
    padding: usize,
}

impl DataRows {
    /// Pad `input` with trailing zeros and split it into rows
    pub fn split(input: &[u8], fragment_size: FragmentSize) -> Self {
        let fragment_size = fragment_size.get();
        let padding = padding_for(input.len(), fragment_size);

        let mut buffer = Vec::with_capacity(input.len() + padding);
        buffer.extend_from_slice(input);
        buffer.resize(input.len() + padding, 0);

        debug!(
            "Split {} bytes into {} rows of {} bytes ({} bytes padding)",
            input.len(),
            buffer.len() / fragment_size,
            fragment_size,
            padding
        );

        Self {
            buffer,
            fragment_size,
            padding,
        }
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.buffer.len() / self.fragment_size
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn fragment_size(&self) -> usize {
        self.fragment_size
    }

    /// Zero bytes appended to the final row
    pub fn padding(&self) -> usize {
        self.padding
    }

    /// Row `k` (0-based)
    pub fn row(&self, k: usize) -> Option<&[u8]> {
        let start = k.checked_mul(self.fragment_size)?;
        let end = start.checked_add(self.fragment_size)?;
        self.buffer.get(start..end)
    }

    pub fn iter(&self) -> std::slice::ChunksExact<'_, u8> {
        self.buffer.chunks_exact(self.fragment_size)
    }
}

impl<'a> IntoIterator for &'a DataRows {
    type Item = &'a [u8];
    type IntoIter = std::slice::ChunksExact<'a, u8>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Bytes needed to round `len` up to a multiple of `fragment_size`
pub fn padding_for(len: usize, fragment_size: usize) -> usize {
    match len % fragment_size {
        0 => 0,
        rem => fragment_size - rem,
    }
}
