//! Row framing
//!
//! Every emitted row carries a 3-byte header: the fragment tag followed by
//! the 16-bit fragment counter. The counter is big-endian on the wire; some
//! device test fixtures expect it byte-swapped, which
//! [`CounterByteOrder::LittleEndian`] provides.

use crate::domain::FragmentCounter;
use crate::error::Result;
use binrw::{BinWrite, Endian};
use std::io::Cursor;

/// Tag byte opening every framed row
pub const FRAGMENT_TAG: u8 = 8;

/// Tag plus counter
pub const FRAME_HEADER_LEN: usize = 3;

#[derive(Debug, BinWrite)]
struct FrameHeader {
    tag: u8,
    counter: u16,
}

/// Byte order of the counter field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CounterByteOrder {
    #[default]
    BigEndian,
    LittleEndian,
}

impl CounterByteOrder {
    fn endian(self) -> Endian {
        match self {
            CounterByteOrder::BigEndian => Endian::Big,
            CounterByteOrder::LittleEndian => Endian::Little,
        }
    }
}

/// A row ready for transmission: header followed by the payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FramedRow {
    counter: FragmentCounter,
    bytes: Vec<u8>,
}

impl FramedRow {
    pub fn counter(&self) -> FragmentCounter {
        self.counter
    }

    pub fn header(&self) -> &[u8] {
        &self.bytes[..FRAME_HEADER_LEN]
    }

    pub fn payload(&self) -> &[u8] {
        &self.bytes[FRAME_HEADER_LEN..]
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

}

impl AsRef<[u8]> for FramedRow {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

/// Frame a payload with a big-endian counter
pub fn frame(payload: &[u8], counter: FragmentCounter) -> Result<FramedRow> {
    frame_with_order(payload, counter, CounterByteOrder::BigEndian)
}

/// Frame a payload with the counter in the given byte order
pub fn frame_with_order(
    payload: &[u8],
    counter: FragmentCounter,
    order: CounterByteOrder,
) -> Result<FramedRow> {
    let mut cursor = Cursor::new(Vec::with_capacity(FRAME_HEADER_LEN + payload.len()));
    FrameHeader {
        tag: FRAGMENT_TAG,
        counter: counter.get(),
    }
    .write_options(&mut cursor, order.endian(), ())?;

    let mut bytes = cursor.into_inner();
    bytes.extend_from_slice(payload);
    Ok(FramedRow { counter, bytes })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter(n: u16) -> FragmentCounter {
        FragmentCounter::new(n).unwrap()
    }

    #[test]
    fn test_frame_first_row() {
        let row = frame(b"ABCD", counter(1)).unwrap();
        assert_eq!(row.as_bytes(), &[8, 0, 1, b'A', b'B', b'C', b'D']);
        assert_eq!(row.header(), &[8, 0, 1]);
        assert_eq!(row.payload(), b"ABCD");
        assert_eq!(row.counter(), counter(1));
    }

    #[test]
    fn test_frame_counter_is_big_endian() {
        let row = frame(b"ABCD", counter(256)).unwrap();
        assert_eq!(row.header(), &[8, 1, 0]);
        let row = frame(b"", counter(0xFFFF)).unwrap();
        assert_eq!(row.as_bytes(), &[FRAGMENT_TAG, 0xFF, 0xFF]);
    }

    #[test]
    fn test_frame_little_endian_counter() {
        let row = frame_with_order(b"Z", counter(0x0102), CounterByteOrder::LittleEndian).unwrap();
        assert_eq!(row.as_bytes(), &[8, 0x02, 0x01, b'Z']);
    }

    #[test]
    fn test_tag_is_not_byte_swapped() {
        for order in [CounterByteOrder::BigEndian, CounterByteOrder::LittleEndian] {
            let row = frame_with_order(b"", counter(0x0800), order).unwrap();
            assert_eq!(row.header()[0], FRAGMENT_TAG);
            assert_eq!(row.len(), FRAME_HEADER_LEN);
        }
    }
}
