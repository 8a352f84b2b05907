//! Redundancy encoding
//!
//! Data rows are emitted unchanged; each redundancy row is the byte-wise XOR
//! of the data rows selected by its coefficient line. The full pipeline:
//!
//! 1. split and zero-pad the input ([`DataRows`])
//! 2. build the coefficient matrix ([`CoefficientMatrix`])
//! 3. XOR-fold one redundancy row per matrix line ([`encode_row`])
//! 4. frame data rows then redundancy rows with counters `1..=n+r`
//!
//! Every check happens before the first row is framed, so a failed run
//! yields no output at all.

use crate::config::EncoderConfig;
use crate::domain::{FragmentCounter, FragmentSize};
use crate::error::{checked_total_rows, EncodeError, Result};
use crate::framing::{frame_with_order, FramedRow, FRAME_HEADER_LEN};
use crate::matrix::{CoefficientLine, CoefficientMatrix};
use crate::reporters::{EncodeReporter, SilentEncodeReporter};
use crate::session::SessionHeader;
use crate::splitter::DataRows;
use log::{debug, info};
use rayon::prelude::*;

/// XOR `src` into `acc`
#[inline]
fn xor_into(acc: &mut [u8], src: &[u8]) {
    for (a, s) in acc.iter_mut().zip(src) {
        *a ^= s;
    }
}

/// Fold the data rows selected by `line` into one redundancy row
///
/// A line with no set coefficients yields an all-zero row.
pub fn encode_row(data_rows: &DataRows, line: &CoefficientLine) -> Vec<u8> {
    let mut row = vec![0u8; data_rows.fragment_size()];
    for (data_row, _) in data_rows
        .iter()
        .zip(line.as_bits())
        .filter(|(_, selected)| **selected)
    {
        xor_into(&mut row, data_row);
    }
    row
}

/// Check row counts before any work is done
fn validate_row_counts(data_row_count: usize, redundancy: usize) -> Result<()> {
    if data_row_count == 0 && redundancy > 0 {
        return Err(EncodeError::DegenerateRowCount);
    }
    checked_total_rows(data_row_count, redundancy)?;
    Ok(())
}

/// Result of an encoding run: framed data rows followed by framed redundancy rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedFragments {
    fragment_size: usize,
    data_row_count: usize,
    padding: usize,
    rows: Vec<FramedRow>,
}

impl EncodedFragments {
    pub fn fragment_size(&self) -> usize {
        self.fragment_size
    }

    pub fn data_row_count(&self) -> usize {
        self.data_row_count
    }

    pub fn redundancy_count(&self) -> usize {
        self.rows.len() - self.data_row_count
    }

    /// Zero bytes appended to the last data row
    pub fn padding(&self) -> usize {
        self.padding
    }

    /// Length of every framed row
    pub fn row_len(&self) -> usize {
        FRAME_HEADER_LEN + self.fragment_size
    }

    /// Total number of framed rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[FramedRow] {
        &self.rows
    }

    pub fn data_rows(&self) -> &[FramedRow] {
        &self.rows[..self.data_row_count]
    }

    pub fn redundancy_rows(&self) -> &[FramedRow] {
        &self.rows[self.data_row_count..]
    }

    /// Session descriptor a receiver needs to decode these rows
    pub fn session_header(&self) -> Result<SessionHeader> {
        SessionHeader::new(self.data_row_count, self.fragment_size, self.padding)
    }
}

/// Encodes input blocks according to an [`EncoderConfig`]
#[derive(Debug, Clone)]
pub struct FragmentEncoder {
    config: EncoderConfig,
    fragment_size: FragmentSize,
}

impl FragmentEncoder {
    /// Create an encoder, rejecting a zero fragment size
    pub fn new(config: EncoderConfig) -> Result<Self> {
        let fragment_size = FragmentSize::new(config.fragment_size)?;
        Ok(Self {
            config,
            fragment_size,
        })
    }

    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Encode `input` without progress output
    pub fn encode(&self, input: &[u8]) -> Result<EncodedFragments> {
        self.encode_with_reporter(input, &SilentEncodeReporter::new())
    }

    pub fn encode_with_reporter<R: EncodeReporter + ?Sized>(
        &self,
        input: &[u8],
        reporter: &R,
    ) -> Result<EncodedFragments> {
        let redundancy = self.config.redundancy;
        reporter.report_encode_start(input.len(), self.fragment_size.get(), redundancy);

        let data_rows = DataRows::split(input, self.fragment_size);
        validate_row_counts(data_rows.len(), redundancy)?;
        reporter.report_split(data_rows.len(), data_rows.padding());

        let redundancy_rows = if self.config.parallel {
            let matrix = CoefficientMatrix::build_parallel(redundancy, data_rows.len())?;
            matrix
                .lines()
                .par_iter()
                .enumerate()
                .map(|(position, line)| {
                    reporter.report_redundancy_row(position + 1, line.weight());
                    encode_row(&data_rows, line)
                })
                .collect::<Vec<_>>()
        } else {
            let matrix = CoefficientMatrix::build(redundancy, data_rows.len())?;
            matrix
                .lines()
                .iter()
                .enumerate()
                .map(|(position, line)| {
                    reporter.report_redundancy_row(position + 1, line.weight());
                    encode_row(&data_rows, line)
                })
                .collect::<Vec<_>>()
        };
        debug!(
            "Computed {} redundancy rows over {} data rows",
            redundancy_rows.len(),
            data_rows.len()
        );

        let rows = data_rows
            .iter()
            .chain(redundancy_rows.iter().map(Vec::as_slice))
            .enumerate()
            .map(|(position, payload)| {
                let counter = FragmentCounter::from_position(position)?;
                frame_with_order(payload, counter, self.config.counter_order)
            })
            .collect::<Result<Vec<_>>>()?;

        let fragments = EncodedFragments {
            fragment_size: self.fragment_size.get(),
            data_row_count: data_rows.len(),
            padding: data_rows.padding(),
            rows,
        };
        info!(
            "Encoded {} bytes into {} fragments",
            input.len(),
            fragments.len()
        );
        reporter.report_encode_complete(&fragments);
        Ok(fragments)
    }
}

/// Encode `input` with the given fragment size and redundancy using default settings
pub fn encode(input: &[u8], fragment_size: usize, redundancy: usize) -> Result<EncodedFragments> {
    FragmentEncoder::new(EncoderConfig::new(fragment_size, redundancy))?.encode(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RedundancyIndex;
    use crate::matrix::select_line;

    #[test]
    fn test_encode_row_follows_line() {
        let data_rows = DataRows::split(b"ABCDEFGH", FragmentSize::new(4).unwrap());
        let line = select_line(RedundancyIndex::new(1).unwrap(), 2).unwrap();

        let expected: Vec<u8> = match (line.is_set(0), line.is_set(1)) {
            (true, true) => b"ABCD".iter().zip(b"EFGH").map(|(a, b)| a ^ b).collect(),
            (true, false) => b"ABCD".to_vec(),
            (false, true) => b"EFGH".to_vec(),
            (false, false) => vec![0; 4],
        };
        assert_eq!(encode_row(&data_rows, &line), expected);
    }

    #[test]
    fn test_encode_abcdefgh() {
        let fragments = encode(b"ABCDEFGH", 4, 1).unwrap();
        let bytes: Vec<&[u8]> = fragments.rows().iter().map(FramedRow::as_bytes).collect();
        assert_eq!(
            bytes,
            vec![
                &[8, 0, 1, b'A', b'B', b'C', b'D'][..],
                &[8, 0, 2, b'E', b'F', b'G', b'H'][..],
                &[8, 0, 3, b'E', b'F', b'G', b'H'][..],
            ]
        );
    }

    #[test]
    fn test_empty_input_with_redundancy_is_rejected() {
        assert!(matches!(
            encode(b"", 8, 2),
            Err(EncodeError::DegenerateRowCount)
        ));
    }

    #[test]
    fn test_empty_input_without_redundancy() {
        let fragments = encode(b"", 8, 0).unwrap();
        assert!(fragments.is_empty());
        assert_eq!(fragments.data_row_count(), 0);
    }

    #[test]
    fn test_zero_fragment_size_is_rejected() {
        assert!(matches!(
            encode(b"abc", 0, 1),
            Err(EncodeError::InvalidFragmentSize(0))
        ));
    }

    #[test]
    fn test_counter_overflow_is_rejected() {
        let input = vec![0u8; 65_535];
        assert!(encode(&input, 1, 0).is_ok());
        assert!(matches!(
            encode(&input, 1, 1),
            Err(EncodeError::CounterOverflow { total: 65_536 })
        ));
    }

    #[test]
    fn test_huge_redundancy_is_rejected() {
        assert!(matches!(
            encode(b"A", 1, usize::MAX),
            Err(EncodeError::CounterOverflow { total: usize::MAX })
        ));
        assert!(matches!(
            encode(b"AB", 1, usize::MAX - 1),
            Err(EncodeError::CounterOverflow { total: usize::MAX })
        ));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let input: Vec<u8> = (0..1000u32).map(|i| (i * 31 + 7) as u8).collect();
        let sequential = FragmentEncoder::new(EncoderConfig::new(10, 5).with_parallel(false))
            .unwrap()
            .encode(&input)
            .unwrap();
        let parallel = FragmentEncoder::new(EncoderConfig::new(10, 5))
            .unwrap()
            .encode(&input)
            .unwrap();
        assert_eq!(sequential, parallel);
    }
}
