//! Parity coefficient matrix
//!
//! Each redundancy row XORs together a pseudo-random subset of the data rows.
//! The subset for row `i` is a pure function of `i` and the data row count,
//! drawn from the PRBS23 sequence seeded with `1 + 1001 * i`. Receivers
//! rebuild the same matrix independently, so selection must match the
//! LoRaWAN fragmentation reference bit for bit.
//!
//! Draws are made with replacement: a position drawn twice is marked once,
//! which leaves some lines with fewer than `n / 2` ones. Decoders expect
//! exactly that matrix.

use crate::domain::RedundancyIndex;
use crate::error::{checked_total_rows, EncodeError, Result, MAX_FRAGMENT_COUNTER};
use crate::prbs;
use log::trace;
use rayon::prelude::*;
use std::fmt;

/// Sentinel that is never a valid column (row counts are capped at 65535)
const NO_COLUMN: u32 = 1 << 16;

/// One row of the parity matrix: which data rows feed a redundancy row
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CoefficientLine {
    bits: Vec<bool>,
}

impl CoefficientLine {
    /// Number of columns (equal to the data row count)
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Whether data row `column` contributes to this redundancy row
    pub fn is_set(&self, column: usize) -> bool {
        self.bits.get(column).copied().unwrap_or(false)
    }

    /// Number of data rows XORed into the redundancy row
    pub fn weight(&self) -> usize {
        self.bits.iter().filter(|&&bit| bit).count()
    }

    /// Columns with a set coefficient, in ascending order
    pub fn selected(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits
            .iter()
            .enumerate()
            .filter_map(|(column, &bit)| bit.then_some(column))
    }

    pub fn as_bits(&self) -> &[bool] {
        &self.bits
    }
}

impl fmt::Display for CoefficientLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Check that a data row count can index a matrix line
fn check_row_count(data_row_count: usize) -> Result<u32> {
    if data_row_count == 0 {
        return Err(EncodeError::DegenerateRowCount);
    }
    if data_row_count > MAX_FRAGMENT_COUNTER {
        return Err(EncodeError::CounterOverflow {
            total: data_row_count,
        });
    }
    Ok(data_row_count as u32)
}

/// Select the data rows feeding redundancy row `row`
///
/// Runs `n / 2` draws. Each draw advances the PRBS until `x mod (n + m)`
/// lands below `n`, where `m` is 1 when `n` is a power of two and 0
/// otherwise, then marks that column.
pub fn select_line(row: RedundancyIndex, data_row_count: usize) -> Result<CoefficientLine> {
    let n = check_row_count(data_row_count)?;
    let mut bits = vec![false; data_row_count];

    let m = u32::from(n.is_power_of_two());
    let modulus = n + m;
    let mut x = row.seed();

    for _ in 0..n / 2 {
        let mut r = NO_COLUMN;
        while r >= n {
            x = prbs::next(x);
            r = x % modulus;
        }
        bits[r as usize] = true;
    }

    Ok(CoefficientLine { bits })
}

/// The full parity matrix: one line per redundancy row, in row order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoefficientMatrix {
    data_row_count: usize,
    lines: Vec<CoefficientLine>,
}

impl CoefficientMatrix {
    /// Build lines for redundancy rows `1..=redundancy`
    pub fn build(redundancy: usize, data_row_count: usize) -> Result<Self> {
        Self::build_with_mode(redundancy, data_row_count, false)
    }

    /// Build lines concurrently; the result is identical to [`build`](Self::build)
    pub fn build_parallel(redundancy: usize, data_row_count: usize) -> Result<Self> {
        Self::build_with_mode(redundancy, data_row_count, true)
    }

    fn build_with_mode(redundancy: usize, data_row_count: usize, parallel: bool) -> Result<Self> {
        if redundancy == 0 {
            return Ok(Self {
                data_row_count,
                lines: Vec::new(),
            });
        }
        if data_row_count == 0 {
            return Err(EncodeError::DegenerateRowCount);
        }
        checked_total_rows(data_row_count, redundancy)?;

        let make_line = |position: usize| -> Result<CoefficientLine> {
            let index = RedundancyIndex::from_position(position)?;
            let line = select_line(index, data_row_count)?;
            trace!("redundancy row {}: weight {}", index, line.weight());
            Ok(line)
        };

        let lines = if parallel {
            (0..redundancy)
                .into_par_iter()
                .map(make_line)
                .collect::<Result<Vec<_>>>()?
        } else {
            (0..redundancy).map(make_line).collect::<Result<Vec<_>>>()?
        };

        Ok(Self {
            data_row_count,
            lines,
        })
    }

    pub fn data_row_count(&self) -> usize {
        self.data_row_count
    }

    /// Number of redundancy rows
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Line for the 1-based redundancy index
    pub fn line(&self, index: RedundancyIndex) -> Option<&CoefficientLine> {
        self.lines.get(usize::from(index.get()) - 1)
    }

    pub fn lines(&self) -> &[CoefficientLine] {
        &self.lines
    }
}

impl fmt::Display for CoefficientMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn idx(i: u16) -> RedundancyIndex {
        RedundancyIndex::new(i).unwrap()
    }

    fn bits(line: &CoefficientLine) -> Vec<u8> {
        line.as_bits().iter().map(|&b| u8::from(b)).collect()
    }

    #[test]
    fn test_select_line_reference_values() {
        assert_eq!(bits(&select_line(idx(1), 2).unwrap()), vec![0, 1]);
        assert_eq!(bits(&select_line(idx(2), 2).unwrap()), vec![1, 0]);
        assert_eq!(bits(&select_line(idx(1), 3).unwrap()), vec![0, 1, 0]);
        assert_eq!(bits(&select_line(idx(3), 4).unwrap()), vec![0, 1, 0, 1]);
        assert_eq!(
            bits(&select_line(idx(1), 8).unwrap()),
            vec![1, 1, 0, 0, 1, 0, 1, 0]
        );
        assert_eq!(
            bits(&select_line(idx(2), 10).unwrap()),
            vec![1, 0, 1, 0, 1, 1, 0, 0, 0, 1]
        );
    }

    #[test]
    fn test_duplicate_draws_are_kept() {
        // Five draws over ten columns land on only two distinct columns
        let line = select_line(idx(1), 10).unwrap();
        assert_eq!(line.weight(), 2);
        assert_eq!(line.selected().collect::<Vec<_>>(), vec![2, 5]);
    }

    #[test]
    fn test_single_row_has_no_draws() {
        let line = select_line(idx(1), 1).unwrap();
        assert_eq!(line.len(), 1);
        assert_eq!(line.weight(), 0);
    }

    #[test]
    fn test_zero_rows_rejected() {
        assert!(matches!(
            select_line(idx(1), 0),
            Err(EncodeError::DegenerateRowCount)
        ));
    }

    #[test]
    fn test_matrix_rejects_empty_input_with_redundancy() {
        assert!(matches!(
            CoefficientMatrix::build(3, 0),
            Err(EncodeError::DegenerateRowCount)
        ));
        assert!(CoefficientMatrix::build(0, 0).unwrap().is_empty());
    }

    #[test]
    fn test_matrix_counter_limit() {
        assert!(CoefficientMatrix::build(1, 65534).is_ok());
        assert!(matches!(
            CoefficientMatrix::build(2, 65534),
            Err(EncodeError::CounterOverflow { total: 65536 })
        ));
    }

    #[test]
    fn test_matrix_huge_redundancy_is_rejected() {
        assert!(matches!(
            CoefficientMatrix::build(usize::MAX, 1),
            Err(EncodeError::CounterOverflow { total: usize::MAX })
        ));
        assert!(matches!(
            CoefficientMatrix::build_parallel(usize::MAX, 2),
            Err(EncodeError::CounterOverflow { total: usize::MAX })
        ));
    }

    #[test]
    fn test_matrix_lines_do_not_depend_on_redundancy() {
        let short = CoefficientMatrix::build(2, 16).unwrap();
        let long = CoefficientMatrix::build(6, 16).unwrap();
        assert_eq!(short.lines(), &long.lines()[..2]);
        assert_eq!(long.line(idx(3)), Some(&select_line(idx(3), 16).unwrap()));
    }

    #[test]
    fn test_display() {
        let matrix = CoefficientMatrix::build(2, 4).unwrap();
        assert_eq!(matrix.to_string(), "1010\n1010\n");
    }
}
