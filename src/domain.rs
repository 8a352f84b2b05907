//! Core domain types for fragment encoding
//!
//! Type-safe wrappers for the sizes, counters and indices that flow through
//! the encoder. Fragment counters and redundancy indices are both 1-based and
//! both small integers, so keeping them apart at compile time prevents
//! seeding the matrix generator with a frame counter (or vice versa).

use crate::error::{EncodeError, Result, MAX_FRAGMENT_COUNTER};

/// Number of payload bytes carried by every row
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FragmentSize(usize);

impl FragmentSize {
    /// Validate a fragment size; zero is rejected
    pub fn new(size: usize) -> Result<Self> {
        if size == 0 {
            return Err(EncodeError::InvalidFragmentSize(size));
        }
        Ok(FragmentSize(size))
    }

    pub fn get(&self) -> usize {
        self.0
    }
}

impl std::fmt::Display for FragmentSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 1-based position of a row in the emitted sequence (data rows, then redundancy rows)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FragmentCounter(u16);

impl FragmentCounter {
    /// Create a counter from its 1-based value; 0 is not a valid counter
    pub fn new(value: u16) -> Option<Self> {
        (value != 0).then_some(FragmentCounter(value))
    }

    /// Counter for the row at a 0-based position in the combined sequence
    pub fn from_position(position: usize) -> Result<Self> {
        let value = position + 1;
        if value > MAX_FRAGMENT_COUNTER {
            return Err(EncodeError::CounterOverflow { total: value });
        }
        Ok(FragmentCounter(value as u16))
    }

    pub fn get(&self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for FragmentCounter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 1-based index of a redundancy row; seeds the coefficient generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RedundancyIndex(u16);

impl RedundancyIndex {
    /// Create an index from its 1-based value; 0 is not a valid index
    pub fn new(value: u16) -> Option<Self> {
        (value != 0).then_some(RedundancyIndex(value))
    }

    /// Index of the redundancy row at a 0-based position
    pub fn from_position(position: usize) -> Result<Self> {
        let value = position + 1;
        if value > MAX_FRAGMENT_COUNTER {
            return Err(EncodeError::CounterOverflow { total: value });
        }
        Ok(RedundancyIndex(value as u16))
    }

    pub fn get(&self) -> u16 {
        self.0
    }

    /// Initial PRBS23 state for this row: `1 + 1001 * index`
    pub fn seed(&self) -> u32 {
        1 + 1001 * u32::from(self.0)
    }
}

impl std::fmt::Display for RedundancyIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
