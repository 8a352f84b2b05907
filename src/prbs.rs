//! PRBS23 pseudo-random sequence
//!
//! A 23-bit maximal-length linear feedback shift register written as plain
//! integer arithmetic. Feedback is taken from bits 0 and 5 and re-enters at
//! bit 22. The recurrence is a wire contract: decoders regenerate the same
//! sequence to rebuild the parity matrix, so it must not be altered.

/// Bit position at which the feedback bit is injected
const FEEDBACK_BIT: u32 = 22;

/// Second tap of the register
const TAP_BIT: u32 = 5;

/// Period of the sequence for any non-zero 23-bit state
pub const PERIOD: u32 = (1 << 23) - 1;

/// Advance the register by one step
#[inline]
pub fn next(x: u32) -> u32 {
    let b0 = x & 1;
    let b1 = (x >> TAP_BIT) & 1;
    (x >> 1) + ((b0 ^ b1) << FEEDBACK_BIT)
}
