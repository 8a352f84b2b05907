//! Progress and output reporting for encoding runs
//!
//! Decouples the encoder from how (or whether) progress is shown. The binary
//! writes fragments to stdout by default, so console reports go to stderr.

mod console;
mod silent;

pub use console::ConsoleEncodeReporter;
pub use silent::SilentEncodeReporter;

use crate::encoder::EncodedFragments;

/// Base trait for all reporters
pub trait Reporter: Send + Sync {
    /// Report general progress with a message and completion percentage
    fn report_progress(&self, message: &str, progress: f64);

    /// Report successful completion of an operation
    fn report_complete(&self, message: &str);
}

/// Trait for reporting encoding progress and results
pub trait EncodeReporter: Reporter {
    /// Report the start of a run
    fn report_encode_start(&self, input_len: usize, fragment_size: usize, redundancy: usize);

    /// Report how the input was split
    fn report_split(&self, data_rows: usize, padding: usize);

    /// Report a redundancy row; may be called from worker threads in any order
    fn report_redundancy_row(&self, index: usize, weight: usize);

    /// Report the finished run
    fn report_encode_complete(&self, fragments: &EncodedFragments);
}
