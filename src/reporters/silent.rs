//! Silent reporter
//!
//! No-output implementation for tests, library callers and `--quiet`.

use super::{EncodeReporter, Reporter};
use crate::encoder::EncodedFragments;

#[derive(Default)]
pub struct SilentEncodeReporter;

impl SilentEncodeReporter {
    pub fn new() -> Self {
        Self
    }
}

impl Reporter for SilentEncodeReporter {
    fn report_progress(&self, _message: &str, _progress: f64) {}
    fn report_complete(&self, _message: &str) {}
}

impl EncodeReporter for SilentEncodeReporter {
    fn report_encode_start(&self, _input_len: usize, _fragment_size: usize, _redundancy: usize) {}
    fn report_split(&self, _data_rows: usize, _padding: usize) {}
    fn report_redundancy_row(&self, _index: usize, _weight: usize) {}
    fn report_encode_complete(&self, _fragments: &EncodedFragments) {}
}
