//! Console reporter for encoding runs

use super::{EncodeReporter, Reporter};
use crate::encoder::EncodedFragments;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Show a progress line every this many redundancy rows
const PROGRESS_INTERVAL: usize = 64;

/// Prints a summary of the run to stderr
#[derive(Default)]
pub struct ConsoleEncodeReporter {
    redundancy: AtomicUsize,
    finished_rows: AtomicUsize,
}

impl ConsoleEncodeReporter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Reporter for ConsoleEncodeReporter {
    fn report_progress(&self, message: &str, progress: f64) {
        eprintln!("{} ({:.1}%)", message, progress * 100.0);
    }

    fn report_complete(&self, message: &str) {
        eprintln!("{}", message);
    }
}

impl EncodeReporter for ConsoleEncodeReporter {
    fn report_encode_start(&self, input_len: usize, fragment_size: usize, redundancy: usize) {
        self.redundancy.store(redundancy, Ordering::Relaxed);
        self.finished_rows.store(0, Ordering::Relaxed);
        eprintln!(
            "Encoding {} bytes: fragment size {}, {} redundancy rows",
            input_len, fragment_size, redundancy
        );
    }

    fn report_split(&self, data_rows: usize, padding: usize) {
        eprintln!("Data rows: {} ({} bytes padding)", data_rows, padding);
    }

    fn report_redundancy_row(&self, _index: usize, _weight: usize) {
        let done = self.finished_rows.fetch_add(1, Ordering::Relaxed) + 1;
        let total = self.redundancy.load(Ordering::Relaxed);
        if total > PROGRESS_INTERVAL && done % PROGRESS_INTERVAL == 0 {
            self.report_progress("Computing redundancy rows", done as f64 / total as f64);
        }
    }

    fn report_encode_complete(&self, fragments: &EncodedFragments) {
        self.report_complete(&format!(
            "Encoded {} fragments ({} data + {} redundancy), {} bytes each",
            fragments.len(),
            fragments.data_row_count(),
            fragments.redundancy_count(),
            fragments.row_len()
        ));
    }
}
