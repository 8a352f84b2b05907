//! Configuration for encoding operations

use crate::framing::CounterByteOrder;
use log::warn;

/// Fragment size used by the reference FUOTA deployment
pub const DEFAULT_FRAGMENT_SIZE: usize = 226;

/// Configuration for a single encoding run
#[derive(Debug, Clone)]
pub struct EncoderConfig {
    /// Payload bytes per row
    pub fragment_size: usize,
    /// Number of redundancy rows to append
    pub redundancy: usize,
    /// Number of threads for computation (0 = auto-detect)
    pub threads: usize,
    /// Whether redundancy rows are computed in parallel
    pub parallel: bool,
    /// Byte order of the fragment counter in each row header
    pub counter_order: CounterByteOrder,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            fragment_size: DEFAULT_FRAGMENT_SIZE,
            redundancy: 0,
            threads: 0, // Auto-detect CPU cores
            parallel: true,
            counter_order: CounterByteOrder::BigEndian,
        }
    }
}

impl EncoderConfig {
    pub fn new(fragment_size: usize, redundancy: usize) -> Self {
        Self {
            fragment_size,
            redundancy,
            ..Self::default()
        }
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_counter_order(mut self, order: CounterByteOrder) -> Self {
        self.counter_order = order;
        self
    }

    /// Build from `fragenc encode` arguments
    ///
    /// `frag-size` and `redundancy` are required and typed by the parser.
    pub fn from_args(matches: &clap::ArgMatches) -> Self {
        let fragment_size = matches
            .get_one::<usize>("frag_size")
            .copied()
            .unwrap_or(DEFAULT_FRAGMENT_SIZE);
        let redundancy = matches
            .get_one::<usize>("redundancy")
            .copied()
            .unwrap_or(0);
        let threads = matches.get_one::<usize>("threads").copied().unwrap_or(0);

        let parallel = !matches.get_flag("no-parallel");
        let counter_order = if matches.get_flag("little-endian-counter") {
            CounterByteOrder::LittleEndian
        } else {
            CounterByteOrder::BigEndian
        };

        Self::new(fragment_size, redundancy)
            .with_threads(threads)
            .with_parallel(parallel)
            .with_counter_order(counter_order)
    }

    /// Get effective thread count (auto-detect if 0)
    pub fn effective_threads(&self) -> usize {
        match (self.parallel, self.threads) {
            (false, _) => 1, // Sequential mode always uses single thread
            (true, 0) => std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4),
            (true, n) => n,
        }
    }

    /// Size the global rayon pool; a pool that is already built is left alone
    pub fn configure_thread_pool(&self) {
        let threads = self.effective_threads();
        if let Err(err) = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
        {
            warn!("Could not set thread count to {}: {}", threads, err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EncoderConfig::default();
        assert_eq!(config.fragment_size, DEFAULT_FRAGMENT_SIZE);
        assert_eq!(config.redundancy, 0);
        assert!(config.parallel);
        assert_eq!(config.counter_order, CounterByteOrder::BigEndian);
    }

    #[test]
    fn test_effective_threads() {
        assert_eq!(EncoderConfig::new(8, 2).with_parallel(false).effective_threads(), 1);
        assert_eq!(EncoderConfig::new(8, 2).with_threads(3).effective_threads(), 3);
        assert!(EncoderConfig::new(8, 2).effective_threads() >= 1);
    }
}
