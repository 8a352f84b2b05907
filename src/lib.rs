//! LoRaWAN fragmented data block encoder
//!
//! Splits a binary object into fixed-size rows, appends XOR parity rows
//! chosen by the PRBS23 coefficient matrix, and frames every row with a
//! tag and 16-bit fragment counter so a receiver can rebuild the object
//! after losing some fragments.
//!
//! ```
//! let fragments = fragrs::encode(b"ABCDEFGH", 4, 1).unwrap();
//! assert_eq!(fragments.len(), 3);
//! assert_eq!(fragments.rows()[0].as_bytes(), &[8, 0, 1, b'A', b'B', b'C', b'D']);
//! ```

pub mod args;
pub mod config;
pub mod domain;
pub mod encoder;
pub mod error;
pub mod framing;
pub mod matrix;
pub mod output;
pub mod prbs;
pub mod reporters;
pub mod session;
pub mod splitter;

pub use args::parse_args;
pub use config::EncoderConfig;
pub use domain::{FragmentCounter, FragmentSize, RedundancyIndex};
pub use encoder::{encode, encode_row, EncodedFragments, FragmentEncoder};
pub use error::{EncodeError, Result};
pub use framing::{frame, frame_with_order, CounterByteOrder, FramedRow};
pub use matrix::{select_line, CoefficientLine, CoefficientMatrix};
pub use output::OutputFormat;
pub use session::SessionHeader;
pub use splitter::DataRows;
