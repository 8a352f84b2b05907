//! Output formats for encoded fragments
//!
//! - `list`: the reference encoder's stdout layout, a `Fragmentation header
//!   likely:` line then one `[8, 0, 1, ...]` line per row. Its session header
//!   always reports zero padding, as the reference encoder printed it
//! - `plain`: session header then rows, space-separated lowercase hex
//! - `h`: a C header with the session header and every row as `uint8_t` arrays
//! - `bin`: framed rows concatenated, no session header

use crate::encoder::EncodedFragments;
use crate::error::Result;
use crate::session::SessionHeader;
use std::fmt;
use std::io::Write;
use std::str::FromStr;

/// Accepted `--format` values
pub const FORMAT_NAMES: [&str; 4] = ["list", "plain", "h", "bin"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    List,
    Plain,
    CHeader,
    Binary,
}

impl OutputFormat {
    pub fn name(&self) -> &'static str {
        match self {
            OutputFormat::List => "list",
            OutputFormat::Plain => "plain",
            OutputFormat::CHeader => "h",
            OutputFormat::Binary => "bin",
        }
    }

    /// Write `fragments` to `writer` in this format
    pub fn write<W: Write>(&self, fragments: &EncodedFragments, writer: &mut W) -> Result<()> {
        match self {
            OutputFormat::List => write_list(fragments, writer),
            OutputFormat::Plain => write_plain(fragments, writer),
            OutputFormat::CHeader => write_c_header(fragments, writer),
            OutputFormat::Binary => write_binary(fragments, writer),
        }
    }

    /// Render to an in-memory buffer
    pub fn render(&self, fragments: &EncodedFragments) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.write(fragments, &mut buffer)?;
        Ok(buffer)
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "list" => Ok(OutputFormat::List),
            "plain" => Ok(OutputFormat::Plain),
            "h" => Ok(OutputFormat::CHeader),
            "bin" => Ok(OutputFormat::Binary),
            other => Err(format!(
                "Unknown output format '{}' (expected one of: {})",
                other,
                FORMAT_NAMES.join(", ")
            )),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn join_bytes(bytes: &[u8], render: impl Fn(u8) -> String, separator: &str) -> String {
    bytes
        .iter()
        .map(|&b| render(b))
        .collect::<Vec<_>>()
        .join(separator)
}

fn session_header_bytes(fragments: &EncodedFragments) -> Result<Vec<u8>> {
    fragments.session_header()?.to_bytes()
}

fn write_list<W: Write>(fragments: &EncodedFragments, writer: &mut W) -> Result<()> {
    let header =
        SessionHeader::new(fragments.data_row_count(), fragments.fragment_size(), 0)?.to_bytes()?;
    writeln!(
        writer,
        "Fragmentation header likely: [  {} ]",
        join_bytes(&header, |b| format!("0x{:02X}", b), ", ")
    )?;
    for row in fragments.rows() {
        writeln!(
            writer,
            "[{}]",
            join_bytes(row.as_bytes(), |b| b.to_string(), ", ")
        )?;
    }
    Ok(())
}

fn write_plain<W: Write>(fragments: &EncodedFragments, writer: &mut W) -> Result<()> {
    let header = session_header_bytes(fragments)?;
    writeln!(writer, "{}", join_bytes(&header, |b| hex::encode([b]), " "))?;
    for row in fragments.rows() {
        writeln!(writer, "{}", join_bytes(row.as_bytes(), |b| hex::encode([b]), " "))?;
    }
    Ok(())
}

fn write_c_header<W: Write>(fragments: &EncodedFragments, writer: &mut W) -> Result<()> {
    let header = session_header_bytes(fragments)?;
    let c_byte = |b: u8| format!("{:#x}", b);

    writeln!(writer, "#ifndef PACKETS_H")?;
    writeln!(writer, "#define PACKETS_H")?;
    writeln!(writer)?;
    writeln!(writer, "#include \"mbed.h\"")?;
    writeln!(writer)?;
    writeln!(
        writer,
        "const uint8_t FAKE_PACKETS_HEADER[] = {{ {} }};",
        join_bytes(&header, c_byte, ", ")
    )?;
    writeln!(writer)?;
    writeln!(
        writer,
        "const uint8_t FAKE_PACKETS[][{}] = {{",
        fragments.row_len()
    )?;
    for row in fragments.rows() {
        writeln!(writer, "    {{ {} }},", join_bytes(row.as_bytes(), c_byte, ", "))?;
    }
    writeln!(writer, "}};")?;
    writeln!(writer)?;
    writeln!(writer, "#endif")?;
    Ok(())
}

fn write_binary<W: Write>(fragments: &EncodedFragments, writer: &mut W) -> Result<()> {
    for row in fragments.rows() {
        writer.write_all(row.as_bytes())?;
    }
    Ok(())
}
