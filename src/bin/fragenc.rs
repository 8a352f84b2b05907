//! fragenc - LoRaWAN fragmentation encoder
//!
//! Reads a file, splits it into fragments, appends XOR redundancy rows and
//! writes the framed rows in one of the supported output formats.

use anyhow::{Context, Result};
use fragrs::reporters::{ConsoleEncodeReporter, EncodeReporter, SilentEncodeReporter};
use fragrs::{CoefficientMatrix, EncoderConfig, FragmentEncoder, OutputFormat};
use std::fs;
use std::io::{self, BufWriter, Write};

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .init();

    let matches = fragrs::parse_args();

    match matches.subcommand() {
        Some(("encode", sub_matches)) => handle_encode(sub_matches),
        Some(("matrix", sub_matches)) => handle_matrix(sub_matches),
        Some((cmd, _)) => anyhow::bail!("Unknown command: {}", cmd),
        None => anyhow::bail!("No command specified"),
    }
}

fn handle_encode(matches: &clap::ArgMatches) -> Result<()> {
    let input_file = matches
        .get_one::<String>("input")
        .context("Input file is required")?;
    let format: OutputFormat = matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("list")
        .parse()
        .map_err(anyhow::Error::msg)?;
    let quiet = matches.get_flag("quiet");

    let config = EncoderConfig::from_args(matches);
    if config.parallel {
        config.configure_thread_pool();
    }

    let input =
        fs::read(input_file).with_context(|| format!("Failed to read {}", input_file))?;

    let reporter: Box<dyn EncodeReporter> = if quiet {
        Box::new(SilentEncodeReporter::new())
    } else {
        Box::new(ConsoleEncodeReporter::new())
    };

    let encoder = FragmentEncoder::new(config).context("Invalid encoder configuration")?;
    let fragments = encoder
        .encode_with_reporter(&input, reporter.as_ref())
        .context("Failed to encode fragments")?;

    // Render fully before touching the output so a failure leaves no partial file
    let rendered = format
        .render(&fragments)
        .with_context(|| format!("Failed to render {} output", format))?;

    match matches.get_one::<String>("output") {
        Some(output_file) => {
            fs::write(output_file, &rendered)
                .with_context(|| format!("Failed to write {}", output_file))?;
            if !quiet {
                eprintln!("Written to {}", output_file);
            }
        }
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            writer.write_all(&rendered).context("Failed to write to stdout")?;
            writer.flush().context("Failed to flush stdout")?;
        }
    }

    Ok(())
}

fn handle_matrix(matches: &clap::ArgMatches) -> Result<()> {
    let rows = matches
        .get_one::<usize>("rows")
        .copied()
        .context("--rows is required")?;
    let redundancy = matches
        .get_one::<usize>("redundancy")
        .copied()
        .context("--redundancy is required")?;

    let matrix = CoefficientMatrix::build(redundancy, rows).context("Failed to build matrix")?;
    print!("{}", matrix);
    Ok(())
}
