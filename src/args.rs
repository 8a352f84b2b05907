use crate::output::FORMAT_NAMES;
use clap::{value_parser, Arg, ArgAction, Command};
use std::fs;

/// Command-line definition for `fragenc`
pub fn build_cli() -> Command {
    Command::new("fragenc")
        .version(env!("CARGO_PKG_VERSION"))
        .about("LoRaWAN fragmentation encoder with XOR parity redundancy")
        .arg_required_else_help(true)
        .subcommand_required(true)
        .subcommand(
            Command::new("encode")
                .visible_alias("e")
                .about("Split a file into framed fragments and append redundancy rows")
                .arg(
                    Arg::new("input")
                        .help("Input file")
                        .required(true)
                        .index(1)
                        .value_parser(|input: &str| {
                            let path = fs::canonicalize(input)
                                .map_err(|_| "Failed to resolve input path")?;
                            if path.is_file() {
                                Ok(path.to_string_lossy().to_string())
                            } else {
                                Err(String::from("Input file does not exist"))
                            }
                        }),
                )
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("out-file")
                        .help("Output file (default: stdout)")
                        .value_name("FILE"),
                )
                .arg(
                    Arg::new("frag_size")
                        .short('s')
                        .long("frag-size")
                        .help("Fragment payload size in bytes")
                        .value_name("BYTES")
                        .required(true)
                        .value_parser(value_parser!(usize)),
                )
                .arg(
                    Arg::new("redundancy")
                        .short('r')
                        .long("redundancy")
                        .visible_alias("redundancy-packets")
                        .help("Number of redundancy rows")
                        .value_name("COUNT")
                        .required(true)
                        .value_parser(value_parser!(usize)),
                )
                .arg(
                    Arg::new("format")
                        .short('f')
                        .long("output-format")
                        .help("Output format")
                        .value_parser(FORMAT_NAMES)
                        .default_value("list"),
                )
                .arg(
                    Arg::new("little-endian-counter")
                        .long("little-endian-counter")
                        .help("Write the fragment counter low byte first")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("quiet")
                        .short('q')
                        .long("quiet")
                        .help("Quiet mode - no summary on stderr")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("threads")
                        .short('t')
                        .long("threads")
                        .help("Number of CPU threads for computation (0 = auto-detect)")
                        .value_name("N")
                        .default_value("0")
                        .value_parser(value_parser!(usize)),
                )
                .arg(
                    Arg::new("no-parallel")
                        .long("no-parallel")
                        .help("Disable all parallel processing")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("matrix")
                .visible_alias("m")
                .about("Print the parity coefficient matrix")
                .arg(
                    Arg::new("rows")
                        .short('n')
                        .long("rows")
                        .help("Number of data rows")
                        .value_name("COUNT")
                        .required(true)
                        .value_parser(value_parser!(usize)),
                )
                .arg(
                    Arg::new("redundancy")
                        .short('r')
                        .long("redundancy")
                        .help("Number of redundancy rows")
                        .value_name("COUNT")
                        .required(true)
                        .value_parser(value_parser!(usize)),
                ),
        )
}

pub fn parse_args() -> clap::ArgMatches {
    build_cli().get_matches()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        build_cli().debug_assert();
    }

    #[test]
    fn test_matrix_arguments() {
        let matches = build_cli()
            .try_get_matches_from(["fragenc", "matrix", "-n", "10", "-r", "3"])
            .unwrap();
        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, "matrix");
        assert_eq!(sub.get_one::<usize>("rows"), Some(&10));
        assert_eq!(sub.get_one::<usize>("redundancy"), Some(&3));
    }

    #[test]
    fn test_encode_rejects_unknown_format() {
        let result = build_cli().try_get_matches_from([
            "fragenc", "encode", "Cargo.toml", "-s", "8", "-r", "1", "-f", "json",
        ]);
        assert!(result.is_err());
    }
}
