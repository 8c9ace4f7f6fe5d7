//! OxiHuff CLI - Huffman file compressor
//!
//! Compresses files or raw text into self-describing `.hac` containers.

mod commands;
mod utils;

use clap::{Parser, Subcommand};
use commands::{InputMode, cmd_compress, cmd_decompress, cmd_info, cmd_test, cmd_tree};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "oxihuff")]
#[command(author, version, about = "Pure Rust Huffman compressor")]
#[command(long_about = "
OxiHuff compresses a file (or a piece of text) with a Huffman code built from
its own byte frequencies. The code table is stored inside the output, so a
.hac file decompresses without any other input.

Examples:
  oxihuff compress notes.txt
  oxihuff compress 'some raw text' -m raw -o text.hac
  oxihuff decompress notes.txt.hac
  oxihuff decompress notes.txt.hac -o -
  oxihuff test notes.txt.hac
  oxihuff info notes.txt.hac --json
  oxihuff tree 'abracadabra' -m raw
")]
struct Cli {
    /// Show verbose output and debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a file or raw text
    #[command(alias = "c")]
    Compress {
        /// File path, or the data itself in raw mode
        input: String,

        /// How to interpret INPUT
        #[arg(short, long, value_enum, default_value = "auto")]
        mode: InputMode,

        /// Output file (`-` for stdout); defaults to <INPUT>.hac for files
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Show progress bar
        #[arg(short = 'P', long)]
        progress: bool,
    },

    /// Decompress a .hac file
    #[command(alias = "d")]
    Decompress {
        /// Compressed file
        input: PathBuf,

        /// Output file (`-` for stdout); defaults to INPUT without .hac
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Show progress bar
        #[arg(short = 'P', long)]
        progress: bool,
    },

    /// Check that a .hac file decodes
    #[command(alias = "t")]
    Test {
        /// Compressed file to test
        file: PathBuf,
    },

    /// Show the layout and code table of a .hac file
    #[command(alias = "i")]
    Info {
        /// Compressed file to inspect
        file: PathBuf,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,
    },

    /// Print the Huffman tree and codes for an input
    Tree {
        /// File path, or the data itself in raw mode
        input: String,

        /// How to interpret INPUT
        #[arg(short, long, value_enum, default_value = "auto")]
        mode: InputMode,
    },
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();

    let verbose = cli.verbose;
    let result = match cli.command {
        Commands::Compress {
            input,
            mode,
            output,
            progress,
        } => cmd_compress(&input, mode, output.as_deref(), verbose, progress),
        Commands::Decompress {
            input,
            output,
            progress,
        } => cmd_decompress(&input, output.as_deref(), verbose, progress),
        Commands::Test { file } => cmd_test(&file, verbose),
        Commands::Info { file, json } => cmd_info(&file, json),
        Commands::Tree { input, mode } => cmd_tree(&input, mode),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_compress_defaults() {
        let cli = Cli::try_parse_from(["oxihuff", "compress", "notes.txt"]).unwrap();
        assert!(!cli.verbose);
        match cli.command {
            Commands::Compress {
                input,
                mode,
                output,
                progress,
            } => {
                assert_eq!(input, "notes.txt");
                assert_eq!(mode, InputMode::Auto);
                assert!(output.is_none());
                assert!(!progress);
            }
            _ => panic!("expected compress"),
        }
    }

    #[test]
    fn test_parse_raw_mode_with_global_verbose() {
        let cli =
            Cli::try_parse_from(["oxihuff", "compress", "AAA", "-m", "raw", "-o", "-", "-v"])
                .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Compress { mode, output, .. } => {
                assert_eq!(mode, InputMode::Raw);
                assert_eq!(output, Some(PathBuf::from("-")));
            }
            _ => panic!("expected compress"),
        }
    }

    #[test]
    fn test_parse_info_json() {
        let cli = Cli::try_parse_from(["oxihuff", "i", "a.hac", "--json"]).unwrap();
        assert!(matches!(cli.command, Commands::Info { json: true, .. }));
    }
}
