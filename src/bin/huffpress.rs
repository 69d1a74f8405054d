use std::io::ErrorKind;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use itertools::Itertools;
use log::error;

use huffpress::container::{compress_file, decompress_file};
use huffpress::{Codebook, HuffError};

#[derive(Parser, Debug)]
#[command(about = "Huffman compression for UTF-8 text files", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compress a text file into a container.
    Compress {
        /// The text file to compress.
        input: PathBuf,
        /// Where to write the container.
        output: PathBuf,
    },
    /// Decompress a container back into text.
    Decompress {
        /// The container to decompress.
        input: PathBuf,
        /// Where to write the decoded text.
        output: PathBuf,
    },
    /// Print the code table a text file would be compressed with.
    Codes {
        /// The text file to analyze.
        input: PathBuf,
    },
}

// Exit codes distinguishing the failure classes; clap exits with 2 on usage
// errors by itself.
const EXIT_FAILURE: u8 = 1;
const EXIT_MISSING_INPUT: u8 = 3;
const EXIT_CORRUPT_CONTAINER: u8 = 4;

fn main() -> ExitCode {
    stderrlog::new()
        .verbosity(2)
        .timestamp(stderrlog::Timestamp::Second)
        .init()
        .unwrap();

    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            let code = match err.downcast_ref::<HuffError>() {
                Some(HuffError::Io(io)) if io.kind() == ErrorKind::NotFound => EXIT_MISSING_INPUT,
                Some(HuffError::CorruptContainer(_)) => EXIT_CORRUPT_CONTAINER,
                _ => EXIT_FAILURE,
            };
            ExitCode::from(code)
        }
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    match args.command {
        Command::Compress { input, output } => {
            let stats = compress_file(&input, &output)
                .with_context(|| format!("could not compress {}", input.display()))?;
            println!("original:   {} B", stats.original_bytes);
            println!("compressed: {} B", stats.compressed_bytes);
            println!("reduction:  {:.1}%", stats.reduction_percent());
        }
        Command::Decompress { input, output } => {
            decompress_file(&input, &output)
                .with_context(|| format!("could not decompress {}", input.display()))?;
            println!("decompressed into {}", output.display());
        }
        Command::Codes { input } => {
            let text = std::fs::read_to_string(&input)
                .map_err(HuffError::Io)
                .with_context(|| format!("could not read {}", input.display()))?;
            print_codes(&text);
        }
    }
    Ok(())
}

/// Lists every symbol with its count and code, most frequent first.
fn print_codes(text: &str) {
    let Some(book) = Codebook::from_text(text) else {
        println!("empty input, nothing to code");
        return;
    };

    println!("{:<10} | {:>10} | code", "symbol", "count");
    let by_count_desc = book
        .freqs
        .iter()
        .sorted_by(|(sym_a, count_a), (sym_b, count_b)| {
            count_b.cmp(count_a).then(sym_a.cmp(sym_b))
        });

    for (symbol, count) in by_count_desc {
        if let Some(code) = book.codes.get(symbol) {
            println!(
                "{:<10} | {:>10} | {}",
                symbol.escape_debug().to_string(),
                count,
                code.bit_string()
            );
        }
    }
}
