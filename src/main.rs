//! Command line front end for texthuff.
//!
//! ```bash
//! texthuff compress -i book.txt -o book.huff
//! texthuff decompress -i book.huff -o book.txt
//! texthuff inspect -i book.huff
//! ```

use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "texthuff")]
#[command(version)]
#[command(about = "Huffman compressor for UTF-8 text files", long_about = None)]
struct Args {
    #[command(subcommand)]
    mode: Mode,

    /// Log level (trace, debug, info, warn, error)
    #[arg(
        long,
        global = true,
        default_value = "warn",
        value_parser = ["trace", "debug", "info", "warn", "error"]
    )]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Mode {
    /// Compress a text file
    Compress {
        /// Path to text file to compress
        #[arg(short, long)]
        input_file: PathBuf,

        /// Path to output compressed file
        #[arg(short, long)]
        output_file: PathBuf,
    },

    /// Restore a compressed file to text
    Decompress {
        /// Path to compressed file
        #[arg(short, long)]
        input_file: PathBuf,

        /// Path to output text file
        #[arg(short, long)]
        output_file: PathBuf,
    },

    /// Print the frequency table and codes of a compressed file as JSON
    Inspect {
        /// Path to compressed file
        #[arg(short, long)]
        input_file: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match args.mode {
        Mode::Compress {
            input_file,
            output_file,
        } => {
            let text = fs::read_to_string(&input_file)?;
            let compressed = texthuff::compress(&text)?;
            fs::write(&output_file, &compressed)?;

            info!(
                input = %input_file.display(),
                output = %output_file.display(),
                "{} -> {} bytes ({:.1}%)",
                text.len(),
                compressed.len(),
                ratio(compressed.len(), text.len())
            );
        }
        Mode::Decompress {
            input_file,
            output_file,
        } => {
            let compressed = fs::read(&input_file)?;
            let text = texthuff::decompress(&compressed)?;
            fs::write(&output_file, &text)?;

            info!(
                input = %input_file.display(),
                output = %output_file.display(),
                "{} -> {} bytes",
                compressed.len(),
                text.len()
            );
        }
        Mode::Inspect { input_file } => {
            let compressed = fs::read(&input_file)?;
            let summary = texthuff::inspect(&compressed)?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    Ok(())
}

fn ratio(compressed: usize, original: usize) -> f64 {
    if original == 0 {
        return 0.0;
    }
    compressed as f64 * 100.0 / original as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_level_accepts_known_levels() {
        for level in ["trace", "debug", "info", "warn", "error"] {
            let args =
                Args::try_parse_from(["texthuff", "--log-level", level, "inspect", "-i", "x.huff"])
                    .unwrap();
            assert_eq!(args.log_level, level);
        }
    }

    #[test]
    fn log_level_rejects_unknown_levels() {
        assert!(
            Args::try_parse_from(["texthuff", "--log-level", "loud", "inspect", "-i", "x.huff"])
                .is_err()
        );
    }
}
