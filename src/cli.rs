use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Compare two spreadsheets through a column-name mapping",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Compare mapped columns cell by cell and write a highlighted mismatch report
    Compare(CompareArgs),
    /// Show how the mapping resolves against both header rows without comparing cells
    Columns(ColumnsArgs),
}

/// The three input tables shared by every command.
#[derive(Debug, Args)]
pub struct SourceArgs {
    /// Source table (xlsx, xls, xlsb, ods, csv, tsv; '-' reads CSV from stdin)
    #[arg(short = 's', long = "source")]
    pub source: PathBuf,
    /// Target table compared against the source
    #[arg(short = 't', long = "target")]
    pub target: PathBuf,
    /// Two-column table mapping source column names to target column names
    #[arg(short = 'm', long = "mapping")]
    pub mapping: PathBuf,
    /// Delimiter for CSV inputs (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of CSV inputs (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
}

#[derive(Debug, Args)]
pub struct CompareArgs {
    #[command(flatten)]
    pub sources: SourceArgs,
    /// Destination .xlsx report, written only when differences are found
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,
    /// Write a JSON summary of the run to this path
    #[arg(long = "summary")]
    pub summary: Option<PathBuf>,
    /// Print the mismatch list as a table on stdout
    #[arg(long = "table")]
    pub table: bool,
}

#[derive(Debug, Args)]
pub struct ColumnsArgs {
    #[command(flatten)]
    pub sources: SourceArgs,
}

pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\t" => Ok(b'\t'),
        "comma" | "," => Ok(b','),
        "|" | "pipe" => Ok(b'|'),
        ";" | "semicolon" => Ok(b';'),
        other => {
            let mut chars = other.chars();
            let first = chars
                .next()
                .ok_or_else(|| "Delimiter cannot be empty".to_string())?;
            if chars.next().is_some() {
                return Err("Delimiter must be a single character".to_string());
            }
            if !first.is_ascii() {
                return Err("Delimiter must be ASCII".to_string());
            }
            Ok(first as u8)
        }
    }
}
