//! I/O helpers for delimited sources: delimiter and encoding resolution,
//! reader construction and record decoding.
//!
//! - **Delimiter resolution**: `.tsv` → tab, everything else → comma, unless
//!   overridden on the command line.
//! - **Encoding**: input decoding via `encoding_rs`, defaulting to UTF-8.
//! - **stdin**: the `-` path convention routes through standard input.

use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use anyhow::{Result, anyhow};
use encoding_rs::{Encoding, UTF_8};

use crate::error::CompareError;

pub const DEFAULT_CSV_DELIMITER: u8 = b',';
pub const DEFAULT_TSV_DELIMITER: u8 = b'\t';

const DELIMITED_EXTENSIONS: &[&str] = &["csv", "tsv", "txt"];

pub fn is_dash(path: &Path) -> bool {
    path == Path::new("-")
}

/// True for `-` and for files the CSV adapter reads rather than calamine.
pub fn is_delimited(path: &Path) -> bool {
    if is_dash(path) {
        return true;
    }
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            DELIMITED_EXTENSIONS
                .iter()
                .any(|candidate| ext.eq_ignore_ascii_case(candidate))
        })
}

pub fn resolve_encoding(label: Option<&str>) -> Result<&'static Encoding> {
    if let Some(value) = label {
        Encoding::for_label(value.trim().as_bytes())
            .ok_or_else(|| anyhow!("Unknown encoding '{value}'"))
    } else {
        Ok(UTF_8)
    }
}

pub fn resolve_input_delimiter(path: &Path, provided: Option<u8>) -> u8 {
    provided.unwrap_or_else(|| match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("tsv") => DEFAULT_TSV_DELIMITER,
        _ => DEFAULT_CSV_DELIMITER,
    })
}

pub fn open_csv_reader<R>(reader: R, delimiter: u8) -> csv::Reader<R>
where
    R: Read,
{
    let mut builder = csv::ReaderBuilder::new();
    builder
        .has_headers(false)
        .delimiter(delimiter)
        .double_quote(true)
        .flexible(true);
    builder.from_reader(reader)
}

pub fn open_csv_reader_from_path(
    path: &Path,
    delimiter: u8,
) -> Result<csv::Reader<Box<dyn Read>>, CompareError> {
    let reader: Box<dyn Read> = if is_dash(path) {
        Box::new(std::io::stdin().lock())
    } else {
        let file =
            File::open(path).map_err(|err| CompareError::source_unavailable(path, "open", err))?;
        Box::new(BufReader::new(file))
    };
    Ok(open_csv_reader(reader, delimiter))
}

pub fn decode_bytes(bytes: &[u8], encoding: &'static Encoding) -> Option<String> {
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        None
    } else {
        Some(text.into_owned())
    }
}

/// Reads every record of a delimited source as decoded text, one `Vec` per
/// line. Records may be ragged.
pub fn read_delimited_records(
    path: &Path,
    delimiter: u8,
    encoding: &'static Encoding,
) -> Result<Vec<Vec<String>>, CompareError> {
    let mut reader = open_csv_reader_from_path(path, delimiter)?;
    let mut records = Vec::new();
    for (row_idx, record) in reader.byte_records().enumerate() {
        let record = record.map_err(|err| CompareError::source_unavailable(path, "read", err))?;
        let decoded = record
            .iter()
            .map(|field| {
                decode_bytes(field, encoding).ok_or_else(|| {
                    CompareError::source_unavailable(
                        path,
                        "decode",
                        format!(
                            "row {} is not valid {} text",
                            row_idx + 1,
                            encoding.name()
                        ),
                    )
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        records.push(decoded);
    }
    Ok(records)
}
