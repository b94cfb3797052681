//! The `compare` command: load the three tables, match columns, diff the
//! sheets, then report.
//!
//! Every input is read and validated before any output is produced, so a
//! malformed or unreadable input never leaves a partial report behind.

use std::{fs::File, io::BufWriter, path::Path};

use anyhow::{Context, Result, bail};
use log::{info, warn};
use serde::Serialize;

use crate::{
    cli::{CompareArgs, SourceArgs},
    diagnostics::Diagnostic,
    diff::{self, Comparison, MismatchRecord},
    header::HeaderIndex,
    io_utils,
    mapping::ColumnMapping,
    matcher::{self, ColumnMatch},
    report::{self, REPORT_HEADERS, XlsxReport},
    sheet::{self, Sheet, SourceOptions, TableRole},
    table::TextTable,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Identical,
    Different,
}

impl Verdict {
    /// Process exit status, following diff(1): 0 identical, 1 different.
    pub fn exit_code(self) -> i32 {
        match self {
            Verdict::Identical => 0,
            Verdict::Different => 1,
        }
    }
}

/// Both data sheets with their header indices and the resolved matches.
#[derive(Debug)]
pub struct LoadedTables {
    pub source: Sheet,
    pub target: Sheet,
    pub source_header: HeaderIndex,
    pub target_header: HeaderIndex,
    pub mapping: ColumnMapping,
    pub matches: Vec<ColumnMatch>,
}

impl LoadedTables {
    pub fn compare(&self) -> Comparison {
        diff::compare(
            &self.source,
            &self.target,
            &self.source_header,
            &self.target_header,
            &self.matches,
        )
    }
}

pub fn load_tables(args: &SourceArgs) -> Result<LoadedTables> {
    let stdin_inputs = [&args.source, &args.target, &args.mapping]
        .into_iter()
        .filter(|path| io_utils::is_dash(path))
        .count();
    if stdin_inputs > 1 {
        bail!("Only one of --source, --target and --mapping may read from stdin ('-')");
    }
    let options = SourceOptions {
        delimiter: args.delimiter,
        encoding: io_utils::resolve_encoding(args.input_encoding.as_deref())?,
    };

    let source = sheet::open(&args.source, TableRole::Data, &options)
        .with_context(|| format!("Loading source table {:?}", args.source))?;
    let target = sheet::open(&args.target, TableRole::Data, &options)
        .with_context(|| format!("Loading target table {:?}", args.target))?;
    let mapping_sheet = sheet::open(&args.mapping, TableRole::Mapping, &options)
        .with_context(|| format!("Loading mapping table {:?}", args.mapping))?;

    let source_header = HeaderIndex::from_sheet(&source)
        .with_context(|| format!("Reading header row of {:?}", args.source))?;
    let target_header = HeaderIndex::from_sheet(&target)
        .with_context(|| format!("Reading header row of {:?}", args.target))?;
    let mapping = ColumnMapping::from_sheet(&mapping_sheet)
        .with_context(|| format!("Reading column mapping from {:?}", args.mapping))?;
    info!(
        "Loaded {} source column(s), {} target column(s) and {} mapping pair(s)",
        source_header.len(),
        target_header.len(),
        mapping.len()
    );

    let matches = matcher::match_columns(&source_header, &target_header, &mapping);
    Ok(LoadedTables {
        source,
        target,
        source_header,
        target_header,
        mapping,
        matches,
    })
}

pub fn execute(args: &CompareArgs) -> Result<Verdict> {
    let tables = load_tables(&args.sources)?;
    let comparison = tables.compare();
    log_diagnostics(&comparison.diagnostics);

    if args.table && !comparison.mismatches.is_empty() {
        let mut table = TextTable::new(REPORT_HEADERS);
        table.extend_rows(report::mismatch_rows(&comparison.mismatches));
        table.print();
    }

    let verdict = if comparison.identical {
        println!("Sheets are identical.");
        Verdict::Identical
    } else {
        println!(
            "Sheets have different values: {} mismatched cell(s), {} unresolved mapping(s).",
            comparison.mismatches.len(),
            comparison.unresolved_count()
        );
        let sink = XlsxReport::create(&args.output)?;
        report::write_report(sink, &comparison.mismatches)
            .with_context(|| format!("Writing mismatch report to {:?}", args.output))?;
        println!("Mismatches written to {}", args.output.display());
        Verdict::Different
    };

    if let Some(path) = &args.summary {
        let report_path = (verdict == Verdict::Different).then_some(args.output.as_path());
        write_summary(path, &tables.matches, &comparison, report_path)?;
        info!("Summary written to {:?}", path);
    }
    Ok(verdict)
}

pub fn log_diagnostics(diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        match diagnostic {
            Diagnostic::UnresolvedMapping { .. } => warn!("{diagnostic}"),
            Diagnostic::CellMismatch { .. } => info!("{diagnostic}"),
        }
    }
}

#[derive(Debug, Serialize)]
struct RunSummary<'a> {
    identical: bool,
    report: Option<&'a Path>,
    matches: &'a [ColumnMatch],
    mismatches: &'a [MismatchRecord],
    diagnostics: &'a [Diagnostic],
}

fn write_summary(
    path: &Path,
    matches: &[ColumnMatch],
    comparison: &Comparison,
    report: Option<&Path>,
) -> Result<()> {
    let summary = RunSummary {
        identical: comparison.identical,
        report,
        matches,
        mismatches: &comparison.mismatches,
        diagnostics: &comparison.diagnostics,
    };
    let file = File::create(path).with_context(|| format!("Creating summary file {path:?}"))?;
    serde_json::to_writer_pretty(BufWriter::new(file), &summary).context("Writing summary JSON")
}
