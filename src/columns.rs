//! The `columns` command: show how each mapping entry resolves.

use anyhow::Result;
use log::info;

use crate::{
    cli::ColumnsArgs,
    compare,
    matcher::{self, ColumnMatch},
    table::TextTable,
};

pub fn execute(args: &ColumnsArgs) -> Result<()> {
    let tables = compare::load_tables(&args.sources)?;
    compare::log_diagnostics(&matcher::unresolved_diagnostics(&tables.matches));

    let mut table = TextTable::new(["tag", "source", "target", "status"]);
    table.extend_rows(match_rows(&tables.matches));
    table.print();

    let resolved = tables.matches.iter().filter(|m| m.is_resolved()).count();
    info!(
        "{} of {} mapping pair(s) resolved",
        resolved,
        tables.matches.len()
    );
    Ok(())
}

fn match_rows(matches: &[ColumnMatch]) -> Vec<Vec<String>> {
    matches
        .iter()
        .enumerate()
        .map(|(position, column_match)| {
            let (source, target, status) = match column_match {
                ColumnMatch::Resolved {
                    source_index,
                    target_index,
                    source_name,
                    target_name,
                } => (
                    format!("{source_name} (#{})", source_index + 1),
                    format!("{target_name} (#{})", target_index + 1),
                    "resolved".to_string(),
                ),
                ColumnMatch::Unresolved {
                    source_name,
                    target_name,
                    missing,
                } => (source_name.clone(), target_name.clone(), missing.to_string()),
            };
            vec![(position + 1).to_string(), source, target, status]
        })
        .collect()
}
