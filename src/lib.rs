pub mod cell;
pub mod cli;
pub mod columns;
pub mod compare;
pub mod diagnostics;
pub mod diff;
pub mod error;
pub mod header;
pub mod io_utils;
pub mod mapping;
pub mod matcher;
pub mod report;
pub mod sheet;
pub mod table;
pub mod workbook;

use std::{env, sync::OnceLock};

use anyhow::Result;
use clap::Parser;
use log::{LevelFilter, debug};

use crate::cli::{Cli, Commands};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("sheet_compare", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

/// Parses the command line, runs the selected command and returns the
/// process exit status.
pub fn run() -> Result<i32> {
    init_logging();
    let cli = Cli::parse();
    debug!("Parsed command line: {:?}", cli.command);
    match cli.command {
        Commands::Compare(args) => compare::execute(&args).map(compare::Verdict::exit_code),
        Commands::Columns(args) => columns::execute(&args).map(|()| 0),
    }
}
