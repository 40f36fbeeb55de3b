//! Command-line interface
//!
//! Offline inspection over a catalog snapshot file:
//! - `parts` dumps the system surface for a table (or the whole catalog)
//!   at a snapshot timestamp
//! - `gc` prints the deletion candidates one classification pass would
//!   hand to the deletion executor
//!
//! All logic lives in the library; this module only parses arguments,
//! loads the snapshot, and prints.

use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::catalog::{CatalogError, CatalogQueryAdapter, MemoryCatalog, SystemPartsRow};
use crate::config::SystemPartsConfig;
use crate::gc::FixedWatermark;
use crate::parts::TxnTimestamp;
use crate::pruner::WhereExpr;

/// CLI errors: argument, file, or catalog problems.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("cannot read catalog snapshot: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed catalog snapshot: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

#[derive(Parser)]
#[command(
    name = "stratodb",
    about = "Part-visibility inspection over a catalog snapshot"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Dump the parts surface at a snapshot timestamp.
    Parts {
        /// Catalog snapshot JSON file.
        #[arg(long)]
        catalog: PathBuf,
        /// Snapshot timestamp (raw oracle value).
        #[arg(long)]
        at: u64,
        /// Pin a database.
        #[arg(long)]
        database: Option<String>,
        /// Pin a table (requires --database).
        #[arg(long)]
        table: Option<String>,
        /// Pin a partition.
        #[arg(long)]
        partition: Option<String>,
        /// Allow scanning every table when none is pinned.
        #[arg(long)]
        multiple_tables: bool,
        /// Emit JSON rows instead of text lines.
        #[arg(long)]
        json: bool,
    },
    /// Print GC deletion candidates for one table.
    Gc {
        /// Catalog snapshot JSON file.
        #[arg(long)]
        catalog: PathBuf,
        /// Snapshot timestamp (raw oracle value).
        #[arg(long)]
        at: u64,
        /// Database of the table.
        #[arg(long)]
        database: String,
        /// Table name.
        #[arg(long)]
        table: String,
        /// Minimum active snapshot to classify against.
        #[arg(long)]
        min_active: u64,
    },
}

/// Parses arguments, runs the requested command, prints the result.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::parse();
    match cli.command {
        Command::Parts {
            catalog,
            at,
            database,
            table,
            partition,
            multiple_tables,
            json,
        } => {
            let catalog = load_catalog(&catalog)?;
            let config = if multiple_tables {
                SystemPartsConfig::with_multiple_tables()
            } else {
                SystemPartsConfig::default()
            };
            let adapter = CatalogQueryAdapter::new(&catalog, config);
            let expr = where_from_args(database, table, partition);
            let rows = adapter.query(&expr, TxnTimestamp::new(at))?;
            print_rows(&rows, json)?;
            Ok(())
        }
        Command::Gc {
            catalog,
            at,
            database,
            table,
            min_active,
        } => {
            let catalog = load_catalog(&catalog)?;
            let adapter = CatalogQueryAdapter::new(&catalog, SystemPartsConfig::default());
            let watermark = FixedWatermark::new(TxnTimestamp::new(min_active));
            let names =
                adapter.gc_candidates(&database, &table, TxnTimestamp::new(at), &watermark)?;
            for name in names {
                println!("{name}");
            }
            Ok(())
        }
    }
}

fn load_catalog(path: &PathBuf) -> Result<MemoryCatalog, CliError> {
    let json = fs::read_to_string(path)?;
    Ok(MemoryCatalog::from_json(&json)?)
}

/// Builds the WHERE expression the flags imply.
fn where_from_args(
    database: Option<String>,
    table: Option<String>,
    partition: Option<String>,
) -> WhereExpr {
    let mut conjuncts = Vec::new();
    if let Some(database) = database {
        conjuncts.push(WhereExpr::eq("database", database));
    }
    if let Some(table) = table {
        conjuncts.push(WhereExpr::eq("table", table));
    }
    if let Some(partition) = partition {
        conjuncts.push(WhereExpr::eq("partition_id", partition));
    }
    if conjuncts.is_empty() {
        // No flags: no narrowing at all.
        WhereExpr::Unsupported
    } else {
        WhereExpr::And(conjuncts)
    }
}

fn print_rows(rows: &[SystemPartsRow], json: bool) -> Result<(), CliError> {
    if json {
        println!("{}", serde_json::to_string_pretty(rows)?);
        return Ok(());
    }
    for row in rows {
        let commit = row
            .commit_datetime()
            .map_or_else(|| row.commit_time.to_string(), |dt| dt.to_rfc3339());
        println!(
            "{}.{}\t{}\t{}\tvisible={}\toutdated={}\trows={}\tbytes={}\tcommitted={}",
            row.database,
            row.table,
            row.name,
            row.part_type,
            row.visible,
            row.outdated,
            row.rows(),
            row.bytes(),
            commit,
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_where_from_args_pins_named_columns() {
        let expr = where_from_args(Some("db".into()), Some("t".into()), None);
        assert_eq!(
            expr,
            WhereExpr::And(vec![
                WhereExpr::eq("database", "db"),
                WhereExpr::eq("table", "t"),
            ])
        );
    }

    #[test]
    fn test_where_from_args_without_flags_means_no_narrowing() {
        assert_eq!(where_from_args(None, None, None), WhereExpr::Unsupported);
    }
}
