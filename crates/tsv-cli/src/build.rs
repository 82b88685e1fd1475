//! # Build Subcommand
//!
//! Compiles a JSON syntax-tree dump into a type table and writes the table
//! as JSON, to a file or stdout.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use tsv_core::{TsvError, TypeTable};
use tsv_model::Node;

/// Arguments for the `tsv build` subcommand.
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Syntax tree dump (JSON) of one source unit.
    #[arg(value_name = "TREE")]
    pub tree: PathBuf,

    /// Write the type table here instead of stdout.
    #[arg(long, value_name = "FILE")]
    pub out: Option<PathBuf>,
}

/// Execute the build subcommand.
///
/// Returns exit code 0 on success; any failure is an error.
pub fn run_build(args: &BuildArgs) -> Result<u8> {
    let table = build_table(&args.tree)?;
    let json = table
        .to_json_pretty()
        .context("failed to serialize type table")?;

    match &args.out {
        Some(out) => {
            std::fs::write(out, format!("{json}\n"))
                .with_context(|| format!("failed to write {}", out.display()))?;
            tracing::info!(types = table.len(), out = %out.display(), "wrote type table");
        }
        None => println!("{json}"),
    }
    Ok(crate::EXIT_OK)
}

/// Load a syntax tree dump and build its type table.
pub fn build_table(tree: &Path) -> Result<TypeTable> {
    let content = std::fs::read_to_string(tree)
        .with_context(|| format!("failed to read {}", tree.display()))?;
    let table = compile(&content)
        .with_context(|| format!("failed to build type table from {}", tree.display()))?;
    tracing::info!(types = table.len(), tree = %tree.display(), "built type table");
    Ok(table)
}

/// Parse a JSON syntax tree dump and build its type table.
pub fn compile(dump: &str) -> Result<TypeTable, TsvError> {
    let root = Node::from_json(dump)?;
    Ok(tsv_model::build(&&root)?)
}
