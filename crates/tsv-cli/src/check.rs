//! # Check Subcommand
//!
//! Validates JSON/YAML documents against one named type of a type table and
//! reports every violation, per document.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use tsv_core::{TsvError, TypeTable};
use tsv_validate::{ValidationOptions, Validator, Violations};

use crate::document::load_document;

/// Arguments for the `tsv check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Type table (JSON) produced by `tsv build`.
    #[arg(long, value_name = "TABLE")]
    pub types: PathBuf,

    /// Name of the type every document must conform to.
    #[arg(long = "type", value_name = "NAME")]
    pub type_name: String,

    /// Whether `null` and `undefined` are rejected where the type does not
    /// declare them (`true` or `false`).
    #[arg(long, value_name = "BOOL", action = clap::ArgAction::Set, required = true)]
    pub strict_null_checks: bool,

    /// Print a JSON report instead of text.
    #[arg(long)]
    pub json: bool,

    /// Documents to check (`.json`, `.yaml` or `.yml`).
    #[arg(value_name = "DOC", required = true)]
    pub documents: Vec<PathBuf>,
}

/// Result of checking one document.
#[derive(Debug, Serialize)]
pub struct DocumentReport {
    pub document: String,
    pub valid: bool,
    pub errors: Violations,
}

/// Execute the check subcommand.
///
/// Returns exit code 0 when every document conforms, 1 when any has
/// violations.
pub fn run_check(args: &CheckArgs) -> Result<u8> {
    let table = load_table(&args.types)?;
    let options = ValidationOptions::new(args.strict_null_checks);

    let reports = check_documents(&table, &args.type_name, options, &args.documents)?;
    let failed = reports.iter().filter(|r| !r.valid).count();

    if args.json {
        let json =
            serde_json::to_string_pretty(&reports).context("failed to serialize report")?;
        println!("{json}");
    } else {
        for report in &reports {
            if report.valid {
                println!("PASS: {}", report.document);
            } else {
                println!(
                    "FAIL: {} ({} violation(s))",
                    report.document,
                    report.errors.len()
                );
                println!("{}", report.errors);
            }
        }
        println!(
            "\n{}/{} document(s) conform to '{}'.",
            reports.len() - failed,
            reports.len(),
            args.type_name
        );
    }

    if failed > 0 {
        Ok(crate::EXIT_VIOLATIONS)
    } else {
        Ok(crate::EXIT_OK)
    }
}

/// Load and check a serialized type table.
pub fn load_table(path: &Path) -> Result<TypeTable> {
    let table = TypeTable::from_path(path)
        .with_context(|| format!("failed to load type table from {}", path.display()))?;
    tracing::info!(types = table.len(), table = %path.display(), "loaded type table");
    Ok(table)
}

/// Check every document against `type_name`.
///
/// An unknown type name or an unreadable document is an error; violations
/// are not.
pub fn check_documents(
    table: &TypeTable,
    type_name: &str,
    options: ValidationOptions,
    documents: &[PathBuf],
) -> Result<Vec<DocumentReport>> {
    let validator = Validator::new(table, options);
    let mut reports = Vec::with_capacity(documents.len());

    for path in documents {
        let value = load_document(path)?;
        let errors = validator
            .validate_named(&value, type_name)
            .map_err(TsvError::from)
            .with_context(|| format!("cannot check {}", path.display()))?;
        tracing::debug!(
            document = %path.display(),
            violations = errors.len(),
            "checked document"
        );
        reports.push(DocumentReport {
            document: path.display().to_string(),
            valid: errors.is_empty(),
            errors,
        });
    }
    Ok(reports)
}
