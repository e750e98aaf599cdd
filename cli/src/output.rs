//! Output formatting for CLI

use std::fs;
use std::path::Path;

use clap::ValueEnum;
use forge_document::DocumentFormat;
use serde::Serialize;

use crate::error::{CliError, CliResult};

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

/// Serialize `value` as JSON or YAML. Table output is rendered by each
/// command and prints as pretty JSON here.
pub fn to_string<T: Serialize>(format: OutputFormat, value: &T) -> CliResult<String> {
    match format {
        OutputFormat::Table | OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
    }
}

pub fn print<T: Serialize>(format: OutputFormat, value: &T) -> CliResult<()> {
    let text = to_string(format, value)?;
    println!("{}", text.trim_end());
    Ok(())
}

/// Write a document to `path`: YAML for `.yml`/`.yaml`, JSON otherwise.
pub fn write_document<T: Serialize>(path: &Path, value: &T) -> CliResult<()> {
    let mut text = match document_format(path) {
        DocumentFormat::Yaml => serde_yaml::to_string(value)?,
        DocumentFormat::Json => serde_json::to_string_pretty(value)?,
    };
    if !text.ends_with('\n') {
        text.push('\n');
    }
    fs::write(path, text).map_err(|e| CliError::write(path, e))
}

/// Format of a document written by `write_document`.
pub fn document_format(path: &Path) -> DocumentFormat {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("yml" | "yaml") => DocumentFormat::Yaml,
        _ => DocumentFormat::Json,
    }
}

/// Render rows as a ` | ` separated table with a header rule.
pub fn table(columns: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = columns.iter().map(|c| c.len()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: Vec<&str>| -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect();
        padded.join(" | ").trim_end().to_string()
    };

    let mut output = line(columns.to_vec());
    output.push('\n');
    output.push_str(&"-".repeat(widths.iter().sum::<usize>() + 3 * widths.len().saturating_sub(1)));
    for row in rows {
        output.push('\n');
        output.push_str(&line(row.iter().map(String::as_str).collect()));
    }
    output
}
