//! `fiffmat show` — summarize a matrix as it reads back from FIFF tags.

use std::io::Cursor;
use std::path::Path;

use anyhow::{Context, Result};
use fiff_matrix::{read_named_matrix, write_named_matrix, NamedMatrix, ReadOptions};
use fiff_tag::{FiffReader, FiffWriter};
use serde::Serialize;

use crate::description::MatrixDescription;

/// What `show` reports about a matrix.
#[derive(Debug, Serialize)]
pub struct MatrixSummary {
    pub kind: i32,
    pub nrow: usize,
    pub ncol: usize,
    pub row_names: Vec<String>,
    pub col_names: Vec<String>,
    pub min: Option<f32>,
    pub max: Option<f32>,
    /// Encoded size of the named-matrix block.
    pub encoded_bytes: usize,
}

/// Encode the description, read it back through the matrix reader, and
/// summarize the result.
pub fn summarize(desc: &MatrixDescription, opts: &ReadOptions) -> Result<MatrixSummary> {
    let mat = desc.to_named_matrix()?;

    let mut writer = FiffWriter::new(Vec::new());
    write_named_matrix(&mut writer, desc.kind, &mat)?;
    let (bytes, root) = writer.finish()?;
    let encoded_bytes = bytes.len();

    let mut reader = FiffReader::new(Cursor::new(bytes));
    let read: NamedMatrix = read_named_matrix(&mut reader, &root, desc.kind, opts)?
        .context("named matrix missing after encoding")?;

    let min = read.data.iter().copied().reduce(f32::min);
    let max = read.data.iter().copied().reduce(f32::max);
    Ok(MatrixSummary {
        kind: desc.kind,
        nrow: read.nrow,
        ncol: read.ncol,
        row_names: read.row_names,
        col_names: read.col_names,
        min,
        max,
        encoded_bytes,
    })
}

fn print_labels(title: &str, names: &[String]) {
    if names.is_empty() {
        println!("  {title}: (unlabelled)");
    } else {
        println!("  {title}: {}", names.join(", "));
    }
}

pub fn run(input: &Path, transpose: bool, json: bool) -> Result<()> {
    let desc = MatrixDescription::load(input)?;
    let opts = ReadOptions {
        transpose,
        ..ReadOptions::default()
    };
    let summary =
        summarize(&desc, &opts).with_context(|| format!("checking {}", input.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("--- Named Matrix ({}) ---", input.display());
    println!("  Kind:    {}", summary.kind);
    println!("  Shape:   {} x {}", summary.nrow, summary.ncol);
    print_labels("Rows", &summary.row_names);
    print_labels("Columns", &summary.col_names);
    if let (Some(min), Some(max)) = (summary.min, summary.max) {
        println!("  Range:   [{min}, {max}]");
    }
    println!("  Encoded: {} bytes", summary.encoded_bytes);
    Ok(())
}
