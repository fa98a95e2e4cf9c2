//! Reading named matrices from a block tree.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use fiff_tag::constants::{
    FIFFB_MNE_NAMED_MATRIX, FIFF_MNE_COL_NAMES, FIFF_MNE_NCOL, FIFF_MNE_NROW, FIFF_MNE_ROW_NAMES,
};
use fiff_tag::{Node, TagRead, NAME_SEPARATOR};

use crate::error::{Axis, MatrixError, Result};
use crate::matrix::{transpose_named_matrix, NamedMatrix};

/// Options for [`read_named_matrix`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadOptions {
    /// Transpose the matrix before returning it.
    pub transpose: bool,
    /// Prefix for the "not available" log line.
    pub indent: String,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            transpose: false,
            indent: "    ".to_string(),
        }
    }
}

/// Pick the block holding the matrix: `node` itself if it is a named-matrix
/// block, otherwise the first direct child that is one and carries `matkind`.
fn locate<'a>(node: &'a Node, matkind: i32) -> Option<&'a Node> {
    if node.block == FIFFB_MNE_NAMED_MATRIX {
        return node.has_tag(matkind).then_some(node);
    }
    node.children
        .iter()
        .find(|child| child.block == FIFFB_MNE_NAMED_MATRIX && child.has_tag(matkind))
}

fn check_count<R: TagRead>(
    reader: &mut R,
    node: &Node,
    tag: i32,
    dimension: Axis,
    actual: usize,
) -> Result<()> {
    if let Some(t) = reader.find_tag(node, tag)? {
        let declared = t.as_int()?;
        if usize::try_from(declared).ok() != Some(actual) {
            return Err(MatrixError::DimensionMismatch {
                dimension,
                tag: declared,
                actual,
            });
        }
    }
    Ok(())
}

fn read_names<R: TagRead>(reader: &mut R, node: &Node, tag: i32) -> Result<Vec<String>> {
    match reader.find_tag(node, tag)? {
        Some(t) => Ok(t
            .as_str()?
            .split(NAME_SEPARATOR)
            .map(str::to_string)
            .collect()),
        None => Ok(Vec::new()),
    }
}

/// Read the named matrix of kind `matkind` at or directly below `node`.
///
/// Only `node` and its direct children are searched; the first matching
/// child wins. Returns `Ok(None)` if no matching block exists.
///
/// The payload shape determines `nrow`/`ncol`. Explicit count tags must
/// agree with it. Label counts are taken as stored and not compared with
/// the dimensions.
pub fn read_named_matrix<R: TagRead>(
    reader: &mut R,
    node: &Node,
    matkind: i32,
    opts: &ReadOptions,
) -> Result<Option<NamedMatrix>> {
    let Some(node) = locate(node, matkind) else {
        info!(
            "{}Desired named matrix (kind = {matkind}) not available",
            opts.indent
        );
        return Ok(None);
    };

    let data = reader
        .find_tag(node, matkind)?
        .ok_or(MatrixError::DataMissing { kind: matkind })?
        .into_float_matrix()?;
    let (nrow, ncol) = data.dim();

    check_count(reader, node, FIFF_MNE_NROW, Axis::Rows, nrow)?;
    check_count(reader, node, FIFF_MNE_NCOL, Axis::Columns, ncol)?;

    let row_names = read_names(reader, node, FIFF_MNE_ROW_NAMES)?;
    let col_names = read_names(reader, node, FIFF_MNE_COL_NAMES)?;
    debug!(
        "read named matrix (kind = {matkind}): {nrow}x{ncol}, {} row names, {} column names",
        row_names.len(),
        col_names.len()
    );

    let mut mat = NamedMatrix {
        nrow,
        ncol,
        row_names,
        col_names,
        data,
    };
    if opts.transpose {
        transpose_named_matrix(&mut mat);
    }
    Ok(Some(mat))
}

/// [`read_named_matrix`] with default options and an explicit transpose flag.
pub fn read_named_matrix_with<R: TagRead>(
    reader: &mut R,
    node: &Node,
    matkind: i32,
    transpose: bool,
) -> Result<Option<NamedMatrix>> {
    let opts = ReadOptions {
        transpose,
        ..ReadOptions::default()
    };
    read_named_matrix(reader, node, matkind, &opts)
}
