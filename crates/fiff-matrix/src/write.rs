//! Writing named matrices as tagged blocks.

use log::debug;

use fiff_tag::constants::{
    FIFFB_MNE_NAMED_MATRIX, FIFF_MNE_COL_NAMES, FIFF_MNE_NCOL, FIFF_MNE_NROW, FIFF_MNE_ROW_NAMES,
};
use fiff_tag::TagWrite;

use crate::error::{Axis, MatrixError, Result};
use crate::matrix::NamedMatrix;

/// How far off the declared element count is, always expressed as a
/// factor >= 1 when the two counts are both positive.
fn off_by_factor(expected: usize, actual: usize) -> f64 {
    let ratio = expected as f64 / actual as f64;
    if expected < actual && ratio > 0.0 {
        1.0 / ratio
    } else {
        ratio
    }
}

fn dimension_tag(value: usize) -> Result<i32> {
    i32::try_from(value).map_err(|_| MatrixError::DimensionOverflow { value })
}

fn write_names<W: TagWrite>(
    writer: &mut W,
    tag: i32,
    field: Axis,
    names: &[String],
    expected: usize,
) -> Result<()> {
    if names.is_empty() {
        return Ok(());
    }
    if names.len() != expected {
        return Err(MatrixError::LabelCountMismatch {
            field,
            names: names.len(),
            expected,
        });
    }
    writer.write_name_list(tag, names)?;
    Ok(())
}

/// Write `mat` as a `FIFFB_MNE_NAMED_MATRIX` block with the payload stored
/// under `kind`.
///
/// The element count is checked before anything is written. Label lists are
/// checked just before they are written; a column-label failure therefore
/// leaves the block open with its count and row-name tags already emitted.
pub fn write_named_matrix<W: TagWrite>(writer: &mut W, kind: i32, mat: &NamedMatrix) -> Result<()> {
    let expected = mat.nrow.saturating_mul(mat.ncol);
    let actual = mat.data.len();
    if expected != actual {
        return Err(MatrixError::ShapeMismatch {
            nrow: mat.nrow,
            ncol: mat.ncol,
            expected,
            actual,
            ratio: off_by_factor(expected, actual),
        });
    }
    let nrow = dimension_tag(mat.nrow)?;
    let ncol = dimension_tag(mat.ncol)?;

    debug!("writing named matrix (kind = {kind}): {nrow}x{ncol}");
    writer.start_block(FIFFB_MNE_NAMED_MATRIX)?;
    writer.write_int(FIFF_MNE_NROW, nrow)?;
    writer.write_int(FIFF_MNE_NCOL, ncol)?;

    write_names(writer, FIFF_MNE_ROW_NAMES, Axis::Rows, &mat.row_names, mat.nrow)?;
    write_names(writer, FIFF_MNE_COL_NAMES, Axis::Columns, &mat.col_names, mat.ncol)?;

    writer.write_float_matrix(kind, mat.data.view())?;
    writer.end_block(FIFFB_MNE_NAMED_MATRIX)?;
    Ok(())
}
