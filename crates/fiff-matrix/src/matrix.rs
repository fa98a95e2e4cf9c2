//! The named-matrix record and in-place transposition.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// A matrix with optional row and column labels.
///
/// `row_names` / `col_names` are empty when the axis is unlabelled. The
/// shape of `data` is expected to be `(nrow, ncol)`; the writer checks the
/// element count, nothing checks it at construction.
///
/// Serializes with `data` as a list of rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedMatrix {
    pub nrow: usize,
    pub ncol: usize,
    #[serde(default)]
    pub row_names: Vec<String>,
    #[serde(default)]
    pub col_names: Vec<String>,
    #[serde(with = "nested_rows")]
    pub data: Array2<f32>,
}

/// `Array2<f32>` as `[[f32]]`, one inner list per row.
mod nested_rows {
    use ndarray::Array2;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(data: &Array2<f32>, serializer: S) -> Result<S::Ok, S::Error> {
        let rows: Vec<Vec<f32>> = data.rows().into_iter().map(|r| r.to_vec()).collect();
        rows.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Array2<f32>, D::Error> {
        let rows = Vec::<Vec<f32>>::deserialize(deserializer)?;
        let ncol = rows.first().map_or(0, Vec::len);
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != ncol) {
            return Err(D::Error::custom(format!(
                "row {i} has {} values, expected {ncol}",
                row.len()
            )));
        }
        let nrow = rows.len();
        let flat: Vec<f32> = rows.into_iter().flatten().collect();
        Array2::from_shape_vec((nrow, ncol), flat).map_err(D::Error::custom)
    }
}

impl NamedMatrix {
    /// Unlabelled matrix taking its dimensions from `data`.
    pub fn new(data: Array2<f32>) -> Self {
        let (nrow, ncol) = data.dim();
        Self {
            nrow,
            ncol,
            row_names: Vec::new(),
            col_names: Vec::new(),
            data,
        }
    }

    pub fn with_row_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.row_names = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_col_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.col_names = names.into_iter().map(Into::into).collect();
        self
    }

    /// Transpose in place. See [`transpose_named_matrix`].
    pub fn transpose(&mut self) {
        transpose_named_matrix(self);
    }
}

/// Swap the dimensions, the label lists, and the axes of `data`.
///
/// The element buffer is not copied or reordered; only the strides of the
/// array change. No validation is performed.
pub fn transpose_named_matrix(mat: &mut NamedMatrix) {
    std::mem::swap(&mut mat.nrow, &mut mat.ncol);
    std::mem::swap(&mut mat.row_names, &mut mat.col_names);
    let data = std::mem::take(&mut mat.data);
    mat.data = data.reversed_axes();
}
