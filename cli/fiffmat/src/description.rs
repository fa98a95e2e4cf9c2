//! Matrix description documents (`.toml` / `.json`).
//!
//! A description lists the matrix rows and optional labels:
//!
//! ```toml
//! kind = 3562
//! row_names = ["MEG 0111", "MEG 0112"]
//! col_names = ["x", "y", "z"]
//! data = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]
//! ```
//!
//! `nrow` / `ncol` may be given to override the dimensions taken from
//! `data`; the writer then checks them against the element count.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use fiff_matrix::NamedMatrix;
use fiff_tag::constants::FIFF_MNE_FORWARD_SOLUTION;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatrixDescription {
    /// Tag kind the payload is stored under.
    #[serde(default = "default_kind")]
    pub kind: i32,
    #[serde(default)]
    pub nrow: Option<usize>,
    #[serde(default)]
    pub ncol: Option<usize>,
    #[serde(default)]
    pub row_names: Vec<String>,
    #[serde(default)]
    pub col_names: Vec<String>,
    /// Matrix rows; all rows must have the same length.
    #[serde(default)]
    pub data: Vec<Vec<f32>>,
}

fn default_kind() -> i32 {
    FIFF_MNE_FORWARD_SOLUTION
}

impl MatrixDescription {
    /// Parse from TOML, or JSON when `path` ends in `.json`.
    pub fn load(path: &Path) -> Result<Self> {
        let text =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let is_json = path.extension().is_some_and(|ext| ext == "json");
        let desc: MatrixDescription = if is_json {
            serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?
        } else {
            toml::from_str(&text).with_context(|| format!("parsing {}", path.display()))?
        };
        Ok(desc)
    }

    pub fn to_named_matrix(&self) -> Result<NamedMatrix> {
        let rows = self.data.len();
        let cols = self.data.first().map_or(0, Vec::len);
        if let Some((i, row)) = self.data.iter().enumerate().find(|(_, r)| r.len() != cols) {
            bail!("row {i} has {} values, expected {cols}", row.len());
        }

        let flat: Vec<f32> = self.data.iter().flatten().copied().collect();
        let data = Array2::from_shape_vec((rows, cols), flat)?;

        let mut mat = NamedMatrix::new(data)
            .with_row_names(self.row_names.iter().cloned())
            .with_col_names(self.col_names.iter().cloned());
        if let Some(nrow) = self.nrow {
            mat.nrow = nrow;
        }
        if let Some(ncol) = self.ncol {
            mat.ncol = ncol;
        }
        Ok(mat)
    }
}
