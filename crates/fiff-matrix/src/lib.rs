//! Named-matrix codec for FIFF files.
//!
//! A named matrix is an `f32` matrix stored under a `FIFFB_MNE_NAMED_MATRIX`
//! block together with optional row/column count tags and colon-separated
//! row/column label tags:
//!
//! ```text
//! FIFFB_MNE_NAMED_MATRIX
//! ├── FIFF_MNE_NROW        int
//! ├── FIFF_MNE_NCOL        int
//! ├── FIFF_MNE_ROW_NAMES   string "A:B:C"   (optional)
//! ├── FIFF_MNE_COL_NAMES   string           (optional)
//! └── <matrix kind>        float matrix
//! ```
//!
//! The codec works against the [`fiff_tag::TagRead`] and
//! [`fiff_tag::TagWrite`] seams and does not parse files on its own.

pub mod error;
mod matrix;
mod read;
mod write;

pub use error::{Axis, MatrixError};
pub use matrix::{transpose_named_matrix, NamedMatrix};
pub use read::{read_named_matrix, read_named_matrix_with, ReadOptions};
pub use write::write_named_matrix;
