//! Named-matrix error types.

use std::fmt;

use fiff_tag::TagError;

/// Which matrix axis an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Rows,
    Columns,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Rows => write!(f, "rows"),
            Axis::Columns => write!(f, "columns"),
        }
    }
}

/// Errors raised while reading or writing a named matrix.
///
/// A matrix that is simply absent is not an error: the reader returns
/// `Ok(None)` for that case.
#[derive(Debug, thiserror::Error)]
pub enum MatrixError {
    /// The block advertised the matrix tag but it could not be fetched.
    #[error("matrix data missing (kind = {kind})")]
    DataMissing { kind: i32 },

    /// An explicit row/column count tag disagrees with the payload shape.
    #[error("number of {dimension} in matrix data ({actual}) and count tag ({tag}) do not match")]
    DimensionMismatch {
        dimension: Axis,
        tag: i32,
        actual: usize,
    },

    /// `nrow * ncol` differs from the number of elements in the payload.
    #[error(
        "cannot write matrix: row ({nrow}) and column ({ncol}) total element ({expected}) \
         mismatch with data size ({actual}), appears to be off by a factor of {}x",
        format_ratio(.ratio)
    )]
    ShapeMismatch {
        nrow: usize,
        ncol: usize,
        expected: usize,
        actual: usize,
        ratio: f64,
    },

    /// A non-empty label list does not have one entry per row/column.
    #[error("{names} labels given for {expected} {field}")]
    LabelCountMismatch {
        field: Axis,
        names: usize,
        expected: usize,
    },

    /// A dimension does not fit in a FIFF integer tag.
    #[error("matrix dimension {value} does not fit in a 32-bit tag")]
    DimensionOverflow { value: usize },

    #[error("tag error: {0}")]
    Tag(#[from] TagError),
}

/// Format like C's `%g`: six significant digits, trailing zeros dropped,
/// exponent notation outside `1e-4 ..= 1e6`.
fn format_ratio(ratio: &f64) -> String {
    let ratio = *ratio;
    if !ratio.is_finite() {
        return ratio.to_string();
    }
    if ratio == 0.0 {
        return "0".to_string();
    }

    let sci = format!("{ratio:.5e}");
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);
    let trim = |s: &str| s.trim_end_matches('0').trim_end_matches('.').to_string();

    if (-4..6).contains(&exp) {
        let decimals = (5 - exp) as usize;
        trim(&format!("{ratio:.decimals$}"))
    } else {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{sign}{:02}", trim(mantissa), exp.abs())
    }
}

/// Result type alias for named-matrix operations.
pub type Result<T> = std::result::Result<T, MatrixError>;
