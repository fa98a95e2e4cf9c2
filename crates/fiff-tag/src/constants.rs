//! FIFF tag kinds, data types, and block identifiers used by this workspace.
//!
//! Only the subset needed for named matrices is listed. Values follow the
//! published FIFF dictionary so files interoperate with other readers.

/// Marks the start of a block; payload is the block kind.
pub const FIFF_BLOCK_START: i32 = 104;
/// Marks the end of a block; payload is the block kind.
pub const FIFF_BLOCK_END: i32 = 105;

/// Virtual top-level block of a file.
pub const FIFFB_ROOT: i32 = 999;

/// Block holding a matrix payload plus its dimension and name tags.
pub const FIFFB_MNE_NAMED_MATRIX: i32 = 357;

/// Colon-separated row labels.
pub const FIFF_MNE_ROW_NAMES: i32 = 3502;
/// Colon-separated column labels.
pub const FIFF_MNE_COL_NAMES: i32 = 3503;
/// Explicit row count.
pub const FIFF_MNE_NROW: i32 = 3504;
/// Explicit column count.
pub const FIFF_MNE_NCOL: i32 = 3505;

pub const FIFF_MNE_FORWARD_SOLUTION: i32 = 3562;
pub const FIFF_MNE_FORWARD_SOLUTION_GRAD: i32 = 3563;

pub const FIFFT_INT: i32 = 3;
pub const FIFFT_FLOAT: i32 = 4;
pub const FIFFT_STRING: i32 = 10;

/// Bit flag marking a matrix-coded data type.
pub const FIFFT_MATRIX: i32 = 0x4000_0000;
/// `FIFFT_MATRIX | FIFFT_FLOAT`: dense row-major `f32` matrix.
pub const FIFFT_MATRIX_FLOAT: i32 = FIFFT_MATRIX | FIFFT_FLOAT;

/// `next` field value for tags stored sequentially.
pub const FIFFV_NEXT_SEQ: i32 = 0;

/// Size in bytes of a tag header (kind, type, size, next).
pub const TAG_HEADER_SIZE: u64 = 16;

/// Human-readable name for a data type code, for error messages.
pub fn type_name(ty: i32) -> &'static str {
    match ty {
        FIFFT_INT => "int",
        FIFFT_FLOAT => "float",
        FIFFT_STRING => "string",
        FIFFT_MATRIX_FLOAT => "float matrix",
        _ => "unknown",
    }
}
