//! Tags, their decoded payloads, and directory entries.
//!
//! A tag is the atomic unit of a FIFF stream: a 16-byte big-endian header
//! (kind, type, size, next) followed by `size` payload bytes. Only the data
//! types needed for named matrices are understood here.

use std::io::Cursor;

use byteorder::{BigEndian, ReadBytesExt};
use ndarray::{Array2, ArrayView2};

use crate::constants::{type_name, FIFFT_INT, FIFFT_MATRIX_FLOAT, FIFFT_STRING};
use crate::error::{Result, TagError};

/// Location and header of one tag inside a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirEntry {
    /// Tag kind (what the tag means).
    pub kind: i32,
    /// Data type code (how the payload is encoded).
    pub ty: i32,
    /// Payload size in bytes, excluding the header.
    pub size: i32,
    /// Byte offset of the tag header from the start of the stream.
    pub pos: u64,
}

/// Decoded tag payload.
#[derive(Debug, Clone, PartialEq)]
pub enum TagData {
    Int(i32),
    String(String),
    /// Dense `f32` matrix in logical row-major order.
    FloatMatrix(Array2<f32>),
}

impl TagData {
    /// The FIFF data type code this payload is written with.
    pub fn type_code(&self) -> i32 {
        match self {
            TagData::Int(_) => FIFFT_INT,
            TagData::String(_) => FIFFT_STRING,
            TagData::FloatMatrix(_) => FIFFT_MATRIX_FLOAT,
        }
    }

    /// Encode the payload bytes (without the tag header).
    ///
    /// Matrices are written row-major in *logical* order, so a transposed
    /// view is serialized as the transposed matrix. The dimensions follow
    /// the values in reverse order, then the dimension count.
    pub fn encode(&self) -> Vec<u8> {
        match self {
            TagData::Int(v) => v.to_be_bytes().to_vec(),
            TagData::String(s) => s.as_bytes().to_vec(),
            TagData::FloatMatrix(m) => encode_float_matrix(m.view()),
        }
    }

    /// Decode a payload of data type `ty` belonging to a tag of `kind`.
    pub fn decode(kind: i32, ty: i32, bytes: &[u8]) -> Result<Self> {
        match ty {
            FIFFT_INT => {
                if bytes.len() != 4 {
                    return Err(TagError::MalformedPayload {
                        kind,
                        detail: format!("int payload has {} bytes, expected 4", bytes.len()),
                    });
                }
                let v = Cursor::new(bytes).read_i32::<BigEndian>()?;
                Ok(TagData::Int(v))
            }
            FIFFT_STRING => String::from_utf8(bytes.to_vec())
                .map(TagData::String)
                .map_err(|_| TagError::InvalidUtf8 { kind }),
            FIFFT_MATRIX_FLOAT => decode_float_matrix(kind, bytes).map(TagData::FloatMatrix),
            other => Err(TagError::MalformedPayload {
                kind,
                detail: format!("unsupported data type {other:#x}"),
            }),
        }
    }
}

/// Encode a float-matrix payload: values row-major, then `ncol`, `nrow`, 2.
///
/// Callers are responsible for dimensions fitting in an `i32`.
pub(crate) fn encode_float_matrix(m: ArrayView2<'_, f32>) -> Vec<u8> {
    let mut buf = Vec::with_capacity(4 * m.len() + 12);
    for v in m.iter() {
        buf.extend_from_slice(&v.to_be_bytes());
    }
    let (nrow, ncol) = m.dim();
    buf.extend_from_slice(&(ncol as i32).to_be_bytes());
    buf.extend_from_slice(&(nrow as i32).to_be_bytes());
    buf.extend_from_slice(&2i32.to_be_bytes());
    buf
}

fn decode_float_matrix(kind: i32, bytes: &[u8]) -> Result<Array2<f32>> {
    let malformed = |detail: String| TagError::MalformedPayload { kind, detail };

    if bytes.len() < 12 {
        return Err(malformed(format!(
            "matrix payload has {} bytes, too short for its dimensions",
            bytes.len()
        )));
    }
    let trailer = bytes.len() - 12;
    let mut dims = Cursor::new(&bytes[trailer..]);
    let ncol = dims.read_i32::<BigEndian>()?;
    let nrow = dims.read_i32::<BigEndian>()?;
    let ndim = dims.read_i32::<BigEndian>()?;
    if ndim != 2 {
        return Err(malformed(format!("expected a 2-D matrix, found {ndim} dimensions")));
    }
    if nrow < 0 || ncol < 0 {
        return Err(malformed(format!("negative matrix dimensions {nrow}x{ncol}")));
    }
    let (nrow, ncol) = (nrow as usize, ncol as usize);
    let count = nrow
        .checked_mul(ncol)
        .filter(|n| n.checked_mul(4) == Some(trailer))
        .ok_or_else(|| {
            malformed(format!(
                "{trailer} value bytes do not hold a {nrow}x{ncol} float matrix"
            ))
        })?;

    let mut values = Cursor::new(&bytes[..trailer]);
    let mut data = Vec::with_capacity(count);
    for _ in 0..count {
        data.push(values.read_f32::<BigEndian>()?);
    }
    Array2::from_shape_vec((nrow, ncol), data).map_err(|e| malformed(e.to_string()))
}

fn data_type_name(data: &TagData) -> &'static str {
    type_name(data.type_code())
}

/// A decoded tag.
#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    pub kind: i32,
    pub data: TagData,
}

impl Tag {
    pub fn new(kind: i32, data: TagData) -> Self {
        Self { kind, data }
    }

    fn unexpected(&self, expected: &'static str) -> TagError {
        TagError::UnexpectedType {
            kind: self.kind,
            expected,
            found: data_type_name(&self.data),
        }
    }

    pub fn as_int(&self) -> Result<i32> {
        match &self.data {
            TagData::Int(v) => Ok(*v),
            _ => Err(self.unexpected("int")),
        }
    }

    pub fn as_str(&self) -> Result<&str> {
        match &self.data {
            TagData::String(s) => Ok(s.as_str()),
            _ => Err(self.unexpected("string")),
        }
    }

    pub fn as_float_matrix(&self) -> Result<&Array2<f32>> {
        match &self.data {
            TagData::FloatMatrix(m) => Ok(m),
            _ => Err(self.unexpected("float matrix")),
        }
    }

    /// Take ownership of a float-matrix payload.
    pub fn into_float_matrix(self) -> Result<Array2<f32>> {
        match self.data {
            TagData::FloatMatrix(m) => Ok(m),
            _ => Err(self.unexpected("float matrix")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn int_payload_is_big_endian() {
        let bytes = TagData::Int(0x0102_0304).encode();
        assert_eq!(bytes, vec![1, 2, 3, 4]);
        assert_eq!(
            TagData::decode(1, FIFFT_INT, &bytes).unwrap(),
            TagData::Int(0x0102_0304)
        );
    }

    #[test]
    fn matrix_payload_layout() {
        let m = array![[1.0f32, 2.0], [3.0, 4.0], [5.0, 6.0]];
        let bytes = TagData::FloatMatrix(m).encode();
        assert_eq!(bytes.len(), 4 * 6 + 12);
        assert_eq!(&bytes[0..4], &1.0f32.to_be_bytes());
        assert_eq!(&bytes[4..8], &2.0f32.to_be_bytes());
        // dims trailer: ncol, nrow, ndim
        assert_eq!(&bytes[24..28], &2i32.to_be_bytes());
        assert_eq!(&bytes[28..32], &3i32.to_be_bytes());
        assert_eq!(&bytes[32..36], &2i32.to_be_bytes());
    }

    #[test]
    fn transposed_view_encodes_logical_order() {
        let m = array![[1.0f32, 2.0, 3.0], [4.0, 5.0, 6.0]].reversed_axes();
        let bytes = TagData::FloatMatrix(m).encode();
        let tag = Tag::new(7, TagData::decode(7, FIFFT_MATRIX_FLOAT, &bytes).unwrap());
        assert_eq!(
            tag.as_float_matrix().unwrap(),
            &array![[1.0f32, 4.0], [2.0, 5.0], [3.0, 6.0]]
        );
        assert!(tag.as_int().is_err());
    }

    #[test]
    fn empty_matrix_decodes() {
        let m = Array2::<f32>::zeros((0, 4));
        let bytes = TagData::FloatMatrix(m.clone()).encode();
        let decoded = TagData::decode(7, FIFFT_MATRIX_FLOAT, &bytes).unwrap();
        assert_eq!(decoded, TagData::FloatMatrix(m));
    }

    #[test]
    fn matrix_size_mismatch_rejected() {
        let mut bytes = TagData::FloatMatrix(array![[1.0f32, 2.0]]).encode();
        bytes.drain(0..4);
        let err = TagData::decode(7, FIFFT_MATRIX_FLOAT, &bytes).unwrap_err();
        assert!(matches!(err, TagError::MalformedPayload { kind: 7, .. }));
    }

    #[test]
    fn three_dimensional_matrix_rejected() {
        let mut bytes = TagData::FloatMatrix(array![[1.0f32]]).encode();
        let n = bytes.len();
        bytes[n - 4..].copy_from_slice(&3i32.to_be_bytes());
        assert!(TagData::decode(7, FIFFT_MATRIX_FLOAT, &bytes).is_err());
    }

    #[test]
    fn invalid_utf8_rejected() {
        let err = TagData::decode(9, FIFFT_STRING, &[0xff, 0xfe]).unwrap_err();
        assert!(matches!(err, TagError::InvalidUtf8 { kind: 9 }));
    }

    #[test]
    fn accessor_type_mismatch() {
        let tag = Tag::new(3504, TagData::String("x".into()));
        let err = tag.as_int().unwrap_err();
        assert_eq!(err.to_string(), "tag 3504: expected int data, found string");
        assert_eq!(tag.as_str().unwrap(), "x");
    }
}
