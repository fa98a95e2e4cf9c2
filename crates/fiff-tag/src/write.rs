//! Tag and block emission.

use std::io::Write;

use byteorder::{BigEndian, WriteBytesExt};
use log::debug;
use ndarray::ArrayView2;

use crate::constants::{
    FIFFB_ROOT, FIFFT_INT, FIFFT_MATRIX_FLOAT, FIFFT_STRING, FIFFV_NEXT_SEQ, FIFF_BLOCK_END,
    FIFF_BLOCK_START, TAG_HEADER_SIZE,
};
use crate::error::{Result, TagError};
use crate::tag::{encode_float_matrix, DirEntry};
use crate::tree::Node;

/// Separator used when a list of names is stored as one string tag.
pub const NAME_SEPARATOR: &str = ":";

/// Sink for typed tags and block markers.
///
/// Every call appends to the stream; nothing is buffered or rolled back.
pub trait TagWrite {
    fn start_block(&mut self, kind: i32) -> Result<()>;

    fn end_block(&mut self, kind: i32) -> Result<()>;

    fn write_int(&mut self, kind: i32, value: i32) -> Result<()>;

    fn write_string(&mut self, kind: i32, value: &str) -> Result<()>;

    /// Write `names` as a single colon-joined string. Names are not escaped,
    /// so a name containing `:` will not survive a round trip.
    fn write_name_list(&mut self, kind: i32, names: &[String]) -> Result<()> {
        self.write_string(kind, &names.join(NAME_SEPARATOR))
    }

    fn write_float_matrix(&mut self, kind: i32, data: ArrayView2<'_, f32>) -> Result<()>;
}

impl<T: TagWrite + ?Sized> TagWrite for &mut T {
    fn start_block(&mut self, kind: i32) -> Result<()> {
        (**self).start_block(kind)
    }

    fn end_block(&mut self, kind: i32) -> Result<()> {
        (**self).end_block(kind)
    }

    fn write_int(&mut self, kind: i32, value: i32) -> Result<()> {
        (**self).write_int(kind, value)
    }

    fn write_string(&mut self, kind: i32, value: &str) -> Result<()> {
        (**self).write_string(kind, value)
    }

    fn write_name_list(&mut self, kind: i32, names: &[String]) -> Result<()> {
        (**self).write_name_list(kind, names)
    }

    fn write_float_matrix(&mut self, kind: i32, data: ArrayView2<'_, f32>) -> Result<()> {
        (**self).write_float_matrix(kind, data)
    }
}

/// Writes FIFF tags to a byte stream and records the block tree it emits.
///
/// The recorded tree has the same shape a FIFF directory scan would produce
/// for the written bytes, so it can be handed straight to a
/// [`FiffReader`](crate::FiffReader) over the same data.
#[derive(Debug)]
pub struct FiffWriter<W> {
    inner: W,
    pos: u64,
    /// Open blocks; index 0 is the root and is never popped.
    stack: Vec<Node>,
}

impl<W: Write> FiffWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            pos: 0,
            stack: vec![Node::new(FIFFB_ROOT)],
        }
    }

    /// Bytes written so far.
    pub fn position(&self) -> u64 {
        self.pos
    }

    /// Number of blocks currently open.
    pub fn depth(&self) -> usize {
        self.stack.len() - 1
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Flush and return the stream together with the tree of written blocks.
    ///
    /// Fails if any block is still open.
    pub fn finish(mut self) -> Result<(W, Node)> {
        if self.depth() > 0 {
            return Err(TagError::UnclosedBlock {
                depth: self.depth(),
            });
        }
        self.inner.flush()?;
        let root = self.stack.pop().unwrap_or_default();
        Ok((self.inner, root))
    }

    /// Write one tag and advance the position. The caller records the entry.
    fn emit(&mut self, kind: i32, ty: i32, payload: &[u8]) -> Result<DirEntry> {
        let size = i32::try_from(payload.len()).map_err(|_| TagError::PayloadTooLarge {
            kind,
            size: payload.len(),
        })?;

        self.inner.write_i32::<BigEndian>(kind)?;
        self.inner.write_i32::<BigEndian>(ty)?;
        self.inner.write_i32::<BigEndian>(size)?;
        self.inner.write_i32::<BigEndian>(FIFFV_NEXT_SEQ)?;
        self.inner.write_all(payload)?;

        let entry = DirEntry {
            kind,
            ty,
            size,
            pos: self.pos,
        };
        self.pos += TAG_HEADER_SIZE + payload.len() as u64;
        Ok(entry)
    }

    fn write_tag(&mut self, kind: i32, ty: i32, payload: &[u8]) -> Result<()> {
        let entry = self.emit(kind, ty, payload)?;
        if let Some(node) = self.stack.last_mut() {
            node.directory.push(entry);
        }
        Ok(())
    }
}

impl<W: Write> TagWrite for FiffWriter<W> {
    fn start_block(&mut self, kind: i32) -> Result<()> {
        debug!("start block {kind} at offset {}", self.pos);
        let entry = self.emit(FIFF_BLOCK_START, FIFFT_INT, &kind.to_be_bytes())?;
        let mut node = Node::new(kind);
        node.directory.push(entry);
        self.stack.push(node);
        Ok(())
    }

    fn end_block(&mut self, kind: i32) -> Result<()> {
        match self.stack.last() {
            _ if self.stack.len() <= 1 => return Err(TagError::NoOpenBlock { kind }),
            Some(open) if open.block != kind => {
                return Err(TagError::BlockMismatch {
                    expected: open.block,
                    found: kind,
                })
            }
            _ => {}
        }

        self.write_tag(FIFF_BLOCK_END, FIFFT_INT, &kind.to_be_bytes())?;
        if let Some(done) = self.stack.pop() {
            debug!(
                "end block {kind}: {} tags, {} children",
                done.directory.len(),
                done.nchild()
            );
            if let Some(parent) = self.stack.last_mut() {
                parent.children.push(done);
            }
        }
        Ok(())
    }

    fn write_int(&mut self, kind: i32, value: i32) -> Result<()> {
        self.write_tag(kind, FIFFT_INT, &value.to_be_bytes())
    }

    fn write_string(&mut self, kind: i32, value: &str) -> Result<()> {
        self.write_tag(kind, FIFFT_STRING, value.as_bytes())
    }

    fn write_float_matrix(&mut self, kind: i32, data: ArrayView2<'_, f32>) -> Result<()> {
        let (nrow, ncol) = data.dim();
        if i32::try_from(nrow).is_err() || i32::try_from(ncol).is_err() {
            return Err(TagError::MalformedPayload {
                kind,
                detail: format!("matrix dimensions {nrow}x{ncol} exceed the 32-bit limit"),
            });
        }
        self.write_tag(kind, FIFFT_MATRIX_FLOAT, &encode_float_matrix(data))
    }
}
