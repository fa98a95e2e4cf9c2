//! Tag lookup over a seekable stream.

use std::io::{Read, Seek, SeekFrom};

use byteorder::{BigEndian, ReadBytesExt};
use log::debug;

use crate::error::{Result, TagError};
use crate::tag::{DirEntry, Tag, TagData};
use crate::tree::Node;

/// Fetches tags belonging to a tree node.
pub trait TagRead {
    /// Read the first tag of `kind` stored directly in `node`.
    ///
    /// Returns `Ok(None)` when the node has no such tag.
    fn find_tag(&mut self, node: &Node, kind: i32) -> Result<Option<Tag>>;
}

impl<T: TagRead + ?Sized> TagRead for &mut T {
    fn find_tag(&mut self, node: &Node, kind: i32) -> Result<Option<Tag>> {
        (**self).find_tag(node, kind)
    }
}

/// Reads tags from a FIFF stream using the positions in a node's directory.
#[derive(Debug)]
pub struct FiffReader<R> {
    inner: R,
}

impl<R: Read + Seek> FiffReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Seek to `entry` and decode the tag stored there.
    pub fn read_tag(&mut self, entry: &DirEntry) -> Result<Tag> {
        self.inner.seek(SeekFrom::Start(entry.pos))?;
        let kind = self.inner.read_i32::<BigEndian>()?;
        let ty = self.inner.read_i32::<BigEndian>()?;
        let size = self.inner.read_i32::<BigEndian>()?;
        let _next = self.inner.read_i32::<BigEndian>()?;

        if kind != entry.kind {
            return Err(TagError::MalformedPayload {
                kind: entry.kind,
                detail: format!("found tag {kind} at offset {}", entry.pos),
            });
        }
        if size != entry.size {
            return Err(TagError::MalformedPayload {
                kind,
                detail: format!(
                    "header declares {size} payload bytes, directory says {}",
                    entry.size
                ),
            });
        }
        if size < 0 {
            return Err(TagError::MalformedPayload {
                kind,
                detail: format!("negative payload size {size}"),
            });
        }

        let mut payload = Vec::new();
        (&mut self.inner).take(size as u64).read_to_end(&mut payload)?;
        if payload.len() != size as usize {
            return Err(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                format!("tag {kind}: {} of {size} payload bytes available", payload.len()),
            )
            .into());
        }
        debug!("read tag {kind} (type {ty:#x}, {size} bytes) at offset {}", entry.pos);
        Ok(Tag::new(kind, TagData::decode(kind, ty, &payload)?))
    }
}

impl<R: Read + Seek> TagRead for FiffReader<R> {
    fn find_tag(&mut self, node: &Node, kind: i32) -> Result<Option<Tag>> {
        match node.entry(kind) {
            Some(entry) => self.read_tag(entry).map(Some),
            None => Ok(None),
        }
    }
}
