//! Block tree nodes.
//!
//! A node corresponds to one block in the stream. It holds directory
//! entries for its *direct* tags and its child blocks in file order.

use crate::tag::DirEntry;

/// One block in the FIFF block hierarchy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
    /// Block kind (e.g. `FIFFB_MNE_NAMED_MATRIX`).
    pub block: i32,
    /// Tags stored directly in this block, in stream order.
    pub directory: Vec<DirEntry>,
    /// Nested blocks, in stream order.
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(block: i32) -> Self {
        Self {
            block,
            directory: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Number of direct child blocks.
    pub fn nchild(&self) -> usize {
        self.children.len()
    }

    /// Whether this block directly carries a tag of `kind`. Does not look at
    /// children and does not read any payload.
    pub fn has_tag(&self, kind: i32) -> bool {
        self.directory.iter().any(|e| e.kind == kind)
    }

    /// First directory entry of `kind`, if any.
    pub fn entry(&self, kind: i32) -> Option<&DirEntry> {
        self.directory.iter().find(|e| e.kind == kind)
    }
}
