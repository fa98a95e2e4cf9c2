//! FIFF tag framing and block tree primitives.
//!
//! Provides the small slice of the FIFF format needed to store named
//! matrices: typed tags, block markers, a block tree with per-node tag
//! directories, and the [`TagRead`] / [`TagWrite`] seams the matrix codec
//! is written against.
//!
//! ## Tag Layout
//!
//! ```text
//! ┌──────────────────────────────┐
//! │ kind: i32                    │
//! │ type: i32                    │
//! │ size: i32                    │  16-byte header, big-endian
//! │ next: i32 (0 = sequential)   │
//! ├──────────────────────────────┤
//! │ payload                      │  `size` bytes
//! └──────────────────────────────┘
//! ```
//!
//! A block is a `FIFF_BLOCK_START` tag carrying the block kind, the block's
//! tags and nested blocks, then a matching `FIFF_BLOCK_END` tag.
//!
//! Building a tree from an arbitrary file is not provided; trees come from
//! [`FiffWriter::finish`] or are assembled by the caller.

pub mod constants;
pub mod error;
mod read;
mod tag;
mod tree;
mod write;

pub use error::TagError;
pub use read::{FiffReader, TagRead};
pub use tag::{DirEntry, Tag, TagData};
pub use tree::Node;
pub use write::{FiffWriter, TagWrite, NAME_SEPARATOR};
