//! CLI command implementations.

pub mod show;
pub mod write;
