//! `fiffmat write` — encode a matrix description as a named-matrix block.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use fiff_matrix::write_named_matrix;
use fiff_tag::FiffWriter;
use log::debug;

use crate::description::MatrixDescription;

/// Write the matrix described in `input` to `output` as FIFF tags.
///
/// The file is only created once the whole block has been encoded.
pub fn run(input: &Path, output: &Path, kind: Option<i32>) -> Result<()> {
    let desc = MatrixDescription::load(input)?;
    let mat = desc.to_named_matrix()?;
    let kind = kind.unwrap_or(desc.kind);

    let mut writer = FiffWriter::new(Vec::new());
    write_named_matrix(&mut writer, kind, &mat)
        .with_context(|| format!("encoding {}", input.display()))?;
    let (bytes, root) = writer.finish()?;
    debug!("encoded {} blocks, {} bytes", root.nchild(), bytes.len());

    fs::write(output, &bytes).with_context(|| format!("writing {}", output.display()))?;

    let tags: usize = root.children.iter().map(|b| b.directory.len()).sum();
    println!(
        "Wrote {}x{} named matrix (kind = {kind}) to {} ({} bytes, {tags} tags)",
        mat.nrow,
        mat.ncol,
        output.display(),
        bytes.len()
    );
    Ok(())
}
