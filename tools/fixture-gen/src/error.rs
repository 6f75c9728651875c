//! Error type shared by the buffer generators

use std::path::PathBuf;

use crate::outline::IndexWidth;

/// Errors raised while synthesizing or writing a fixture buffer
#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    /// Index list cannot be split into whole quads
    #[error("malformed triangulation: {len} indices is not a multiple of 6")]
    MalformedTriangulation { len: usize },

    /// Vertex index does not fit the requested component width
    #[error("vertex index {index} does not fit in {width} index components")]
    IndexWidthOverflow { index: u32, width: IndexWidth },

    /// Vertices were requested but there is nothing to cycle through
    #[error("scale option table is empty but {vertex_count} vertices were requested")]
    EmptyScaleOptions { vertex_count: usize },

    /// Output file could not be written
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
