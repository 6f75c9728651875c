//! Per-vertex property attribute buffer
//!
//! Produces the binary half of a property-attributes fixture: one warp matrix
//! and one raw temperature-style sample pair per vertex, packed back to back.
//!
//! Matrix section layout (N vertices, f32, row-major over the whole block):
//!
//! ```text
//! row 2i     | s 0 0 0 |
//! row 2i + 1 | 0 s 0 0 |
//! ```
//!
//! Columns 2 and 3 are padding for the wider matrix shape the consumer reads.
//! Each 2x2 block is a uniform scale, so its row-major and column-major bytes
//! are the same.

use glam::{Mat2, Vec2};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::error::FixtureError;
use crate::section::BufferSection;

/// Vertex count of the textured box fixture
pub const VERTEX_COUNT: usize = 24;

/// Scale factors cycled across vertices
pub const SCALE_OPTIONS: [f32; 5] = [0.25, 0.5, 1.0, 2.0, 4.0];

/// Fixed seed so regenerated fixtures stay byte-identical
pub const DEFAULT_SEED: u64 = 2022;

/// Rows each matrix occupies in the padded layout
pub const ROWS_PER_MATRIX: usize = 2;

/// Columns in the padded layout; only the first two carry data
pub const COLUMNS_PER_MATRIX: usize = 4;

/// Bytes of matrix data per vertex (2 rows x 4 f32 columns)
pub const MATRIX_STRIDE: usize = ROWS_PER_MATRIX * COLUMNS_PER_MATRIX * 4;

/// Bytes of vector data per vertex (2 x u16)
pub const VECTOR_STRIDE: usize = 2 * 2;

/// Inputs of one property attribute buffer
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyAttributeConfig {
    pub vertex_count: usize,
    pub scale_options: Vec<f32>,
    pub seed: u64,
}

impl Default for PropertyAttributeConfig {
    fn default() -> Self {
        Self {
            vertex_count: VERTEX_COUNT,
            scale_options: SCALE_OPTIONS.to_vec(),
            seed: DEFAULT_SEED,
        }
    }
}

/// Source of raw u16 samples for the vector section.
///
/// Implementations must be deterministic for a given construction so that
/// fixtures regenerate identically.
pub trait SampleSource {
    /// Next sample in `[0, 65535)`
    fn next_sample(&mut self) -> u16;
}

/// Draws samples uniformly from a seedable generator
#[derive(Debug, Clone)]
pub struct RngSource<R>(pub R);

impl<R: Rng> SampleSource for RngSource<R> {
    fn next_sample(&mut self) -> u16 {
        self.0.random_range(0..u16::MAX)
    }
}

/// Default sample source for a seed
pub fn seeded_source(seed: u64) -> RngSource<Pcg32> {
    RngSource(Pcg32::seed_from_u64(seed))
}

/// Uniform 2x2 scale
pub fn make_scale(scale_factor: f32) -> Mat2 {
    Mat2::from_diagonal(Vec2::splat(scale_factor))
}

/// Scale factor assigned to a vertex by cycling through the options
pub fn scale_for_vertex(options: &[f32], vertex: usize) -> Option<f32> {
    if options.is_empty() {
        None
    } else {
        Some(options[vertex % options.len()])
    }
}

/// Pack one warp matrix per vertex into the padded row-major layout
pub fn pack_warp_matrices(vertex_count: usize, options: &[f32]) -> Result<Vec<u8>, FixtureError> {
    let mut buffer = Vec::with_capacity(vertex_count * MATRIX_STRIDE);
    for vertex in 0..vertex_count {
        let scale_factor = scale_for_vertex(options, vertex)
            .ok_or(FixtureError::EmptyScaleOptions { vertex_count })?;
        let matrix = make_scale(scale_factor);

        for row in 0..ROWS_PER_MATRIX {
            let values = matrix.row(row);
            let padded = [values.x, values.y, 0.0, 0.0];
            for value in padded {
                buffer.extend_from_slice(&value.to_le_bytes());
            }
        }
    }
    Ok(buffer)
}

/// Pack two samples per vertex, in vertex order
pub fn pack_property_vectors<S: SampleSource + ?Sized>(
    vertex_count: usize,
    source: &mut S,
) -> Vec<u8> {
    let mut buffer = Vec::with_capacity(vertex_count * VECTOR_STRIDE);
    for _ in 0..vertex_count {
        for _ in 0..2 {
            buffer.extend_from_slice(&source.next_sample().to_le_bytes());
        }
    }
    buffer
}

/// Combined matrices + vectors buffer and where each half lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyAttributeBuffer {
    pub data: Vec<u8>,
    pub matrices: BufferSection,
    pub vectors: BufferSection,
}

impl PropertyAttributeBuffer {
    pub fn byte_length(&self) -> usize {
        self.data.len()
    }

    pub fn vertex_count(&self) -> usize {
        self.matrices.length / MATRIX_STRIDE
    }

    /// Decode the 2x2 block stored for `vertex`
    pub fn matrix_at(&self, vertex: usize) -> Option<Mat2> {
        let bytes = self.matrices.element(&self.data, vertex, MATRIX_STRIDE)?;
        let read = |row: usize, column: usize| {
            let at = (row * COLUMNS_PER_MATRIX + column) * 4;
            f32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
        };
        Some(Mat2::from_cols(
            Vec2::new(read(0, 0), read(1, 0)),
            Vec2::new(read(0, 1), read(1, 1)),
        ))
    }

    /// Decode the sample pair stored for `vertex`
    pub fn vector_at(&self, vertex: usize) -> Option<[u16; 2]> {
        let bytes = self.vectors.element(&self.data, vertex, VECTOR_STRIDE)?;
        Some([
            u16::from_le_bytes([bytes[0], bytes[1]]),
            u16::from_le_bytes([bytes[2], bytes[3]]),
        ])
    }
}

/// Build the full property attribute buffer for `config`
pub fn pack_property_attributes<S: SampleSource + ?Sized>(
    config: &PropertyAttributeConfig,
    source: &mut S,
) -> Result<PropertyAttributeBuffer, FixtureError> {
    let mut data = pack_warp_matrices(config.vertex_count, &config.scale_options)?;
    let matrices = BufferSection::new(0, data.len());
    tracing::debug!(
        "warp matrices: offset {} length {}",
        matrices.offset,
        matrices.length
    );

    let vectors_bin = pack_property_vectors(config.vertex_count, source);
    let vectors = BufferSection::new(matrices.end(), vectors_bin.len());
    tracing::debug!(
        "property vectors: offset {} length {}",
        vectors.offset,
        vectors.length
    );

    data.extend_from_slice(&vectors_bin);
    Ok(PropertyAttributeBuffer {
        data,
        matrices,
        vectors,
    })
}

/// Convenience wrapper using the config's own seed
pub fn pack_seeded_property_attributes(
    config: &PropertyAttributeConfig,
) -> Result<PropertyAttributeBuffer, FixtureError> {
    let mut source = seeded_source(config.seed);
    pack_property_attributes(config, &mut source)
}
