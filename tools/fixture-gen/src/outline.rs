//! Boundary edge extraction for `CESIUM_primitive_outline`
//!
//! Every quad arrives as two triangles sharing a diagonal. The outline only
//! wants the four outer edges, so each 6-index chunk is mapped through a fixed
//! lookup table chosen by how the exporter triangulated the mesh.
//!
//! Corners are named counter-clockwise from the bottom-left of the face:
//!
//! ```text
//! D---C
//! |   |
//! A---B
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::FixtureError;

/// Two triangles per quad
pub const INDICES_PER_QUAD: usize = 6;

/// Boundary edges emitted per quad
pub const EDGES_PER_QUAD: usize = 4;

/// Which diagonal the exporter used to split each quad.
///
/// Variant names use the A-D corner labels from the module docs. The
/// lowercase letters in each variant's docs are the positional names of the
/// chunk as the exporter wrote it, which is a different labelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Triangulation {
    /// Chunk reads `a b c a d b`, so the shared chunk edge a-b sits on corners
    /// A (bottom-left) and C (top-right).
    ///
    /// ```text
    /// c---b
    /// | / |
    /// a---d
    /// ```
    #[serde(rename = "diagonal-ac")]
    DiagonalAC,

    /// Chunk reads `a b c a c d`, so the shared chunk edge a-c sits on corners
    /// B (bottom-right) and D (top-left).
    ///
    /// ```text
    /// c---b
    /// | \ |
    /// d---a
    /// ```
    #[serde(rename = "diagonal-bd")]
    DiagonalBD,
}

impl Triangulation {
    /// Chunk positions of the boundary loop, as (start, end) pairs
    const fn edge_table(self) -> [(usize, usize); EDGES_PER_QUAD] {
        match self {
            // a-d, d-b, b-c, c-a
            Triangulation::DiagonalAC => [(0, 4), (4, 1), (1, 2), (2, 0)],
            // a-b, b-c, c-d, d-a
            Triangulation::DiagonalBD => [(0, 1), (1, 2), (2, 5), (5, 0)],
        }
    }

    /// Chunk positions of the shared diagonal
    const fn diagonal_positions(self) -> (usize, usize) {
        match self {
            Triangulation::DiagonalAC => (0, 1),
            Triangulation::DiagonalBD => (0, 2),
        }
    }

    /// The four outer edges of one quad, in loop order
    pub fn boundary_edges(self, chunk: &[u32; INDICES_PER_QUAD]) -> [Edge; EDGES_PER_QUAD] {
        self.edge_table()
            .map(|(start, end)| Edge::new(chunk[start], chunk[end]))
    }

    /// The diagonal dropped from the outline
    pub fn diagonal(self, chunk: &[u32; INDICES_PER_QUAD]) -> Edge {
        let (start, end) = self.diagonal_positions();
        Edge::new(chunk[start], chunk[end])
    }
}

impl fmt::Display for Triangulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Triangulation::DiagonalAC => f.write_str("diagonal-ac"),
            Triangulation::DiagonalBD => f.write_str("diagonal-bd"),
        }
    }
}

/// One boundary segment of a quad
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    pub start: u32,
    pub end: u32,
}

impl Edge {
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// True if both edges join the same two vertices, in either direction
    pub fn same_segment(&self, other: &Edge) -> bool {
        (self.start == other.start && self.end == other.end)
            || (self.start == other.end && self.end == other.start)
    }
}

/// Component width of packed edge indices.
///
/// The outline extension only accepts 16- and 32-bit index accessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexWidth {
    U16,
    U32,
}

impl IndexWidth {
    /// Bytes per index component
    pub const fn byte_size(self) -> usize {
        match self {
            IndexWidth::U16 => 2,
            IndexWidth::U32 => 4,
        }
    }

    /// Smallest width that can hold `max_index`
    pub fn smallest_for(max_index: u32) -> Self {
        if max_index <= u32::from(u16::MAX) {
            IndexWidth::U16
        } else {
            IndexWidth::U32
        }
    }

    fn push(self, buffer: &mut Vec<u8>, index: u32) -> Result<(), FixtureError> {
        match self {
            IndexWidth::U16 => {
                let narrow = u16::try_from(index)
                    .map_err(|_| FixtureError::IndexWidthOverflow { index, width: self })?;
                buffer.extend_from_slice(&narrow.to_le_bytes());
            }
            IndexWidth::U32 => buffer.extend_from_slice(&index.to_le_bytes()),
        }
        Ok(())
    }
}

impl fmt::Display for IndexWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexWidth::U16 => f.write_str("u16"),
            IndexWidth::U32 => f.write_str("u32"),
        }
    }
}

/// Width requested by a caller, possibly left to the data
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexWidthMode {
    #[default]
    U16,
    U32,
    Auto,
}

impl IndexWidthMode {
    pub fn resolve(self, edges: &[Edge]) -> IndexWidth {
        match self {
            IndexWidthMode::U16 => IndexWidth::U16,
            IndexWidthMode::U32 => IndexWidth::U32,
            IndexWidthMode::Auto => {
                let max_index = edges
                    .iter()
                    .map(|edge| edge.start.max(edge.end))
                    .max()
                    .unwrap_or(0);
                IndexWidth::smallest_for(max_index)
            }
        }
    }
}

/// Split a triangulated index list into boundary edges, 4 per quad
pub fn extract_edges(
    indices: &[u32],
    triangulation: Triangulation,
) -> Result<Vec<Edge>, FixtureError> {
    if indices.len() % INDICES_PER_QUAD != 0 {
        return Err(FixtureError::MalformedTriangulation { len: indices.len() });
    }

    let mut edges = Vec::with_capacity(indices.len() / INDICES_PER_QUAD * EDGES_PER_QUAD);
    for chunk in indices.chunks_exact(INDICES_PER_QUAD) {
        let quad: [u32; INDICES_PER_QUAD] = std::array::from_fn(|i| chunk[i]);
        edges.extend_from_slice(&triangulation.boundary_edges(&quad));
    }
    Ok(edges)
}

/// Pack edges as consecutive little-endian index pairs
pub fn pack_edges(edges: &[Edge], width: IndexWidth) -> Result<Vec<u8>, FixtureError> {
    let mut buffer = Vec::with_capacity(edges.len() * 2 * width.byte_size());
    for edge in edges {
        width.push(&mut buffer, edge.start)?;
        width.push(&mut buffer, edge.end)?;
    }
    Ok(buffer)
}

/// A run of quads sharing one triangulation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuadGroup {
    pub triangulation: Triangulation,
    pub indices: Vec<u32>,
}

impl QuadGroup {
    pub fn quad_count(&self) -> usize {
        self.indices.len() / INDICES_PER_QUAD
    }
}

/// Packed outline buffer plus what went into it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineBuffer {
    pub data: Vec<u8>,
    pub width: IndexWidth,
    pub edge_count: usize,
}

/// Accumulates quad groups and packs their outline in group order
#[derive(Debug, Clone, Default)]
pub struct OutlineBuilder {
    groups: Vec<QuadGroup>,
}

impl OutlineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a group of quads triangulated the same way
    pub fn group(mut self, triangulation: Triangulation, indices: &[u32]) -> Self {
        self.groups.push(QuadGroup {
            triangulation,
            indices: indices.to_vec(),
        });
        self
    }

    pub fn groups(&self) -> &[QuadGroup] {
        &self.groups
    }

    /// Boundary edges of every group, in group order
    pub fn edges(&self) -> Result<Vec<Edge>, FixtureError> {
        let mut edges = Vec::new();
        for group in &self.groups {
            tracing::debug!(
                "outline group: {} quads, {}",
                group.quad_count(),
                group.triangulation
            );
            edges.extend(extract_edges(&group.indices, group.triangulation)?);
        }
        Ok(edges)
    }

    /// Extract and pack every group
    pub fn build(&self, mode: IndexWidthMode) -> Result<OutlineBuffer, FixtureError> {
        let edges = self.edges()?;
        let width = mode.resolve(&edges);
        let data = pack_edges(&edges, width)?;
        Ok(OutlineBuffer {
            data,
            width,
            edge_count: edges.len(),
        })
    }
}
