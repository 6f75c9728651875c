//! Binary buffer generation for glTF extension test fixtures
//!
//! Two independent generators, both producing raw little-endian bytes that a
//! hand-maintained glTF document references by offset and length:
//! - outline: boundary edges of triangulated quads for `CESIUM_primitive_outline`
//! - attributes: per-vertex warp matrices and raw samples for property attributes
//!
//! # Example
//!
//! ```
//! use fixture_gen::*;
//!
//! let outline = OutlineBuilder::new()
//!     .group(Triangulation::DiagonalAC, &[0, 1, 2, 0, 3, 1])
//!     .build(IndexWidthMode::U16)
//!     .unwrap();
//! assert_eq!(outline.data.len(), 16);
//!
//! let buffer = pack_seeded_property_attributes(&PropertyAttributeConfig::default()).unwrap();
//! assert_eq!(buffer.vectors.offset, 768);
//! ```

pub mod attributes;
pub mod error;
pub mod manifest;
pub mod outline;
pub mod presets;
pub mod report;
pub mod section;
pub mod writer;

pub use attributes::{
    PropertyAttributeBuffer, PropertyAttributeConfig, RngSource, SampleSource,
    pack_property_attributes, pack_seeded_property_attributes, seeded_source,
};
pub use error::FixtureError;
pub use manifest::FixtureManifest;
pub use outline::{
    Edge, IndexWidth, IndexWidthMode, OutlineBuffer, OutlineBuilder, Triangulation, extract_edges,
    pack_edges,
};
pub use presets::OutlinePreset;
pub use report::FixtureReport;
pub use section::BufferSection;
pub use writer::write_atomic;
