//! Index tables of the box meshes the outline fixtures are built for

use serde::{Deserialize, Serialize};

use crate::outline::{OutlineBuilder, Triangulation};

/// Box with separate vertices per face; every face is `a b c / a d b`
pub const BOX_WITH_PRIMITIVE_OUTLINE: [u32; 36] = [
    0, 1, 2, //
    0, 3, 1, //
    4, 5, 6, //
    4, 7, 5, //
    8, 9, 10, //
    8, 11, 9, //
    12, 13, 14, //
    12, 15, 13, //
    16, 17, 18, //
    16, 19, 17, //
    20, 21, 22, //
    20, 23, 21,
];

/// Box sharing its 8 corner vertices; every face is `a b c / a c d`
pub const BOX_WITH_PRIMITIVE_OUTLINE_SHARED_VERTICES: [u32; 36] = [
    0, 4, 6, //
    0, 6, 2, //
    3, 2, 6, //
    3, 6, 7, //
    7, 6, 4, //
    7, 4, 5, //
    5, 1, 3, //
    5, 3, 7, //
    1, 0, 2, //
    1, 2, 3, //
    5, 4, 0, //
    5, 0, 1,
];

/// Named outline inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutlinePreset {
    /// `BoxWithPrimitiveOutline`
    Box,
    /// `BoxWithPrimitiveOutlineSharedVertices`
    BoxSharedVertices,
}

impl OutlinePreset {
    pub fn name(self) -> &'static str {
        match self {
            OutlinePreset::Box => "box",
            OutlinePreset::BoxSharedVertices => "box-shared-vertices",
        }
    }

    pub fn triangulation(self) -> Triangulation {
        match self {
            OutlinePreset::Box => Triangulation::DiagonalAC,
            OutlinePreset::BoxSharedVertices => Triangulation::DiagonalBD,
        }
    }

    pub fn indices(self) -> &'static [u32] {
        match self {
            OutlinePreset::Box => &BOX_WITH_PRIMITIVE_OUTLINE,
            OutlinePreset::BoxSharedVertices => &BOX_WITH_PRIMITIVE_OUTLINE_SHARED_VERTICES,
        }
    }

    pub fn builder(self) -> OutlineBuilder {
        OutlineBuilder::new().group(self.triangulation(), self.indices())
    }
}
