//! Offset/length bookkeeping for arrays inside a combined buffer

use std::ops::Range;

use gltf_json as json;
use gltf_json::validation::Checked::Valid;
use serde::Serialize;

/// Where one logical array sits inside a buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BufferSection {
    pub offset: usize,
    pub length: usize,
}

impl BufferSection {
    pub const fn new(offset: usize, length: usize) -> Self {
        Self { offset, length }
    }

    /// First byte after the section
    pub const fn end(&self) -> usize {
        self.offset + self.length
    }

    pub fn range(&self) -> Range<usize> {
        self.offset..self.end()
    }

    /// Bytes of element `index` for fixed-size elements of `stride` bytes
    pub fn element<'a>(&self, data: &'a [u8], index: usize, stride: usize) -> Option<&'a [u8]> {
        let start = index.checked_mul(stride)?;
        let end = start.checked_add(stride)?;
        if end > self.length {
            return None;
        }
        data.get(self.offset + start..self.offset + end)
    }

    /// glTF `bufferView` describing this section of buffer 0
    pub fn to_buffer_view(
        &self,
        name: &str,
        target: Option<json::buffer::Target>,
    ) -> json::buffer::View {
        json::buffer::View {
            buffer: json::Index::new(0),
            byte_length: self.length.into(),
            byte_offset: Some((self.offset as u64).into()),
            byte_stride: None,
            extensions: Default::default(),
            extras: Default::default(),
            name: Some(name.to_string()),
            target: target.map(Valid),
        }
    }
}
