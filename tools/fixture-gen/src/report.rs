//! Out-of-band description of a generated buffer
//!
//! The binary files carry no header, so whoever writes the referencing glTF
//! document needs the offsets and lengths reported separately.

use std::fmt;
use std::path::{Path, PathBuf};

use gltf_json as json;
use serde::Serialize;

use crate::attributes::PropertyAttributeBuffer;
use crate::outline::{IndexWidth, OutlineBuffer};
use crate::section::BufferSection;

/// One named array inside a generated buffer
#[derive(Debug, Clone, Serialize)]
pub struct NamedSection {
    pub name: String,
    #[serde(flatten)]
    pub section: BufferSection,
    /// Index component width, for sections read through an index accessor
    #[serde(rename = "indexWidth", skip_serializing_if = "Option::is_none")]
    pub index_width: Option<IndexWidth>,
    /// glTF accessor `componentType` matching `index_width`
    #[serde(rename = "componentType", skip_serializing_if = "Option::is_none")]
    pub component_type: Option<u32>,
    #[serde(rename = "bufferView")]
    pub buffer_view: json::buffer::View,
}

impl NamedSection {
    fn new(name: &str, section: BufferSection, target: Option<json::buffer::Target>) -> Self {
        Self {
            name: name.to_string(),
            section,
            index_width: None,
            component_type: None,
            buffer_view: section.to_buffer_view(name, target),
        }
    }

    fn with_index_width(mut self, width: IndexWidth) -> Self {
        let component_type = match width {
            IndexWidth::U16 => json::accessor::ComponentType::U16,
            IndexWidth::U32 => json::accessor::ComponentType::U32,
        };
        self.index_width = Some(width);
        self.component_type = Some(component_type.as_gl_enum());
        self
    }
}

/// Everything a document author needs to reference one output file
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureReport {
    pub output: PathBuf,
    pub total_length: usize,
    pub sections: Vec<NamedSection>,
}

impl FixtureReport {
    pub fn outline(output: &Path, outline: &OutlineBuffer) -> Self {
        let section = BufferSection::new(0, outline.data.len());
        Self {
            output: output.to_path_buf(),
            total_length: section.length,
            sections: vec![
                NamedSection::new(
                    "Outline Edges",
                    section,
                    Some(json::buffer::Target::ElementArrayBuffer),
                )
                .with_index_width(outline.width),
            ],
        }
    }

    pub fn property_attributes(output: &Path, buffer: &PropertyAttributeBuffer) -> Self {
        Self {
            output: output.to_path_buf(),
            total_length: buffer.byte_length(),
            sections: vec![
                NamedSection::new(
                    "Warp Matrices",
                    buffer.matrices,
                    Some(json::buffer::Target::ArrayBuffer),
                ),
                NamedSection::new(
                    "Temperatures",
                    buffer.vectors,
                    Some(json::buffer::Target::ArrayBuffer),
                ),
            ],
        }
    }
}

impl fmt::Display for FixtureReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.output.display())?;
        for section in &self.sections {
            writeln!(f)?;
            writeln!(f, "{}", section.name)?;
            writeln!(f, "offset: {}", section.section.offset)?;
            writeln!(f, "length: {}", section.section.length)?;
            if let (Some(width), Some(component_type)) =
                (section.index_width, section.component_type)
            {
                writeln!(f, "component type: {width} ({component_type})")?;
            }
        }
        writeln!(f)?;
        write!(f, "Total length: {}", self.total_length)
    }
}
