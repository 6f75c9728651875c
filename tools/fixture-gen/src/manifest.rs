//! fixtures.toml manifest parsing
//!
//! Lists every buffer to regenerate so a fixture corpus can be rebuilt in one
//! command. Output paths are relative to the manifest's directory unless an
//! output directory is given.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::attributes::{
    DEFAULT_SEED, PropertyAttributeConfig, SCALE_OPTIONS, VERTEX_COUNT,
    pack_seeded_property_attributes,
};
use crate::outline::{IndexWidthMode, OutlineBuilder, Triangulation};
use crate::presets::OutlinePreset;
use crate::report::FixtureReport;
use crate::writer::write_atomic;

/// fixtures.toml manifest structure
#[derive(Debug, Default, Deserialize)]
pub struct FixtureManifest {
    #[serde(default)]
    pub outline: Vec<OutlineEntry>,
    #[serde(default)]
    pub property_attributes: Vec<PropertyAttributeEntry>,
}

/// One outline buffer
#[derive(Debug, Deserialize)]
pub struct OutlineEntry {
    pub output: PathBuf,

    /// Built-in mesh to outline. Mutually exclusive with `groups`.
    #[serde(default)]
    pub preset: Option<OutlinePreset>,

    /// Index component width (u16, u32 or auto).
    /// Default: u16
    #[serde(default)]
    pub index_width: IndexWidthMode,

    #[serde(default)]
    pub groups: Vec<GroupEntry>,
}

/// Explicit run of quads in an outline entry
#[derive(Debug, Deserialize)]
pub struct GroupEntry {
    pub triangulation: Triangulation,
    pub indices: Vec<u32>,
}

/// One property attribute buffer
#[derive(Debug, Deserialize)]
pub struct PropertyAttributeEntry {
    pub output: PathBuf,

    /// Default: 24
    #[serde(default = "default_vertex_count")]
    pub vertex_count: usize,

    /// Default: [0.25, 0.5, 1.0, 2.0, 4.0]
    #[serde(default = "default_scale_options")]
    pub scale_options: Vec<f32>,

    /// Default: 2022
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_vertex_count() -> usize {
    VERTEX_COUNT
}

fn default_scale_options() -> Vec<f32> {
    SCALE_OPTIONS.to_vec()
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

impl OutlineEntry {
    /// Builder holding either the preset or the explicit groups
    pub fn builder(&self) -> Result<OutlineBuilder> {
        match (self.preset, self.groups.is_empty()) {
            (Some(preset), true) => Ok(preset.builder()),
            (None, false) => Ok(self
                .groups
                .iter()
                .fold(OutlineBuilder::new(), |builder, group| {
                    builder.group(group.triangulation, &group.indices)
                })),
            (Some(_), false) => bail!(
                "outline {} sets both a preset and explicit groups",
                self.output.display()
            ),
            (None, true) => bail!(
                "outline {} needs a preset or at least one group",
                self.output.display()
            ),
        }
    }
}

impl PropertyAttributeEntry {
    pub fn config(&self) -> PropertyAttributeConfig {
        PropertyAttributeConfig {
            vertex_count: self.vertex_count,
            scale_options: self.scale_options.clone(),
            seed: self.seed,
        }
    }
}

impl FixtureManifest {
    /// Load manifest from file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest: {}", path.display()))?;
        Self::parse(&content)
    }

    /// Parse manifest from string
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse fixtures.toml")
    }

    /// Check every entry by generating it in memory, without writing anything
    pub fn validate(&self) -> Result<()> {
        self.generate(Path::new(".")).map(|_| ())
    }

    /// Generate and write every fixture, returning one report per file.
    ///
    /// Every buffer is generated before the first write, so a failing entry
    /// leaves no output on disk.
    pub fn build_all(&self, output_dir: &Path) -> Result<Vec<FixtureReport>> {
        let fixtures = self.generate(output_dir)?;

        let mut reports = Vec::with_capacity(fixtures.len());
        for fixture in fixtures {
            write_atomic(&fixture.report.output, &fixture.data)?;
            reports.push(fixture.report);
        }
        Ok(reports)
    }

    fn generate(&self, output_dir: &Path) -> Result<Vec<GeneratedFixture>> {
        if self.outline.is_empty() && self.property_attributes.is_empty() {
            bail!("manifest declares no fixtures");
        }

        let mut fixtures = Vec::with_capacity(self.outline.len() + self.property_attributes.len());

        for entry in &self.outline {
            let path = output_dir.join(&entry.output);
            let outline = entry
                .builder()?
                .build(entry.index_width)
                .with_context(|| format!("Failed to build outline {}", path.display()))?;
            fixtures.push(GeneratedFixture {
                report: FixtureReport::outline(&path, &outline),
                data: outline.data,
            });
        }

        for entry in &self.property_attributes {
            let path = output_dir.join(&entry.output);
            let buffer = pack_seeded_property_attributes(&entry.config()).with_context(|| {
                format!("Failed to build property attributes {}", path.display())
            })?;
            fixtures.push(GeneratedFixture {
                report: FixtureReport::property_attributes(&path, &buffer),
                data: buffer.data,
            });
        }

        Ok(fixtures)
    }
}

/// A buffer generated in memory, waiting to be written
struct GeneratedFixture {
    data: Vec<u8>,
    report: FixtureReport,
}

/// Directory output paths resolve against when none is given
pub fn manifest_dir(manifest: &Path) -> PathBuf {
    match manifest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"
[[outline]]
output = "BoxWithPrimitiveOutline/outlines.bin"
preset = "box"

[[outline]]
output = "custom/outlines.bin"
index_width = "auto"

[[outline.groups]]
triangulation = "diagonal-ac"
indices = [0, 1, 2, 0, 3, 1]

[[outline.groups]]
triangulation = "diagonal-bd"
indices = [4, 5, 6, 4, 6, 7]

[[property_attributes]]
output = "metadata.bin"
"#;

    #[test]
    fn test_parse_manifest() {
        let manifest = FixtureManifest::parse(MANIFEST).unwrap();
        assert_eq!(manifest.outline.len(), 2);
        assert_eq!(manifest.outline[0].preset, Some(OutlinePreset::Box));
        assert_eq!(manifest.outline[0].index_width, IndexWidthMode::U16);
        assert_eq!(manifest.outline[1].index_width, IndexWidthMode::Auto);
        assert_eq!(
            manifest.outline[1].groups[1].triangulation,
            Triangulation::DiagonalBD
        );

        let attributes = &manifest.property_attributes[0];
        assert_eq!(attributes.config(), PropertyAttributeConfig::default());
        manifest.validate().unwrap();
    }

    #[test]
    fn test_preset_and_groups_conflict() {
        let manifest = FixtureManifest::parse(
            r#"
[[outline]]
output = "a.bin"
preset = "box-shared-vertices"

[[outline.groups]]
triangulation = "diagonal-ac"
indices = [0, 1, 2, 0, 3, 1]
"#,
        )
        .unwrap();
        assert!(manifest.validate().is_err());
    }

    #[test]
    fn test_malformed_group_fails_validation() {
        let manifest = FixtureManifest::parse(
            r#"
[[outline]]
output = "a.bin"

[[outline.groups]]
triangulation = "diagonal-bd"
indices = [0, 1, 2, 0]
"#,
        )
        .unwrap();
        let err = manifest.validate().unwrap_err();
        assert!(format!("{err:#}").contains("not a multiple of 6"));
    }

    #[test]
    fn test_empty_manifest_is_rejected() {
        let manifest = FixtureManifest::parse("").unwrap();
        assert!(manifest.validate().is_err());
    }

    #[test]
    fn test_build_all_writes_files() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = FixtureManifest::parse(MANIFEST).unwrap();
        let reports = manifest.build_all(dir.path()).unwrap();

        assert_eq!(reports.len(), 3);
        let outline =
            std::fs::read(dir.path().join("BoxWithPrimitiveOutline/outlines.bin")).unwrap();
        assert_eq!(outline.len(), 96);
        let custom = std::fs::read(dir.path().join("custom/outlines.bin")).unwrap();
        assert_eq!(custom.len(), 32);
        let metadata = std::fs::read(dir.path().join("metadata.bin")).unwrap();
        assert_eq!(metadata.len(), 864);
        assert_eq!(reports[2].total_length, 864);
    }

    const OVERFLOWING_MANIFEST: &str = r#"
[[outline]]
output = "good.bin"
preset = "box"

[[outline]]
output = "big.bin"

[[outline.groups]]
triangulation = "diagonal-ac"
indices = [0, 70000, 2, 0, 3, 70000]
"#;

    #[test]
    fn test_index_overflow_fails_validation() {
        let manifest = FixtureManifest::parse(OVERFLOWING_MANIFEST).unwrap();
        let err = manifest.validate().unwrap_err();
        assert!(format!("{err:#}").contains("vertex index 70000 does not fit in u16"));
    }

    #[test]
    fn test_failed_build_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = FixtureManifest::parse(OVERFLOWING_MANIFEST).unwrap();

        assert!(manifest.build_all(dir.path()).is_err());
        assert!(!dir.path().join("good.bin").exists());
        assert!(!dir.path().join("big.bin").exists());
    }

    #[test]
    fn test_auto_width_accepts_large_indices() {
        let manifest = FixtureManifest::parse(
            r#"
[[outline]]
output = "big.bin"
index_width = "auto"

[[outline.groups]]
triangulation = "diagonal-ac"
indices = [0, 70000, 2, 0, 3, 70000]
"#,
        )
        .unwrap();
        manifest.validate().unwrap();
    }

    #[test]
    fn test_manifest_dir() {
        assert_eq!(manifest_dir(Path::new("fixtures.toml")), PathBuf::from("."));
        assert_eq!(
            manifest_dir(Path::new("Models/fixtures.toml")),
            PathBuf::from("Models")
        );
    }
}
