//! fixture-gen - glTF extension fixture buffer generator
//!
//! Writes `outlines.bin` (CESIUM_primitive_outline) and `metadata.bin`
//! (property attributes) and reports the offsets a glTF document needs.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

use fixture_gen::manifest::{FixtureManifest, manifest_dir};
use fixture_gen::{
    FixtureReport, IndexWidthMode, OutlinePreset, PropertyAttributeConfig,
    pack_seeded_property_attributes, write_atomic,
};

#[derive(Parser)]
#[command(name = "fixture-gen")]
#[command(about = "glTF extension fixture buffer generator")]
#[command(version)]
struct Cli {
    /// Print reports as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the boundary edges of a preset box mesh
    Outline {
        /// Mesh to outline
        #[arg(short, long, value_enum, default_value_t = PresetArg::Box)]
        preset: PresetArg,

        /// Output file
        #[arg(short, long, default_value = "outlines.bin")]
        output: PathBuf,

        /// Index component width
        #[arg(long, value_enum, default_value_t = WidthArg::U16)]
        index_width: WidthArg,
    },

    /// Write per-vertex warp matrices and samples
    Attributes {
        /// Output file
        #[arg(short, long, default_value = "metadata.bin")]
        output: PathBuf,

        /// Number of vertices
        #[arg(long, default_value_t = fixture_gen::attributes::VERTEX_COUNT)]
        vertex_count: usize,

        /// Sample source seed
        #[arg(long, default_value_t = fixture_gen::attributes::DEFAULT_SEED)]
        seed: u64,

        /// Scale factors cycled across vertices (default: 0.25 0.5 1 2 4)
        #[arg(long = "scale", num_args = 1..)]
        scales: Vec<f32>,
    },

    /// Build every fixture listed in a manifest
    Build {
        /// Path to fixtures.toml manifest
        #[arg(default_value = "fixtures.toml")]
        manifest: PathBuf,

        /// Output directory (defaults to the manifest's directory)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Validate manifest without building
    Check {
        /// Path to fixtures.toml manifest
        #[arg(default_value = "fixtures.toml")]
        manifest: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum PresetArg {
    Box,
    BoxSharedVertices,
}

impl From<PresetArg> for OutlinePreset {
    fn from(arg: PresetArg) -> Self {
        match arg {
            PresetArg::Box => OutlinePreset::Box,
            PresetArg::BoxSharedVertices => OutlinePreset::BoxSharedVertices,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum WidthArg {
    U16,
    U32,
    Auto,
}

impl From<WidthArg> for IndexWidthMode {
    fn from(arg: WidthArg) -> Self {
        match arg {
            WidthArg::U16 => IndexWidthMode::U16,
            WidthArg::U32 => IndexWidthMode::U32,
            WidthArg::Auto => IndexWidthMode::Auto,
        }
    }
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Outline {
            preset,
            output,
            index_width,
        } => {
            let preset = OutlinePreset::from(preset);
            tracing::info!("Outlining preset {} -> {:?}", preset.name(), output);
            let outline = preset.builder().build(index_width.into())?;
            write_atomic(&output, &outline.data)?;
            print_reports(&[FixtureReport::outline(&output, &outline)], cli.json)?;
        }

        Commands::Attributes {
            output,
            vertex_count,
            seed,
            scales,
        } => {
            let mut config = PropertyAttributeConfig {
                vertex_count,
                seed,
                ..Default::default()
            };
            if !scales.is_empty() {
                config.scale_options = scales;
            }
            tracing::info!(
                "Packing {} vertices (seed {}) -> {:?}",
                config.vertex_count,
                config.seed,
                output
            );
            let buffer = pack_seeded_property_attributes(&config)?;
            write_atomic(&output, &buffer.data)?;
            print_reports(
                &[FixtureReport::property_attributes(&output, &buffer)],
                cli.json,
            )?;
        }

        Commands::Build {
            manifest,
            output_dir,
        } => {
            tracing::info!("Building fixtures from {:?}", manifest);
            let config = FixtureManifest::load(&manifest)?;
            let output_dir = output_dir.unwrap_or_else(|| manifest_dir(&manifest));
            let reports = config.build_all(&output_dir)?;
            print_reports(&reports, cli.json)?;
            tracing::info!("Build complete!");
        }

        Commands::Check { manifest } => {
            check(&manifest)?;
        }
    }

    Ok(())
}

fn check(manifest: &Path) -> Result<()> {
    tracing::info!("Checking manifest {:?}", manifest);
    let config = FixtureManifest::load(manifest)?;
    config.validate()?;
    tracing::info!("Manifest is valid!");
    Ok(())
}

fn print_reports(reports: &[FixtureReport], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(reports)?);
    } else {
        for report in reports {
            println!("{report}\n");
        }
    }
    Ok(())
}
