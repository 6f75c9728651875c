//! Integration tests for fixture-gen
//!
//! Runs the binary end to end and checks the files it leaves behind.

use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

fn fixture_gen(args: &[&str], cwd: &Path) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_fixture-gen"))
        .args(args)
        .current_dir(cwd)
        .output()
        .expect("Failed to run fixture-gen")
}

fn read_u16s(bytes: &[u8]) -> Vec<u16> {
    bytes
        .chunks_exact(2)
        .map(|b| u16::from_le_bytes([b[0], b[1]]))
        .collect()
}

/// Test the separate-vertex box outline
#[test]
fn test_outline_box_preset() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output = fixture_gen(&["outline", "-o", "outlines.bin"], dir.path());
    assert!(output.status.success(), "outline command failed");

    let data = std::fs::read(dir.path().join("outlines.bin")).expect("Failed to read outline");
    assert_eq!(data.len(), 96);

    let indices = read_u16s(&data);
    assert_eq!(&indices[..8], &[0, 3, 3, 1, 1, 2, 2, 0]);
    assert_eq!(&indices[88..], &[20, 23, 23, 21, 21, 22, 22, 20]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Total length: 96"));
}

/// Test the shared-vertex box outline with 32-bit indices
#[test]
fn test_outline_shared_vertices_u32() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output = fixture_gen(
        &[
            "outline",
            "--preset",
            "box-shared-vertices",
            "--index-width",
            "u32",
            "-o",
            "wide.bin",
        ],
        dir.path(),
    );
    assert!(output.status.success(), "outline command failed");

    let data = std::fs::read(dir.path().join("wide.bin")).expect("Failed to read outline");
    assert_eq!(data.len(), 192);
    assert_eq!(&data[..8], &[0, 0, 0, 0, 4, 0, 0, 0]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("component type: u32 (5125)"));
}

/// Test the default property attribute buffer
#[test]
fn test_attributes_default() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output = fixture_gen(&["--json", "attributes"], dir.path());
    assert!(output.status.success(), "attributes command failed");

    let data = std::fs::read(dir.path().join("metadata.bin")).expect("Failed to read metadata");
    assert_eq!(data.len(), 864);

    // vertex 5 wraps back to the first scale option
    let at = 5 * 32;
    let scale = f32::from_le_bytes([data[at], data[at + 1], data[at + 2], data[at + 3]]);
    assert_eq!(scale, 0.25);

    let reports: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("Report should be JSON");
    assert_eq!(reports[0]["totalLength"], 864);
    assert_eq!(reports[0]["sections"][1]["offset"], 768);
    assert_eq!(reports[0]["sections"][1]["length"], 96);
}

/// Test that regeneration is byte-identical
#[test]
fn test_attributes_are_reproducible() {
    let dir = tempdir().expect("Failed to create temp dir");
    for name in ["first.bin", "second.bin"] {
        let output = fixture_gen(&["attributes", "-o", name, "--seed", "99"], dir.path());
        assert!(output.status.success(), "attributes command failed");
    }

    let first = std::fs::read(dir.path().join("first.bin")).unwrap();
    let second = std::fs::read(dir.path().join("second.bin")).unwrap();
    assert_eq!(first, second);
}

/// Test zero vertices
#[test]
fn test_attributes_zero_vertices() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output = fixture_gen(&["attributes", "--vertex-count", "0"], dir.path());
    assert!(output.status.success(), "attributes command failed");

    let data = std::fs::read(dir.path().join("metadata.bin")).unwrap();
    assert!(data.is_empty());
}

/// Test manifest build and check
#[test]
fn test_build_manifest() {
    let dir = tempdir().expect("Failed to create temp dir");
    std::fs::write(
        dir.path().join("fixtures.toml"),
        r#"
[[outline]]
output = "BoxWithPrimitiveOutlineSharedVertices/outlines.bin"
preset = "box-shared-vertices"

[[property_attributes]]
output = "BoxTexturedWithPropertyAttributes/metadata.bin"
vertex_count = 4
scale_options = [3.0]
"#,
    )
    .unwrap();

    let check = fixture_gen(&["check"], dir.path());
    assert!(check.status.success(), "check command failed");

    let build = fixture_gen(&["build"], dir.path());
    assert!(build.status.success(), "build command failed");

    let outline_path = dir
        .path()
        .join("BoxWithPrimitiveOutlineSharedVertices/outlines.bin");
    let outline = std::fs::read(outline_path).unwrap();
    assert_eq!(outline.len(), 96);

    let metadata =
        std::fs::read(dir.path().join("BoxTexturedWithPropertyAttributes/metadata.bin")).unwrap();
    assert_eq!(metadata.len(), 36 * 4);
}

/// Test that a broken manifest fails and writes nothing
#[test]
fn test_build_rejects_malformed_manifest() {
    let dir = tempdir().expect("Failed to create temp dir");
    std::fs::write(
        dir.path().join("fixtures.toml"),
        r#"
[[outline]]
output = "bad.bin"

[[outline.groups]]
triangulation = "diagonal-ac"
indices = [0, 1, 2, 0, 3]
"#,
    )
    .unwrap();

    let build = fixture_gen(&["build"], dir.path());
    assert!(!build.status.success());
    assert!(!dir.path().join("bad.bin").exists());
}
