use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

const EXPECTED_SIZES: [u32; 8] = [72, 96, 128, 144, 152, 192, 384, 512];

/// Runs the binary from an empty working directory and checks that
/// `assets/icons/` ends up with exactly the eight expected PNGs.
#[test]
fn test_full_run_writes_all_icons() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let temp_path = temp_dir.path();

    let output = Command::new(env!("CARGO_BIN_EXE_store-icon-gen"))
        .current_dir(temp_path)
        .output()
        .expect("Failed to run store-icon-gen");

    if !output.status.success() {
        eprintln!("Command failed with status: {}", output.status);
        eprintln!("stdout: {}", String::from_utf8_lossy(&output.stdout));
        eprintln!("stderr: {}", String::from_utf8_lossy(&output.stderr));
        panic!("store-icon-gen command failed");
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("🎨 Generating PWA icons..."));
    assert!(stdout.contains("🎉 All icons generated successfully!"));

    let icons_dir = temp_path.join("assets").join("icons");
    assert!(icons_dir.is_dir(), "assets/icons should be created");

    let mut png_files: Vec<String> = std::fs::read_dir(&icons_dir)
        .expect("Failed to read output directory")
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".png"))
        .collect();
    png_files.sort();

    let mut expected: Vec<String> = EXPECTED_SIZES
        .iter()
        .map(|size| format!("icon-{size}x{size}.png"))
        .collect();
    expected.sort();

    assert_eq!(png_files, expected, "Exactly the eight icon files should be written");

    for size in EXPECTED_SIZES {
        assert_square_rgba_png(&icons_dir.join(format!("icon-{size}x{size}.png")), size);
        assert!(
            stdout.contains(&format!("✅ Saved icon-{size}x{size}.png")),
            "Progress line missing for size {size}"
        );
    }

    assert!(icons_dir.join("manifest-icons.json").exists());

    println!("✓ Integration test passed: {} icons generated", expected.len());
}

#[test]
fn test_help_flag() {
    let output = Command::new(env!("CARGO_BIN_EXE_store-icon-gen"))
        .arg("--help")
        .output()
        .expect("Failed to run store-icon-gen --help");

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("PWA icon set"));
}

#[test]
fn test_unknown_argument_is_rejected() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");

    let output = Command::new(env!("CARGO_BIN_EXE_store-icon-gen"))
        .arg("--sizes")
        .arg("64")
        .current_dir(temp_dir.path())
        .output()
        .expect("Failed to run store-icon-gen");

    assert!(!output.status.success());
    assert!(
        !temp_dir.path().join("assets").exists(),
        "Nothing should be generated when arguments are rejected"
    );
}

fn assert_square_rgba_png(path: &Path, size: u32) {
    assert!(path.exists(), "{} should exist", path.display());

    let icon = image::open(path).expect("Generated icon should be a decodable PNG");
    assert_eq!(icon.width(), size, "Width of {}", path.display());
    assert_eq!(icon.height(), size, "Height of {}", path.display());
    assert_eq!(icon.color(), image::ColorType::Rgba8);
}
