use crate::manifest::{IconEntry, ManifestIcons};
use crate::raster::{
    apply_alpha_mask, draw_polyline, draw_rect_outline, draw_thick_line, rounded_rect_mask, Point,
};
use anyhow::{anyhow, bail, Context, Result};
use image::{
    codecs::png::PngEncoder, ColorType, ImageEncoder, Rgb, RgbImage, Rgba, RgbaImage,
};
use std::{
    fs::{create_dir_all, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
    str::FromStr,
};

/// Icon sizes required for the PWA
pub const ICON_SIZES: [u32; 8] = [72, 96, 128, 144, 152, 192, 384, 512];

/// Output directory, relative to the working directory
pub const OUTPUT_DIR: &str = "assets/icons";

/// Public URL of `OUTPUT_DIR` as served by the app
pub const ICON_URL_PREFIX: &str = "/assets/icons/";

/// Name of the manifest fragment written next to the icons
pub const MANIFEST_FILE: &str = "manifest-icons.json";

// Purple gradient matching the app theme
pub const GRADIENT_START: &str = "#7c3aed";
pub const GRADIENT_END: &str = "#6d28d9";

/// Corner radius as a fraction of the icon size
pub const CORNER_RADIUS_FRACTION: f32 = 0.18;

/// Edge length of the glyph design grid
pub const GLYPH_GRID: f32 = 24.0;

/// Fraction of the canvas covered by the glyph, centered
pub const GLYPH_COVERAGE: f32 = 0.5;

const GLYPH_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Result of generating one icon
#[derive(Debug)]
pub enum IconOutcome {
    Done {
        size: u32,
        path: PathBuf,
    },
    Failed {
        size: u32,
        file_name: String,
        error: anyhow::Error,
    },
}

/// Outcomes of one batch run, in the order the sizes were processed
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<IconOutcome>,
    /// Path of the manifest fragment, when it was written
    pub manifest: Option<PathBuf>,
}

impl BatchReport {
    /// Sizes and paths of the icons that were written
    pub fn written(&self) -> impl Iterator<Item = (u32, &Path)> + '_ {
        self.outcomes.iter().filter_map(|outcome| match outcome {
            IconOutcome::Done { size, path } => Some((*size, path.as_path())),
            IconOutcome::Failed { .. } => None,
        })
    }

    /// File names of the icons that failed
    pub fn failed(&self) -> impl Iterator<Item = &str> + '_ {
        self.outcomes.iter().filter_map(|outcome| match outcome {
            IconOutcome::Failed { file_name, .. } => Some(file_name.as_str()),
            IconOutcome::Done { .. } => None,
        })
    }

    pub fn is_complete(&self) -> bool {
        self.failed().next().is_none()
    }
}

/// Parse a CSS color into an opaque RGB pixel
pub fn parse_color(css: &str) -> Result<Rgb<u8>> {
    let color = css_color::Srgb::from_str(css).map_err(|_| anyhow!("Invalid color: {css}"))?;

    Ok(Rgb([
        (color.red * 255.).round() as u8,
        (color.green * 255.).round() as u8,
        (color.blue * 255.).round() as u8,
    ]))
}

/// Opaque square image with a vertical gradient from `start` (top row) towards `end`
pub fn paint_gradient(size: u32, start: Rgb<u8>, end: Rgb<u8>) -> RgbImage {
    let mut image = RgbImage::new(size, size);

    for y in 0..size {
        let ratio = y as f32 / size as f32;
        let row_color = Rgb([
            lerp_channel(start[0], end[0], ratio),
            lerp_channel(start[1], end[1], ratio),
            lerp_channel(start[2], end[2], ratio),
        ]);

        for x in 0..size {
            image.put_pixel(x, y, row_color);
        }
    }

    image
}

fn lerp_channel(start: u8, end: u8, ratio: f32) -> u8 {
    let start = start as f32;
    let end = end as f32;
    // truncates toward zero
    (start + (end - start) * ratio) as u8
}

/// Cut rounded corners out of a square image
///
/// The radius is `floor(size * radius_fraction)`. Color channels are kept,
/// alpha is 255 inside the rounded rectangle and 0 outside.
pub fn round_corners(image: RgbImage, radius_fraction: f32) -> Result<RgbaImage> {
    let size = image.width();
    let radius = (size as f32 * radius_fraction) as u32;

    let mask = rounded_rect_mask(size, image.height(), radius);
    apply_alpha_mask(&image, &mask)
}

/// Stroke width used for the glyph at the given grid scale
pub fn glyph_stroke_width(scale: f32) -> u32 {
    ((2.5 * scale / 10.0) as u32).max(2)
}

/// Draw the white line-art store glyph into the center half of the image
pub fn draw_store_glyph(image: &mut RgbaImage) {
    let size = image.width() as f32;
    let scale = size * GLYPH_COVERAGE / GLYPH_GRID;
    let offset = size * (1.0 - GLYPH_COVERAGE) / 2.0;
    let stroke = glyph_stroke_width(scale);

    let at = |gx: f32, gy: f32| -> Point { (offset + gx * scale, offset + gy * scale) };

    // Roof
    let roof = [at(12., 3.), at(2., 7.), at(22., 7.), at(12., 3.)];
    draw_polyline(image, &roof, stroke, GLYPH_COLOR);

    // Base
    draw_rect_outline(image, at(2., 7.), at(22., 21.), stroke, GLYPH_COLOR);

    // Supports
    for gx in [2., 22.] {
        draw_thick_line(image, at(gx, 7.), at(gx, 13.), stroke, GLYPH_COLOR);
    }

    // Door
    draw_rect_outline(image, at(9., 17.), at(15., 21.), stroke, GLYPH_COLOR);
}

/// Render one finished icon of `size` x `size` pixels
pub fn render_icon(size: u32) -> Result<RgbaImage> {
    if size == 0 {
        bail!("Icon size must be positive");
    }

    let start = parse_color(GRADIENT_START)?;
    let end = parse_color(GRADIENT_END)?;

    let background = paint_gradient(size, start, end);
    let mut icon = round_corners(background, CORNER_RADIUS_FRACTION)
        .with_context(|| format!("Failed to round corners of {size}x{size} icon"))?;
    draw_store_glyph(&mut icon);

    Ok(icon)
}

pub fn icon_file_name(size: u32) -> String {
    format!("icon-{size}x{size}.png")
}

/// Encode `image` as PNG and write it to `path`
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create PNG file {}", path.display()))?;
    let mut out_file = BufWriter::new(file);

    write_png(image, &mut out_file)?;
    out_file.flush().context("Failed to flush PNG")?;
    Ok(())
}

fn write_png<W: Write>(image: &RgbaImage, w: W) -> Result<()> {
    let encoder = PngEncoder::new(w);
    encoder
        .write_image(image.as_raw(), image.width(), image.height(), ColorType::Rgba8)
        .context("Failed to write PNG")?;
    Ok(())
}

/// Render and write one icon per size into `out_dir`
///
/// The directory (and missing parents) is created first; failing to do so is
/// the only fatal error. Each size is attempted independently: a failure is
/// reported and recorded, and the remaining sizes still run.
pub fn generate_batch<F>(out_dir: &Path, sizes: &[u32], mut render: F) -> Result<BatchReport>
where
    F: FnMut(u32) -> Result<RgbaImage>,
{
    create_dir_all(out_dir).with_context(|| {
        format!(
            "Can't create output directory {} (run from the project root and check write permissions)",
            out_dir.display()
        )
    })?;

    let mut report = BatchReport::default();

    for &size in sizes {
        let file_name = icon_file_name(size);
        let path = out_dir.join(&file_name);

        println!("⏳ Generating {file_name}...");

        let outcome = match render(size).and_then(|icon| save_png(&icon, &path)) {
            Ok(()) => {
                println!("✅ Saved {file_name}");
                IconOutcome::Done { size, path }
            }
            Err(error) => {
                println!("❌ Error generating {file_name}: {error:#}");
                IconOutcome::Failed {
                    size,
                    file_name,
                    error,
                }
            }
        };

        report.outcomes.push(outcome);
    }

    Ok(report)
}

/// Describe the written icons of `report` as a manifest `icons` list
pub fn build_manifest(report: &BatchReport) -> ManifestIcons {
    let mut manifest = ManifestIcons::new();

    let mut written: Vec<(u32, &Path)> = report.written().collect();
    written.sort_by_key(|(size, _)| *size);

    for (size, _) in written {
        manifest.add_icon(
            IconEntry::png(ICON_URL_PREFIX, &icon_file_name(size), size).with_purpose("any"),
        );
    }

    manifest
}

/// Generate the full icon set and its manifest fragment into `out_dir`
pub fn generate_icons(out_dir: &Path) -> Result<BatchReport> {
    let mut report = generate_batch(out_dir, &ICON_SIZES, render_icon)?;

    match build_manifest(&report).write_to_dir(out_dir, MANIFEST_FILE) {
        Ok(path) => {
            println!("✅ Saved {MANIFEST_FILE}");
            report.manifest = Some(path);
        }
        Err(error) => println!("❌ Error writing {MANIFEST_FILE}: {error:#}"),
    }

    Ok(report)
}

/// Entry point of the binary: generate everything into `OUTPUT_DIR`
pub fn run() -> Result<()> {
    let out_dir = Path::new(OUTPUT_DIR);

    println!("🎨 Generating PWA icons...");
    println!("📁 Output directory: {}", out_dir.display());
    println!();

    let report = generate_icons(out_dir)?;

    println!();
    if report.is_complete() {
        println!("🎉 All icons generated successfully!");
    } else {
        let failed: Vec<&str> = report.failed().collect();
        println!(
            "🎉 Icon generation finished, {} of {} written",
            report.written().count(),
            report.outcomes.len()
        );
        println!("⚠️  Failed: {}", failed.join(", "));
    }
    println!("📍 Icons saved in: {}", out_dir.display());

    Ok(())
}
