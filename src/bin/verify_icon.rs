use image::io::Reader as ImageReader;

fn main() {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "assets/icons/icon-512x512.png".to_string());

    let img = ImageReader::open(&path)
        .expect("Failed to open image")
        .decode()
        .expect("Failed to decode image");

    let rgba_img = img.to_rgba8();
    let width = img.width();
    let height = img.height();

    println!("Checking icon: {}", path);
    println!("Image dimensions: {}x{}", width, height);
    println!("Color type: {:?}", img.color());

    let corners = [
        (0, 0),
        (width - 1, 0),
        (0, height - 1),
        (width - 1, height - 1),
    ];
    let transparent_corners = corners
        .iter()
        .filter(|&&(x, y)| rgba_img.get_pixel(x, y)[3] == 0)
        .count();

    let center = rgba_img.get_pixel(width / 2, height / 2);
    println!(
        "\nCenter pixel (x={}, y={}): RGBA [{}, {}, {}, {}]",
        width / 2,
        height / 2,
        center[0],
        center[1],
        center[2],
        center[3]
    );
    println!("Transparent corners: {} of {}", transparent_corners, corners.len());

    // Glyph strokes are pure white
    let white_pixels = rgba_img
        .pixels()
        .filter(|p| p.0 == [255, 255, 255, 255])
        .count();
    println!("White glyph pixels: {}", white_pixels);

    if width == height && transparent_corners == corners.len() && center[3] == 255 && white_pixels > 0
    {
        println!("✓ Icon looks valid!");
    } else {
        println!("⚠ Icon may not be properly generated");
    }
}
