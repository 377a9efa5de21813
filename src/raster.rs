//! Pixel-level drawing primitives on top of `image` buffers.
//!
//! The `image` crate only provides buffers and codecs, so stroked lines,
//! rectangle outlines and the rounded-rectangle mask are drawn here with
//! plain pixel loops.

use anyhow::{bail, Result};
use image::{GrayImage, ImageBuffer, Luma, Rgba, RgbImage, RgbaImage};

/// A point in canvas space (pixels, fractional).
pub type Point = (f32, f32);

/// Draw a straight line of the given stroke width.
///
/// A pixel is painted when its center lies within `width / 2` of the segment,
/// which gives round caps and joins when segments are chained.
pub fn draw_thick_line(img: &mut RgbaImage, from: Point, to: Point, width: u32, color: Rgba<u8>) {
    let half = width.max(1) as f32 / 2.0;

    let min_x = from.0.min(to.0) - half;
    let max_x = from.0.max(to.0) + half;
    let min_y = from.1.min(to.1) - half;
    let max_y = from.1.max(to.1) + half;

    let Some((x0, x1)) = clip_span(min_x, max_x, img.width()) else {
        return;
    };
    let Some((y0, y1)) = clip_span(min_y, max_y, img.height()) else {
        return;
    };

    for y in y0..=y1 {
        for x in x0..=x1 {
            let center = (x as f32 + 0.5, y as f32 + 0.5);
            if distance_to_segment(center, from, to) <= half {
                img.put_pixel(x, y, color);
            }
        }
    }
}

/// Draw a chain of connected line segments through `points`.
pub fn draw_polyline(img: &mut RgbaImage, points: &[Point], width: u32, color: Rgba<u8>) {
    for segment in points.windows(2) {
        draw_thick_line(img, segment[0], segment[1], width, color);
    }
}

/// Draw the outline of the box spanning `top_left` to `bottom_right` (inclusive).
///
/// The stroke grows inward from the box edges, so the outer bounds of the
/// outline never exceed the box itself.
pub fn draw_rect_outline(
    img: &mut RgbaImage,
    top_left: Point,
    bottom_right: Point,
    width: u32,
    color: Rgba<u8>,
) {
    let x0 = top_left.0.round() as i64;
    let y0 = top_left.1.round() as i64;
    let x1 = bottom_right.0.round() as i64;
    let y1 = bottom_right.1.round() as i64;
    let w = width.max(1) as i64;

    for y in y0.max(0)..=y1.min(img.height() as i64 - 1) {
        for x in x0.max(0)..=x1.min(img.width() as i64 - 1) {
            let on_edge = x < x0 + w || x > x1 - w || y < y0 + w || y > y1 - w;
            if on_edge {
                img.put_pixel(x as u32, y as u32, color);
            }
        }
    }
}

/// Build a single-channel mask that is 255 inside a rounded rectangle covering
/// the whole `width` x `height` canvas and 0 outside it.
///
/// Corners are quarter circles of `radius` pixels; a pixel counts as inside
/// when its center does.
pub fn rounded_rect_mask(width: u32, height: u32, radius: u32) -> GrayImage {
    let w = width as f32;
    let h = height as f32;
    let r = (radius as f32).min(w / 2.0).min(h / 2.0);

    ImageBuffer::from_fn(width, height, |x, y| {
        let cx = x as f32 + 0.5;
        let cy = y as f32 + 0.5;

        // Nearest point of the inner rectangle whose dilation by `r` is the
        // rounded rectangle.
        let qx = cx.clamp(r, w - r);
        let qy = cy.clamp(r, h - r);
        let dx = cx - qx;
        let dy = cy - qy;

        if dx * dx + dy * dy <= r * r {
            Luma([255])
        } else {
            Luma([0])
        }
    })
}

/// Combine an opaque RGB image with a mask, producing RGBA where the color
/// channels are kept and alpha comes from the mask.
pub fn apply_alpha_mask(rgb: &RgbImage, mask: &GrayImage) -> Result<RgbaImage> {
    if rgb.dimensions() != mask.dimensions() {
        bail!(
            "Mask is {}x{} but the image is {}x{}",
            mask.width(),
            mask.height(),
            rgb.width(),
            rgb.height()
        );
    }

    Ok(ImageBuffer::from_fn(rgb.width(), rgb.height(), |x, y| {
        let [r, g, b] = rgb.get_pixel(x, y).0;
        let [alpha] = mask.get_pixel(x, y).0;
        Rgba([r, g, b, alpha])
    }))
}

fn distance_to_segment(p: Point, a: Point, b: Point) -> f32 {
    let (abx, aby) = (b.0 - a.0, b.1 - a.1);
    let (apx, apy) = (p.0 - a.0, p.1 - a.1);
    let len_sq = abx * abx + aby * aby;

    let t = if len_sq == 0.0 {
        0.0
    } else {
        ((apx * abx + apy * aby) / len_sq).clamp(0.0, 1.0)
    };

    let dx = apx - abx * t;
    let dy = apy - aby * t;
    (dx * dx + dy * dy).sqrt()
}

/// Clip a fractional span to pixel indices `[0, limit)`.
fn clip_span(min: f32, max: f32, limit: u32) -> Option<(u32, u32)> {
    if limit == 0 || max < 0.0 || min >= limit as f32 {
        return None;
    }
    let start = min.floor().max(0.0) as u32;
    let end = (max.ceil() as u32).min(limit - 1);
    Some((start, end))
}
