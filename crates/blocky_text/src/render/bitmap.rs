use image::{Rgba, RgbaImage};
use log::warn;

use super::raster::Block;

/// Parse `#RGB` or `#RRGGBB` into an opaque pixel.
pub fn parse_hex_color(color: &str) -> Option<Rgba<u8>> {
    let hex = color.strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }
    let channel = |digits: &str| u8::from_str_radix(digits, 16).ok();
    match hex.len() {
        3 => {
            let mut rgb = [0u8; 3];
            for (value, digit) in rgb.iter_mut().zip(hex.chars()) {
                let nibble = digit.to_digit(16)? as u8;
                *value = nibble * 17;
            }
            Some(Rgba([rgb[0], rgb[1], rgb[2], 255]))
        },
        6 => Some(Rgba([channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?, 255])),
        _ => None,
    }
}

/// Paint blocks onto a transparent `width` x `height` canvas.
///
/// Pixels falling outside the canvas are clipped.
pub fn blocks_to_image(blocks: &[Block], width: u32, height: u32, block_size: u32) -> RgbaImage {
    let mut canvas = RgbaImage::new(width, height);
    let block_size = block_size.max(1);

    for block in blocks {
        let Some(pixel) = parse_hex_color(block.color) else {
            warn!(
                "skipping block at ({}, {}) with unreadable color {}",
                block.x, block.y, block.color
            );
            continue;
        };

        let right = block.x.saturating_add(block_size).min(width);
        let bottom = block.y.saturating_add(block_size).min(height);
        for y in block.y..bottom {
            for x in block.x..right {
                canvas.put_pixel(x, y, pixel);
            }
        }
    }

    canvas
}
