use std::fmt::Write;

use super::raster::Block;

/// Append the outline of an axis-aligned rectangle to path data.
pub(crate) fn push_rect_data(data: &mut String, x: u32, y: u32, width: u32, height: u32) {
    // Writing into a String cannot fail.
    let _ = write!(
        data,
        "M{x} {y}H{}V{}H{x}V{y}Z",
        x.saturating_add(width),
        y.saturating_add(height)
    );
}

pub fn block_to_svg_path(block: &Block, block_size: u32) -> String {
    let mut data = String::new();
    push_rect_data(&mut data, block.x, block.y, block_size, block_size);
    format!(r#"<path d="{data}" fill="{}"/>"#, block.color)
}

/// One `<path>` per block, in input order, separated by newlines.
pub fn blocks_to_svg_paths(blocks: &[Block], block_size: u32) -> String {
    blocks.iter().map(|block| block_to_svg_path(block, block_size)).collect::<Vec<_>>().join("\n")
}
