use super::raster::{advance, layout_chars};
use crate::font::{Glyph, GlyphTable, DEFAULT_GLYPH_WIDTH, GLYPH_ROWS};
use crate::BlockyTextOptions;

/// Pixel width of `text`, without spacing after the last character.
///
/// Each glyph contributes its own column count; characters missing from the
/// font count as the default width, exactly as the rasterizer lays them out.
pub fn calculate_width(text: &str, options: &BlockyTextOptions) -> u32 {
    let table = GlyphTable::standard();
    let mut width: u32 = 0;
    let mut any = false;

    for ch in layout_chars(text) {
        let columns = table.get(ch).map_or(DEFAULT_GLYPH_WIDTH, Glyph::width);
        width = width.saturating_add(advance(columns, options));
        any = true;
    }

    if any {
        width.saturating_sub(options.char_spacing)
    } else {
        0
    }
}

pub fn calculate_height(options: &BlockyTextOptions) -> u32 {
    (GLYPH_ROWS as u32).saturating_mul(options.effective_block_size())
}
