use log::warn;

use crate::font::{Glyph, GlyphTable, DEFAULT_GLYPH_WIDTH, GLYPH_ROWS};
use crate::theme::Palette;
use crate::BlockyTextOptions;

/// A filled unit square in pixel space.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Block {
    pub x: u32,
    pub y: u32,
    pub color: &'static str,
}

/// Characters in the order they are laid out.
pub(crate) fn layout_chars(text: &str) -> impl Iterator<Item = char> + '_ {
    text.chars().flat_map(char::to_uppercase)
}

/// Pixels reserved for a glyph `columns` wide, trailing spacing included.
pub(crate) fn advance(columns: usize, options: &BlockyTextOptions) -> u32 {
    (columns as u32)
        .saturating_mul(options.effective_block_size())
        .saturating_add(options.char_spacing)
}

/// Rasterize `text` into colored blocks, left to right.
///
/// Characters missing from the font are logged and leave an empty slot of the
/// default glyph width, so the rest of the line keeps its position.
pub fn text_to_blocks(text: &str, options: &BlockyTextOptions) -> Vec<Block> {
    let table = GlyphTable::standard();
    let palette = options.theme.palette();
    let block_size = options.effective_block_size();

    let mut blocks = Vec::new();
    let mut cursor: u32 = 0;

    for ch in layout_chars(text) {
        let Some(glyph) = table.get(ch) else {
            warn!("unsupported character {ch:?} in blocky text, leaving it blank");
            cursor = cursor.saturating_add(advance(DEFAULT_GLYPH_WIDTH, options));
            continue;
        };

        push_glyph(&mut blocks, glyph, cursor, block_size, palette);
        cursor = cursor.saturating_add(advance(glyph.width(), options));
    }

    blocks
}

fn push_glyph(
    blocks: &mut Vec<Block>,
    glyph: &Glyph,
    cursor: u32,
    block_size: u32,
    palette: &Palette,
) {
    let width = glyph.width();
    blocks.reserve(glyph.filled_cells());

    for row in 0..GLYPH_ROWS {
        for column in 0..width {
            if let Some(tier) = glyph.cell(row, column).tier() {
                blocks.push(Block {
                    x: cursor.saturating_add((column as u32).saturating_mul(block_size)),
                    y: (row as u32).saturating_mul(block_size),
                    color: palette.color(tier),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use log::Level;

    use super::*;
    use crate::test_log;
    use crate::theme::{ThemeName, DARK, LIGHT};

    fn options(block_size: u32, char_spacing: u32) -> BlockyTextOptions {
        BlockyTextOptions { block_size, char_spacing, ..BlockyTextOptions::default() }
    }

    #[test]
    fn every_supported_glyph_lands_on_the_grid() {
        let options = options(7, 7);
        for ch in GlyphTable::standard().characters() {
            let blocks = text_to_blocks(&ch.to_string(), &options);
            assert!(!blocks.is_empty(), "{ch:?} rendered nothing");
            for block in &blocks {
                assert_eq!(block.x % 7, 0, "{ch:?}: {block:?}");
                assert_eq!(block.y % 7, 0, "{ch:?}: {block:?}");
                assert!(block.y < 7 * 7);
            }
        }
    }

    #[test]
    fn empty_text_has_no_blocks() {
        assert!(text_to_blocks("", &BlockyTextOptions::default()).is_empty());
    }

    #[test]
    fn lowercase_matches_uppercase() {
        let options = BlockyTextOptions::default();
        assert_eq!(text_to_blocks("warcraft", &options), text_to_blocks("WARCRAFT", &options));
    }

    #[test]
    fn second_glyph_starts_after_width_and_spacing() {
        let blocks = text_to_blocks("II", &options(5, 3));
        let xs: Vec<u32> = blocks.iter().map(|block| block.x).collect();
        assert_eq!(xs.iter().filter(|&&x| x == 0).count(), 7);
        assert_eq!(xs.iter().filter(|&&x| x == 8).count(), 7);
    }

    #[test]
    fn colors_follow_tiers() {
        let blocks = text_to_blocks("I", &BlockyTextOptions::default());
        let colors: Vec<&str> = blocks.iter().map(|block| block.color).collect();
        assert_eq!(
            colors,
            vec![
                DARK.primary,
                DARK.primary,
                DARK.primary,
                DARK.secondary,
                DARK.secondary,
                DARK.secondary,
                DARK.primary,
            ]
        );

        let light = BlockyTextOptions { theme: ThemeName::Light, ..BlockyTextOptions::default() };
        let o = text_to_blocks("O", &light);
        assert!(o.iter().any(|block| block.color == LIGHT.tertiary));
    }

    #[test]
    fn unsupported_character_warns_once_and_keeps_slot() {
        let options = options(6, 6);
        let (blocks, records) = test_log::capture(|| text_to_blocks("$I", &options));

        let warnings: Vec<&String> = records
            .iter()
            .filter(|(level, _)| *level == Level::Warn)
            .map(|(_, message)| message)
            .collect();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains('$'));

        assert_eq!(blocks.len(), 7);
        assert!(blocks.iter().all(|block| block.x == 4 * 6 + 6));
    }

    #[test]
    fn huge_block_size_saturates_inside_the_measured_box() {
        let options = options(1 << 30, 0);
        let blocks = text_to_blocks("W", &options);
        let width = crate::calculate_width("W", &options);
        let height = crate::calculate_height(&options);

        assert_eq!(blocks.len(), GlyphTable::standard().get('W').map_or(0, Glyph::filled_cells));
        assert!(blocks.iter().all(|block| block.x <= width && block.y <= height));
        assert!(blocks.iter().any(|block| block.x == u32::MAX));
    }

    #[test]
    fn zero_block_size_is_clamped() {
        let blocks = text_to_blocks("I", &options(0, 0));
        assert_eq!(blocks.last().map(|block| block.y), Some(6));
    }
}
