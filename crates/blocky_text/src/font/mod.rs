mod cell;
mod glyph;
mod table;

pub use cell::{Cell, Tier};
pub use glyph::Glyph;
pub use table::GlyphTable;

/// Every glyph is exactly this many rows tall.
pub const GLYPH_ROWS: usize = 7;

/// Columns reserved for a character missing from the table.
pub const DEFAULT_GLYPH_WIDTH: usize = 4;

/// Draw `text` with shade characters, one string per glyph row.
///
/// Unsupported characters leave a blank slot of the default width.
pub fn preview_lines(text: &str, spacing_columns: usize) -> Vec<String> {
    let table = GlyphTable::standard();
    let mut lines = vec![String::new(); GLYPH_ROWS];

    for (index, ch) in text.chars().flat_map(char::to_uppercase).enumerate() {
        let glyph = table.get(ch);
        let width = glyph.map_or(DEFAULT_GLYPH_WIDTH, Glyph::width);

        for (row, line) in lines.iter_mut().enumerate() {
            if index > 0 {
                line.extend(std::iter::repeat(' ').take(spacing_columns));
            }
            for column in 0..width {
                let cell = glyph.map(|glyph| glyph.cell(row, column)).unwrap_or_default();
                line.push(cell.tier().map_or(' ', Tier::shade));
            }
        }
    }

    lines
}
