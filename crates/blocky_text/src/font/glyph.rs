use super::cell::Cell;
use super::GLYPH_ROWS;

/// One renderable character: seven rows of tagged cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Glyph {
    rows: [Vec<Cell>; GLYPH_ROWS],
}

impl Glyph {
    pub fn from_pattern(pattern: [&str; GLYPH_ROWS]) -> Self {
        let rows = std::array::from_fn(|row| {
            pattern[row].chars().map(|ch| Cell::from_pattern(ch, row)).collect()
        });
        Self { rows }
    }

    /// Column count, taken from the first row.
    pub fn width(&self) -> usize {
        self.rows[0].len()
    }

    /// Cell at `(row, column)`. Positions outside the row data read as blank.
    pub fn cell(&self, row: usize, column: usize) -> Cell {
        self.rows.get(row).and_then(|cells| cells.get(column)).copied().unwrap_or_default()
    }

    pub fn filled_cells(&self) -> usize {
        self.rows.iter().flatten().filter(|cell| cell.tier().is_some()).count()
    }
}
