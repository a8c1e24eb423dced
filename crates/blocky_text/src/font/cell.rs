use super::GLYPH_ROWS;

/// Shade used for a filled cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tier {
    Primary,
    Secondary,
    /// Darkest tone, used for the counters inside closed letters.
    Tertiary,
}

impl Tier {
    /// Tier implied by a cell's row when the glyph data does not name one.
    ///
    /// Rows 0-2 and the baseline row are primary, rows 3-5 secondary.
    pub fn for_row(row: usize) -> Self {
        match row {
            3..=5 => Tier::Secondary,
            _ => Tier::Primary,
        }
    }

    pub fn shade(self) -> char {
        match self {
            Tier::Primary => '█',
            Tier::Secondary => '▓',
            Tier::Tertiary => '▒',
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Cell {
    #[default]
    Blank,
    Filled(Tier),
}

impl Cell {
    /// Decode one pattern character at `row`.
    ///
    /// `#` is filled with the row's tier, `+` is an explicit tertiary cell and
    /// anything else is blank.
    pub fn from_pattern(ch: char, row: usize) -> Self {
        debug_assert!(row < GLYPH_ROWS);
        match ch {
            '#' => Cell::Filled(Tier::for_row(row)),
            '+' => Cell::Filled(Tier::Tertiary),
            _ => Cell::Blank,
        }
    }

    pub fn tier(self) -> Option<Tier> {
        match self {
            Cell::Blank => None,
            Cell::Filled(tier) => Some(tier),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_convention() {
        let tiers: Vec<Tier> = (0..GLYPH_ROWS).map(Tier::for_row).collect();
        assert_eq!(
            tiers,
            vec![
                Tier::Primary,
                Tier::Primary,
                Tier::Primary,
                Tier::Secondary,
                Tier::Secondary,
                Tier::Secondary,
                Tier::Primary,
            ]
        );
    }

    #[test]
    fn pattern_characters() {
        assert_eq!(Cell::from_pattern('#', 4), Cell::Filled(Tier::Secondary));
        assert_eq!(Cell::from_pattern('+', 0), Cell::Filled(Tier::Tertiary));
        assert_eq!(Cell::from_pattern('.', 2), Cell::Blank);
        assert_eq!(Cell::from_pattern(' ', 2), Cell::Blank);
    }
}
