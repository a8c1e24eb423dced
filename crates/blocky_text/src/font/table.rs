use std::collections::HashMap;
use std::sync::LazyLock;

use super::glyph::Glyph;
use super::GLYPH_ROWS;

/// Pattern source for the standard font: `#` filled, `+` counter, `.` blank.
const PATTERNS: &[(char, [&str; GLYPH_ROWS])] = &[
    ('A', [".##.", "#++#", "#++#", "####", "#..#", "#..#", "#..#"]),
    ('B', ["###.", "#++#", "#++#", "###.", "#++#", "#++#", "###."]),
    ('C', [".###", "#...", "#...", "#...", "#...", "#...", ".###"]),
    ('D', ["###.", "#++#", "#++#", "#++#", "#++#", "#++#", "###."]),
    ('E', ["####", "#...", "#...", "###.", "#...", "#...", "####"]),
    ('F', ["####", "#...", "#...", "###.", "#...", "#...", "#..."]),
    ('G', [".###", "#...", "#...", "#.##", "#..#", "#..#", ".###"]),
    ('H', ["#..#", "#..#", "#..#", "####", "#..#", "#..#", "#..#"]),
    ('I', ["#", "#", "#", "#", "#", "#", "#"]),
    ('J', ["...#", "...#", "...#", "...#", "...#", "#..#", ".##."]),
    ('K', ["#..#", "#.#.", "##..", "##..", "#.#.", "#..#", "#..#"]),
    ('L', ["#...", "#...", "#...", "#...", "#...", "#...", "####"]),
    ('M', ["#...#", "##.##", "#.#.#", "#...#", "#...#", "#...#", "#...#"]),
    ('N', ["#..#", "##.#", "##.#", "#.##", "#.##", "#..#", "#..#"]),
    ('O', [".##.", "#++#", "#++#", "#++#", "#++#", "#++#", ".##."]),
    ('P', ["###.", "#++#", "#++#", "###.", "#...", "#...", "#..."]),
    ('Q', [".##.", "#++#", "#++#", "#++#", "#++#", ".##.", "...#"]),
    ('R', ["###.", "#++#", "#++#", "###.", "#.#.", "#..#", "#..#"]),
    ('S', [".###", "#...", "#...", ".##.", "...#", "...#", "###."]),
    ('T', ["###", ".#.", ".#.", ".#.", ".#.", ".#.", ".#."]),
    ('U', ["#..#", "#..#", "#..#", "#..#", "#..#", "#..#", ".##."]),
    ('V', ["#...#", "#...#", "#...#", "#...#", ".#.#.", ".#.#.", "..#.."]),
    ('W', ["#...#", "#...#", "#...#", "#.#.#", "#.#.#", "##.##", "#...#"]),
    ('X', ["#...#", "#...#", ".#.#.", "..#..", ".#.#.", "#...#", "#...#"]),
    ('Y', ["#...#", "#...#", ".#.#.", "..#..", "..#..", "..#..", "..#.."]),
    ('Z', ["####", "...#", "...#", "..#.", ".#..", "#...", "####"]),
    ('-', ["...", "...", "...", "###", "...", "...", "..."]),
    ('|', ["#", "#", "#", "#", "#", "#", "#"]),
    ('\'', ["#", "#", ".", ".", ".", ".", "."]),
    ('"', ["#.#", "#.#", "...", "...", "...", "...", "..."]),
    ('?', [".##.", "#..#", "...#", "..#.", ".#..", "....", ".#.."]),
    ('!', ["#", "#", "#", "#", "#", ".", "#"]),
];

static STANDARD: LazyLock<GlyphTable> = LazyLock::new(GlyphTable::from_patterns);

/// Lookup from character to glyph.
#[derive(Debug)]
pub struct GlyphTable {
    glyphs: HashMap<char, Glyph>,
}

impl GlyphTable {
    /// The built-in font: A-Z plus `- | ' " ? !`.
    pub fn standard() -> &'static GlyphTable {
        &STANDARD
    }

    fn from_patterns() -> Self {
        let glyphs =
            PATTERNS.iter().map(|(ch, pattern)| (*ch, Glyph::from_pattern(*pattern))).collect();
        Self { glyphs }
    }

    /// Glyph for `ch`, matched case-insensitively.
    pub fn get(&self, ch: char) -> Option<&Glyph> {
        self.glyphs.get(&ch.to_ascii_uppercase())
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Supported characters in font order (letters first, then symbols).
    pub fn characters(&self) -> impl Iterator<Item = char> + '_ {
        PATTERNS.iter().map(|(ch, _)| *ch).filter(|ch| self.glyphs.contains_key(ch))
    }
}
