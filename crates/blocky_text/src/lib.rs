//! Pixel-art block font rendering.
//!
//! Text is rasterized against a seven-row glyph table into colored unit
//! blocks, which are then serialized to SVG path elements (one per block, or
//! merged into one path per color) or painted onto an RGBA image.

mod font;
mod render;
mod theme;

use ::image::RgbaImage;

pub use font::{preview_lines, Cell, Glyph, GlyphTable, Tier, DEFAULT_GLYPH_WIDTH, GLYPH_ROWS};
pub use render::{
    block_to_svg_path, blocks_to_image, blocks_to_svg_paths, calculate_height, calculate_width,
    merge_blocks, optimize_blocks_to_svg_paths, parse_hex_color, text_to_blocks, Block, Rect,
};
pub use theme::{Palette, ThemeName, DARK, LIGHT};

const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

#[derive(Debug, thiserror::Error)]
pub enum BlockyError {
    #[error("unknown theme `{0}` (expected `light` or `dark`)")]
    UnknownTheme(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockyTextOptions {
    pub theme: ThemeName,
    /// Edge length of one block, in pixels.
    pub block_size: u32,
    /// Gap between characters, in pixels.
    pub char_spacing: u32,
    /// Merge blocks into one path per color.
    pub optimize: bool,
}

impl Default for BlockyTextOptions {
    fn default() -> Self {
        Self { theme: ThemeName::Dark, block_size: 6, char_spacing: 6, optimize: false }
    }
}

impl BlockyTextOptions {
    pub fn effective_block_size(&self) -> u32 {
        self.block_size.max(1)
    }
}

/// Render `text` as a standalone SVG document.
pub fn blocky_text_to_svg(text: &str, options: &BlockyTextOptions) -> String {
    let width = calculate_width(text, options);
    let height = calculate_height(options);
    let blocks = text_to_blocks(text, options);

    let block_size = options.effective_block_size();
    let paths = if options.optimize {
        optimize_blocks_to_svg_paths(&blocks, block_size)
    } else {
        blocks_to_svg_paths(&blocks, block_size)
    };

    let mut svg = format!(
        r#"<svg width="{width}" height="{height}" viewBox="0 0 {width} {height}" fill="none" xmlns="{SVG_NAMESPACE}">"#
    );
    svg.push('\n');
    if !paths.is_empty() {
        svg.push_str(&paths);
        svg.push('\n');
    }
    svg.push_str("</svg>\n");
    svg
}

/// Render `text` onto a transparent image sized like its SVG counterpart.
pub fn blocky_text_to_image(text: &str, options: &BlockyTextOptions) -> RgbaImage {
    let blocks = text_to_blocks(text, options);
    blocks_to_image(
        &blocks,
        calculate_width(text, options),
        calculate_height(options),
        options.effective_block_size(),
    )
}

#[cfg(test)]
pub(crate) mod test_log {
    use std::cell::RefCell;
    use std::sync::Once;

    use log::{Level, LevelFilter, Log, Metadata, Record};

    thread_local! {
        static RECORDS: RefCell<Vec<(Level, String)>> = const { RefCell::new(Vec::new()) };
    }

    struct CaptureLogger;

    impl Log for CaptureLogger {
        fn enabled(&self, _: &Metadata<'_>) -> bool {
            true
        }

        fn log(&self, record: &Record<'_>) {
            RECORDS.with(|records| {
                records.borrow_mut().push((record.level(), record.args().to_string()))
            });
        }

        fn flush(&self) {}
    }

    static LOGGER: CaptureLogger = CaptureLogger;
    static INIT: Once = Once::new();

    /// Run `f` and return what it logged on the current thread.
    pub fn capture<T>(f: impl FnOnce() -> T) -> (T, Vec<(Level, String)>) {
        INIT.call_once(|| {
            let _ = log::set_logger(&LOGGER);
            log::set_max_level(LevelFilter::Trace);
        });
        RECORDS.with(|records| records.borrow_mut().clear());
        let output = f();
        (output, RECORDS.with(|records| records.take()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_wraps_paths() {
        let svg = blocky_text_to_svg("I", &BlockyTextOptions::default());
        let mut lines = svg.lines();
        assert_eq!(
            lines.next(),
            Some(r#"<svg width="6" height="42" viewBox="0 0 6 42" fill="none" xmlns="http://www.w3.org/2000/svg">"#)
        );
        assert_eq!(lines.next(), Some(r##"<path d="M0 0H6V6H0V0Z" fill="#F1ECEC"/>"##));
        assert_eq!(svg.lines().last(), Some("</svg>"));
        assert_eq!(svg.matches("<path").count(), 7);
    }

    #[test]
    fn optimized_envelope_uses_one_path_per_color() {
        let options = BlockyTextOptions { optimize: true, ..BlockyTextOptions::default() };
        let svg = blocky_text_to_svg("I", &options);
        assert_eq!(svg.matches("<path").count(), 2);
        assert!(svg.contains(r##"<path d="M0 0H6V18H0V0ZM0 36H6V42H0V36Z" fill="#F1ECEC"/>"##));
        assert!(svg.contains(r##"<path d="M0 18H6V36H0V18Z" fill="#B7B1B1"/>"##));
    }

    #[test]
    fn empty_text_is_an_empty_document() {
        let svg = blocky_text_to_svg("", &BlockyTextOptions::default());
        assert!(svg.starts_with(r#"<svg width="0" height="42""#));
        assert!(!svg.contains("<path"));
    }

    #[test]
    fn oversized_blocks_still_render() {
        for optimize in [false, true] {
            let options = BlockyTextOptions {
                block_size: 1 << 29,
                char_spacing: 1 << 29,
                optimize,
                ..BlockyTextOptions::default()
            };
            let svg = blocky_text_to_svg("MM", &options);
            assert!(svg.contains(&format!(r#"height="{}""#, 7u32 << 29)));
            assert!(svg.contains("<path"));
            assert!(svg.ends_with("</svg>\n"));
        }
    }

    #[test]
    fn image_matches_svg_dimensions() {
        let image = blocky_text_to_image("HORDE", &BlockyTextOptions::default());
        assert_eq!(image.dimensions(), (5 * 24 + 4 * 6, 42));
    }
}
