pub mod bitmap;
pub mod measure;
pub mod optimize;
pub mod paths;
pub mod raster;

pub use bitmap::{blocks_to_image, parse_hex_color};
pub use measure::{calculate_height, calculate_width};
pub use optimize::{merge_blocks, optimize_blocks_to_svg_paths, Rect};
pub use paths::{block_to_svg_path, blocks_to_svg_paths};
pub use raster::{text_to_blocks, Block};
