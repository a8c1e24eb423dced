use super::paths::push_rect_data;
use super::raster::Block;

/// A run of same-colored blocks merged into one rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub color: &'static str,
}

impl Rect {
    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

/// Merge blocks into rectangles, color by color.
///
/// Blocks are first joined into horizontal runs, then runs sharing `x` and
/// `width` are stacked vertically. Colors come out in order of first
/// appearance.
pub fn merge_blocks(blocks: &[Block], block_size: u32) -> Vec<Rect> {
    group_by_color(blocks)
        .into_iter()
        .flat_map(|(color, group)| merge_columns(merge_rows(group, color, block_size)))
        .collect()
}

/// Like [`blocks_to_svg_paths`](super::blocks_to_svg_paths), but emits at most
/// one `<path>` per color.
pub fn optimize_blocks_to_svg_paths(blocks: &[Block], block_size: u32) -> String {
    let rects = merge_blocks(blocks, block_size);

    let mut paths: Vec<(&'static str, String)> = Vec::new();
    for rect in &rects {
        let index = match paths.iter().position(|(color, _)| *color == rect.color) {
            Some(index) => index,
            None => {
                paths.push((rect.color, String::new()));
                paths.len() - 1
            },
        };
        push_rect_data(&mut paths[index].1, rect.x, rect.y, rect.width, rect.height);
    }

    paths
        .into_iter()
        .map(|(color, data)| format!(r#"<path d="{data}" fill="{color}"/>"#))
        .collect::<Vec<_>>()
        .join("\n")
}

fn group_by_color(blocks: &[Block]) -> Vec<(&'static str, Vec<Block>)> {
    let mut groups: Vec<(&'static str, Vec<Block>)> = Vec::new();
    for block in blocks {
        match groups.iter_mut().find(|(color, _)| *color == block.color) {
            Some((_, group)) => group.push(*block),
            None => groups.push((block.color, vec![*block])),
        }
    }
    groups
}

fn merge_rows(mut blocks: Vec<Block>, color: &'static str, block_size: u32) -> Vec<Rect> {
    blocks.sort_by_key(|block| (block.y, block.x));

    let mut rects: Vec<Rect> = Vec::new();
    let mut current: Option<Rect> = None;

    for block in blocks {
        match current.as_mut() {
            Some(rect) if rect.y == block.y && rect.x.saturating_add(rect.width) == block.x => {
                rect.width = rect.width.saturating_add(block_size);
            },
            _ => {
                rects.extend(current.take());
                current = Some(Rect {
                    x: block.x,
                    y: block.y,
                    width: block_size,
                    height: block_size,
                    color,
                });
            },
        }
    }

    rects.extend(current);
    rects
}

fn merge_columns(mut runs: Vec<Rect>) -> Vec<Rect> {
    runs.sort_by_key(|rect| (rect.x, rect.y));

    let mut rects: Vec<Rect> = Vec::new();
    let mut current: Option<Rect> = None;

    for run in runs {
        match current.as_mut() {
            Some(rect)
                if rect.x == run.x
                    && rect.width == run.width
                    && rect.y.saturating_add(rect.height) == run.y =>
            {
                rect.height = rect.height.saturating_add(run.height);
            },
            _ => {
                rects.extend(current.take());
                current = Some(run);
            },
        }
    }

    rects.extend(current);
    rects
}
