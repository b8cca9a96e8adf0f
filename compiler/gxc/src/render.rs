//! Text rendering of pictures for the terminal.
//!
//! Pictures are layered on one grid, the first picture on top. Each layer
//! gets its own glyph.

use gx_ir::Picture;

const GLYPHS: &[char] = &['#', '+', 'o', '*', '=', '~', ':', '.'];
const EMPTY: char = ' ';
/// Grids larger than this are listed as coordinates instead.
const MAX_CELLS: i128 = 1 << 20;

/// Render `pictures` on a shared grid.
pub fn render_pictures(pictures: &[Picture]) -> String {
    let mut points = pictures.iter().flat_map(|p| p.points.iter());
    let Some(first) = points.next() else {
        return "(nothing to draw)\n".to_string();
    };
    let (mut min_x, mut max_x, mut min_y, mut max_y) = (first.x, first.x, first.y, first.y);
    for p in points {
        min_x = min_x.min(p.x);
        max_x = max_x.max(p.x);
        min_y = min_y.min(p.y);
        max_y = max_y.max(p.y);
    }

    let width = i128::from(max_x) - i128::from(min_x) + 1;
    let height = i128::from(max_y) - i128::from(min_y) + 1;
    if width * height > MAX_CELLS {
        return list_points(pictures);
    }
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss, reason = "bounded")]
    let (width, height) = (width as usize, height as usize);

    let mut grid = vec![vec![EMPTY; width]; height];
    for (layer, picture) in pictures.iter().enumerate().rev() {
        let glyph = GLYPHS[layer % GLYPHS.len()];
        for p in &*picture.points {
            #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss, reason = "bounded")]
            let (col, row) = (
                (i128::from(p.x) - i128::from(min_x)) as usize,
                (i128::from(p.y) - i128::from(min_y)) as usize,
            );
            grid[row][col] = glyph;
        }
    }

    let mut out = format!("origin ({min_x}, {min_y}), {width}x{height}\n");
    for row in grid {
        let line: String = row.into_iter().collect();
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

/// One line per picture: `picture 0: (x, y) (x, y)`.
pub fn list_points(pictures: &[Picture]) -> String {
    let mut out = String::new();
    for (i, picture) in pictures.iter().enumerate() {
        out.push_str(&format!("picture {i}:"));
        for p in &*picture.points {
            out.push_str(&format!(" ({}, {})", p.x, p.y));
        }
        out.push('\n');
    }
    out
}
