//! Human-readable board rendering for diagnostics.
//!
//! The pretty renderer draws a maze-style box grid with 0-based row and
//! column headers, wall glyphs on cell borders, `.` for empty cells, and
//! decimal weights otherwise. Output is for eyeballs only and is never
//! parsed back.

use crate::puzzle::BoardState;

fn pad_center(text: &str, width: usize) -> String {
    if text.len() >= width {
        return text[..width.min(text.len())].to_string();
    }
    let left = (width - text.len()) / 2;
    let right = width - text.len() - left;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(right))
}

fn digits(n: usize) -> usize {
    n.to_string().len()
}

/// Render the board as a maze-style grid.
pub fn render_pretty(board: &BoardState) -> String {
    let rows = board.rows();
    let cols = board.cols();

    // Cell width auto-sizes to the largest weight or column label, min 3.
    let mut max_val = 1;
    for r in 0..rows as i32 {
        for c in 0..cols as i32 {
            max_val = max_val.max(board.get(r, c));
        }
    }
    let cell_w = 3usize
        .max(digits(max_val as usize))
        .max(digits(cols.saturating_sub(1)));
    let row_label_w = 2usize.max(digits(rows.saturating_sub(1)));

    let mut out = String::new();

    // Column header aligned to cell centers.
    out.push_str(&" ".repeat(row_label_w + 3));
    for c in 0..cols {
        out.push_str(&pad_center(&c.to_string(), cell_w));
        if c < cols - 1 {
            out.push(' ');
        }
    }
    out.push('\n');

    let full_border = |out: &mut String| {
        out.push_str(&" ".repeat(row_label_w + 2));
        out.push('+');
        for _ in 0..cols {
            out.push_str(&"-".repeat(cell_w));
            out.push('+');
        }
        out.push('\n');
    };
    full_border(&mut out);

    for r in 0..rows {
        // Content line: row label, then cells separated by wall glyphs.
        out.push_str(&format!("{:>width$} |", r, width = row_label_w));
        for c in 0..cols {
            let weight = board.get(r as i32, c as i32);
            let cell = if weight == 0 {
                ".".to_string()
            } else {
                weight.to_string()
            };
            out.push_str(&pad_center(&cell, cell_w));
            if c < cols - 1 {
                out.push(if board.h_wall(r as i32, c as i32) { '|' } else { ' ' });
            } else {
                out.push('|');
            }
        }
        out.push('\n');

        // Separator between rows, or the bottom border.
        if r < rows - 1 {
            out.push_str(&" ".repeat(row_label_w + 2));
            out.push('+');
            for c in 0..cols {
                let glyph = if board.v_wall(r as i32, c as i32) { "-" } else { " " };
                out.push_str(&glyph.repeat(cell_w));
                out.push('+');
            }
            out.push('\n');
        } else {
            full_border(&mut out);
        }
    }

    out
}

/// Textual dump of every placed wall, 0-based coordinates.
pub fn render_walls(board: &BoardState) -> String {
    let mut out = String::new();
    out.push_str("Vertical walls (between (r,c) and (r+1,c)):\n");
    for r in 0..board.rows() as i32 - 1 {
        for c in 0..board.cols() as i32 {
            if board.v_wall(r, c) {
                out.push_str(&format!("  ({},{})-({},{})\n", r, c, r + 1, c));
            }
        }
    }
    out.push_str("Horizontal walls (between (r,c) and (r,c+1)):\n");
    for r in 0..board.rows() as i32 {
        for c in 0..board.cols() as i32 - 1 {
            if board.h_wall(r, c) {
                out.push_str(&format!("  ({},{})-({},{})\n", r, c, r, c + 1));
            }
        }
    }
    out
}
