//! ANSI serialization: Render a buffer to a string of SGR codes and text.
//!
//! These are the buffer's only text output, used for snapshot tests and for
//! printing a frame without a live terminal. Style escapes are only
//! re-emitted when the style changes from the previous cell, and every
//! escape starts from a reset so the output does not depend on the state
//! the terminal was in.

use super::style::Style;
use super::{Buffer, Cell};
use std::fmt::Write;

const RESET: &str = "\x1b[0m";

/// How rows are separated and trimmed.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Rows {
    /// Rows joined with `\n`.
    Lines,
    /// Every row prefixed with an absolute cursor move.
    Positioned,
    /// Rows joined with `\n`, trailing blank cells dropped.
    Trimmed,
}

impl Buffer {
    /// Serialize the buffer, one line per row.
    ///
    /// # Example
    ///
    /// ```
    /// use tessera::{Buffer, Color, Rect, Style};
    ///
    /// let mut buffer = Buffer::empty(Rect::new(0, 0, 3, 1));
    /// buffer.set_string(0, 0, "ok", Style::new().fg(Color::Red));
    ///
    /// assert_eq!(buffer.to_ansi_string(), "\x1b[0;31mok\x1b[0m \x1b[0m");
    /// ```
    pub fn to_ansi_string(&self) -> String {
        self.render_ansi(Rows::Lines)
    }

    /// Serialize the buffer with a cursor move (`ESC[row;colH`) before each
    /// row, placing it at its absolute position on screen.
    pub fn to_ansi_string_with_cursor_positioning(&self) -> String {
        self.render_ansi(Rows::Positioned)
    }

    /// Serialize the buffer, dropping unstyled trailing spaces from each row.
    pub fn to_ansi_string_trimmed(&self) -> String {
        self.render_ansi(Rows::Trimmed)
    }

    fn render_ansi(&self, mode: Rows) -> String {
        let mut output = String::with_capacity(self.len() * 2 + RESET.len());
        let area = self.area();
        if area.width == 0 {
            output.push_str(RESET);
            return output;
        }

        // the terminal is assumed to start from default attributes
        let mut current = Style::new();
        for (y, row) in (area.top()..).zip(self.rows()) {
            match mode {
                Rows::Positioned => emit_cursor_move(&mut output, area.x, y),
                Rows::Lines | Rows::Trimmed if y > area.top() => output.push('\n'),
                Rows::Lines | Rows::Trimmed => {}
            }

            let row = if mode == Rows::Trimmed { trim_row(row) } else { row };
            for cell in row {
                if cell.is_continuation() {
                    continue;
                }
                let style = cell.style();
                if style != current {
                    style.write_sgr(&mut output);
                    current = style;
                }
                output.push_str(cell.symbol());
            }
        }

        output.push_str(RESET);
        output
    }
}

/// Drop trailing cells that would render as default blanks.
fn trim_row(row: &[Cell]) -> &[Cell] {
    let keep = row
        .iter()
        .rposition(|cell| cell.symbol() != " " || !cell.style().is_plain())
        .map_or(0, |i| i + 1);
    &row[..keep]
}

/// Emit an absolute cursor move to 0-indexed (x, y).
#[inline]
fn emit_cursor_move(output: &mut String, x: u16, y: u16) {
    // ANSI uses 1-indexed positions
    let row = u32::from(y) + 1;
    let col = u32::from(x) + 1;
    let _ = write!(output, "\x1b[{row};{col}H");
}
