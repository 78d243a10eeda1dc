//! Grapheme placement: Decide which columns a string occupies.
//!
//! Placement is computed before any cell is touched. Each visible unit
//! becomes a [`Placement`] that already knows its column and width, so the
//! write phase in [`Buffer`](super::Buffer) only has to copy cells and clean
//! up wide glyphs it overwrites.
//!
//! Rules, in order of precedence:
//! - control characters are dropped
//! - zero-width code points (combining marks, variation selectors), a
//!   zero-width joiner, and the code point following a joiner attach to the
//!   preceding cluster
//! - two consecutive regional indicators form one two-column flag
//! - a wide unit with a single column of room becomes a blank and ends the
//!   string; any other unit without room ends the string

use unicode_width::UnicodeWidthChar;

const ZERO_WIDTH_JOINER: char = '\u{200d}';

/// Where one visible unit of a string lands.
#[derive(Clone, PartialEq, Eq, Debug)]
pub(crate) enum Placement {
    /// A cluster drawn at `x` covering `width` columns.
    Cluster { x: u16, symbol: String, width: u16 },
    /// A single blank standing in for a unit that did not fit.
    Blank { x: u16 },
    /// Code points with no cluster of their own in this string; they attach
    /// to the nearest cluster left of `x` already in the buffer.
    Join { x: u16, text: String },
}

/// Result of placing a string.
#[derive(Debug)]
pub(crate) struct Placed {
    pub placements: Vec<Placement>,
    /// Column after the last one written.
    pub end: u16,
}

fn is_regional_indicator(c: char) -> bool {
    ('\u{1F1E6}'..='\u{1F1FF}').contains(&c)
}

/// Lay out `text` starting at column `start`, never reaching column `limit`.
pub(crate) fn place(text: &str, start: u16, limit: u16) -> Placed {
    let mut placements: Vec<Placement> = Vec::new();
    let mut x = start;
    let mut after_joiner = false;
    // index of a lone regional indicator waiting for its partner
    let mut open_flag: Option<usize> = None;

    if start >= limit {
        return Placed {
            placements,
            end: start,
        };
    }

    for c in text.chars() {
        if c.is_control() {
            continue;
        }

        let width = c.width().unwrap_or(0);
        if after_joiner || c == ZERO_WIDTH_JOINER || width == 0 {
            after_joiner = c == ZERO_WIDTH_JOINER;
            open_flag = None;
            match placements.last_mut() {
                Some(Placement::Cluster { symbol, .. }) => symbol.push(c),
                Some(Placement::Join { text, .. }) => text.push(c),
                Some(Placement::Blank { .. }) => {}
                None => placements.push(Placement::Join {
                    x,
                    text: c.to_string(),
                }),
            }
            continue;
        }

        if is_regional_indicator(c) {
            if let Some(i) = open_flag.take() {
                let room = x < limit;
                if let Placement::Cluster {
                    x: flag_x,
                    symbol,
                    width,
                } = &mut placements[i]
                {
                    if room {
                        symbol.push(c);
                        *width = 2;
                        x += 1;
                    } else {
                        let flag_x = *flag_x;
                        placements[i] = Placement::Blank { x: flag_x };
                    }
                }
                continue;
            }
            if x >= limit {
                break;
            }
            placements.push(Placement::Cluster {
                x,
                symbol: c.to_string(),
                width: 1,
            });
            open_flag = Some(placements.len() - 1);
            x += 1;
            continue;
        }

        open_flag = None;
        let width = if width >= 2 { 2 } else { 1 };
        if u32::from(x) + u32::from(width) > u32::from(limit) {
            if width == 2 && x < limit {
                placements.push(Placement::Blank { x });
                x += 1;
            }
            break;
        }
        placements.push(Placement::Cluster {
            x,
            symbol: c.to_string(),
            width,
        });
        x += width;
    }

    Placed { placements, end: x }
}
