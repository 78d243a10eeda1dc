//! Style: Colors, text modifiers, and style patching.
//!
//! A [`Style`] only records the attributes it sets. Writing styled content
//! into a cell *patches* the cell's existing style, so a background painted
//! by a container survives text drawn on top of it.

use bitflags::bitflags;
use std::fmt::{self, Write};

/// True-color RGB representation.
#[repr(C)]
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgb {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
}

impl Rgb {
    /// Create a new RGB color.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create from a 24-bit hex color (e.g., 0xFF5500).
    #[inline]
    pub const fn from_u32(hex: u32) -> Self {
        Self::new(
            ((hex >> 16) & 0xFF) as u8,
            ((hex >> 8) & 0xFF) as u8,
            (hex & 0xFF) as u8,
        )
    }

    const fn packed(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }
}

impl fmt::Debug for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<(u8, u8, u8)> for Rgb {
    #[inline]
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

impl From<u32> for Rgb {
    /// Convert from a 24-bit hex color (e.g., 0xFF5500)
    #[inline]
    fn from(hex: u32) -> Self {
        Self::from_u32(hex)
    }
}

/// A terminal color.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Color {
    /// The terminal's default color.
    Reset,
    /// ANSI black.
    Black,
    /// ANSI red.
    Red,
    /// ANSI green.
    Green,
    /// ANSI yellow.
    Yellow,
    /// ANSI blue.
    Blue,
    /// ANSI magenta.
    Magenta,
    /// ANSI cyan.
    Cyan,
    /// ANSI white (usually rendered light gray).
    Gray,
    /// ANSI bright black.
    DarkGray,
    /// ANSI bright red.
    LightRed,
    /// ANSI bright green.
    LightGreen,
    /// ANSI bright yellow.
    LightYellow,
    /// ANSI bright blue.
    LightBlue,
    /// ANSI bright magenta.
    LightMagenta,
    /// ANSI bright cyan.
    LightCyan,
    /// ANSI bright white.
    White,
    /// 256-color palette index.
    Indexed(u8),
    /// 24-bit true color.
    Rgb(Rgb),
}

impl Color {
    /// SGR parameter offset for the 16 named colors (foreground form).
    const fn named_code(self) -> Option<u8> {
        match self {
            Self::Black => Some(30),
            Self::Red => Some(31),
            Self::Green => Some(32),
            Self::Yellow => Some(33),
            Self::Blue => Some(34),
            Self::Magenta => Some(35),
            Self::Cyan => Some(36),
            Self::Gray => Some(37),
            Self::DarkGray => Some(90),
            Self::LightRed => Some(91),
            Self::LightGreen => Some(92),
            Self::LightYellow => Some(93),
            Self::LightBlue => Some(94),
            Self::LightMagenta => Some(95),
            Self::LightCyan => Some(96),
            Self::White => Some(97),
            Self::Reset | Self::Indexed(_) | Self::Rgb(_) => None,
        }
    }

    /// Append `;<params>` selecting this color. `background` shifts to the bg codes.
    fn write_sgr_params(self, out: &mut String, background: bool) {
        let shift = if background { 10 } else { 0 };
        let _ = match self {
            Self::Reset => write!(out, ";{}", 39 + shift),
            Self::Indexed(i) => write!(out, ";{};5;{i}", 38 + shift),
            Self::Rgb(c) => write!(out, ";{};2;{};{};{}", 38 + shift, c.r, c.g, c.b),
            named => match named.named_code() {
                Some(code) => write!(out, ";{}", code + shift),
                None => Ok(()),
            },
        };
    }

    /// Stable 32-bit key, unique per color.
    const fn key(self) -> u32 {
        match self {
            Self::Reset => 0,
            Self::Indexed(i) => (1 << 24) | i as u32,
            Self::Rgb(c) => (2 << 24) | c.packed(),
            named => match named.named_code() {
                Some(code) => (3 << 24) | code as u32,
                None => 0,
            },
        }
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Self::Rgb(rgb)
    }
}

bitflags! {
    /// Text style modifiers.
    ///
    /// These can be combined using bitwise OR.
    ///
    /// # Example
    /// ```
    /// use tessera::Modifiers;
    /// let style = Modifiers::BOLD | Modifiers::ITALIC;
    /// ```
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        /// Bold text
        const BOLD = 0b0000_0001;
        /// Dim/faint text
        const DIM = 0b0000_0010;
        /// Italic text
        const ITALIC = 0b0000_0100;
        /// Underlined text
        const UNDERLINE = 0b0000_1000;
        /// Blinking text
        const BLINK = 0b0001_0000;
        /// Reversed colors (fg/bg swapped)
        const REVERSED = 0b0010_0000;
        /// Hidden/invisible text
        const HIDDEN = 0b0100_0000;
        /// Strikethrough text
        const STRIKETHROUGH = 0b1000_0000;
    }
}

impl Modifiers {
    /// (flag, SGR parameter) pairs in emission order.
    const SGR: [(Self, u8); 8] = [
        (Self::BOLD, 1),
        (Self::DIM, 2),
        (Self::ITALIC, 3),
        (Self::UNDERLINE, 4),
        (Self::BLINK, 5),
        (Self::REVERSED, 7),
        (Self::HIDDEN, 8),
        (Self::STRIKETHROUGH, 9),
    ];
}

impl fmt::Debug for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        bitflags::parser::to_writer(self, f)
    }
}

/// A set of style attributes, each optional.
///
/// # Example
///
/// ```
/// use tessera::{Color, Modifiers, Style};
///
/// let base = Style::new().bg(Color::Blue);
/// let text = Style::new().fg(Color::White).add_modifier(Modifiers::BOLD);
/// let patched = base.patch(text);
///
/// assert_eq!(patched.bg, Some(Color::Blue));
/// assert_eq!(patched.fg, Some(Color::White));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Debug)]
pub struct Style {
    /// Foreground color, if set.
    pub fg: Option<Color>,
    /// Background color, if set.
    pub bg: Option<Color>,
    /// Modifiers switched on.
    pub add_modifier: Modifiers,
    /// Modifiers switched off.
    pub sub_modifier: Modifiers,
}

impl Style {
    /// A style that sets nothing.
    pub const fn new() -> Self {
        Self {
            fg: None,
            bg: None,
            add_modifier: Modifiers::empty(),
            sub_modifier: Modifiers::empty(),
        }
    }

    /// A style that resets every attribute to the terminal default.
    pub const fn reset() -> Self {
        Self {
            fg: Some(Color::Reset),
            bg: Some(Color::Reset),
            add_modifier: Modifiers::empty(),
            sub_modifier: Modifiers::all(),
        }
    }

    /// Set the foreground color.
    #[must_use]
    pub const fn fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    /// Set the background color.
    #[must_use]
    pub const fn bg(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }

    /// Switch modifiers on.
    #[must_use]
    pub const fn add_modifier(mut self, modifier: Modifiers) -> Self {
        self.sub_modifier = self.sub_modifier.difference(modifier);
        self.add_modifier = self.add_modifier.union(modifier);
        self
    }

    /// Switch modifiers off.
    #[must_use]
    pub const fn remove_modifier(mut self, modifier: Modifiers) -> Self {
        self.add_modifier = self.add_modifier.difference(modifier);
        self.sub_modifier = self.sub_modifier.union(modifier);
        self
    }

    /// Shorthand for adding [`Modifiers::BOLD`].
    #[must_use]
    pub const fn bold(self) -> Self {
        self.add_modifier(Modifiers::BOLD)
    }

    /// Shorthand for adding [`Modifiers::ITALIC`].
    #[must_use]
    pub const fn italic(self) -> Self {
        self.add_modifier(Modifiers::ITALIC)
    }

    /// Shorthand for adding [`Modifiers::UNDERLINE`].
    #[must_use]
    pub const fn underlined(self) -> Self {
        self.add_modifier(Modifiers::UNDERLINE)
    }

    /// Shorthand for adding [`Modifiers::REVERSED`].
    #[must_use]
    pub const fn reversed(self) -> Self {
        self.add_modifier(Modifiers::REVERSED)
    }

    /// Apply `other` on top of this style.
    ///
    /// Colors set in `other` win; colors it leaves unset are kept. Modifiers
    /// removed by `other` are cleared before the ones it adds are applied.
    #[must_use]
    pub const fn patch(self, other: Self) -> Self {
        Self {
            fg: match other.fg {
                Some(c) => Some(c),
                None => self.fg,
            },
            bg: match other.bg {
                Some(c) => Some(c),
                None => self.bg,
            },
            add_modifier: self
                .add_modifier
                .difference(other.sub_modifier)
                .union(other.add_modifier),
            sub_modifier: self
                .sub_modifier
                .difference(other.add_modifier)
                .union(other.sub_modifier),
        }
    }

    /// Whether this style renders identically to the terminal default.
    pub const fn is_plain(&self) -> bool {
        let fg_plain = matches!(self.fg, None | Some(Color::Reset));
        let bg_plain = matches!(self.bg, None | Some(Color::Reset));
        fg_plain && bg_plain && self.add_modifier.is_empty()
    }

    /// Write the SGR escape selecting exactly this style.
    ///
    /// The sequence always begins with a reset (`0`), so the result does not
    /// depend on whatever attributes were active before.
    pub fn write_sgr(&self, out: &mut String) {
        out.push_str("\x1b[0");
        for (flag, code) in Modifiers::SGR {
            if self.add_modifier.contains(flag) {
                let _ = write!(out, ";{code}");
            }
        }
        if let Some(fg) = self.fg {
            fg.write_sgr_params(out, false);
        }
        if let Some(bg) = self.bg {
            bg.write_sgr_params(out, true);
        }
        out.push('m');
    }

    /// The SGR escape selecting this style, as a new string.
    pub fn sgr(&self) -> String {
        let mut out = String::with_capacity(16);
        self.write_sgr(&mut out);
        out
    }

    /// A 64-bit key for fast inequality checks.
    ///
    /// Colors and added modifiers are packed into disjoint bits, so styles
    /// differing in those always get different keys. Removed modifiers are
    /// folded into the top two bits and may collide.
    pub(crate) const fn fingerprint(&self) -> u64 {
        // color keys use 26 bits; bit 26 marks an unset color
        const fn color(c: Option<Color>) -> u64 {
            match c {
                Some(c) => c.key() as u64,
                None => 1 << 26,
            }
        }
        let sub = self.sub_modifier.bits() as u64;
        let folded = (sub ^ (sub >> 2) ^ (sub >> 4) ^ (sub >> 6)) & 0b11;
        color(self.fg)
            | (color(self.bg) << 27)
            | ((self.add_modifier.bits() as u64) << 54)
            | (folded << 62)
    }
}

impl From<Color> for Style {
    fn from(color: Color) -> Self {
        Self::new().fg(color)
    }
}
