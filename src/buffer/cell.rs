//! Cell: The atomic unit of terminal display.
//!
//! # Memory Layout
//!
//! A cell holds one grapheme cluster, its style, and a precomputed
//! fingerprint:
//! - Symbols of up to 22 bytes (every single code point, most clusters) are
//!   stored inline; longer emoji sequences spill to the heap
//! - The fingerprint is a 64-bit FNV-1a hash of symbol and style, computed
//!   once at construction. Equality and hashing consult it first, so the
//!   diff engine rejects changed cells without touching their bytes.
//!
//! ```text
//! ┌───────────────────────────────────────────────┬───────────┬──────────┐
//! │  symbol: Inline { len: u8, bytes: [u8; 22] }  │   style   │   hash   │
//! │      or  Heap(Box<str>)                       │  (Copy)   │   u64    │
//! └───────────────────────────────────────────────┴───────────┴──────────┘
//! ```
//!
//! A cell whose symbol is empty is a *continuation*: the right half of a
//! wide glyph drawn in the cell to its left.

use super::style::Style;
use std::hash::{Hash, Hasher};

/// Largest symbol stored without a heap allocation.
const INLINE_CAPACITY: usize = 22;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Grapheme storage.
#[derive(Clone)]
enum Symbol {
    Inline { len: u8, bytes: [u8; INLINE_CAPACITY] },
    Heap(Box<str>),
}

impl Symbol {
    const fn ascii(byte: u8) -> Self {
        let mut bytes = [0u8; INLINE_CAPACITY];
        bytes[0] = byte;
        Self::Inline { len: 1, bytes }
    }

    const EMPTY: Self = Self::Inline {
        len: 0,
        bytes: [0u8; INLINE_CAPACITY],
    };

    fn new(s: &str) -> Self {
        let src = s.as_bytes();
        if src.len() > INLINE_CAPACITY {
            return Self::Heap(s.into());
        }
        let mut bytes = [0u8; INLINE_CAPACITY];
        bytes[..src.len()].copy_from_slice(src);
        Self::Inline {
            len: src.len() as u8,
            bytes,
        }
    }

    #[inline]
    #[allow(unsafe_code)]
    fn as_str(&self) -> &str {
        match self {
            // SAFETY: inline bytes are always copied from a `&str` whole
            Self::Inline { len, bytes } => unsafe {
                std::str::from_utf8_unchecked(&bytes[..*len as usize])
            },
            Self::Heap(s) => s,
        }
    }
}

/// FNV-1a over `bytes`, then folded with the style fingerprint.
const fn fingerprint(bytes: &[u8], style: &Style) -> u64 {
    let mut hash = FNV_OFFSET;
    let mut i = 0;
    while i < bytes.len() {
        hash ^= bytes[i] as u64;
        hash = hash.wrapping_mul(FNV_PRIME);
        i += 1;
    }
    // 0xFF never occurs in UTF-8, so it separates symbol from style
    hash ^= 0xFF;
    hash = hash.wrapping_mul(FNV_PRIME);

    let style = style.fingerprint();
    let mut shift = 0;
    while shift < 64 {
        hash ^= (style >> shift) & 0xFF;
        hash = hash.wrapping_mul(FNV_PRIME);
        shift += 8;
    }
    hash
}

/// A single terminal cell.
///
/// Cells are immutable values: the `with_*` methods return modified copies
/// with a recomputed fingerprint.
///
/// # Example
///
/// ```
/// use tessera::{Cell, Color, Style};
///
/// let cell = Cell::new("日").with_style(Style::new().fg(Color::Red));
/// assert_eq!(cell.symbol(), "日");
/// assert_eq!(cell.width(), 2);
/// assert_ne!(cell, Cell::new("日"));
/// ```
#[derive(Clone)]
pub struct Cell {
    symbol: Symbol,
    style: Style,
    hash: u64,
}

impl Default for Cell {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Cell {
    /// A blank cell: a single space with no style.
    pub const EMPTY: Self = {
        let style = Style::new();
        Self {
            symbol: Symbol::ascii(b' '),
            style,
            hash: fingerprint(b" ", &style),
        }
    };

    /// The right half of a wide glyph. Its symbol is empty.
    pub const CONTINUATION: Self = {
        let style = Style::new();
        Self {
            symbol: Symbol::EMPTY,
            style,
            hash: fingerprint(b"", &style),
        }
    };

    /// Create an unstyled cell holding `symbol`.
    #[inline]
    pub fn new(symbol: &str) -> Self {
        Self::styled(symbol, Style::new())
    }

    /// Create a cell holding `symbol` drawn with `style`.
    pub fn styled(symbol: &str, style: Style) -> Self {
        Self {
            symbol: Symbol::new(symbol),
            style,
            hash: fingerprint(symbol.as_bytes(), &style),
        }
    }

    /// The grapheme cluster shown in this cell.
    #[inline]
    pub fn symbol(&self) -> &str {
        self.symbol.as_str()
    }

    /// The cell's style.
    #[inline]
    pub const fn style(&self) -> Style {
        self.style
    }

    /// Precomputed fingerprint of symbol and style.
    #[inline]
    pub const fn fingerprint(&self) -> u64 {
        self.hash
    }

    /// Whether this cell is the right half of a wide glyph.
    #[inline]
    pub fn is_continuation(&self) -> bool {
        self.symbol().is_empty()
    }

    /// Display width of the symbol in columns.
    #[inline]
    pub fn width(&self) -> usize {
        unicode_width::UnicodeWidthStr::width(self.symbol())
    }

    /// Replace the symbol, keeping the style.
    #[must_use]
    pub fn with_symbol(&self, symbol: &str) -> Self {
        Self::styled(symbol, self.style)
    }

    /// Replace the style, keeping the symbol.
    #[must_use]
    pub fn with_style(&self, style: Style) -> Self {
        Self::styled(self.symbol(), style)
    }

    /// Patch `style` onto the cell's current style.
    #[must_use]
    pub fn patch_style(&self, style: Style) -> Self {
        self.with_style(self.style.patch(style))
    }

    /// Append code points to the symbol (combining marks, joiners).
    #[must_use]
    pub fn with_appended(&self, extra: &str) -> Self {
        let mut joined = String::with_capacity(self.symbol().len() + extra.len());
        joined.push_str(self.symbol());
        joined.push_str(extra);
        Self::styled(&joined, self.style)
    }

    /// Whether the symbol spilled to the heap.
    pub const fn is_heap(&self) -> bool {
        matches!(self.symbol, Symbol::Heap(_))
    }
}

impl PartialEq for Cell {
    /// Fingerprints settle almost every comparison; full fields are only
    /// compared when they match.
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
            || (self.hash == other.hash
                && self.style == other.style
                && self.symbol() == other.symbol())
    }
}

impl Eq for Cell {}

impl Hash for Cell {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}

impl std::fmt::Debug for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cell")
            .field("symbol", &self.symbol())
            .field("style", &self.style)
            .finish_non_exhaustive()
    }
}
