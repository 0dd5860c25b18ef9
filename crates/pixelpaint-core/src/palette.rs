//! Palette - ordered RGB color table for indexed images
//!
//! A palette holds up to 256 RGB triples addressed by pixel index. Every
//! surface that must render consistently (canvas, spare canvas, brush
//! preview, undo snapshots) shares one palette; callers reassign it
//! everywhere at once when it changes, e.g. on a cycling tick or after
//! quantization. Index 0 is by convention the background / transparency
//! key for custom brushes.

use crate::error::{Error, Result};

/// An RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Create a new color
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Half-brightness copy (used by the extra-halfbright display mode).
    pub const fn half(self) -> Self {
        Self {
            r: self.r / 2,
            g: self.g / 2,
            b: self.b / 2,
        }
    }
}

/// Ordered color table, at most 256 entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Palette {
    /// Maximum number of palette entries
    pub const MAX_COLORS: usize = 256;

    /// Create a palette of `n` black entries.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PaletteTooLarge`] for `n > 256`.
    pub fn new(n: usize) -> Result<Self> {
        if n > Self::MAX_COLORS {
            return Err(Error::PaletteTooLarge(n));
        }
        Ok(Self {
            colors: vec![Rgb::default(); n],
        })
    }

    /// Create a palette from a color list.
    pub fn from_colors(colors: Vec<Rgb>) -> Result<Self> {
        if colors.len() > Self::MAX_COLORS {
            return Err(Error::PaletteTooLarge(colors.len()));
        }
        Ok(Self { colors })
    }

    /// Number of entries
    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Check if empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Get a color by index
    pub fn get(&self, index: usize) -> Option<Rgb> {
        self.colors.get(index).copied()
    }

    /// Set a color at an index
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if `index` is past the end.
    pub fn set(&mut self, index: usize, color: Rgb) -> Result<()> {
        let len = self.colors.len();
        match self.colors.get_mut(index) {
            Some(slot) => {
                *slot = color;
                Ok(())
            }
            None => Err(Error::IndexOutOfBounds { index, len }),
        }
    }

    /// All colors as a slice
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// Mutable color slice
    pub fn colors_mut(&mut self) -> &mut [Rgb] {
        &mut self.colors
    }

    /// Resize the palette to exactly `2^planes` entries, truncating or
    /// growing with black. A BMHD plane count drives this on load.
    pub fn resize_for_planes(&mut self, planes: u32) {
        let n = (1usize << planes.min(8)).min(Self::MAX_COLORS);
        self.colors.resize(n, Rgb::default());
    }

    /// Grow (never shrink) to at least `n` entries.
    pub fn grow_to(&mut self, n: usize) {
        if n > self.colors.len() {
            self.colors.resize(n.min(Self::MAX_COLORS), Rgb::default());
        }
    }

    /// Number of bit planes needed to address every entry:
    /// `ceil(log2(len))`, at least 1.
    pub fn plane_count(&self) -> u32 {
        let n = self.colors.len().max(2);
        (usize::BITS - (n - 1).leading_zeros()).max(1)
    }

    /// Synthesize the extra-halfbright upper half: indices 32..63 become
    /// half-brightness copies of indices 0..31. The palette is grown to 64
    /// entries if needed.
    pub fn apply_halfbright(&mut self) {
        self.grow_to(64);
        for i in 0..32 {
            self.colors[i + 32] = self.colors[i].half();
        }
    }

    /// Quantize every gun to `bits` significant bits, replicating the high
    /// bits downward so that full intensity stays 255. Amiga OCS palettes
    /// are 4 bits per gun.
    pub fn quantize(&mut self, bits: u32) {
        let bits = bits.clamp(1, 8);
        for c in &mut self.colors {
            c.r = quantize_gun(c.r, bits);
            c.g = quantize_gun(c.g, bits);
            c.b = quantize_gun(c.b, bits);
        }
    }
}

fn quantize_gun(v: u8, bits: u32) -> u8 {
    let top = (v as u32) >> (8 - bits);
    // replicate high bits into the low bits so 0xF0 -> 0xFF, not 0xF0
    let mut out = 0u32;
    let mut filled = 0;
    while filled < 8 {
        out = (out << bits) | top;
        filled += bits;
    }
    (out >> (filled - 8)) as u8
}
