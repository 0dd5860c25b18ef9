//! ColorRange - palette cycling ranges
//!
//! A color range is a contiguous band of palette indices whose members
//! rotate on a timer, producing animated-palette effects without touching
//! pixel data. Up to six ranges persist per image; they are written to and
//! read from CRNG chunks. The same bands double as gradient sources for
//! the fill engine.

use crate::palette::Palette;

/// Range is actively cycling
pub const FLAG_ACTIVE: u16 = 0x0001;
/// Range cycles in reverse (high toward low)
pub const FLAG_REVERSE: u16 = 0x0002;

/// Number of ranges stored per image
pub const NUM_RANGES: usize = 6;

/// Rate unit conversion constant: a range with `rate` r steps once every
/// `273067 / r` milliseconds. A rate of 16384 is about 60 steps/second.
pub const RATE_MS_NUMERATOR: u32 = 273_067;

/// A contiguous palette index band that cycles among its own members.
///
/// Invariant: `low <= high`; a range with `low == high` is inert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorRange {
    /// Cycling rate (16384 = 60 steps/sec)
    pub rate: u16,
    /// FLAG_ACTIVE | FLAG_REVERSE
    pub flags: u16,
    /// First palette index of the band
    pub low: u8,
    /// Last palette index of the band
    pub high: u8,
}

impl ColorRange {
    /// Create a new range. `low` and `high` are normalized to `low <= high`.
    pub fn new(rate: u16, flags: u16, low: u8, high: u8) -> Self {
        let (low, high) = if low <= high { (low, high) } else { (high, low) };
        Self {
            rate,
            flags,
            low,
            high,
        }
    }

    /// An inert placeholder range, used to pad images that define fewer
    /// than [`NUM_RANGES`] ranges.
    pub fn inert() -> Self {
        Self {
            rate: 0,
            flags: FLAG_ACTIVE,
            low: 0,
            high: 0,
        }
    }

    /// Build a range from a legacy CCRT (Graphicraft) chunk: the rate is
    /// derived from a seconds + microseconds step interval and a positive
    /// `dir` maps to the reverse flag.
    pub fn from_ccrt(dir: i16, low: u8, high: u8, seconds: i32, microseconds: i32) -> Self {
        let ms = (microseconds / 1000 + seconds * 1000).max(1) as u32;
        let mut flags = FLAG_ACTIVE;
        if dir > 0 {
            flags |= FLAG_REVERSE;
        }
        Self::new((RATE_MS_NUMERATOR / ms).min(u16::MAX as u32) as u16, flags, low, high)
    }

    /// Whether this range actually cycles: active flag set, nonzero rate,
    /// and a band wider than one entry.
    pub fn is_active(&self) -> bool {
        self.flags & FLAG_ACTIVE != 0 && self.rate > 0 && self.low < self.high
    }

    /// Whether the range cycles in reverse
    pub fn is_reverse(&self) -> bool {
        self.flags & FLAG_REVERSE != 0
    }

    /// Whether a palette index lies inside the band
    pub fn contains(&self, color: u8) -> bool {
        color >= self.low && color <= self.high
    }

    /// Number of indices in the band
    pub fn num_colors(&self) -> usize {
        (self.high - self.low) as usize + 1
    }

    /// The band's indices in cycling order (reversed when FLAG_REVERSE).
    /// Gradient fills index into this list to pick band colors.
    pub fn colors(&self) -> Vec<u8> {
        let fwd: Vec<u8> = (self.low..=self.high).collect();
        if self.is_reverse() {
            fwd.into_iter().rev().collect()
        } else {
            fwd
        }
    }

    /// The next color after `color` in cycling order, wrapping within the
    /// band. Colors outside the band are returned unchanged.
    pub fn next_color(&self, color: u8) -> u8 {
        if !self.contains(color) || self.low == self.high {
            return color;
        }
        if self.is_reverse() {
            if color == self.low { self.high } else { color - 1 }
        } else if color == self.high {
            self.low
        } else {
            color + 1
        }
    }

    /// Milliseconds between cycle steps, or `None` for a zero rate.
    pub fn interval_ms(&self) -> Option<u32> {
        if self.rate == 0 {
            None
        } else {
            Some(RATE_MS_NUMERATOR / self.rate as u32)
        }
    }

    /// Advance the palette by one cycling tick: rotate the band's entries
    /// one slot. Inert ranges leave the palette untouched.
    pub fn cycle(&self, palette: &mut Palette) {
        if !self.is_active() || self.high as usize >= palette.len() {
            return;
        }
        let lo = self.low as usize;
        let hi = self.high as usize;
        let band = &mut palette.colors_mut()[lo..=hi];
        if self.is_reverse() {
            band.rotate_left(1);
        } else {
            band.rotate_right(1);
        }
    }
}

/// Pad a range list to exactly [`NUM_RANGES`] entries with inert ranges,
/// truncating extras.
pub fn pad_ranges(mut ranges: Vec<ColorRange>) -> [ColorRange; NUM_RANGES] {
    ranges.truncate(NUM_RANGES);
    while ranges.len() < NUM_RANGES {
        ranges.push(ColorRange::inert());
    }
    [
        ranges[0], ranges[1], ranges[2], ranges[3], ranges[4], ranges[5],
    ]
}
