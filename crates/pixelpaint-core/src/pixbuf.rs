//! PixelBuffer - indexed-color pixel grid
//!
//! The canvas, the spare canvas, custom brush images and undo snapshots are
//! all `PixelBuffer` values: a width x height grid of 8-bit palette indices
//! stored row-major ("chunky" layout). Buffers own their storage; cloning
//! yields an independent copy, so undo history never aliases the canvas.

use crate::error::{Error, Result};

/// A width x height grid of palette indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Create a new buffer filled with index 0.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if either dimension is zero.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        Ok(Self {
            width,
            height,
            data: vec![0; width as usize * height as usize],
        })
    }

    /// Create a buffer from existing row-major pixel data.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if `data.len() != width * height`
    /// or either dimension is zero.
    pub fn from_vec(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 || data.len() != width as usize * height as usize {
            return Err(Error::InvalidDimension { width, height });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Get the width in pixels
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the height in pixels
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Check whether a signed coordinate lies inside the buffer.
    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    /// Get the pixel at (x, y), or `None` when out of bounds.
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<u8> {
        if !self.contains(x, y) {
            return None;
        }
        Some(self.data[y as usize * self.width as usize + x as usize])
    }

    /// Set the pixel at (x, y). Out-of-bounds writes are silently clipped;
    /// every rasterizer relies on this to draw shapes that straddle the edge.
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, color: u8) {
        if self.contains(x, y) {
            self.data[y as usize * self.width as usize + x as usize] = color;
        }
    }

    /// Fill the whole buffer with one index.
    pub fn fill(&mut self, color: u8) {
        self.data.fill(color);
    }

    /// Borrow one row of pixels.
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        if y >= self.height {
            return None;
        }
        let start = y as usize * self.width as usize;
        Some(&self.data[start..start + self.width as usize])
    }

    /// Mutably borrow one row of pixels.
    pub fn row_mut(&mut self, y: u32) -> Option<&mut [u8]> {
        if y >= self.height {
            return None;
        }
        let start = y as usize * self.width as usize;
        Some(&mut self.data[start..start + self.width as usize])
    }

    /// Write a horizontal run of one color, clipped to the buffer.
    /// `x1` and `x2` are inclusive and may be given in either order.
    pub fn hspan(&mut self, y: i32, x1: i32, x2: i32, color: u8) {
        if y < 0 || y as u32 >= self.height {
            return;
        }
        let (lo, hi) = if x1 <= x2 { (x1, x2) } else { (x2, x1) };
        let lo = lo.max(0) as usize;
        let hi = hi.min(self.width as i32 - 1);
        if hi < 0 || lo as i32 > hi {
            return;
        }
        let start = y as usize * self.width as usize;
        self.data[start + lo..=start + hi as usize].fill(color);
    }

    /// Blit `src` onto `self` with its top-left corner at (x, y).
    ///
    /// Pixels equal to `transparent` (if given) are skipped; this is how
    /// custom brushes honor their background key. The source may extend
    /// past any edge of the destination.
    pub fn blit(&mut self, src: &PixelBuffer, x: i32, y: i32, transparent: Option<u8>) {
        for sy in 0..src.height as i32 {
            let dy = y + sy;
            if dy < 0 || dy as u32 >= self.height {
                continue;
            }
            for sx in 0..src.width as i32 {
                let dx = x + sx;
                if dx < 0 || dx as u32 >= self.width {
                    continue;
                }
                let c = src.data[sy as usize * src.width as usize + sx as usize];
                if Some(c) == transparent {
                    continue;
                }
                self.data[dy as usize * self.width as usize + dx as usize] = c;
            }
        }
    }

    /// Copy a rectangular region into a new buffer. The corner coordinates
    /// are inclusive and may be given in either order; the region is clamped
    /// to the buffer edges.
    pub fn extract(&self, x1: i32, y1: i32, x2: i32, y2: i32) -> Result<PixelBuffer> {
        let (x1, x2) = if x1 <= x2 { (x1, x2) } else { (x2, x1) };
        let (y1, y2) = if y1 <= y2 { (y1, y2) } else { (y2, y1) };
        let x1 = x1.max(0);
        let y1 = y1.max(0);
        let x2 = x2.min(self.width as i32 - 1);
        let y2 = y2.min(self.height as i32 - 1);
        if x2 < x1 || y2 < y1 {
            return Err(Error::InvalidDimension {
                width: 0,
                height: 0,
            });
        }
        let mut out = PixelBuffer::new((x2 - x1 + 1) as u32, (y2 - y1 + 1) as u32)?;
        for y in y1..=y2 {
            for x in x1..=x2 {
                let c = self.data[y as usize * self.width as usize + x as usize];
                out.set(x - x1, y - y1, c);
            }
        }
        Ok(out)
    }

    /// Raw pixel data, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable raw pixel data, row-major.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_zero_size() {
        assert!(PixelBuffer::new(0, 10).is_err());
        assert!(PixelBuffer::new(10, 0).is_err());
    }

    #[test]
    fn test_get_set_and_clip() {
        let mut buf = PixelBuffer::new(4, 3).unwrap();
        buf.set(2, 1, 7);
        assert_eq!(buf.get(2, 1), Some(7));
        assert_eq!(buf.get(-1, 0), None);
        assert_eq!(buf.get(4, 0), None);
        // out-of-bounds set is a no-op
        buf.set(-1, -1, 9);
        buf.set(100, 100, 9);
        assert!(buf.data().iter().filter(|&&c| c == 9).count() == 0);
    }

    #[test]
    fn test_hspan_clips_and_swaps() {
        let mut buf = PixelBuffer::new(5, 2).unwrap();
        buf.hspan(0, 6, -2, 3);
        assert_eq!(buf.row(0).unwrap(), &[3, 3, 3, 3, 3]);
        assert_eq!(buf.row(1).unwrap(), &[0, 0, 0, 0, 0]);
        // fully off-screen spans do nothing
        buf.hspan(-1, 0, 4, 8);
        buf.hspan(0, -5, -2, 8);
        assert!(!buf.data().contains(&8));
    }

    #[test]
    fn test_blit_transparent_key() {
        let mut dst = PixelBuffer::new(4, 4).unwrap();
        dst.fill(5);
        let mut src = PixelBuffer::new(2, 2).unwrap();
        src.set(0, 0, 1);
        src.set(1, 1, 2);
        dst.blit(&src, 1, 1, Some(0));
        assert_eq!(dst.get(1, 1), Some(1));
        assert_eq!(dst.get(2, 2), Some(2));
        // background-key pixels left alone
        assert_eq!(dst.get(2, 1), Some(5));
        assert_eq!(dst.get(1, 2), Some(5));
    }

    #[test]
    fn test_extract_region() {
        let mut buf = PixelBuffer::new(6, 6).unwrap();
        buf.set(2, 2, 9);
        let sub = buf.extract(4, 4, 1, 1).unwrap();
        assert_eq!(sub.width(), 4);
        assert_eq!(sub.height(), 4);
        assert_eq!(sub.get(1, 1), Some(9));
    }

    #[test]
    fn test_clone_is_independent() {
        let mut a = PixelBuffer::new(3, 3).unwrap();
        let b = a.clone();
        a.fill(1);
        assert_eq!(b.get(0, 0), Some(0));
    }
}
