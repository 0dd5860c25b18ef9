//! Planar <-> chunky pixel layout conversion.
//!
//! ILBM stores each row as `nplanes` consecutive bit-plane rows, each padded
//! to a 16-pixel boundary; pixel `x` of a row contributes bit `7 - (x % 8)`
//! of byte `x / 8` in every plane, and its palette index is the planes'
//! bits assembled LSB-first. In memory we use one byte per pixel ("chunky").

use pixelpaint_core::{PixelBuffer, Result};

/// Bytes per planar row: width rounded up to a 16-pixel boundary.
#[inline]
pub fn bytes_per_row(width: u32) -> usize {
    ((width as usize + 15) / 16) * 2
}

/// Total size in bytes of a planar body: `height * nplanes * bytes_per_row`.
#[inline]
pub fn body_size(width: u32, height: u32, nplanes: u32) -> usize {
    bytes_per_row(width) * height as usize * nplanes as usize
}

/// Convert planar rows to a chunky pixel buffer.
///
/// `planes` is laid out `height x nplanes x bytes_per_row`. For each of the
/// 8 bit positions (high to low), the corresponding bit is extracted from
/// every plane, shifted into that plane's slot of the output index, and the
/// synthesized bytes land on every 8th output column - the bit position
/// selects the column offset within each byte-wide group.
///
/// A short `planes` slice (truncated BODY) decodes as far as it reaches;
/// the remaining pixels stay at index 0.
pub fn planar_to_chunky(
    planes: &[u8],
    width: u32,
    height: u32,
    nplanes: u32,
) -> Result<PixelBuffer> {
    let bpr = bytes_per_row(width);
    let mut out = PixelBuffer::new(width, height)?;
    for bit in (0..8u32).rev() {
        for y in 0..height as usize {
            let row_base = y * nplanes as usize * bpr;
            for col in 0..bpr {
                let mut index = 0u8;
                for p in 0..nplanes as usize {
                    let Some(&byte) = planes.get(row_base + p * bpr + col) else {
                        continue;
                    };
                    index |= ((byte >> bit) & 1) << p;
                }
                let x = col as i32 * 8 + (7 - bit as i32);
                out.set(x, y as i32, index);
            }
        }
    }
    Ok(out)
}

/// Convert a chunky pixel buffer to planar rows with `nplanes` planes.
///
/// Index bits above `nplanes` are discarded; callers pick the plane count
/// from the palette size.
pub fn chunky_to_planar(buf: &PixelBuffer, nplanes: u32) -> Vec<u8> {
    let bpr = bytes_per_row(buf.width());
    let mut out = vec![0u8; body_size(buf.width(), buf.height(), nplanes)];
    for y in 0..buf.height() as usize {
        let row_base = y * nplanes as usize * bpr;
        for x in 0..buf.width() as i32 {
            let index = buf.get(x, y as i32).unwrap_or(0);
            let col = x as usize / 8;
            let bit = 7 - (x as usize % 8);
            for p in 0..nplanes as usize {
                if (index >> p) & 1 != 0 {
                    out[row_base + p * bpr + col] |= 1 << bit;
                }
            }
        }
    }
    out
}
