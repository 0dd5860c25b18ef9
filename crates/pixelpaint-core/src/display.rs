//! Display-mode bit flags stored in CAMG chunks.
//!
//! These are the Amiga OCS viewport mode bits. Only the bits in
//! [`OCS_MODES`] are preserved through load/save; everything else in a
//! CAMG word is masked off.

/// Interlaced display
pub const MODE_LACE: u32 = 0x0004;
/// Extra-halfbright: indices 32..63 render at half the brightness of 0..31
pub const MODE_EXTRA_HALFBRIGHT: u32 = 0x0080;
/// Hold-and-modify
pub const MODE_HAM: u32 = 0x0800;
/// High-resolution display
pub const MODE_HIRES: u32 = 0x8000;
/// NTSC monitor id
pub const NTSC_MONITOR_ID: u32 = 0x0001_1000;
/// PAL monitor id
pub const PAL_MONITOR_ID: u32 = 0x0002_1000;

/// Mask of every recognized mode bit
pub const OCS_MODES: u32 =
    MODE_LACE | MODE_EXTRA_HALFBRIGHT | MODE_HAM | MODE_HIRES | NTSC_MONITOR_ID | PAL_MONITOR_ID;

/// Whether a CAMG word requests extra-halfbright rendering.
#[inline]
pub fn is_extra_halfbright(mode: u32) -> bool {
    mode & MODE_EXTRA_HALFBRIGHT != 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_recognized_bits() {
        let camg = NTSC_MONITOR_ID | MODE_LACE | 0x4000_0000;
        assert_eq!(camg & OCS_MODES, NTSC_MONITOR_ID | MODE_LACE);
    }

    #[test]
    fn test_halfbright_query() {
        assert!(is_extra_halfbright(MODE_EXTRA_HALFBRIGHT | MODE_LACE));
        assert!(!is_extra_halfbright(MODE_HIRES));
    }
}
