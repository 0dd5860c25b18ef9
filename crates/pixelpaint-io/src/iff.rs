//! IFF/ILBM container reader and writer.
//!
//! An IFF file is a 12-byte prefix `"FORM" <u32 length> <type>` followed by
//! chunks of `<4-byte tag> <u32 length> <payload>`, all big-endian, payloads
//! padded to even length. The reader is a linear state machine: read a
//! header, dispatch on the tag, consume the declared length, repeat until
//! EOF. Unknown tags are skipped; a truncated stream keeps everything that
//! parsed completely.

use crate::byterun;
use crate::error::{IoError, IoResult};
use crate::planar;
use pixelpaint_core::range::NUM_RANGES;
use pixelpaint_core::{ColorRange, Palette, PixelBuffer, Rgb, display, pad_ranges};
use std::fs;
use std::path::Path;

/// Classification of a file's outer container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IffForm {
    /// Still image (FORM ... ILBM)
    Ilbm,
    /// Animation (FORM ... ANIM)
    Anim,
    /// Not an IFF container at all
    NotIff,
}

/// A decoded ILBM image: pixels plus everything needed to redisplay it.
#[derive(Debug, Clone)]
pub struct IffImage {
    pub pixels: PixelBuffer,
    pub palette: Palette,
    pub display_mode: u32,
    pub ranges: [ColorRange; NUM_RANGES],
}

/// Classify the first 12 bytes of a file.
///
/// Any read failure or unrecognized signature yields [`IffForm::NotIff`];
/// classification never errors, so callers can probe arbitrary files.
pub fn classify<P: AsRef<Path>>(path: P) -> IffForm {
    let Ok(mut header) = fs::File::open(path).and_then(|mut f| {
        use std::io::Read;
        let mut buf = [0u8; 12];
        f.read_exact(&mut buf)?;
        Ok(buf)
    }) else {
        return IffForm::NotIff;
    };
    classify_bytes(&mut header)
}

fn classify_bytes(header: &[u8]) -> IffForm {
    if header.len() < 12 || &header[0..4] != b"FORM" {
        return IffForm::NotIff;
    }
    match &header[8..12] {
        b"ILBM" => IffForm::Ilbm,
        b"ANIM" => IffForm::Anim,
        _ => IffForm::NotIff,
    }
}

fn be_u16(b: &[u8]) -> u16 {
    u16::from_be_bytes([b[0], b[1]])
}

fn be_u32(b: &[u8]) -> u32 {
    u32::from_be_bytes([b[0], b[1], b[2], b[3]])
}

fn be_i32(b: &[u8]) -> i32 {
    i32::from_be_bytes([b[0], b[1], b[2], b[3]])
}

/// BMHD fields the decoder cares about.
#[derive(Debug, Clone, Copy, Default)]
struct BitmapHeader {
    width: u16,
    height: u16,
    nplanes: u8,
    compression: u8,
}

/// Load an ILBM image from a file.
///
/// # Errors
///
/// - [`IoError::NotThisFormat`] if the signature is not `FORM ... ILBM`
/// - [`IoError::Truncated`] if the stream ends inside a chunk before a
///   BODY was decoded (parsed palette/range state is unrecoverable then)
/// - [`IoError::InvalidData`] if the chunks parse but no BODY is present
pub fn load_image<P: AsRef<Path>>(path: P) -> IoResult<IffImage> {
    let data = fs::read(path)?;
    decode(&data)
}

/// Decode an ILBM image from bytes. See [`load_image`].
pub fn decode(data: &[u8]) -> IoResult<IffImage> {
    if classify_bytes(data) != IffForm::Ilbm {
        return Err(IoError::NotThisFormat(
            "signature is not FORM/ILBM".to_string(),
        ));
    }

    let mut header = BitmapHeader::default();
    let mut palette = Palette::new(0)?;
    let mut display_mode = 0u32;
    let mut ranges: Vec<ColorRange> = Vec::new();
    let mut pixels: Option<PixelBuffer> = None;
    let mut truncated_chunk: Option<(String, usize, usize)> = None;

    let mut pos = 12usize;
    while pos + 8 <= data.len() {
        let tag = [data[pos], data[pos + 1], data[pos + 2], data[pos + 3]];
        let size = be_u32(&data[pos + 4..pos + 8]) as usize;
        pos += 8;
        if pos + size > data.len() {
            // declared length promises more than the stream holds; keep
            // whatever parsed completely
            truncated_chunk = Some((
                String::from_utf8_lossy(&tag).into_owned(),
                size,
                data.len() - pos,
            ));
            break;
        }
        let payload = &data[pos..pos + size];
        match &tag {
            b"BMHD" if size >= 11 => {
                header.width = be_u16(&payload[0..2]);
                header.height = be_u16(&payload[2..4]);
                header.nplanes = payload[8];
                header.compression = payload[10];
                palette.resize_for_planes(header.nplanes as u32);
            }
            b"CMAP" => {
                let ncol = size / 3;
                palette.grow_to(ncol);
                for i in 0..ncol.min(Palette::MAX_COLORS) {
                    let c = Rgb::new(payload[i * 3], payload[i * 3 + 1], payload[i * 3 + 2]);
                    palette.set(i, c)?;
                }
            }
            b"CAMG" if size >= 4 => {
                display_mode = be_u32(payload) & display::OCS_MODES;
            }
            b"CRNG" if size >= 8 => {
                // u16 pad, rate, flags, then low/high bytes
                let rate = be_u16(&payload[2..4]);
                let flags = be_u16(&payload[4..6]);
                ranges.push(ColorRange::new(rate, flags, payload[6], payload[7]));
            }
            b"CCRT" if size >= 14 => {
                let dir = be_u16(&payload[0..2]) as i16;
                let low = payload[2];
                let high = payload[3];
                let seconds = be_i32(&payload[4..8]);
                let microseconds = be_i32(&payload[8..12]);
                ranges.push(ColorRange::from_ccrt(dir, low, high, seconds, microseconds));
            }
            b"BODY" => {
                if header.width == 0 || header.height == 0 || header.nplanes == 0 {
                    return Err(IoError::InvalidData("BODY before valid BMHD".to_string()));
                }
                let raw_len = planar::body_size(
                    header.width as u32,
                    header.height as u32,
                    header.nplanes as u32,
                );
                let decoded;
                let raw: &[u8] = if header.compression != 0 {
                    decoded = byterun::decode(payload, raw_len);
                    &decoded
                } else {
                    payload
                };
                pixels = Some(planar::planar_to_chunky(
                    raw,
                    header.width as u32,
                    header.height as u32,
                    header.nplanes as u32,
                )?);
                if display::is_extra_halfbright(display_mode) {
                    palette.apply_halfbright();
                }
            }
            _ => {} // unrecognized tag: length-bounded skip
        }
        // payloads are padded to even length
        pos += size + (size & 1);
    }

    match pixels {
        Some(pixels) => Ok(IffImage {
            pixels,
            palette,
            display_mode,
            ranges: pad_ranges(ranges),
        }),
        None => match truncated_chunk {
            Some((tag, declared, available)) => Err(IoError::Truncated {
                tag,
                declared,
                available,
            }),
            None => Err(IoError::InvalidData("no BODY chunk".to_string())),
        },
    }
}

fn push_chunk(out: &mut Vec<u8>, tag: &[u8; 4], payload: &[u8]) {
    out.extend_from_slice(tag);
    out.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    out.extend_from_slice(payload);
    if payload.len() % 2 == 1 {
        out.push(0);
    }
}

fn bmhd_payload(width: u16, height: u16, nplanes: u8, compression: u8) -> Vec<u8> {
    let mut p = Vec::with_capacity(20);
    p.extend_from_slice(&width.to_be_bytes());
    p.extend_from_slice(&height.to_be_bytes());
    p.extend_from_slice(&0i16.to_be_bytes()); // x origin
    p.extend_from_slice(&0i16.to_be_bytes()); // y origin
    p.push(nplanes);
    p.push(0); // masking: none
    p.push(compression);
    p.push(0); // pad
    p.extend_from_slice(&0u16.to_be_bytes()); // transparent color
    p.push(10); // x aspect
    p.push(11); // y aspect
    p.extend_from_slice(&(width as i16).to_be_bytes()); // page width
    p.extend_from_slice(&(height as i16).to_be_bytes()); // page height
    p
}

fn crng_payload(range: &ColorRange) -> Vec<u8> {
    let mut p = Vec::with_capacity(8);
    p.extend_from_slice(&0u16.to_be_bytes()); // pad
    p.extend_from_slice(&range.rate.to_be_bytes());
    p.extend_from_slice(&range.flags.to_be_bytes());
    p.push(range.low);
    p.push(range.high);
    p
}

/// Patch the FORM length (total file size minus the 8-byte FORM header)
/// back into bytes 4..8.
fn patch_form_length(out: &mut [u8]) {
    let total = (out.len() - 8) as u32;
    out[4..8].copy_from_slice(&total.to_be_bytes());
}

/// Encode an ILBM image to bytes: BMHD, CMAP, CAMG, six CRNG chunks and an
/// RLE-compressed BODY.
pub fn encode(
    pixels: &PixelBuffer,
    palette: &Palette,
    display_mode: u32,
    ranges: &[ColorRange],
) -> IoResult<Vec<u8>> {
    if pixels.width() > u16::MAX as u32 || pixels.height() > u16::MAX as u32 {
        return Err(IoError::InvalidData("image too large for BMHD".to_string()));
    }
    let nplanes = palette.plane_count();
    let mut out = Vec::new();
    out.extend_from_slice(b"FORM\0\0\0\0ILBM");

    push_chunk(
        &mut out,
        b"BMHD",
        &bmhd_payload(pixels.width() as u16, pixels.height() as u16, nplanes as u8, 1),
    );

    let mut cmap = Vec::with_capacity(palette.len() * 3);
    for c in palette.colors() {
        cmap.extend_from_slice(&[c.r, c.g, c.b]);
    }
    push_chunk(&mut out, b"CMAP", &cmap);

    push_chunk(&mut out, b"CAMG", &display_mode.to_be_bytes());

    for range in pad_ranges(ranges.to_vec()) {
        push_chunk(&mut out, b"CRNG", &crng_payload(&range));
    }

    let body = byterun::encode(&planar::chunky_to_planar(pixels, nplanes));
    push_chunk(&mut out, b"BODY", &body);

    patch_form_length(&mut out);
    Ok(out)
}

/// Save an ILBM image to a file. I/O failures (disk full, permissions)
/// surface as [`IoError::Io`].
pub fn save_image<P: AsRef<Path>>(
    path: P,
    pixels: &PixelBuffer,
    palette: &Palette,
    display_mode: u32,
    ranges: &[ColorRange],
) -> IoResult<()> {
    let data = encode(pixels, palette, display_mode, ranges)?;
    fs::write(path, data)?;
    Ok(())
}

/// Write a palette-metadata-only form (BMHD + CAMG + CRNG, no CMAP/BODY).
///
/// Used as a sidecar next to images saved in foreign formats so cycling
/// ranges and display mode survive a round trip through them.
pub fn save_info<P: AsRef<Path>>(
    path: P,
    width: u16,
    height: u16,
    palette_len: usize,
    display_mode: u32,
    ranges: &[ColorRange],
) -> IoResult<()> {
    let nplanes = palette_len.max(2).next_power_of_two().trailing_zeros();
    let mut out = Vec::new();
    out.extend_from_slice(b"FORM\0\0\0\0ILBM");
    push_chunk(&mut out, b"BMHD", &bmhd_payload(width, height, nplanes as u8, 0));
    push_chunk(&mut out, b"CAMG", &display_mode.to_be_bytes());
    for range in pad_ranges(ranges.to_vec()) {
        push_chunk(&mut out, b"CRNG", &crng_payload(&range));
    }
    patch_form_length(&mut out);
    fs::write(path, out)?;
    Ok(())
}
