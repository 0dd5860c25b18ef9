//! Byte-run (byterun1) run-length codec used by ILBM BODY chunks.
//!
//! Each record starts with a signed control byte `n`:
//!
//! - `0..=127`: copy the next `n + 1` bytes literally
//! - `-127..=-1`: replicate the following single byte `-n + 1` times
//! - `-128`: no operation (padding/alignment)
//!
//! The decoder stops as soon as the requested output length is produced;
//! trailing encoded bytes are legal padding.

/// Decode `src` into at most `out_len` bytes.
///
/// Stops at `out_len` or when the input runs out, whichever comes first,
/// so a truncated BODY yields a partially decoded (still valid) buffer.
pub fn decode(src: &[u8], out_len: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(out_len);
    let mut pos = 0;
    while out.len() < out_len && pos < src.len() {
        let n = src[pos] as i8;
        pos += 1;
        if n >= 0 {
            let count = n as usize + 1;
            let take = count.min(src.len() - pos).min(out_len - out.len());
            out.extend_from_slice(&src[pos..pos + take]);
            pos += count;
        } else if n != -128 {
            if pos >= src.len() {
                break;
            }
            let count = (-(n as i32)) as usize + 1;
            let take = count.min(out_len - out.len());
            let value = src[pos];
            pos += 1;
            out.resize(out.len() + take, value);
        }
        // -128 is a no-op
    }
    out
}

/// Encode `src` with byte-run compression.
///
/// Runs of two or more equal bytes become replicate records; isolated bytes
/// are batched into literal-copy records. Both record kinds are split at
/// 128 bytes.
pub fn encode(src: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(src.len() / 2 + 16);
    let mut pos = 0;
    // start of a pending literal batch, or None
    let mut literal_start: Option<usize> = None;

    while pos < src.len() {
        let value = src[pos];
        let mut run = 1;
        while pos + run < src.len() && src[pos + run] == value {
            run += 1;
        }
        if run >= 2 {
            if let Some(start) = literal_start.take() {
                emit_literal(&mut out, &src[start..pos]);
            }
            let mut remaining = run;
            while remaining > 128 {
                out.push(129); // -127 as u8: replicate 128 times
                out.push(value);
                remaining -= 128;
            }
            out.push((256 - remaining as u16 + 1) as u8);
            out.push(value);
        } else if literal_start.is_none() {
            literal_start = Some(pos);
        }
        pos += run;
    }
    if let Some(start) = literal_start {
        emit_literal(&mut out, &src[start..]);
    }
    out
}

fn emit_literal(out: &mut Vec<u8>, bytes: &[u8]) {
    for chunk in bytes.chunks(128) {
        out.push(chunk.len() as u8 - 1);
        out.extend_from_slice(chunk);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_literal() {
        // control 2 => copy 3 bytes
        assert_eq!(decode(&[2, 10, 20, 30], 3), vec![10, 20, 30]);
    }

    #[test]
    fn test_decode_replicate() {
        // control -3 (253) => replicate 4 times
        assert_eq!(decode(&[253, 7], 4), vec![7, 7, 7, 7]);
    }

    #[test]
    fn test_decode_noop_and_padding() {
        // -128 skipped; trailing bytes past out_len ignored
        assert_eq!(decode(&[128, 0, 42, 255, 9], 1), vec![42]);
    }

    #[test]
    fn test_decode_stops_at_out_len() {
        let encoded = [253, 7, 253, 8];
        assert_eq!(decode(&encoded, 3), vec![7, 7, 7]);
    }

    #[test]
    fn test_encode_record_layout() {
        // five 5s, two 9s, then literal [1,2,3]
        let encoded = encode(&[5, 5, 5, 5, 5, 9, 9, 1, 2, 3]);
        assert_eq!(encoded, vec![252, 5, 255, 9, 2, 1, 2, 3]);
    }

    #[test]
    fn test_encode_long_run_split() {
        let src = vec![3u8; 300];
        let encoded = encode(&src);
        // 128 + 128 + 44
        assert_eq!(encoded, vec![129, 3, 129, 3, (256 - 44 + 1) as u8, 3]);
        assert_eq!(decode(&encoded, 300), src);
    }

    #[test]
    fn test_encode_long_literal_split() {
        let src: Vec<u8> = (0..200u16).map(|i| (i % 2) as u8 + (i / 2) as u8).collect();
        let encoded = encode(&src);
        assert_eq!(decode(&encoded, src.len()), src);
    }

    #[test]
    fn test_round_trip_mixed() {
        let mut src = Vec::new();
        for i in 0..500u32 {
            src.push((i * 7 % 5) as u8);
            if i % 3 == 0 {
                src.extend_from_slice(&[42; 9]);
            }
        }
        let encoded = encode(&src);
        assert_eq!(decode(&encoded, src.len()), src);
    }

    #[test]
    fn test_round_trip_empty() {
        assert!(encode(&[]).is_empty());
        assert!(decode(&[], 0).is_empty());
    }
}
