//! Pixelpaint I/O - ILBM/IFF image codec
//!
//! Translates between the on-disk interleaved-bitplane ILBM format and the
//! in-memory chunky [`pixelpaint_core::PixelBuffer`], together with the
//! palette, display-mode flags and color-cycling ranges stored alongside
//! the pixels.
//!
//! - [`byterun`] - the byte-run (RLE) codec used by BODY chunks
//! - [`planar`] - planar <-> chunky layout conversion
//! - [`iff`] - the chunk container reader/writer

pub mod byterun;
pub mod error;
pub mod iff;
pub mod planar;

pub use error::{IoError, IoResult};
pub use iff::{IffForm, IffImage, classify, decode, encode, load_image, save_image, save_info};
