//! Brushes and the per-color stamp cache.
//!
//! A brush is either one of the built-in shapes (circle, square, spray) or
//! a custom image clipped from the canvas. Stamping renders the brush in
//! the requested color; rendered stamps are cached per palette index and
//! the whole cache is dropped whenever size, shape or palette changes.

use crate::control::OpControl;
use crate::fill::FillEngine;
use crate::modes::DrawMode;
use crate::symmetry::{Point, SymmetryTransform};
use pixelpaint_core::{PixelBuffer, Result};
use rand::rngs::StdRng;
use rand::{Rng, RngExt, SeedableRng};

const MIN_SIZE: i32 = 1;
const MAX_SIZE: i32 = 100;

/// Built-in brush shapes plus canvas clippings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrushKind {
    Custom,
    Circle,
    Square,
    Spray,
}

/// A rendered brush ready to blit: an indexed image plus its transparent
/// key (None for fully opaque stamps).
#[derive(Debug, Clone)]
pub struct Stamp {
    pub image: PixelBuffer,
    pub transparent: Option<u8>,
}

/// A custom brush's source image, kept in its original colors so Matte
/// stamps and recolored stamps both render from it.
#[derive(Debug, Clone)]
struct CustomImage {
    image: PixelBuffer,
    bg: u8,
}

/// A stampable brush with its per-color stamp cache.
pub struct Brush {
    kind: BrushKind,
    size: i32,
    custom: Option<CustomImage>,
    handle: (i32, i32),
    num_colors: usize,
    cache: Vec<Option<Stamp>>,
}

impl Brush {
    /// Create a built-in brush. Sizes are clamped to 1..=100; a zero size
    /// downgrades square and spray shapes to the single-pixel circle.
    pub fn new(kind: BrushKind, size: i32) -> Self {
        let mut b = Self {
            kind,
            size: MIN_SIZE,
            custom: None,
            handle: (0, 0),
            num_colors: 256,
            cache: empty_cache(),
        };
        b.set_size(size);
        b
    }

    /// Clip a custom brush out of a canvas region. Corner coordinates are
    /// inclusive and may be in either order; `bg` is the transparent key.
    ///
    /// # Errors
    ///
    /// Returns an error when the region lies entirely off the canvas.
    pub fn from_region(canvas: &PixelBuffer, from: Point, to: Point, bg: u8) -> Result<Self> {
        let image = canvas.extract(from.x, from.y, to.x, to.y)?;
        let w = image.width() as i32;
        let h = image.height() as i32;
        Ok(Self {
            kind: BrushKind::Custom,
            size: (w + h) / 2,
            handle: (w / 2, h / 2),
            custom: Some(CustomImage { image, bg }),
            num_colors: 256,
            cache: empty_cache(),
        })
    }

    pub fn kind(&self) -> BrushKind {
        self.kind
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    pub fn handle(&self) -> (i32, i32) {
        self.handle
    }

    /// Resize the brush, clamping to 1..=100 and downgrading square and
    /// spray to a circle at the minimum. Invalidates the stamp cache.
    pub fn set_size(&mut self, size: i32) {
        let size = if size < MIN_SIZE {
            if matches!(self.kind, BrushKind::Square | BrushKind::Spray) {
                self.kind = BrushKind::Circle;
            }
            MIN_SIZE
        } else {
            size.min(MAX_SIZE)
        };
        self.size = size;
        self.cache = empty_cache();
        match self.kind {
            BrushKind::Square => self.handle = ((size + 1) / 2, (size + 1) / 2),
            BrushKind::Circle => {
                self.handle = if size == 1 { (0, 0) } else { (size, size) };
            }
            BrushKind::Spray => {
                let c = (size * 3 + 1) / 2;
                self.handle = (c, c);
            }
            BrushKind::Custom => {}
        }
    }

    /// Switch the brush shape, keeping the current size. No-op for the
    /// same kind; otherwise recalculates the handle and wipes the cache.
    pub fn set_kind(&mut self, kind: BrushKind) {
        if kind != self.kind && kind != BrushKind::Custom {
            self.kind = kind;
            self.custom = None;
            self.set_size(self.size);
        }
    }

    /// Tell the brush how many palette entries exist; custom recoloring
    /// wraps its substitute key at this count. Invalidates the cache.
    pub fn set_num_colors(&mut self, n: usize) {
        self.num_colors = n.max(2);
        self.cache = empty_cache();
    }

    /// Drop every cached stamp (palette contents changed).
    pub fn invalidate(&mut self) {
        self.cache = empty_cache();
    }

    /// Render a stamp of this brush in one color.
    fn render_stamp(&self, color: u8) -> Result<Stamp> {
        match self.kind {
            BrushKind::Custom => self.render_custom(color),
            BrushKind::Circle => self.render_circle(color),
            BrushKind::Square => self.render_square(color),
            BrushKind::Spray => self.render_spray(color),
        }
    }

    fn render_custom(&self, color: u8) -> Result<Stamp> {
        let Some(custom) = &self.custom else {
            // custom kind always carries an image
            return one_pixel(color);
        };
        let mut image = custom.image.clone();
        let mut bg = custom.bg;
        if bg == color {
            // keep the silhouette visible by moving the key off the color
            bg = ((color as usize + 1) % self.num_colors) as u8;
            for px in image.data_mut() {
                *px = if *px != custom.bg { color } else { bg };
            }
        } else {
            for px in image.data_mut() {
                if *px != bg {
                    *px = color;
                }
            }
        }
        Ok(Stamp {
            image,
            transparent: Some(bg),
        })
    }

    fn render_circle(&self, color: u8) -> Result<Stamp> {
        if self.size == 1 {
            return one_pixel(color);
        }
        let dim = (self.size * 2 + 1) as u32;
        let bg = if color == 0 { 1 } else { 0 };
        let mut image = PixelBuffer::new(dim, dim)?;
        image.fill(bg);
        let mut eng = FillEngine::default();
        eng.fill_circle(
            &mut image,
            color,
            Point::new(self.size, self.size),
            self.size - 1,
            &mut OpControl::new(),
        );
        Ok(Stamp {
            image,
            transparent: Some(bg),
        })
    }

    fn render_square(&self, color: u8) -> Result<Stamp> {
        let dim = (self.size + 1) as u32;
        let mut image = PixelBuffer::new(dim, dim)?;
        image.fill(color);
        Ok(Stamp {
            image,
            transparent: None,
        })
    }

    fn render_spray(&self, color: u8) -> Result<Stamp> {
        let dim = (self.size * 3 + 1) as u32;
        let bg = if color == 0 { 1 } else { 0 };
        let mut image = PixelBuffer::new(dim, dim)?;
        image.fill(bg);
        match self.size {
            1 => {
                image.set(0, 1, color);
                image.set(2, 0, color);
                image.set(2, 2, color);
            }
            2 => {
                image.set(3, 0, color);
                image.set(0, 2, color);
                image.set(3, 3, color);
                image.set(6, 3, color);
                image.set(3, 5, color);
            }
            _ => {
                // fixed seed per size keeps the scatter stable across stamps
                let mut rng = StdRng::seed_from_u64(self.size as u64);
                let radius = self.size as f64 * 1.5;
                for _ in 0..self.size * 3 {
                    let p = scatter_offset(&mut rng, self.handle.0, self.handle.1, radius);
                    image.set(p.x, p.y, color);
                }
            }
        }
        Ok(Stamp {
            image,
            transparent: Some(bg),
        })
    }

    /// The stamp used for Color and Cycle stamping, cached per color.
    fn cached_stamp(&mut self, color: u8) -> Result<Stamp> {
        let slot = color as usize;
        if let Some(stamp) = &self.cache[slot] {
            return Ok(stamp.clone());
        }
        let stamp = self.render_stamp(color)?;
        self.cache[slot] = Some(stamp.clone());
        Ok(stamp)
    }

    /// Stamp the brush at a point, expanded through symmetry.
    ///
    /// Matte keeps a custom brush's own colors and skips its background;
    /// Replace copies the whole rectangle; Color and Cycle render the
    /// silhouette in `color`. Built-in shapes treat Matte and Replace as
    /// Color since they have no colors of their own.
    pub fn draw(
        &mut self,
        buf: &mut PixelBuffer,
        color: u8,
        at: Point,
        mode: DrawMode,
        symm: &mut SymmetryTransform,
        apply_symm: bool,
        ctl: &mut OpControl,
    ) -> Result<()> {
        let mut mode = mode;
        if let Some(custom) = &self.custom {
            if mode == DrawMode::Matte && color == custom.bg {
                mode = DrawMode::Color;
            }
        }

        let custom_stamp = match (&self.custom, mode) {
            (Some(custom), DrawMode::Matte) => Some(Stamp {
                image: custom.image.clone(),
                transparent: Some(custom.bg),
            }),
            (Some(custom), DrawMode::Replace) => {
                let mut image = custom.image.clone();
                if color == custom.bg {
                    image.fill(color);
                }
                Some(Stamp {
                    image,
                    transparent: None,
                })
            }
            _ => None,
        };
        let stamp = match custom_stamp {
            Some(stamp) => stamp,
            None => self.cached_stamp(color)?,
        };

        let (hx, hy) = self.handle;
        let w = buf.width() as i32;
        let h = buf.height() as i32;
        let sw = stamp.image.width() as i32;
        let sh = stamp.image.height() as i32;
        for p in symm.expand_point(at, apply_symm, ctl) {
            let x = p.x - hx;
            let y = p.y - hy;
            // skip stamps entirely off the canvas
            if x + sw <= 0 || y + sh <= 0 || x >= w || y >= h {
                continue;
            }
            buf.blit(&stamp.image, x, y, stamp.transparent);
        }
        Ok(())
    }
}

impl std::fmt::Debug for Brush {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Brush")
            .field("kind", &self.kind)
            .field("size", &self.size)
            .field("handle", &self.handle)
            .finish()
    }
}

fn empty_cache() -> Vec<Option<Stamp>> {
    vec![None; 256]
}

fn one_pixel(color: u8) -> Result<Stamp> {
    Ok(Stamp {
        image: PixelBuffer::from_vec(1, 1, vec![color])?,
        transparent: None,
    })
}

/// A random point within `radius` of the center, drawn in polar form so
/// the scatter thins toward the rim.
pub(crate) fn scatter_offset(rng: &mut impl Rng, xc: i32, yc: i32, radius: f64) -> Point {
    let angle = rng.random::<f64>() * 2.0 * std::f64::consts::PI;
    let dist = rng.random::<f64>() * radius;
    Point::new(
        xc + (dist * angle.cos()) as i32,
        yc + (dist * angle.sin()) as i32,
    )
}
