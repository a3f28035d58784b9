//! Plain pixel buffers for segment artwork.

use std::sync::Arc;

use thiserror::Error;

/// An 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Factory-default LED accent color.
    pub const DEFAULT_ACCENT: Rgba = Rgba::rgb(229, 32, 98);

    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Fully opaque color.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TextureError {
    #[error("texture must have at least one pixel")]
    Empty,
    #[error("pixel count {actual} does not match {width}x{height}")]
    PixelCountMismatch {
        width: u32,
        height: u32,
        actual: usize,
    },
    #[error("lit texture is {lit:?} but unlit is {unlit:?}")]
    DimensionMismatch { lit: (u32, u32), unlit: (u32, u32) },
    #[error("lit and unlit textures disagree on which pixels are transparent")]
    MaskMismatch,
}

/// A width x height RGBA buffer, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl PixelBuffer {
    pub fn new(width: u32, height: u32, pixels: Vec<Rgba>) -> Result<Self, TextureError> {
        if width == 0 || height == 0 {
            return Err(TextureError::Empty);
        }
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(TextureError::PixelCountMismatch {
                width,
                height,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build a buffer by sampling `f` at every (x, y).
    pub fn from_fn(
        width: u32,
        height: u32,
        mut f: impl FnMut(u32, u32) -> Rgba,
    ) -> Result<Self, TextureError> {
        if width == 0 || height == 0 {
            return Err(TextureError::Empty);
        }
        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        Self::new(width, height, pixels)
    }

    /// Same-shape construction for transforms that cannot change dimensions.
    pub(crate) fn from_transform(source: &PixelBuffer, pixels: Vec<Rgba>) -> Self {
        debug_assert_eq!(pixels.len(), source.pixels.len());
        Self {
            width: source.width,
            height: source.height,
            pixels,
        }
    }

    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x < self.width && y < self.height {
            Some(self.pixels[(y * self.width + x) as usize])
        } else {
            None
        }
    }

    #[must_use]
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// The canonical "transparent" color: the pixel at (0, 0).
    ///
    /// Segment artwork keeps its corners transparent by convention, so this
    /// pixel is the reference every other pixel is compared against.
    #[must_use]
    pub fn transparent_reference(&self) -> Rgba {
        self.pixels[0]
    }

    /// Per-pixel mask: true where the pixel matches the transparent reference.
    #[must_use]
    pub fn transparency_mask(&self) -> Vec<bool> {
        let reference = self.transparent_reference();
        self.pixels.iter().map(|p| *p == reference).collect()
    }
}

/// The lit/unlit texture pair for the current accent color.
///
/// Both buffers share dimensions and a transparency mask; the constructor
/// refuses pairs that don't. The unlit buffer never changes. The lit buffer
/// is replaced wholesale through [`TextureSet::swap_lit`] - readers hold an
/// `Arc` to a finished buffer and can never observe a partial write.
#[derive(Debug, Clone)]
pub struct TextureSet {
    lit: Arc<PixelBuffer>,
    unlit: Arc<PixelBuffer>,
}

impl TextureSet {
    pub fn new(lit: PixelBuffer, unlit: PixelBuffer) -> Result<Self, TextureError> {
        check_compatible(&lit, &unlit)?;
        Ok(Self {
            lit: Arc::new(lit),
            unlit: Arc::new(unlit),
        })
    }

    #[must_use]
    pub fn lit(&self) -> &Arc<PixelBuffer> {
        &self.lit
    }

    #[must_use]
    pub fn unlit(&self) -> &Arc<PixelBuffer> {
        &self.unlit
    }

    /// Publish a replacement lit buffer.
    ///
    /// Validates the replacement against the unlit buffer so the shared
    /// transparency mask survives every recolor.
    pub fn swap_lit(&mut self, lit: PixelBuffer) -> Result<(), TextureError> {
        check_compatible(&lit, &self.unlit)?;
        self.lit = Arc::new(lit);
        Ok(())
    }
}

fn check_compatible(lit: &PixelBuffer, unlit: &PixelBuffer) -> Result<(), TextureError> {
    if lit.width() != unlit.width() || lit.height() != unlit.height() {
        return Err(TextureError::DimensionMismatch {
            lit: (lit.width(), lit.height()),
            unlit: (unlit.width(), unlit.height()),
        });
    }
    if lit.transparency_mask() != unlit.transparency_mask() {
        return Err(TextureError::MaskMismatch);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn striped(width: u32, height: u32, on: Rgba) -> PixelBuffer {
        // Transparent border, colored interior.
        PixelBuffer::from_fn(width, height, |x, y| {
            if x == 0 || y == 0 || x == width - 1 || y == height - 1 {
                Rgba::TRANSPARENT
            } else {
                on
            }
        })
        .unwrap()
    }

    #[test]
    fn test_rejects_empty_and_short_buffers() {
        assert_eq!(
            PixelBuffer::new(0, 4, Vec::new()),
            Err(TextureError::Empty)
        );
        assert_eq!(
            PixelBuffer::new(2, 2, vec![Rgba::TRANSPARENT; 3]),
            Err(TextureError::PixelCountMismatch {
                width: 2,
                height: 2,
                actual: 3
            })
        );
    }

    #[test]
    fn test_pixel_lookup_is_bounds_checked() {
        let buffer = striped(4, 4, Rgba::DEFAULT_ACCENT);
        assert_eq!(buffer.pixel(1, 1), Some(Rgba::DEFAULT_ACCENT));
        assert_eq!(buffer.pixel(0, 0), Some(Rgba::TRANSPARENT));
        assert_eq!(buffer.pixel(4, 0), None);
        assert_eq!(buffer.pixel(0, 4), None);
    }

    #[test]
    fn test_texture_set_requires_matching_masks() {
        let lit = striped(4, 4, Rgba::DEFAULT_ACCENT);
        let unlit = striped(4, 4, Rgba::rgb(40, 40, 40));
        assert!(TextureSet::new(lit.clone(), unlit).is_ok());

        let solid = PixelBuffer::from_fn(4, 4, |_, _| Rgba::rgb(40, 40, 40)).unwrap();
        assert_eq!(
            TextureSet::new(lit.clone(), solid).unwrap_err(),
            TextureError::MaskMismatch
        );

        let small = striped(3, 4, Rgba::rgb(40, 40, 40));
        assert_eq!(
            TextureSet::new(lit, small).unwrap_err(),
            TextureError::DimensionMismatch {
                lit: (4, 4),
                unlit: (3, 4)
            }
        );
    }

    #[test]
    fn test_swap_lit_publishes_new_buffer() {
        let lit = striped(4, 4, Rgba::DEFAULT_ACCENT);
        let unlit = striped(4, 4, Rgba::rgb(40, 40, 40));
        let mut set = TextureSet::new(lit, unlit).unwrap();
        let before = Arc::clone(set.lit());

        set.swap_lit(striped(4, 4, Rgba::rgb(0, 128, 255))).unwrap();
        assert!(!Arc::ptr_eq(&before, set.lit()));
        assert_eq!(set.lit().pixel(1, 1), Some(Rgba::rgb(0, 128, 255)));
    }
}
