//! Accent recoloring of the lit segment texture.

use crate::texture::{PixelBuffer, Rgba};

/// Repaint every non-transparent pixel of `mask` with `new_color`.
///
/// The pixel at (0, 0) is the transparent reference by asset convention.
/// Pixels equal to it are copied through unchanged, so the output's
/// transparency mask is always identical to the input's. One per-pixel
/// pass with no cross-pixel dependency; heavy enough on real artwork that
/// callers run it off the UI context and publish the result afterwards.
#[must_use]
pub fn recolor(mask: &PixelBuffer, new_color: Rgba) -> PixelBuffer {
    let reference = mask.transparent_reference();
    let pixels = mask
        .pixels()
        .iter()
        .map(|&p| if p == reference { p } else { new_color })
        .collect();
    PixelBuffer::from_transform(mask, pixels)
}
