//! Auto-crop for rasterized bitmaps.
//!
//! Rasterized HTML comes back as a full viewport-sized bitmap with a large
//! white margin. Before embedding, the bitmap is trimmed to the bounding box
//! of its non-background content.

use image::{DynamicImage, GenericImageView, Rgba};

/// Crop `img` to the bounding box of pixels that are not near-white.
///
/// `tolerance` widens what counts as background: a pixel is background when
/// every channel is above `255 - tolerance`. Returns `None` when the image
/// contains no foreground at all (nothing sensible to crop to).
pub fn auto_crop(img: &DynamicImage, tolerance: u8) -> Option<DynamicImage> {
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return None;
    }

    let threshold = 255u8.saturating_sub(tolerance);
    let is_background = |Rgba([r, g, b, _a]): Rgba<u8>| r > threshold && g > threshold && b > threshold;

    let mut min_x = width;
    let mut max_x = 0u32;
    let mut min_y = height;
    let mut max_y = 0u32;

    for (x, y, pixel) in img.pixels() {
        if !is_background(pixel) {
            min_x = min_x.min(x);
            max_x = max_x.max(x);
            min_y = min_y.min(y);
            max_y = max_y.max(y);
        }
    }

    if min_x > max_x || min_y > max_y {
        return None;
    }

    Some(img.crop_imm(min_x, min_y, max_x - min_x + 1, max_y - min_y + 1))
}
