// ============================================================================
// CANVAS-LEVEL OPERATIONS — solid region fills
// ============================================================================

use image::{Rgba, RgbaImage};
use rayon::prelude::*;

use crate::canvas::{Anchor, BLACKOUT_HEIGHT, BLACKOUT_WIDTH, OPAQUE_BLACK, Region};
use crate::error::Result;

/// Overwrite every pixel inside `region` with `color`.
///
/// No blending: alpha is replaced along with the colour channels. A region
/// that reaches outside the image is rejected before any pixel is written.
pub fn fill_region(image: &mut RgbaImage, region: Region, color: Rgba<u8>) -> Result<()> {
    let (width, height) = image.dimensions();
    region.check_within(width, height)?;
    if region.is_empty() {
        return Ok(());
    }

    let row_bytes = width as usize * 4;
    let col_start = region.x as usize * 4;
    let col_end = (region.x + region.width) as usize * 4;
    let raw: &mut [u8] = image;

    raw.par_chunks_mut(row_bytes)
        .skip(region.y as usize)
        .take(region.height as usize)
        .for_each(|row| {
            for px in row[col_start..col_end].chunks_exact_mut(4) {
                px.copy_from_slice(&color.0);
            }
        });

    log::debug!(
        "filled {}x{} at ({}, {}) with {:?}",
        region.width, region.height, region.x, region.y, color.0
    );
    Ok(())
}

/// Black out the [`BLACKOUT_WIDTH`] × [`BLACKOUT_HEIGHT`] rectangle in the
/// bottom-right corner. Returns the region that was filled.
pub fn blackout_corner(image: &mut RgbaImage) -> Result<Region> {
    let (width, height) = image.dimensions();
    let region = Region::anchored(width, height, BLACKOUT_WIDTH, BLACKOUT_HEIGHT, Anchor::BottomRight)?;
    fill_region(image, region, OPAQUE_BLACK)?;
    Ok(region)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    const WHITE_HALF: Rgba<u8> = Rgba([255, 255, 255, 100]);

    #[test]
    fn fill_only_touches_region() {
        let mut img = RgbaImage::from_pixel(10, 8, WHITE_HALF);
        let region = Region::new(2, 3, 4, 2);
        let red = Rgba([255, 0, 0, 255]);
        fill_region(&mut img, region, red).unwrap();

        for (x, y, p) in img.enumerate_pixels() {
            if region.contains(x, y) {
                assert_eq!(*p, red, "inside ({x}, {y})");
            } else {
                assert_eq!(*p, WHITE_HALF, "outside ({x}, {y})");
            }
        }
    }

    #[test]
    fn fill_replaces_alpha() {
        let mut img = RgbaImage::from_pixel(2, 2, WHITE_HALF);
        let clear = Rgba([1, 2, 3, 0]);
        fill_region(&mut img, Region::new(0, 0, 2, 2), clear).unwrap();
        assert!(img.pixels().all(|p| *p == clear));
    }

    #[test]
    fn out_of_bounds_fill_leaves_image_untouched() {
        let mut img = RgbaImage::from_pixel(5, 5, WHITE_HALF);
        let err = fill_region(&mut img, Region::new(3, 3, 3, 1), OPAQUE_BLACK).unwrap_err();
        assert!(matches!(err, Error::RegionOutOfBounds { image_w: 5, image_h: 5, .. }));
        assert!(img.pixels().all(|p| *p == WHITE_HALF));
    }

    #[test]
    fn blackout_covers_bottom_right_corner() {
        let mut img = RgbaImage::from_pixel(300, 150, WHITE_HALF);
        let region = blackout_corner(&mut img).unwrap();
        assert_eq!(region, Region::new(100, 50, 200, 100));

        assert_eq!(*img.get_pixel(100, 50), OPAQUE_BLACK);
        assert_eq!(*img.get_pixel(299, 149), OPAQUE_BLACK);
        assert_eq!(*img.get_pixel(99, 149), WHITE_HALF);
        assert_eq!(*img.get_pixel(299, 49), WHITE_HALF);
        let black = img.pixels().filter(|p| **p == OPAQUE_BLACK).count();
        assert_eq!(black, (BLACKOUT_WIDTH * BLACKOUT_HEIGHT) as usize);
    }

    #[test]
    fn blackout_of_minimum_image_is_total() {
        let mut img = RgbaImage::from_pixel(BLACKOUT_WIDTH, BLACKOUT_HEIGHT, WHITE_HALF);
        blackout_corner(&mut img).unwrap();
        assert!(img.pixels().all(|p| *p == OPAQUE_BLACK));
    }

    #[test]
    fn blackout_rejects_small_image() {
        let mut img = RgbaImage::from_pixel(150, 150, WHITE_HALF);
        assert!(blackout_corner(&mut img).is_err());
        assert!(img.pixels().all(|p| *p == WHITE_HALF));
    }
}
