// ============================================================================
// TRANSFORM OPERATIONS — canvas extension
// ============================================================================

use image::{Rgba, RgbaImage};
use rayon::prelude::*;

use crate::canvas::{Anchor, EXTEND_ROWS, OPAQUE_BLACK};
use crate::error::{Error, Result};

/// Grow the canvas by `extra_w × extra_h`, placing the old content at `anchor`.
/// `fill` is the colour used for the new empty space.
pub fn extend_canvas(
    image:   &RgbaImage,
    extra_w: u32,
    extra_h: u32,
    anchor:  Anchor,
    fill:    Rgba<u8>,
) -> Result<RgbaImage> {
    let (old_w, old_h) = image.dimensions();
    let overflow = || Error::Dimensions { width: old_w, height: old_h, extra_w, extra_h };
    let new_w = old_w.checked_add(extra_w).ok_or_else(overflow)?;
    let new_h = old_h.checked_add(extra_h).ok_or_else(overflow)?;
    // The RGBA buffer itself must be addressable
    (new_w as usize)
        .checked_mul(new_h as usize)
        .and_then(|n| n.checked_mul(4))
        .ok_or_else(overflow)?;

    // The pixel offset of the old image within the new canvas
    let (offset_x, offset_y) = anchor.offset(extra_w, extra_h);

    let mut new_img = RgbaImage::from_pixel(new_w, new_h, fill);
    if old_w == 0 || old_h == 0 {
        return Ok(new_img);
    }

    let src_stride = old_w as usize * 4;
    let dst_stride = new_w as usize * 4;
    let col_start = offset_x as usize * 4;
    let src_raw = image.as_raw();

    // Copy source rows in parallel; rows outside the source keep the fill.
    let dst_raw: &mut [u8] = &mut new_img;
    dst_raw
        .par_chunks_mut(dst_stride)
        .enumerate()
        .skip(offset_y as usize)
        .take(old_h as usize)
        .for_each(|(dy, row)| {
            let sy = dy - offset_y as usize;
            let src_row = &src_raw[sy * src_stride..(sy + 1) * src_stride];
            row[col_start..col_start + src_stride].copy_from_slice(src_row);
        });

    log::debug!(
        "extended canvas {}x{} -> {}x{} (content at {},{})",
        old_w, old_h, new_w, new_h, offset_x, offset_y
    );
    Ok(new_img)
}

/// Append [`EXTEND_ROWS`] rows of opaque black below the image.
pub fn extend_bottom(image: &RgbaImage) -> Result<RgbaImage> {
    extend_canvas(image, 0, EXTEND_ROWS, Anchor::TopLeft, OPAQUE_BLACK)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(w: u32, h: u32) -> RgbaImage {
        RgbaImage::from_fn(w, h, |x, y| Rgba([x as u8, y as u8, (x + y) as u8, 128]))
    }

    #[test]
    fn extend_bottom_keeps_content_top_left() {
        let src = gradient(7, 5);
        let out = extend_bottom(&src).unwrap();
        assert_eq!(out.dimensions(), (7, 5 + EXTEND_ROWS));

        for y in 0..out.height() {
            for x in 0..out.width() {
                let expected = if y < 5 { *src.get_pixel(x, y) } else { OPAQUE_BLACK };
                assert_eq!(*out.get_pixel(x, y), expected, "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn bottom_right_anchor_places_content_in_corner() {
        let src = gradient(3, 2);
        let fill = Rgba([9, 9, 9, 255]);
        let out = extend_canvas(&src, 4, 1, Anchor::BottomRight, fill).unwrap();
        assert_eq!(out.dimensions(), (7, 3));
        assert_eq!(*out.get_pixel(4, 1), *src.get_pixel(0, 0));
        assert_eq!(*out.get_pixel(6, 2), *src.get_pixel(2, 1));
        assert_eq!(*out.get_pixel(3, 1), fill);
        assert_eq!(*out.get_pixel(6, 0), fill);
    }

    #[test]
    fn zero_extension_is_a_copy() {
        let src = gradient(4, 4);
        let out = extend_canvas(&src, 0, 0, Anchor::TopLeft, OPAQUE_BLACK).unwrap();
        assert_eq!(out, src);
    }

    #[test]
    fn empty_source_yields_pure_fill() {
        let src = RgbaImage::new(0, 0);
        let out = extend_canvas(&src, 2, 3, Anchor::TopLeft, OPAQUE_BLACK).unwrap();
        assert_eq!(out.dimensions(), (2, 3));
        assert!(out.pixels().all(|p| *p == OPAQUE_BLACK));
    }

    #[test]
    fn overflowing_size_is_an_error() {
        let src = gradient(2, 2);
        let err = extend_canvas(&src, 0, u32::MAX, Anchor::TopLeft, OPAQUE_BLACK).unwrap_err();
        assert!(matches!(err, Error::Dimensions { extra_h: u32::MAX, .. }));
    }

    #[test]
    fn unaddressable_buffer_is_an_error() {
        let src = gradient(1, 1);
        let err = extend_canvas(&src, u32::MAX - 1, u32::MAX - 1, Anchor::TopLeft, OPAQUE_BLACK)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Dimensions { width: 1, height: 1, extra_w, extra_h }
                if extra_w == u32::MAX - 1 && extra_h == u32::MAX - 1
        ));
    }
}
