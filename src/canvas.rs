// ============================================================================
// CANVAS GEOMETRY — regions, anchors and the fixed edit constants
// ============================================================================

use image::Rgba;

use crate::error::{Error, Result};

/// Fill colour for both edits.
pub const OPAQUE_BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Rows appended below the image by the canvas extension.
pub const EXTEND_ROWS: u32 = 100;

/// Size of the bottom-right blackout rectangle.
pub const BLACKOUT_WIDTH: u32 = 200;
pub const BLACKOUT_HEIGHT: u32 = 100;

/// Where content (or a region) is pinned inside a larger area.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Anchor {
    #[default]
    TopLeft,
    BottomRight,
}

impl Anchor {
    /// Offset of the pinned item given the free space `(free_w, free_h)`
    /// left over around it.
    pub fn offset(&self, free_w: u32, free_h: u32) -> (u32, u32) {
        match self {
            Anchor::TopLeft     => (0, 0),
            Anchor::BottomRight => (free_w, free_h),
        }
    }
}

/// Half-open pixel rectangle: `[x, x + width) × [y, y + height)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Pin a `width × height` region inside an `image_w × image_h` image.
    ///
    /// Fails with [`Error::RegionOutOfBounds`] when the image is smaller than
    /// the region along either axis; the region is never clamped.
    pub fn anchored(
        image_w: u32,
        image_h: u32,
        width:   u32,
        height:  u32,
        anchor:  Anchor,
    ) -> Result<Self> {
        let (Some(free_w), Some(free_h)) = (image_w.checked_sub(width), image_h.checked_sub(height))
        else {
            return Err(Error::RegionOutOfBounds {
                region: Region::new(0, 0, width, height),
                image_w,
                image_h,
            });
        };
        let (x, y) = anchor.offset(free_w, free_h);
        Ok(Region::new(x, y, width, height))
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x
            && y >= self.y
            && (x - self.x) < self.width
            && (y - self.y) < self.height
    }

    /// True when the whole region lies inside `[0, image_w) × [0, image_h)`.
    pub fn fits_within(&self, image_w: u32, image_h: u32) -> bool {
        let right  = self.x.checked_add(self.width);
        let bottom = self.y.checked_add(self.height);
        matches!((right, bottom), (Some(r), Some(b)) if r <= image_w && b <= image_h)
    }

    /// Like [`Region::fits_within`] but reports the failure as an error.
    pub fn check_within(&self, image_w: u32, image_h: u32) -> Result<()> {
        if self.fits_within(image_w, image_h) {
            Ok(())
        } else {
            Err(Error::RegionOutOfBounds { region: *self, image_w, image_h })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bottom_right_anchor_hugs_the_corner() {
        let r = Region::anchored(640, 480, BLACKOUT_WIDTH, BLACKOUT_HEIGHT, Anchor::BottomRight)
            .unwrap();
        assert_eq!(r, Region::new(440, 380, 200, 100));
        assert!(r.fits_within(640, 480));
    }

    #[test]
    fn exact_size_image_is_fully_covered() {
        let r = Region::anchored(200, 100, 200, 100, Anchor::BottomRight).unwrap();
        assert_eq!(r, Region::new(0, 0, 200, 100));
    }

    #[test]
    fn too_small_image_is_rejected() {
        let err = Region::anchored(199, 100, 200, 100, Anchor::BottomRight).unwrap_err();
        assert!(matches!(err, Error::RegionOutOfBounds { image_w: 199, image_h: 100, .. }));

        assert!(Region::anchored(300, 99, 200, 100, Anchor::TopLeft).is_err());
    }

    #[test]
    fn contains_is_half_open() {
        let r = Region::new(10, 20, 5, 5);
        assert!(r.contains(10, 20));
        assert!(r.contains(14, 24));
        assert!(!r.contains(15, 24));
        assert!(!r.contains(14, 25));
        assert!(!r.contains(9, 20));
    }

    #[test]
    fn overflowing_region_does_not_fit() {
        let r = Region::new(u32::MAX - 1, 0, 10, 1);
        assert!(!r.fits_within(u32::MAX, 10));
        assert!(r.check_within(u32::MAX, 10).is_err());
        assert!(!Region::new(0, 0, 0, 3).fits_within(0, 2));
        assert!(Region::new(0, 0, 0, 3).is_empty());
    }
}
