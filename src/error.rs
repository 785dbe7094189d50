//! Error types for canvas edits and image I/O

use std::path::PathBuf;

use thiserror::Error;

use crate::canvas::Region;

/// Result type alias for canvasfe operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading, editing or saving an image
#[derive(Error, Debug)]
pub enum Error {
    /// The input file is missing, unreadable or not a decodable image
    #[error("failed to load '{}'", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The output could not be encoded or written
    #[error("failed to save '{}'", .path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The output extension does not map to a known encoder
    #[error("unsupported output format for '{}'", .0.display())]
    UnsupportedFormat(PathBuf),

    /// A region does not fit inside the image it targets
    #[error(
        "region {}x{} at ({}, {}) does not fit in a {image_w}x{image_h} image",
        .region.width, .region.height, .region.x, .region.y
    )]
    RegionOutOfBounds {
        region: Region,
        image_w: u32,
        image_h: u32,
    },

    /// A requested canvas size overflows `u32` or the addressable buffer size
    #[error("canvas {width}x{height} extended by {extra_w}x{extra_h} overflows")]
    Dimensions {
        width: u32,
        height: u32,
        extra_w: u32,
        extra_h: u32,
    },
}
