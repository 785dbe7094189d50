use image::codecs::bmp::BmpEncoder;
use image::codecs::ico::IcoEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::codecs::tga::TgaEncoder;
use image::io::Reader;
use image::{DynamicImage, ImageEncoder, ImageError, RgbaImage};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{Error, Result};

/// JPEG quality used when the caller does not pick one.
pub const DEFAULT_QUALITY: u8 = 90;

/// Output encoders the CLI can write.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SaveFormat {
    #[default]
    Png,
    Jpeg,
    Webp,
    Bmp,
    Tga,
    Ico,
    Tiff,
}

impl SaveFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            SaveFormat::Png  => "png",
            SaveFormat::Jpeg => "jpg",
            SaveFormat::Webp => "webp",
            SaveFormat::Bmp  => "bmp",
            SaveFormat::Tga  => "tga",
            SaveFormat::Ico  => "ico",
            SaveFormat::Tiff => "tiff",
        }
    }

    /// Map a file extension (case-insensitive, without the dot) to a format.
    pub fn from_extension(ext: &str) -> Option<SaveFormat> {
        match ext.to_lowercase().as_str() {
            "png"          => Some(SaveFormat::Png),
            "jpg" | "jpeg" => Some(SaveFormat::Jpeg),
            "webp"         => Some(SaveFormat::Webp),
            "bmp"          => Some(SaveFormat::Bmp),
            "tga"          => Some(SaveFormat::Tga),
            "ico"          => Some(SaveFormat::Ico),
            "tiff" | "tif" => Some(SaveFormat::Tiff),
            _              => None,
        }
    }

    /// Infer the format from a path's extension.
    pub fn from_path(path: &Path) -> Result<SaveFormat> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(SaveFormat::from_extension)
            .ok_or_else(|| Error::UnsupportedFormat(path.to_path_buf()))
    }
}

// ============================================================================
// LOADING
// ============================================================================

/// Load any raster format the `image` crate decodes and convert it to RGBA8.
///
/// The decoder is picked from the file contents, so a JPEG named `.png` or a
/// file without an extension still loads.
pub fn load_rgba(path: &Path) -> Result<RgbaImage> {
    let load_err = |source: ImageError| Error::Load { path: path.to_path_buf(), source };
    let img = Reader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|e| load_err(ImageError::IoError(e)))?
        .decode()
        .map_err(load_err)?;
    log::info!(
        "loaded '{}' ({}x{}, {:?})",
        path.display(),
        img.width(),
        img.height(),
        img.color()
    );
    Ok(img.into_rgba8())
}

// ============================================================================
// ENCODING
// ============================================================================

/// ICO entries hold at most 256×256; larger images are scaled to fit,
/// keeping the aspect ratio.
pub const ICO_MAX_EDGE: u32 = 256;

/// Size an image is written at as an ICO entry.
pub fn ico_dimensions(width: u32, height: u32) -> (u32, u32) {
    let longest = width.max(height);
    if longest <= ICO_MAX_EDGE {
        return (width, height);
    }
    let scale = ICO_MAX_EDGE as f64 / longest as f64;
    let fit = |edge: u32| ((edge as f64 * scale).round() as u32).clamp(1, ICO_MAX_EDGE);
    (fit(width), fit(height))
}

/// Push raw RGBA8 through any `image` encoder.
fn write_rgba<E: ImageEncoder>(encoder: E, image: &RgbaImage) -> std::result::Result<(), ImageError> {
    encoder.write_image(image.as_raw(), image.width(), image.height(), image::ColorType::Rgba8)
}

/// Encode and write an image to a file.
pub fn encode_and_write(
    image:   &RgbaImage,
    path:    &Path,
    format:  SaveFormat,
    quality: u8,
) -> std::result::Result<(), ImageError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    match format {
        SaveFormat::Png => write_rgba(PngEncoder::new(&mut writer), image)?,
        SaveFormat::Bmp => write_rgba(BmpEncoder::new(&mut writer), image)?,
        SaveFormat::Tga => write_rgba(TgaEncoder::new(&mut writer), image)?,
        SaveFormat::Jpeg => {
            // JPEG has no alpha channel
            let rgb = DynamicImage::ImageRgba8(image.clone()).into_rgb8();
            JpegEncoder::new_with_quality(&mut writer, quality.clamp(1, 100)).write_image(
                rgb.as_raw(),
                rgb.width(),
                rgb.height(),
                image::ColorType::Rgb8,
            )?;
        }
        SaveFormat::Webp => {
            drop(writer);
            DynamicImage::ImageRgba8(image.clone())
                .save_with_format(path, image::ImageFormat::WebP)?;
            return Ok(());
        }
        SaveFormat::Ico => {
            let (w, h) = ico_dimensions(image.width(), image.height());
            let entry = if (w, h) == image.dimensions() {
                image.clone()
            } else {
                log::debug!("ICO entry scaled {}x{} -> {}x{}", image.width(), image.height(), w, h);
                image::imageops::resize(image, w, h, image::imageops::FilterType::Lanczos3)
            };
            write_rgba(IcoEncoder::new(&mut writer), &entry)?;
        }
        SaveFormat::Tiff => {
            // Uncompressed RGBA strips
            let to_image_err = |e: tiff::TiffError| {
                ImageError::IoError(std::io::Error::other(format!("TIFF encode error: {}", e)))
            };
            tiff::encoder::TiffEncoder::new(&mut writer)
                .and_then(|mut enc| {
                    enc.write_image::<tiff::encoder::colortype::RGBA8>(
                        image.width(),
                        image.height(),
                        image.as_raw(),
                    )
                })
                .map_err(to_image_err)?;
        }
    }

    writer.flush()?;
    Ok(())
}

/// Save with [`DEFAULT_QUALITY`], wrapping failures with the output path.
pub fn save(image: &RgbaImage, path: &Path, format: SaveFormat) -> Result<()> {
    encode_and_write(image, path, format, DEFAULT_QUALITY).map_err(|source| Error::Save {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!(
        "saved '{}' ({}x{}, {:?})",
        path.display(),
        image.width(),
        image.height(),
        format
    );
    Ok(())
}
