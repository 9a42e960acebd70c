//! Decodes file bytes into rasters and encodes rasters back for a target extension.
//!
//! Pure functions over byte buffers; the engine owns all file I/O. JPEG is written lossy
//! at the requested quality, PNG, GIF and BMP losslessly (GIF within its palette).

use std::borrow::Cow;
use std::io::Cursor;
use std::str::FromStr;

use image::codecs::bmp::BmpEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ColorType, DynamicImage, ImageError};

use crate::core::Raster;
use crate::utils::{DEFAULT_JPEG_QUALITY, ImageFormat, MediaError, MediaResult};

/// Decodes `bytes` as the format named by `extension`.
pub fn decode(bytes: &[u8], extension: &str) -> MediaResult<Raster> {
    let format = ImageFormat::from_str(extension)?;

    image::load_from_memory_with_format(bytes, format.codec_format())
        .map(Raster::from)
        .map_err(|e| match e {
            ImageError::Unsupported(e) => MediaError::unsupported_format(e.to_string()),
            other => MediaError::corrupt(format!("{} data: {other}", format.primary_extension())),
        })
}

/// Encodes `raster` for `extension` using [`DEFAULT_JPEG_QUALITY`].
pub fn encode(raster: &Raster, extension: &str) -> MediaResult<Vec<u8>> {
    encode_with_quality(raster, extension, DEFAULT_JPEG_QUALITY)
}

/// Encodes `raster` for `extension`; `quality` applies to JPEG only.
pub fn encode_with_quality(raster: &Raster, extension: &str, quality: u8) -> MediaResult<Vec<u8>> {
    let format = ImageFormat::from_str(extension)?;

    let (width, height) = raster.dimensions();
    if width == 0 || height == 0 {
        return Err(MediaError::encode(format!(
            "cannot encode an empty {width}x{height} raster"
        )));
    }

    let normalised = normalise_for(raster.as_image(), format);
    let mut buf = Vec::new();

    let written = match format {
        ImageFormat::Jpeg => normalised.write_with_encoder(JpegEncoder::new_with_quality(
            &mut buf,
            quality.clamp(1, 100),
        )),
        ImageFormat::Png => normalised.write_with_encoder(PngEncoder::new(&mut buf)),
        ImageFormat::Bmp => normalised.write_with_encoder(BmpEncoder::new(&mut buf)),
        ImageFormat::Gif => normalised.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Gif),
    };

    written.map_err(|e| match e {
        ImageError::Unsupported(e) => MediaError::unsupported_format(e.to_string()),
        other => MediaError::encode(other.to_string()),
    })?;

    Ok(buf)
}

/// Converts the pixel layout to one the target encoder accepts.
fn normalise_for(image: &DynamicImage, format: ImageFormat) -> Cow<'_, DynamicImage> {
    let color = image.color();
    match (format, color) {
        (ImageFormat::Jpeg, ColorType::L8 | ColorType::Rgb8) => Cow::Borrowed(image),
        (ImageFormat::Jpeg, ColorType::L16 | ColorType::La8 | ColorType::La16) => {
            Cow::Owned(DynamicImage::ImageLuma8(image.to_luma8()))
        }
        (ImageFormat::Jpeg, _) => Cow::Owned(DynamicImage::ImageRgb8(image.to_rgb8())),

        (ImageFormat::Bmp, ColorType::L8 | ColorType::La8 | ColorType::Rgb8 | ColorType::Rgba8) => {
            Cow::Borrowed(image)
        }
        (ImageFormat::Bmp, _) if color.has_alpha() => {
            Cow::Owned(DynamicImage::ImageRgba8(image.to_rgba8()))
        }
        (ImageFormat::Bmp, _) => Cow::Owned(DynamicImage::ImageRgb8(image.to_rgb8())),

        (ImageFormat::Gif, ColorType::Rgba8) => Cow::Borrowed(image),
        (ImageFormat::Gif, _) => Cow::Owned(DynamicImage::ImageRgba8(image.to_rgba8())),

        (ImageFormat::Png, ColorType::Rgb32F | ColorType::Rgba32F) => {
            Cow::Owned(DynamicImage::ImageRgba16(image.to_rgba16()))
        }
        (ImageFormat::Png, _) => Cow::Borrowed(image),
    }
}
