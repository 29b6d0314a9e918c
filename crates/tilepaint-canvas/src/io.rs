//! Image file loading and saving.

use std::io;
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageError, ImageFormat, RgbaImage};
use thiserror::Error;
use tilepaint_engine::raster::PixelBuffer;

/// Errors from reading or writing an image file.
#[derive(Debug, Error)]
pub enum ImageIoError {
    #[error("file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("unsupported or malformed image {path}: {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: ImageError,
    },

    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ImageIoError {
    fn from_image(path: &Path, err: ImageError) -> Self {
        let path = path.to_path_buf();
        match err {
            ImageError::IoError(source) if source.kind() == io::ErrorKind::NotFound => {
                ImageIoError::NotFound { path }
            }
            ImageError::IoError(source) => ImageIoError::Io { path, source },
            source => ImageIoError::Format { path, source },
        }
    }
}

/// Decodes the image at `path` into straight-alpha RGBA8.
///
/// The format is detected from the file contents.
pub fn load_image(path: &Path) -> Result<PixelBuffer, ImageIoError> {
    let reader = image::ImageReader::open(path)
        .map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => ImageIoError::NotFound { path: path.to_path_buf() },
            _ => ImageIoError::Io { path: path.to_path_buf(), source },
        })?
        .with_guessed_format()
        .map_err(|source| ImageIoError::Io { path: path.to_path_buf(), source })?;

    let rgba = reader
        .decode()
        .map_err(|e| ImageIoError::from_image(path, e))?
        .to_rgba8();

    let (w, h) = rgba.dimensions();
    let buffer = PixelBuffer::from_rgba8(w, h, rgba.as_raw()).ok_or_else(|| ImageIoError::Format {
        path: path.to_path_buf(),
        source: ImageError::Parameter(image::error::ParameterError::from_kind(
            image::error::ParameterErrorKind::DimensionMismatch,
        )),
    })?;

    log::info!("loaded {} ({w}x{h})", path.display());
    Ok(buffer)
}

/// Encodes `buffer` to `path`; the format follows the file extension.
///
/// Formats without an alpha channel get the color channels only.
pub fn save_image(buffer: &PixelBuffer, path: &Path) -> Result<(), ImageIoError> {
    let format = ImageFormat::from_path(path).map_err(|e| ImageIoError::from_image(path, e))?;
    let (w, h) = buffer.size();
    let rgba = RgbaImage::from_raw(w, h, buffer.as_bytes().to_vec()).ok_or_else(|| {
        ImageIoError::Format {
            path: path.to_path_buf(),
            source: ImageError::Parameter(image::error::ParameterError::from_kind(
                image::error::ParameterErrorKind::DimensionMismatch,
            )),
        }
    })?;
    let image = DynamicImage::ImageRgba8(rgba);

    let saved = match format {
        ImageFormat::Jpeg => image.to_rgb8().save_with_format(path, format),
        _ => image.save_with_format(path, format),
    };
    saved.map_err(|e| ImageIoError::from_image(path, e))?;

    log::info!("saved {} ({w}x{h}, {format:?})", path.display());
    Ok(())
}
