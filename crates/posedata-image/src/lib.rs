//! Image loading for the posedata pipeline.
//!
//! Wraps the `image` crate to decode files into `Tensor<T>` from
//! `posedata-base` and to prepare them for pose detection.
//!
//! All decoded images use HWC layout: `[height, width, channels]`.

pub mod error;
pub mod prepare;
pub mod types;

pub use error::ImageError;
pub use prepare::{flip_horizontal, prepare_for_detection, resize_square, to_rgb8};
pub use types::DecodedImage;

use image::{DynamicImage, ImageBuffer, Pixel};
use posedata_base::Tensor;
use std::path::Path;

fn buffer_to_tensor<P: Pixel>(
    buf: ImageBuffer<P, Vec<P::Subpixel>>,
) -> Result<Tensor<P::Subpixel>, ImageError> {
    let (width, height) = buf.dimensions();
    let shape = vec![height as usize, width as usize, P::CHANNEL_COUNT as usize];
    Ok(Tensor::new(shape, buf.into_raw())?)
}

/// Decodes an image from raw bytes into a typed tensor.
///
/// The format is detected from the content, not from a file extension.
/// The decoded sample precision (u8, u16 or f32) and channel count are kept,
/// so callers can reject images that are not plain RGB.
///
/// # Errors
///
/// Returns `ImageError::Decode` if the data is invalid or the format is unsupported.
pub fn decode_image(data: &[u8]) -> Result<DecodedImage, ImageError> {
    let img = image::load_from_memory(data)?;

    match img {
        DynamicImage::ImageLuma8(buf) => Ok(DecodedImage::U8(buffer_to_tensor(buf)?)),
        DynamicImage::ImageLumaA8(buf) => Ok(DecodedImage::U8(buffer_to_tensor(buf)?)),
        DynamicImage::ImageRgb8(buf) => Ok(DecodedImage::U8(buffer_to_tensor(buf)?)),
        DynamicImage::ImageRgba8(buf) => Ok(DecodedImage::U8(buffer_to_tensor(buf)?)),
        DynamicImage::ImageLuma16(buf) => Ok(DecodedImage::U16(buffer_to_tensor(buf)?)),
        DynamicImage::ImageLumaA16(buf) => Ok(DecodedImage::U16(buffer_to_tensor(buf)?)),
        DynamicImage::ImageRgb16(buf) => Ok(DecodedImage::U16(buffer_to_tensor(buf)?)),
        DynamicImage::ImageRgba16(buf) => Ok(DecodedImage::U16(buffer_to_tensor(buf)?)),
        DynamicImage::ImageRgb32F(buf) => Ok(DecodedImage::F32(buffer_to_tensor(buf)?)),
        DynamicImage::ImageRgba32F(buf) => Ok(DecodedImage::F32(buffer_to_tensor(buf)?)),
        // DynamicImage is non_exhaustive
        other => Ok(DecodedImage::U8(buffer_to_tensor(other.to_rgba8())?)),
    }
}

/// Reads and decodes an image file.
///
/// # Errors
///
/// Returns `ImageError::Io` if the file cannot be read and
/// `ImageError::Decode` if its content is not a supported image.
pub fn load_image(path: impl AsRef<Path>) -> Result<DecodedImage, ImageError> {
    let data = std::fs::read(path.as_ref())?;
    decode_image(&data)
}
