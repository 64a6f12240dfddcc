use crate::{DecodedImage, ImageError};
use image::{imageops, imageops::FilterType, RgbImage};
use posedata_base::Tensor;

/// Convert a 3-channel decoded image to 8-bit RGB.
///
/// 16-bit samples keep their high byte, float samples are clamped to
/// [0, 1] and scaled to [0, 255].
pub fn to_rgb8(image: &DecodedImage) -> Result<Tensor<u8>, ImageError> {
    if image.channels() != 3 {
        return Err(ImageError::Channels {
            expected: 3,
            got: image.channels(),
        });
    }

    Ok(match image {
        DecodedImage::U8(t) => t.clone(),
        DecodedImage::U16(t) => t.map(|&v| (v >> 8) as u8),
        DecodedImage::F32(t) => t.map(|&v| (v.clamp(0.0, 1.0) * 255.0).round() as u8),
    })
}

fn as_rgb_image(rgb: &Tensor<u8>) -> Result<RgbImage, ImageError> {
    let (h, w, c) = rgb.hwc()?;
    if c != 3 {
        return Err(ImageError::Channels { expected: 3, got: c });
    }
    RgbImage::from_raw(w as u32, h as u32, rgb.data.clone()).ok_or_else(|| {
        ImageError::Decode(format!("pixel buffer does not match {}x{} RGB", w, h))
    })
}

fn from_rgb_image(img: RgbImage) -> Result<Tensor<u8>, ImageError> {
    let (w, h) = img.dimensions();
    Ok(Tensor::new(vec![h as usize, w as usize, 3], img.into_raw())?)
}

/// Mirror an RGB tensor around its vertical axis.
pub fn flip_horizontal(rgb: &Tensor<u8>) -> Result<Tensor<u8>, ImageError> {
    let img = as_rgb_image(rgb)?;
    from_rgb_image(imageops::flip_horizontal(&img))
}

/// Resize an RGB tensor to `size` x `size` with bilinear filtering.
///
/// The aspect ratio is not preserved.
pub fn resize_square(rgb: &Tensor<u8>, size: u32) -> Result<Tensor<u8>, ImageError> {
    let img = as_rgb_image(rgb)?;
    if img.width() == size && img.height() == size {
        return from_rgb_image(img);
    }
    from_rgb_image(imageops::resize(&img, size, size, FilterType::Triangle))
}

/// Turn a decoded image into the square RGB tensor handed to a pose detector:
/// optional mirror, then resize to `size` x `size`.
///
/// The `image` crate already decodes to RGB order, so no channel swap is needed.
pub fn prepare_for_detection(
    image: &DecodedImage,
    size: u32,
    mirror: bool,
) -> Result<Tensor<u8>, ImageError> {
    let rgb = to_rgb8(image)?;
    let rgb = if mirror { flip_horizontal(&rgb)? } else { rgb };
    resize_square(&rgb, size)
}
