//! Image-to-tensor preprocessing.
//!
//! The model expects a `(1, size, size, 3)` NHWC float tensor. Aspect ratio is
//! preserved by scaling until the target box is covered and center-cropping,
//! never by stretching.

use image::{DynamicImage, imageops::FilterType};
use ndarray::Array4;

use crate::error::PipelineError;
use crate::pipeline::config::PixelScaling;

pub fn preprocess(
    bytes: &[u8],
    size: u32,
    scaling: PixelScaling,
) -> Result<Array4<f32>, PipelineError> {
    let img = image::load_from_memory(bytes)?;
    to_tensor(&fit(&img, size), size, scaling)
}

/// Cover-resize then center-crop to `size` x `size`.
fn fit(img: &DynamicImage, size: u32) -> DynamicImage {
    let (w, h) = (img.width(), img.height());
    let scale = (size as f32 / w as f32).max(size as f32 / h as f32);
    let new_w = ((w as f32 * scale).round() as u32).max(size);
    let new_h = ((h as f32 * scale).round() as u32).max(size);

    let resized = img.resize_exact(new_w, new_h, FilterType::Lanczos3);
    let crop_x = (new_w - size) / 2;
    let crop_y = (new_h - size) / 2;
    resized.crop_imm(crop_x, crop_y, size, size)
}

/// Interleaved RGB bytes into an NHWC float tensor with a batch dim of 1,
/// applying the configured pixel-scaling contract.
fn to_tensor(
    img: &DynamicImage,
    size: u32,
    scaling: PixelScaling,
) -> Result<Array4<f32>, PipelineError> {
    let rgb = img.to_rgb8();
    let raw = rgb.into_raw();

    let data: Vec<f32> = match scaling {
        PixelScaling::Raw => raw.iter().map(|&v| v as f32).collect(),
        PixelScaling::Unit => raw.iter().map(|&v| v as f32 / 255.0).collect(),
    };

    let tensor = Array4::from_shape_vec((1, size as usize, size as usize, 3), data)?;
    Ok(tensor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;

    fn encode_png(img: RgbImage) -> Vec<u8> {
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn output_shape_is_exact_for_any_input_size() {
        for (w, h) in [(100, 50), (50, 100), (224, 224), (640, 7)] {
            let bytes = encode_png(RgbImage::new(w, h));
            let tensor = preprocess(&bytes, 224, PixelScaling::Raw).unwrap();
            assert_eq!(tensor.shape(), &[1, 224, 224, 3]);
        }
    }

    #[test]
    fn zero_image_does_not_panic() {
        let bytes = encode_png(RgbImage::new(64, 64));
        let tensor = preprocess(&bytes, 224, PixelScaling::Unit).unwrap();
        assert_eq!(tensor.shape(), &[1, 224, 224, 3]);
        assert!(tensor.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn raw_scaling_keeps_byte_range() {
        let img = RgbImage::from_pixel(32, 32, Rgb([255, 0, 128]));
        let tensor = preprocess(&encode_png(img), 224, PixelScaling::Raw).unwrap();
        assert_eq!(tensor[[0, 112, 112, 0]], 255.0);
        assert_eq!(tensor[[0, 112, 112, 1]], 0.0);
    }

    #[test]
    fn unit_scaling_maps_into_zero_one() {
        let img = RgbImage::from_pixel(32, 32, Rgb([255, 255, 255]));
        let tensor = preprocess(&encode_png(img), 224, PixelScaling::Unit).unwrap();
        assert!(tensor.iter().all(|&v| (0.0..=1.0).contains(&v)));
        assert_eq!(tensor[[0, 0, 0, 0]], 1.0);
    }

    #[test]
    fn wide_image_is_cropped_not_stretched() {
        // 400x200 source: a centered 200px-wide red band flanked by blue.
        // Cover-resize scales to 448x224 and the center crop lands entirely
        // inside the red band; a stretch-resize would keep blue at the edges.
        let img = RgbImage::from_fn(400, 200, |x, _| {
            if (100..300).contains(&x) {
                Rgb([255, 0, 0])
            } else {
                Rgb([0, 0, 255])
            }
        });
        let tensor = preprocess(&encode_png(img), 224, PixelScaling::Raw).unwrap();

        for x in [8usize, 112, 215] {
            let r = tensor[[0, 112, x, 0]];
            let b = tensor[[0, 112, x, 2]];
            assert!(r > 200.0, "expected red at x={}, got r={}", x, r);
            assert!(b < 55.0, "expected no blue at x={}, got b={}", x, b);
        }
    }

    #[test]
    fn undecodable_bytes_are_an_input_error() {
        let err = preprocess(b"not an image", 224, PixelScaling::Raw).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidImage(_)));
    }
}
