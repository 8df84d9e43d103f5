//! Image resampling and pixel-to-tensor normalization.

use crate::constants::input::{BATCH, CHANNELS, HEIGHT, PIXEL_SCALE, WIDTH};
use crate::error::{Error, Result};
use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbImage};

/// Interpolation used when scaling to the model input size.
const RESIZE_FILTER: FilterType = FilterType::Triangle;

/// Model input tensor, NHWC `[1, 640, 640, 3]`, values in `[0, 1]`.
#[derive(Debug, Clone)]
pub struct InputTensor {
    data: Vec<f32>,
}

impl InputTensor {
    /// Tensor shape as fed to the model.
    pub const SHAPE: [usize; 4] = [BATCH, HEIGHT as usize, WIDTH as usize, CHANNELS];

    /// Number of `f32` values in a full tensor.
    pub const LEN: usize = BATCH * HEIGHT as usize * WIDTH as usize * CHANNELS;

    /// Resize an arbitrary image and normalize it into a tensor.
    pub fn from_image(image: &DynamicImage) -> Result<Self> {
        let resized = resize_to_input(image)?;
        Self::from_resized(&resized)
    }

    /// Normalize an image that is already at the model input size.
    pub fn from_resized(resized: &RgbImage) -> Result<Self> {
        if resized.dimensions() != (WIDTH, HEIGHT) {
            return Err(Error::InvalidImage {
                reason: format!(
                    "expected {WIDTH}x{HEIGHT} input, got {}x{}",
                    resized.width(),
                    resized.height()
                ),
            });
        }

        // `pixels()` walks rows top to bottom, left to right, which is the
        // row-major [y][x][c] layout the model expects.
        let mut data = Vec::with_capacity(Self::LEN);
        for pixel in resized.pixels() {
            let [r, g, b] = pixel.0;
            data.push(f32::from(r) / PIXEL_SCALE);
            data.push(f32::from(g) / PIXEL_SCALE);
            data.push(f32::from(b) / PIXEL_SCALE);
        }

        Ok(Self { data })
    }

    /// Flat tensor data in row-major order.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Value at pixel `(x, y)`, channel `c` (0 = R, 1 = G, 2 = B).
    pub fn get(&self, x: u32, y: u32, c: usize) -> Option<f32> {
        if x >= WIDTH || y >= HEIGHT || c >= CHANNELS {
            return None;
        }
        let idx = (y as usize * WIDTH as usize + x as usize) * CHANNELS + c;
        self.data.get(idx).copied()
    }
}

/// Scale an image to exactly the model input size.
///
/// Aspect ratio is not preserved: the model was exported for a square input
/// and the image is stretched to fit.
pub fn resize_to_input(image: &DynamicImage) -> Result<RgbImage> {
    if image.width() == 0 || image.height() == 0 {
        return Err(Error::InvalidImage {
            reason: format!(
                "image must be at least 1x1, got {}x{}",
                image.width(),
                image.height()
            ),
        });
    }

    let rgb = image.to_rgb8();
    Ok(imageops::resize(&rgb, WIDTH, HEIGHT, RESIZE_FILTER))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_small_non_square_image_fills_tensor() {
        let img = RgbImage::from_fn(100, 50, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, 128])
        });
        let tensor = InputTensor::from_image(&DynamicImage::ImageRgb8(img)).unwrap();

        assert_eq!(tensor.as_slice().len(), InputTensor::LEN);
        assert!(
            tensor
                .as_slice()
                .iter()
                .all(|v| v.is_finite() && (0.0..=1.0).contains(v))
        );
    }

    #[test]
    fn test_single_pixel_image_is_accepted() {
        let img = RgbImage::from_pixel(1, 1, Rgb([255, 0, 51]));
        let tensor = InputTensor::from_image(&DynamicImage::ImageRgb8(img)).unwrap();

        assert_eq!(tensor.get(0, 0, 0), Some(1.0));
        assert_eq!(tensor.get(639, 639, 1), Some(0.0));
        assert_eq!(tensor.get(320, 100, 2), Some(0.2));
    }

    #[test]
    fn test_zero_sized_image_is_invalid() {
        let img = DynamicImage::ImageRgb8(RgbImage::new(0, 10));
        let err = InputTensor::from_image(&img).unwrap_err();
        assert!(err.is_invalid_image());
    }

    #[test]
    fn test_normalization_is_row_major_rgb() {
        let mut img = RgbImage::new(WIDTH, HEIGHT);
        img.put_pixel(3, 0, Rgb([255, 0, 0]));
        img.put_pixel(0, 2, Rgb([0, 255, 0]));

        let tensor = InputTensor::from_resized(&img).unwrap();
        let data = tensor.as_slice();

        // (x=3, y=0) red channel
        assert_eq!(data[3 * CHANNELS], 1.0);
        // (x=0, y=2) green channel
        assert_eq!(data[2 * WIDTH as usize * CHANNELS + 1], 1.0);
        assert_eq!(tensor.get(0, 2, 1), Some(1.0));
        assert_eq!(tensor.get(0, 2, 0), Some(0.0));
    }

    #[test]
    fn test_from_resized_rejects_wrong_size() {
        let img = RgbImage::new(320, 320);
        assert!(InputTensor::from_resized(&img).is_err());
    }

    #[test]
    fn test_get_out_of_bounds() {
        let tensor = InputTensor::from_resized(&RgbImage::new(WIDTH, HEIGHT)).unwrap();
        assert_eq!(tensor.get(WIDTH, 0, 0), None);
        assert_eq!(tensor.get(0, 0, 3), None);
    }

    #[test]
    fn test_resize_stretches_to_square() {
        let img = DynamicImage::ImageRgb8(RgbImage::new(1920, 1080));
        let resized = resize_to_input(&img).unwrap();
        assert_eq!(resized.dimensions(), (WIDTH, HEIGHT));
    }
}
