use image::imageops::FilterType;
use image::DynamicImage;

/// A model input tensor: interleaved 8-bit RGB, row-major, origin top-left.
///
/// Built fresh for every classification request and never mutated after
/// construction; the incidental state of an incrementally-filled pixel
/// buffer is kept out of the pipeline on purpose.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputTensor {
    bytes: Vec<u8>,
    width: u32,
    height: u32,
}

impl InputTensor {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

/// Converts a decoded image of arbitrary dimensions into the model's input
/// tensor.
///
/// The image is stretched to exactly `width`x`height` with bilinear
/// filtering (no aspect-ratio correction), then each pixel contributes its
/// 8-bit R, G, B values in row-major scan order. Alpha is discarded.
/// Deterministic for a given input image.
pub fn prepare(image: &DynamicImage, width: u32, height: u32) -> InputTensor {
    let resized = image.resize_exact(width, height, FilterType::Triangle);
    let rgb = resized.to_rgb8();

    let mut bytes = Vec::with_capacity(width as usize * height as usize * 3);
    for pixel in rgb.pixels() {
        bytes.extend_from_slice(&pixel.0);
    }

    InputTensor {
        bytes,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb, Rgba};

    fn solid_rgb(width: u32, height: u32, color: [u8; 3]) -> DynamicImage {
        let img = ImageBuffer::from_pixel(width, height, Rgb(color));
        DynamicImage::ImageRgb8(img)
    }

    #[test]
    fn test_output_is_exactly_input_len_for_any_source_size() {
        for (w, h) in [(1, 1), (224, 224), (640, 480), (3000, 199)] {
            let tensor = prepare(&solid_rgb(w, h, [1, 2, 3]), 224, 224);
            assert_eq!(tensor.len(), 224 * 224 * 3);
            assert_eq!(tensor.width(), 224);
            assert_eq!(tensor.height(), 224);
        }
    }

    #[test]
    fn test_channel_order_is_rgb() {
        let tensor = prepare(&solid_rgb(100, 50, [10, 20, 30]), 224, 224);
        for pixel in tensor.as_bytes().chunks(3) {
            assert_eq!(pixel, [10, 20, 30]);
        }
    }

    #[test]
    fn test_alpha_is_discarded() {
        let img = ImageBuffer::from_pixel(64, 64, Rgba([200u8, 100, 50, 7]));
        let tensor = prepare(&DynamicImage::ImageRgba8(img), 224, 224);
        assert_eq!(tensor.len(), 224 * 224 * 3);
        for pixel in tensor.as_bytes().chunks(3) {
            assert_eq!(pixel, [200, 100, 50]);
        }
    }

    #[test]
    fn test_prepare_is_deterministic() {
        let image = solid_rgb(300, 200, [90, 45, 180]);
        let first = prepare(&image, 224, 224);
        let second = prepare(&image, 224, 224);
        assert_eq!(first, second);
    }

    #[test]
    fn test_stretch_keeps_no_aspect_ratio() {
        // Left half red, right half blue; a stretch (not letterbox) keeps
        // the halves at the horizontal extremes of every row.
        let mut img = ImageBuffer::new(100, 10);
        for (x, _, pixel) in img.enumerate_pixels_mut() {
            *pixel = if x < 50 { Rgb([255, 0, 0]) } else { Rgb([0, 0, 255]) };
        }
        let tensor = prepare(&DynamicImage::ImageRgb8(img), 224, 224);
        let bytes = tensor.as_bytes();

        let first = &bytes[0..3];
        let last = &bytes[bytes.len() - 3..];
        assert_eq!(first, [255, 0, 0]);
        assert_eq!(last, [0, 0, 255]);
    }
}
