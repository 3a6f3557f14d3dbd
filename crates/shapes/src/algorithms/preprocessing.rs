use crate::{traits::Binarizer, types::BinaryMask};

/// Fixed-threshold luminance binarizer.
///
/// A pixel is dark when the unweighted mean of its R, G and B channels is
/// strictly below `threshold`. Alpha is ignored.
#[derive(Debug, Clone)]
pub struct LuminanceBinarizer {
    pub threshold: u8,
}

impl Default for LuminanceBinarizer {
    fn default() -> Self {
        Self { threshold: 128 }
    }
}

impl Binarizer for LuminanceBinarizer {
    fn binarize(&self, pixels: &[u8], width: u32, height: u32) -> BinaryMask {
        let threshold = self.threshold as u32;
        let data = pixels
            .chunks_exact(4)
            .take(width as usize * height as usize)
            .map(|px| {
                let sum = px[0] as u32 + px[1] as u32 + px[2] as u32;
                // sum / 3 < threshold, without losing the fractional part
                sum < threshold * 3
            })
            .collect();

        BinaryMask::new(width, height, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgba(samples: &[[u8; 4]]) -> Vec<u8> {
        samples.iter().flatten().copied().collect()
    }

    #[test]
    fn test_threshold_boundary() {
        // gray 127 is dark, gray 128 is light
        let pixels = rgba(&[[127, 127, 127, 255], [128, 128, 128, 255]]);
        let mask = LuminanceBinarizer::default().binarize(&pixels, 2, 1);
        assert_eq!(mask.as_slice(), &[true, false]);
    }

    #[test]
    fn test_mean_of_channels() {
        // (255 + 0 + 0) / 3 = 85 -> dark; (255 + 255 + 0) / 3 = 170 -> light
        let pixels = rgba(&[[255, 0, 0, 255], [255, 255, 0, 255]]);
        let mask = LuminanceBinarizer::default().binarize(&pixels, 2, 1);
        assert_eq!(mask.as_slice(), &[true, false]);
    }

    #[test]
    fn test_fractional_mean_not_truncated() {
        // (128 + 128 + 127) / 3 = 127.67, which is below 128
        let pixels = rgba(&[[128, 128, 127, 255]]);
        let mask = LuminanceBinarizer::default().binarize(&pixels, 1, 1);
        assert!(mask.is_dark(0, 0));
    }

    #[test]
    fn test_alpha_ignored() {
        let pixels = rgba(&[[0, 0, 0, 0], [255, 255, 255, 0]]);
        let mask = LuminanceBinarizer::default().binarize(&pixels, 2, 1);
        assert_eq!(mask.as_slice(), &[true, false]);
    }

    #[test]
    fn test_custom_threshold() {
        let pixels = rgba(&[[100, 100, 100, 255]]);
        let mask = LuminanceBinarizer { threshold: 64 }.binarize(&pixels, 1, 1);
        assert_eq!(mask.dark_count(), 0);
    }
}
