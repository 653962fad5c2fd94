use crate::error::InferenceError;
use crate::model::mask::{BACKGROUND_LABEL, LUNG_FIELD_LABEL};
use crate::model::LabelMask;
use image::{GrayImage, Luma};
use imageproc::contrast::otsu_level;
use imageproc::region_labelling::{connected_components, Connectivity};

pub const DEFAULT_MIN_REGION_FRACTION: f64 = 0.005;

/// Produces a label mask with the same dimensions as the input image.
pub trait SegmentationModel {
    fn infer(&self, image: &GrayImage) -> Result<LabelMask, InferenceError>;
}

/// Classical lung field segmentation.
///
/// Lungs are dark on a chest radiograph. Pixels at or below the Otsu
/// threshold are air; air reachable from the image border is outside the
/// body and discarded. Enclosed dark regions smaller than
/// `min_region_fraction` of the image area are treated as noise.
#[derive(Debug, Clone, Copy)]
pub struct ThresholdModel {
    min_region_fraction: f64,
}

impl Default for ThresholdModel {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_REGION_FRACTION)
    }
}

impl ThresholdModel {
    pub fn new(min_region_fraction: f64) -> Self {
        Self {
            min_region_fraction: min_region_fraction.clamp(0.0, 1.0),
        }
    }

    fn min_region_pixels(&self, total: usize) -> usize {
        ((total as f64 * self.min_region_fraction).ceil() as usize).max(1)
    }
}

impl SegmentationModel for ThresholdModel {
    fn infer(&self, image: &GrayImage) -> Result<LabelMask, InferenceError> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(InferenceError::EmptyImage);
        }

        // otsu_level is the brightest intensity of the dark class.
        let threshold = otsu_level(image);
        let air = GrayImage::from_fn(width, height, |x, y| {
            Luma([if image.get_pixel(x, y).0[0] <= threshold { 255 } else { 0 }])
        });
        let regions = connected_components(&air, Connectivity::Four, Luma([0]));

        let region_count = regions.pixels().map(|pixel| pixel.0[0]).max().unwrap_or(0) as usize;
        let mut sizes = vec![0usize; region_count + 1];
        let mut touches_border = vec![false; region_count + 1];
        for (x, y, pixel) in regions.enumerate_pixels() {
            let region = pixel.0[0] as usize;
            sizes[region] += 1;
            if x == 0 || y == 0 || x == width - 1 || y == height - 1 {
                touches_border[region] = true;
            }
        }

        let min_pixels = self.min_region_pixels(sizes.iter().sum());
        let is_lung = |region: usize| {
            region != 0 && !touches_border[region] && sizes[region] >= min_pixels
        };
        let mask = LabelMask::from_fn(width, height, |x, y| {
            if is_lung(regions.get_pixel(x, y).0[0] as usize) {
                LUNG_FIELD_LABEL
            } else {
                BACKGROUND_LABEL
            }
        });

        log::debug!(
            "threshold segmentation: otsu={threshold}, regions={region_count}, lung pixels={}",
            mask.count(LUNG_FIELD_LABEL)
        );
        Ok(mask)
    }
}
