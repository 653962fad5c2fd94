use crate::model::mask::{segment_color, BACKGROUND_LABEL};
use crate::model::LabelMask;
use dicom::object::DefaultDicomObject;
use dicom::pixeldata::{DecodedPixelData, PhotometricInterpretation, PixelDecoder};
use iced::widget::image::Handle;
use image::{DynamicImage, GrayImage};

const OVERLAY_ALPHA: f32 = 0.45;

/// Turns DICOM pixel data into a single-channel X-ray image.
pub struct FrameImagePipeline;

impl FrameImagePipeline {
    pub fn first_frame_gray(object: &DefaultDicomObject) -> Result<Option<GrayImage>, String> {
        let decoded = object
            .decode_pixel_data()
            .map_err(|err| format!("Failed to decode pixel data: {err}"))?;

        if decoded.number_of_frames() == 0 {
            return Ok(None);
        }

        Self::frame_to_gray(&decoded, 0).map(Some)
    }

    pub fn frame_to_gray(decoded: &DecodedPixelData<'_>, frame_idx: u32) -> Result<GrayImage, String> {
        if frame_idx >= decoded.number_of_frames() {
            return Err(format!(
                "Requested frame {frame_idx}, but only {} frame(s) are available",
                decoded.number_of_frames()
            ));
        }

        match decoded.photometric_interpretation() {
            photometric if photometric.is_monochrome() => Self::monochrome_to_gray(decoded, frame_idx),
            other => Self::fallback_to_dynamic(decoded, frame_idx, other.as_str()),
        }
    }

    fn monochrome_to_gray(decoded: &DecodedPixelData<'_>, frame_idx: u32) -> Result<GrayImage, String> {
        let width = decoded.columns();
        let height = decoded.rows();
        let invert = matches!(
            decoded.photometric_interpretation(),
            PhotometricInterpretation::Monochrome1
        );

        let mut gray = if decoded.bits_allocated() <= 8 {
            decoded
                .to_vec_frame::<u8>(frame_idx)
                .map_err(|err| format!("Failed to materialize frame data: {err}"))?
        } else {
            let samples = decoded
                .to_vec_frame::<u16>(frame_idx)
                .map_err(|err| format!("Failed to materialize frame data: {err}"))?;
            let (min, max) = min_max_u16(&samples).unwrap_or((0, 0));
            samples
                .into_iter()
                .map(|value| normalize_u16(value, min, max))
                .collect()
        };

        if invert {
            for value in &mut gray {
                *value = 255 - *value;
            }
        }

        let len = gray.len();
        GrayImage::from_raw(width, height, gray).ok_or_else(|| {
            format!("Frame buffer of {len} samples does not fit {width}x{height}")
        })
    }

    fn fallback_to_dynamic(
        decoded: &DecodedPixelData<'_>,
        frame_idx: u32,
        interpretation: &str,
    ) -> Result<GrayImage, String> {
        decoded
            .to_dynamic_image(frame_idx)
            .map(|image| image.into_luma8())
            .map_err(|err| {
                format!("Unsupported photometric interpretation `{interpretation}`: {err}")
            })
    }
}

/// Renders X-rays and their overlays into iced image handles.
pub struct OverlayPipeline;

impl OverlayPipeline {
    pub fn gray_to_handle(image: &GrayImage) -> Handle {
        let rgba = DynamicImage::ImageLuma8(image.clone()).into_rgba8();
        let (width, height) = rgba.dimensions();
        Handle::from_rgba(width, height, rgba.into_raw())
    }

    pub fn composite_handle(image: &GrayImage, mask: &LabelMask) -> Handle {
        let (width, height) = image.dimensions();
        Handle::from_rgba(width, height, Self::composite_rgba(image, mask))
    }

    /// Blends each labelled pixel with its segment colour. The mask must have
    /// the image's dimensions.
    pub fn composite_rgba(image: &GrayImage, mask: &LabelMask) -> Vec<u8> {
        let mut rgba = Vec::with_capacity(image.as_raw().len() * 4);
        for (x, y, pixel) in image.enumerate_pixels() {
            let gray = pixel.0[0];
            let label = mask.label_at(x, y);
            if label == BACKGROUND_LABEL {
                rgba.extend_from_slice(&[gray, gray, gray, 255]);
                continue;
            }
            let [r, g, b] = segment_color(label);
            rgba.extend_from_slice(&[blend(gray, r), blend(gray, g), blend(gray, b), 255]);
        }
        rgba
    }
}

fn blend(base: u8, tint: u8) -> u8 {
    let mixed = base as f32 * (1.0 - OVERLAY_ALPHA) + tint as f32 * OVERLAY_ALPHA;
    mixed.clamp(0.0, 255.0).round() as u8
}

fn min_max_u16(values: &[u16]) -> Option<(u16, u16)> {
    values.iter().copied().fold(None, |acc, value| match acc {
        None => Some((value, value)),
        Some((min, max)) => Some((min.min(value), max.max(value))),
    })
}

fn normalize_u16(value: u16, min: u16, max: u16) -> u8 {
    if max <= min {
        return 0;
    }

    let range = (max - min) as f32;
    let normalized = (value.saturating_sub(min)) as f32 / range;
    (normalized * 255.0).clamp(0.0, 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn normalize_stretches_to_full_range() {
        assert_eq!(normalize_u16(100, 100, 4100), 0);
        assert_eq!(normalize_u16(4100, 100, 4100), 255);
        assert_eq!(normalize_u16(7, 7, 7), 0);
        assert_eq!(min_max_u16(&[5, 2, 9]), Some((2, 9)));
        assert_eq!(min_max_u16(&[]), None);
    }

    #[test]
    fn gray_handle_replicates_luma_into_opaque_rgba() {
        let image = GrayImage::from_raw(2, 1, vec![10, 200]).unwrap();

        match OverlayPipeline::gray_to_handle(&image) {
            Handle::Rgba { width, height, pixels, .. } => {
                assert_eq!((width, height), (2, 1));
                assert_eq!(pixels.as_ref(), &[10, 10, 10, 255, 200, 200, 200, 255]);
            }
            other => panic!("expected an RGBA handle, got {other:?}"),
        }
    }

    #[test]
    fn composite_tints_only_labelled_pixels() {
        let image = GrayImage::from_pixel(2, 1, Luma([100]));
        let mask = LabelMask::from_fn(2, 1, |x, _| u8::from(x == 1));

        let rgba = OverlayPipeline::composite_rgba(&image, &mask);

        assert_eq!(&rgba[0..4], &[100, 100, 100, 255]);
        let [r, g, b] = segment_color(1);
        assert_eq!(&rgba[4..8], &[blend(100, r), blend(100, g), blend(100, b), 255]);
        assert_ne!(&rgba[4..8], &[100, 100, 100, 255]);
    }
}
