use image::{GrayImage, Luma};

pub const BACKGROUND_LABEL: u8 = 0;
pub const LUNG_FIELD_LABEL: u8 = 1;

/// Label value to segment name. Labels missing here are shown as "label N".
const SEGMENT_NAMES: &[(u8, &str)] = &[(LUNG_FIELD_LABEL, "lung field")];

/// Overlay colour per label, as RGB.
const SEGMENT_COLORS: &[(u8, [u8; 3])] = &[(LUNG_FIELD_LABEL, [230, 70, 60])];

const FALLBACK_COLOR: [u8; 3] = [240, 200, 40];

/// Per-pixel class labels with the same dimensions as the source image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelMask(GrayImage);

impl LabelMask {
    pub fn new(labels: GrayImage) -> Self {
        Self(labels)
    }

    pub fn from_fn(width: u32, height: u32, mut label: impl FnMut(u32, u32) -> u8) -> Self {
        Self(GrayImage::from_fn(width, height, |x, y| Luma([label(x, y)])))
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.0.dimensions()
    }

    pub fn label_at(&self, x: u32, y: u32) -> u8 {
        self.0.get_pixel(x, y).0[0]
    }

    pub fn count(&self, label: u8) -> usize {
        self.0.pixels().filter(|pixel| pixel.0[0] == label).count()
    }

    pub fn pixel_count(&self) -> usize {
        self.0.as_raw().len()
    }

    /// Non-background labels present in the mask, ascending.
    pub fn labels(&self) -> Vec<u8> {
        let mut seen = [false; 256];
        for pixel in self.0.pixels() {
            seen[pixel.0[0] as usize] = true;
        }
        (1..=u8::MAX).filter(|&label| seen[label as usize]).collect()
    }
}

pub fn segment_name(label: u8) -> String {
    SEGMENT_NAMES
        .iter()
        .find(|(value, _)| *value == label)
        .map(|(_, name)| (*name).to_string())
        .unwrap_or_else(|| format!("label {label}"))
}

pub fn segment_color(label: u8) -> [u8; 3] {
    SEGMENT_COLORS
        .iter()
        .find(|(value, _)| *value == label)
        .map(|(_, color)| *color)
        .unwrap_or(FALLBACK_COLOR)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub label: u8,
    pub name: String,
    pub color: [u8; 3],
    pub pixel_count: usize,
}

/// Displayable form of a mask: one named, coloured segment per label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlay {
    pub title: String,
    pub segments: Vec<Segment>,
    pub total_pixels: usize,
}

impl Overlay {
    pub fn from_mask(record_name: &str, mask: &LabelMask) -> Self {
        let segments = mask
            .labels()
            .into_iter()
            .map(|label| Segment {
                label,
                name: segment_name(label),
                color: segment_color(label),
                pixel_count: mask.count(label),
            })
            .collect();

        Self {
            title: format!("LungAIR Seg: {record_name}"),
            segments,
            total_pixels: mask.pixel_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_skip_background() {
        let mask = LabelMask::from_fn(4, 2, |x, _| if x < 2 { 0 } else { 1 });
        assert_eq!(mask.labels(), vec![LUNG_FIELD_LABEL]);
        assert_eq!(mask.count(BACKGROUND_LABEL), 4);
    }

    #[test]
    fn overlay_names_segments_from_label_map() {
        let mask = LabelMask::from_fn(3, 3, |x, y| match (x, y) {
            (0, 0) => 2,
            (_, 2) => 1,
            _ => 0,
        });
        let overlay = Overlay::from_mask("a.png", &mask);

        assert_eq!(overlay.title, "LungAIR Seg: a.png");
        assert_eq!(overlay.total_pixels, 9);
        assert_eq!(overlay.segments.len(), 2);
        assert_eq!(overlay.segments[0].name, "lung field");
        assert_eq!(overlay.segments[0].pixel_count, 3);
        assert_eq!(overlay.segments[1].name, "label 2");
        assert_eq!(overlay.segments[1].color, FALLBACK_COLOR);
    }

    #[test]
    fn empty_mask_has_no_segments() {
        let mask = LabelMask::from_fn(2, 2, |_, _| BACKGROUND_LABEL);
        assert!(Overlay::from_mask("b.png", &mask).segments.is_empty());
    }
}
