use super::mask::{LabelMask, Overlay};
use crate::error::InferenceError;
use crate::viewer::Viewer;
use image::GrayImage;
use std::path::{Path, PathBuf};

/// One loaded chest X-ray and, once computed, its segmentation.
#[derive(Debug, Clone)]
pub struct XrayRecord {
    name: String,
    source_path: PathBuf,
    image: GrayImage,
    segmentation: Option<LabelMask>,
    overlay: Option<Overlay>,
    overlay_visible: bool,
}

impl XrayRecord {
    pub fn new(name: impl Into<String>, source_path: PathBuf, image: GrayImage) -> Self {
        Self {
            name: name.into(),
            source_path,
            image,
            segmentation: None,
            overlay: None,
            overlay_visible: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    pub fn image(&self) -> &GrayImage {
        &self.image
    }

    pub fn segmentation(&self) -> Option<&LabelMask> {
        self.segmentation.as_ref()
    }

    pub fn overlay(&self) -> Option<&Overlay> {
        self.overlay.as_ref()
    }

    pub fn has_segmentation(&self) -> bool {
        self.segmentation.is_some()
    }

    pub fn overlay_visible(&self) -> bool {
        self.overlay_visible
    }

    /// Checks that `mask` could be attached without storing it.
    pub fn validate_segmentation(&self, mask: &LabelMask) -> Result<(), InferenceError> {
        if self.segmentation.is_some() {
            return Err(InferenceError::AlreadySegmented(self.name.clone()));
        }

        let (image_width, image_height) = self.image.dimensions();
        let (mask_width, mask_height) = mask.dimensions();
        if (image_width, image_height) != (mask_width, mask_height) {
            return Err(InferenceError::ShapeMismatch {
                image_width,
                image_height,
                mask_width,
                mask_height,
            });
        }
        Ok(())
    }

    /// Stores the mask. A record is segmented at most once.
    pub fn attach_segmentation(&mut self, mask: LabelMask) -> Result<(), InferenceError> {
        self.validate_segmentation(&mask)?;
        self.segmentation = Some(mask);
        Ok(())
    }

    /// No-op until a mask exists. The overlay is built from the mask the
    /// first time it is needed.
    pub fn set_overlay_visible(&mut self, visible: bool, viewer: &mut dyn Viewer) {
        let Some(mask) = &self.segmentation else {
            return;
        };

        if self.overlay.is_none() {
            self.overlay = Some(Overlay::from_mask(&self.name, mask));
        }
        self.overlay_visible = visible;
        viewer.set_overlay_visible(self, visible);
    }
}
