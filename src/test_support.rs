//! Fixtures shared by the unit tests.

use crate::error::InferenceError;
use crate::model::{LabelMask, XrayRecord};
use crate::segmentation::SegmentationModel;
use crate::viewer::Viewer;
use dicom::core::{DataElement, PrimitiveValue, VR};
use dicom::dictionary_std::{tags, uids};
use dicom::object::{FileMetaTableBuilder, InMemDicomObject};
use image::{GrayImage, Luma};
use std::cell::Cell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};

pub fn gradient_image(width: u32, height: u32) -> GrayImage {
    GrayImage::from_fn(width, height, |x, y| Luma([((x + y) * 16 % 256) as u8]))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerEvent {
    Display(String),
    Overlay(String, bool),
    Clear,
}

#[derive(Debug, Default)]
pub struct RecordingViewer {
    pub events: Vec<ViewerEvent>,
}

impl Viewer for RecordingViewer {
    fn display(&mut self, record: &XrayRecord) {
        self.events
            .push(ViewerEvent::Display(record.name().to_string()));
    }

    fn set_overlay_visible(&mut self, record: &XrayRecord, visible: bool) {
        self.events
            .push(ViewerEvent::Overlay(record.name().to_string(), visible));
    }

    fn clear(&mut self) {
        self.events.push(ViewerEvent::Clear);
    }
}

/// Labels the left half of every image and counts how often it ran.
#[derive(Debug, Default, Clone)]
pub struct CountingModel {
    pub calls: Rc<Cell<usize>>,
}

impl SegmentationModel for CountingModel {
    fn infer(&self, image: &GrayImage) -> Result<LabelMask, InferenceError> {
        self.calls.set(self.calls.get() + 1);
        let (width, height) = image.dimensions();
        Ok(LabelMask::from_fn(width, height, |x, _| u8::from(x < width / 2)))
    }
}

pub struct FailingModel;

impl SegmentationModel for FailingModel {
    fn infer(&self, _image: &GrayImage) -> Result<LabelMask, InferenceError> {
        Err(InferenceError::Model("weights not loaded".to_string()))
    }
}

/// Directory under the system temp dir, removed on drop.
pub struct ScratchDir {
    path: PathBuf,
}

impl ScratchDir {
    pub fn new(tag: &str) -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        let path = std::env::temp_dir().join(format!(
            "lungair-{tag}-{}-{}",
            std::process::id(),
            COUNTER.fetch_add(1, Ordering::Relaxed)
        ));
        let _ = std::fs::remove_dir_all(&path);
        std::fs::create_dir_all(&path).unwrap();
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write_png(&self, name: &str, width: u32, height: u32) -> PathBuf {
        let path = self.path.join(name);
        gradient_image(width, height)
            .save_with_format(&path, image::ImageFormat::Png)
            .unwrap();
        path
    }

    /// Uncompressed 16-bit grayscale DICOM.
    pub fn write_dicom_u16(
        &self,
        name: &str,
        width: u16,
        height: u16,
        photometric: &str,
        samples: &[u16],
    ) -> PathBuf {
        let pixels = PrimitiveValue::U16(samples.iter().copied().collect());
        self.write_dicom(name, (width, height), photometric, 1, 16, VR::OW, pixels)
    }

    /// Uncompressed interleaved 8-bit RGB DICOM.
    pub fn write_dicom_rgb(&self, name: &str, width: u16, height: u16, samples: &[u8]) -> PathBuf {
        let pixels = PrimitiveValue::U8(samples.iter().copied().collect());
        self.write_dicom(name, (width, height), "RGB", 3, 8, VR::OB, pixels)
    }

    #[allow(clippy::too_many_arguments)]
    fn write_dicom(
        &self,
        name: &str,
        (width, height): (u16, u16),
        photometric: &str,
        samples_per_pixel: u16,
        bits: u16,
        pixel_vr: VR,
        pixels: PrimitiveValue,
    ) -> PathBuf {
        const SOP_INSTANCE_UID: &str = "2.25.301234567890123456789";
        let us = |tag, value: u16| DataElement::new(tag, VR::US, PrimitiveValue::from(value));

        let mut object = InMemDicomObject::from_element_iter([
            DataElement::new(tags::SOP_CLASS_UID, VR::UI, PrimitiveValue::from(uids::SECONDARY_CAPTURE_IMAGE_STORAGE)),
            DataElement::new(tags::SOP_INSTANCE_UID, VR::UI, PrimitiveValue::from(SOP_INSTANCE_UID)),
            DataElement::new(tags::PHOTOMETRIC_INTERPRETATION, VR::CS, PrimitiveValue::from(photometric)),
            us(tags::SAMPLES_PER_PIXEL, samples_per_pixel),
            us(tags::ROWS, height),
            us(tags::COLUMNS, width),
            us(tags::BITS_ALLOCATED, bits),
            us(tags::BITS_STORED, bits),
            us(tags::HIGH_BIT, bits - 1),
            us(tags::PIXEL_REPRESENTATION, 0),
            DataElement::new(tags::PIXEL_DATA, pixel_vr, pixels),
        ]);
        if samples_per_pixel > 1 {
            object.put(us(tags::PLANAR_CONFIGURATION, 0));
        }

        let path = self.path.join(name);
        object
            .with_meta(
                FileMetaTableBuilder::new()
                    .transfer_syntax(uids::EXPLICIT_VR_LITTLE_ENDIAN)
                    .media_storage_sop_class_uid(uids::SECONDARY_CAPTURE_IMAGE_STORAGE)
                    .media_storage_sop_instance_uid(SOP_INSTANCE_UID),
            )
            .unwrap()
            .write_to_file(&path)
            .unwrap();
        path
    }

    pub fn write_bytes(&self, name: &str, bytes: &[u8]) -> PathBuf {
        let path = self.path.join(name);
        std::fs::write(&path, bytes).unwrap();
        path
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}
