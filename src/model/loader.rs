use crate::error::DecodeError;
use crate::image_pipeline::FrameImagePipeline;
use dicom::object::open_file;
use image::GrayImage;
use std::path::Path;

/// Extensions considered chest X-rays when scanning a patient directory.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "dcm"];

pub trait ImageLoader {
    fn decode(&self, path: &Path) -> Result<GrayImage, DecodeError>;
}

pub fn is_recognized_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}

fn is_dicom(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("dcm"))
}

/// Reads raster images with `image` and DICOM files with `dicom`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileImageLoader;

impl ImageLoader for FileImageLoader {
    fn decode(&self, path: &Path) -> Result<GrayImage, DecodeError> {
        if !is_recognized_image(path) {
            return Err(DecodeError::UnsupportedExtension {
                path: path.to_path_buf(),
            });
        }

        let image = if is_dicom(path) {
            load_dicom_frame(path)?
        } else {
            image::open(path)
                .map_err(|source| DecodeError::Image {
                    path: path.to_path_buf(),
                    source,
                })?
                .into_luma8()
        };

        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(DecodeError::Empty {
                path: path.to_path_buf(),
            });
        }
        log::debug!("Decoded {} ({width}x{height})", path.display());
        Ok(image)
    }
}

fn load_dicom_frame(path: &Path) -> Result<GrayImage, DecodeError> {
    let object = open_file(path).map_err(|err| DecodeError::Dicom {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;

    FrameImagePipeline::first_frame_gray(&object)
        .map_err(|message| DecodeError::Dicom {
            path: path.to_path_buf(),
            message,
        })?
        .ok_or_else(|| DecodeError::NoFrames {
            path: path.to_path_buf(),
        })
}
