use std::path::PathBuf;

/// Failure to turn a single file into an X-ray image.
///
/// Directory loads swallow these; they only surface when a loader is called
/// directly.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("{}: unsupported image extension", path.display())]
    UnsupportedExtension { path: PathBuf },

    #[error("{}: failed to decode image ({source})", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("{}: failed to read DICOM file ({message})", path.display())]
    Dicom { path: PathBuf, message: String },

    #[error("{}: no frame to display", path.display())]
    NoFrames { path: PathBuf },

    #[error("{}: image has zero width or height", path.display())]
    Empty { path: PathBuf },
}

#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    #[error("cannot segment an empty image")]
    EmptyImage,

    #[error("mask is {mask_width}x{mask_height} but the image is {image_width}x{image_height}")]
    ShapeMismatch {
        image_width: u32,
        image_height: u32,
        mask_width: u32,
        mask_height: u32,
    },

    #[error("segmentation already computed for {0}")]
    AlreadySegmented(String),

    #[error("segmentation model failed: {0}")]
    Model(String),
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("{}: directory not found", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("{}: failed to read directory ({source})", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no X-ray is selected")]
    NoSelection,

    #[error(transparent)]
    Inference(#[from] InferenceError),
}
