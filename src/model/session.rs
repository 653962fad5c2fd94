use super::loader::{is_recognized_image, ImageLoader};
use super::xray::XrayRecord;
use crate::error::SessionError;
use crate::segmentation::SegmentationModel;
use crate::viewer::Viewer;
use std::path::{Path, PathBuf};

/// X-rays of the currently browsed patient directory and the selection
/// among them.
///
/// After every completed operation at most one record has its overlay
/// visible, and that record is the selected one.
pub struct PatientSession<V: Viewer> {
    records: Vec<XrayRecord>,
    selected: Option<usize>,
    loader: Box<dyn ImageLoader>,
    model: Box<dyn SegmentationModel>,
    viewer: V,
}

impl<V: Viewer> PatientSession<V> {
    pub fn new(
        loader: Box<dyn ImageLoader>,
        model: Box<dyn SegmentationModel>,
        viewer: V,
    ) -> Self {
        Self {
            records: Vec::new(),
            selected: None,
            loader,
            model,
            viewer,
        }
    }

    pub fn records(&self) -> &[XrayRecord] {
        &self.records
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected(&self) -> Option<&XrayRecord> {
        self.selected.and_then(|index| self.records.get(index))
    }

    pub fn viewer(&self) -> &V {
        &self.viewer
    }

    /// Replaces the session with the images found in `path`.
    ///
    /// Files that are not images, or fail to decode, are skipped. Each
    /// loaded image is selected as it arrives, so the last one wins.
    pub fn load_directory(&mut self, path: &Path) -> Result<(), SessionError> {
        if !path.is_dir() {
            return Err(SessionError::DirectoryNotFound(path.to_path_buf()));
        }
        let candidates = scan_directory(path)?;

        log::info!("Loading patient directory: {}", path.display());
        self.records.clear();
        self.selected = None;
        self.viewer.clear();

        for item_path in candidates {
            // Names key the selection, so they must round-trip exactly.
            let Some(name) = item_path
                .file_name()
                .and_then(|name| name.to_str())
                .map(str::to_owned)
            else {
                log::debug!("Not loading file with non UTF-8 name: {}", item_path.display());
                continue;
            };
            let image = match self.loader.decode(&item_path) {
                Ok(image) => image,
                Err(err) => {
                    log::debug!("Not loading file: {err}");
                    continue;
                }
            };

            self.records.push(XrayRecord::new(name, item_path, image));
            self.select(self.records.len() - 1);
        }

        log::info!("Loaded {} X-ray(s)", self.records.len());
        Ok(())
    }

    /// Unknown names are ignored; they come from stale UI state.
    pub fn select_by_name(&mut self, name: &str) {
        if let Some(index) = self.records.iter().position(|xray| xray.name() == name) {
            self.select(index);
        }
    }

    pub fn select(&mut self, index: usize) {
        if index >= self.records.len() {
            log::warn!(
                "Ignoring selection {index}; only {} X-ray(s) loaded",
                self.records.len()
            );
            return;
        }

        if let Some(previous) = self.selected.and_then(|i| self.records.get_mut(i)) {
            previous.set_overlay_visible(false, &mut self.viewer);
        }
        self.selected = Some(index);
        let record = &mut self.records[index];
        record.set_overlay_visible(true, &mut self.viewer);
        self.viewer.display(record);
    }

    /// Segments the selected X-ray unless it already has a mask, then shows
    /// its overlay and hides every other one.
    ///
    /// Model failures leave the session untouched.
    pub fn segment_selected(&mut self) -> Result<(), SessionError> {
        let index = self.selected.ok_or(SessionError::NoSelection)?;
        let record = &mut self.records[index];

        if record.has_segmentation() {
            log::debug!("Reusing segmentation of {}", record.name());
        } else {
            log::info!("Segmenting {}", record.name());
            let mask = self.model.infer(record.image())?;
            record.attach_segmentation(mask)?;
        }

        for (i, xray) in self.records.iter_mut().enumerate() {
            if i != index {
                xray.set_overlay_visible(false, &mut self.viewer);
            }
        }
        self.records[index].set_overlay_visible(true, &mut self.viewer);
        Ok(())
    }
}

/// Regular files with an image extension, sorted by file name.
fn scan_directory(path: &Path) -> Result<Vec<PathBuf>, SessionError> {
    let io_error = |source| SessionError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut candidates = Vec::new();
    for entry in std::fs::read_dir(path).map_err(io_error)? {
        let item_path = entry.map_err(io_error)?.path();
        if item_path.is_file() && is_recognized_image(&item_path) {
            candidates.push(item_path);
        }
    }
    candidates.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(candidates)
}
