use crate::image_pipeline::OverlayPipeline;
use crate::model::XrayRecord;
use iced::widget::image::Handle;
use std::collections::BTreeMap;

/// Display surface the session drives. Implementations only mirror state;
/// the session owns the records.
pub trait Viewer {
    /// Show the record's image, framed to fit.
    fn display(&mut self, record: &XrayRecord);

    /// Show or hide the record's segmentation overlay.
    fn set_overlay_visible(&mut self, record: &XrayRecord, visible: bool);

    /// Forget everything shown so far.
    fn clear(&mut self);
}

#[derive(Debug, Clone)]
pub struct DisplayedImage {
    pub name: String,
    pub dimensions: (u32, u32),
    pub handle: Handle,
}

/// Viewer backing the iced image panel.
#[derive(Debug, Default)]
pub struct ViewerState {
    displayed: Option<DisplayedImage>,
    overlays: BTreeMap<String, Handle>,
}

impl ViewerState {
    pub fn displayed(&self) -> Option<&DisplayedImage> {
        self.displayed.as_ref()
    }

    /// Handle to draw for the displayed record: the composited overlay when
    /// it is visible, otherwise the plain image.
    pub fn current_handle(&self) -> Option<&Handle> {
        let displayed = self.displayed.as_ref()?;
        Some(
            self.overlays
                .get(&displayed.name)
                .unwrap_or(&displayed.handle),
        )
    }

    pub fn overlay_visible(&self, name: &str) -> bool {
        self.overlays.contains_key(name)
    }
}

impl Viewer for ViewerState {
    fn display(&mut self, record: &XrayRecord) {
        self.displayed = Some(DisplayedImage {
            name: record.name().to_string(),
            dimensions: record.image().dimensions(),
            handle: OverlayPipeline::gray_to_handle(record.image()),
        });
    }

    fn set_overlay_visible(&mut self, record: &XrayRecord, visible: bool) {
        if !visible {
            self.overlays.remove(record.name());
            return;
        }
        if self.overlays.contains_key(record.name()) {
            return;
        }
        if let Some(mask) = record.segmentation() {
            let handle = OverlayPipeline::composite_handle(record.image(), mask);
            self.overlays.insert(record.name().to_string(), handle);
        }
    }

    fn clear(&mut self) {
        self.displayed = None;
        self.overlays.clear();
    }
}
