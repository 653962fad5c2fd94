pub mod advanced_panel;
pub mod image_viewer;
pub mod patient_browser;
pub mod xray_list;

pub use advanced_panel::advanced_panel;
pub use image_viewer::image_panel;
pub use patient_browser::patient_browser_panel;
pub use xray_list::xray_list_panel;
