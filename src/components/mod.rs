pub mod segmented_toggle;

pub use segmented_toggle::theme_mode_toggle;
