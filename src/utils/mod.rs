pub mod formatting;

pub use formatting::{format_area, format_dimensions, truncate_label};
