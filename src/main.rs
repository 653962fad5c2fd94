mod app;
mod components;
mod config;
mod error;
mod image_pipeline;
mod message;
mod model;
mod segmentation;
#[cfg(test)]
mod test_support;
mod utils;
mod viewer;
mod views;

pub fn main() -> iced::Result {
    app::run()
}
