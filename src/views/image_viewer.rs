use crate::message::Message;
use crate::utils::format_dimensions;
use crate::viewer::ViewerState;
use iced::widget::{column, text, Image};
use iced::{ContentFit, Element, Length};

pub fn image_panel(viewer: &ViewerState) -> Element<'static, Message> {
    match (viewer.displayed(), viewer.current_handle()) {
        (Some(displayed), Some(handle)) => {
            let caption = if viewer.overlay_visible(&displayed.name) {
                format!(
                    "{} · {} · lung field overlay",
                    displayed.name,
                    format_dimensions(displayed.dimensions)
                )
            } else {
                format!("{} · {}", displayed.name, format_dimensions(displayed.dimensions))
            };

            column![
                Image::new(handle.clone())
                    .content_fit(ContentFit::Contain)
                    .width(Length::Fill)
                    .height(Length::Fill),
                text(caption).size(14),
            ]
            .spacing(8)
            .into()
        }
        _ => text("Load a patient directory to view chest X-rays").into(),
    }
}
