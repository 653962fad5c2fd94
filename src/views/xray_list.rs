use crate::message::Message;
use crate::model::XrayRecord;
use crate::utils::truncate_label;
use iced::widget::text::Wrapping;
use iced::widget::{button, column, text, Column};
use iced::Length;

pub fn xray_list_panel(records: &[XrayRecord], selected: Option<usize>) -> Column<'_, Message> {
    let root = column![text("X-rays (by image)").size(20)];

    if records.is_empty() {
        return root.push(text("No X-rays loaded"));
    }

    records
        .iter()
        .enumerate()
        .fold(root, |column, (index, record)| {
            let mut label = truncate_label(record.name());
            if record.has_segmentation() {
                label.push_str("  [segmented]");
            }
            if selected == Some(index) {
                label = format!("▶ {label}");
            }

            column.push(
                button(text(label).wrapping(Wrapping::Word).width(Length::Fill))
                    .width(Length::Fill)
                    .on_press(Message::SelectXray(record.name().to_string())),
            )
        })
        .spacing(6)
}
