use crate::message::Message;
use crate::model::XrayRecord;
use crate::utils::format_area;
use iced::widget::{button, column, row, text, Column, Space};
use iced::{Color, Length};

pub fn advanced_panel(collapsed: bool, selected: Option<&XrayRecord>) -> Column<'_, Message> {
    let arrow = if collapsed { "▶" } else { "▼" };
    let header = button(text(format!("{arrow} Advanced"))).on_press(Message::ToggleAdvanced);
    let root = column![header].spacing(10);

    if collapsed {
        return root;
    }

    let segment_button = button("Segment selected xray")
        .on_press_maybe(selected.map(|_| Message::SegmentSelected));
    let mut root = root.push(segment_button);
    if let Some(record) = selected {
        root = root.push(text(format!("File: {}", record.source_path().display())).size(14));
    }

    let Some(overlay) = selected.and_then(XrayRecord::overlay) else {
        return root.push(text("No segmentation for the selected X-ray").size(14));
    };

    if overlay.segments.is_empty() {
        return root.push(text("Segmentation found no lung field").size(14));
    }

    overlay
        .segments
        .iter()
        .fold(root.push(text(&overlay.title).size(16)), |column, segment| {
            let [r, g, b] = segment.color;
            column.push(
                row![
                    text("■").color(Color::from_rgb8(r, g, b)),
                    text(&segment.name).width(Length::FillPortion(2)),
                    Space::with_width(Length::Fixed(8.0)),
                    text(format_area(segment.pixel_count, overlay.total_pixels))
                        .width(Length::FillPortion(3)),
                ]
                .spacing(6),
            )
        })
}
