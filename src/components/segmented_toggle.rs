use crate::config::ThemeMode;
use crate::message::Message;
use iced::border::{Border, Radius};
use iced::widget::text::Wrapping;
use iced::widget::{button, container, text, Button, Container, Row};
use iced::{Alignment, Background, Color, Length, Shadow, Theme};

const PILL: f32 = 999.0;
const SEAM: f32 = 4.0;

pub fn theme_mode_toggle(current: ThemeMode) -> Container<'static, Message> {
    segmented_toggle(
        &[("Dark", ThemeMode::Dark), ("Light", ThemeMode::Light)],
        current,
        Message::SetThemeMode,
    )
    .width(Length::Fixed(180.0))
}

/// A pill of mutually exclusive options; pressing one emits `on_select`.
pub fn segmented_toggle<T>(
    options: &[(&'static str, T)],
    current: T,
    on_select: fn(T) -> Message,
) -> Container<'static, Message>
where
    T: Copy + PartialEq + 'static,
{
    let last = options.len().saturating_sub(1);
    let buttons = options.iter().enumerate().map(|(index, &(label, value))| {
        let position = SegmentPosition::of(index, last);
        segment(label, value == current, position)
            .on_press(on_select(value))
            .width(Length::FillPortion(1))
            .into()
    });

    container(Row::with_children(buttons).spacing(0))
        .padding(3)
        .style(segmented_container_style)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SegmentPosition {
    Only,
    First,
    Middle,
    Last,
}

impl SegmentPosition {
    fn of(index: usize, last: usize) -> Self {
        match (index, last) {
            (_, 0) => SegmentPosition::Only,
            (0, _) => SegmentPosition::First,
            (i, l) if i == l => SegmentPosition::Last,
            _ => SegmentPosition::Middle,
        }
    }

    fn radius(self) -> Radius {
        let (left, right) = match self {
            SegmentPosition::Only => (PILL, PILL),
            SegmentPosition::First => (PILL, SEAM),
            SegmentPosition::Middle => (SEAM, SEAM),
            SegmentPosition::Last => (SEAM, PILL),
        };
        Radius {
            top_left: left,
            top_right: right,
            bottom_right: right,
            bottom_left: left,
        }
    }
}

fn segment(label: &'static str, is_active: bool, position: SegmentPosition) -> Button<'static, Message> {
    let content = container(text(label).size(14).wrapping(Wrapping::None))
        .width(Length::Fill)
        .height(Length::Fixed(28.0))
        .align_x(Alignment::Center)
        .align_y(Alignment::Center)
        .padding([4, 12]);

    button(content)
        .padding(0)
        .style(move |theme, status| segmented_button_style(theme, status, is_active, position))
}

fn segmented_container_style(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();
    // Light palettes wash out a strong background; use the weak tone there.
    let track = if palette.is_dark {
        palette.background.strong.color
    } else {
        palette.background.weak.color
    };

    container::Style {
        background: Some(Background::Color(track)),
        border: Border {
            color: palette.background.strong.color.scale_alpha(0.6),
            width: 1.0,
            radius: Radius::new(PILL),
        },
        ..Default::default()
    }
}

fn segmented_button_style(
    theme: &Theme,
    status: button::Status,
    is_active: bool,
    position: SegmentPosition,
) -> button::Style {
    let palette = theme.extended_palette();
    let pair = match (is_active, palette.is_dark) {
        (true, _) => palette.primary.strong,
        (false, true) => palette.background.strong,
        (false, false) => palette.background.weak,
    };

    let background = match (status, is_active) {
        (button::Status::Active, true) => pair.color,
        (button::Status::Active, false) => Color::TRANSPARENT,
        (button::Status::Hovered, _) => pair.color.scale_alpha(0.8),
        (button::Status::Pressed, _) => pair.color.scale_alpha(0.9),
        (button::Status::Disabled, _) => pair.color.scale_alpha(0.3),
    };

    button::Style {
        background: Some(Background::Color(background)),
        text_color: pair.text,
        border: Border {
            color: Color::TRANSPARENT,
            width: 0.0,
            radius: position.radius(),
        },
        shadow: Shadow::default(),
    }
}
