use crate::message::Message;
use iced::widget::{button, column, row, text, text_input, Column};
use iced::Length;

const EXPLANATION: &str = "In lieu of an EHR-linked patient browser, pick a directory. \
PNG, JPEG and DICOM files in it are treated as chest X-rays.";

pub fn patient_browser_panel(directory_input: &str) -> Column<'_, Message> {
    let path_input = text_input("Patient directory", directory_input)
        .on_input(Message::DirectoryInputChanged)
        .on_submit(Message::LoadPatient)
        .width(Length::Fill);

    column![
        text("Patient Browser").size(20),
        text(EXPLANATION).size(14),
        row![path_input, button("Browse…").on_press(Message::PickDirectory)].spacing(8),
        button("Load Patient").on_press(Message::LoadPatient),
    ]
    .spacing(10)
}
