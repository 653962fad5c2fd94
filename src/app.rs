use crate::components::theme_mode_toggle;
use crate::config::{Settings, ThemeMode};
use crate::message::Message;
use crate::model::{FileImageLoader, PatientSession};
use crate::segmentation::ThresholdModel;
use crate::viewer::ViewerState;
use crate::views::{advanced_panel, image_panel, patient_browser_panel, xray_list_panel};
use iced::widget::text::Wrapping;
use iced::widget::{column, container, row, scrollable, text};
use iced::{application, Alignment, Element, Length, Task, Theme};
use rfd::AsyncFileDialog;
use std::path::PathBuf;

const APP_TITLE: &str = "LungAIR";

pub fn run() -> iced::Result {
    let _ = env_logger::Builder::from_default_env()
        .format_timestamp_secs()
        .try_init();

    let settings = Settings::from_env();
    log::info!("Starting {APP_TITLE} with {settings:?}");

    application(APP_TITLE, App::update, App::view)
        .theme(App::theme)
        .run_with(move || (App::new(&settings), Task::none()))
}

pub struct App {
    session: PatientSession<ViewerState>,
    directory_input: String,
    advanced_collapsed: bool,
    theme_mode: ThemeMode,
    last_error: Option<String>,
}

impl App {
    pub fn new(settings: &Settings) -> Self {
        let session = PatientSession::new(
            Box::new(FileImageLoader),
            Box::new(ThresholdModel::new(settings.min_region_fraction)),
            ViewerState::default(),
        );

        Self {
            session,
            directory_input: settings
                .patient_dir
                .as_ref()
                .map(|path| path.display().to_string())
                .unwrap_or_default(),
            advanced_collapsed: true,
            theme_mode: settings.theme,
            last_error: None,
        }
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::DirectoryInputChanged(value) => {
                self.directory_input = value;
                Task::none()
            }
            Message::PickDirectory => Task::perform(
                async {
                    AsyncFileDialog::new()
                        .pick_folder()
                        .await
                        .map(|handle| handle.path().to_path_buf())
                },
                Message::DirectoryPicked,
            ),
            Message::DirectoryPicked(Some(path)) => {
                self.directory_input = path.display().to_string();
                self.load_patient();
                Task::none()
            }
            Message::DirectoryPicked(None) => Task::none(),
            Message::LoadPatient => {
                self.load_patient();
                Task::none()
            }
            Message::SelectXray(name) => {
                self.session.select_by_name(&name);
                Task::none()
            }
            Message::SegmentSelected => {
                let result = self.session.segment_selected();
                self.record_outcome(result);
                Task::none()
            }
            Message::ToggleAdvanced => {
                self.advanced_collapsed = !self.advanced_collapsed;
                Task::none()
            }
            Message::SetThemeMode(mode) => {
                if self.theme_mode != mode {
                    self.theme_mode = mode;
                }
                Task::none()
            }
        }
    }

    fn load_patient(&mut self) {
        let path = PathBuf::from(self.directory_input.trim());
        let result = self.session.load_directory(&path);
        self.record_outcome(result);
    }

    fn record_outcome<E: std::fmt::Display>(&mut self, result: Result<(), E>) {
        match result {
            Ok(()) => self.last_error = None,
            Err(err) => {
                log::error!("{err}");
                self.last_error = Some(err.to_string());
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let sidebar = column![
            patient_browser_panel(&self.directory_input),
            xray_list_panel(self.session.records(), self.session.selected_index()),
            advanced_panel(self.advanced_collapsed, self.session.selected()),
        ]
        .spacing(24);

        let sidebar = container(scrollable(sidebar))
            .padding(16)
            .width(Length::FillPortion(2));

        let image_panel = container(image_panel(self.session.viewer()))
            .padding(16)
            .width(Length::FillPortion(5))
            .height(Length::Fill)
            .align_x(Alignment::Center)
            .align_y(Alignment::Center);

        let mut content = column![row![sidebar, image_panel]
            .spacing(16)
            .width(Length::Fill)
            .height(Length::Fill)]
        .spacing(16);

        if let Some(error) = &self.last_error {
            content = content.push(text(error).size(16).wrapping(Wrapping::Word));
        }

        column![theme_mode_toggle(self.theme_mode), content]
            .padding(20)
            .spacing(20)
            .align_x(Alignment::Start)
            .into()
    }

    pub fn theme(&self) -> Theme {
        self.theme_mode.theme()
    }
}
