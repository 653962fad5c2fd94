use crate::config::ThemeMode;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub enum Message {
    DirectoryInputChanged(String),
    PickDirectory,
    DirectoryPicked(Option<PathBuf>),
    LoadPatient,
    SelectXray(String),
    SegmentSelected,
    ToggleAdvanced,
    SetThemeMode(ThemeMode),
}
