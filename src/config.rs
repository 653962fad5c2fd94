use crate::segmentation::DEFAULT_MIN_REGION_FRACTION;
use iced::Theme;
use std::path::PathBuf;

pub const PATIENT_DIR_VAR: &str = "LUNGAIR_PATIENT_DIR";
pub const THEME_VAR: &str = "LUNGAIR_THEME";
pub const MIN_REGION_FRACTION_VAR: &str = "LUNGAIR_MIN_REGION_FRACTION";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl ThemeMode {
    pub fn theme(self) -> Theme {
        match self {
            ThemeMode::Dark => Theme::Dark,
            ThemeMode::Light => Theme::Light,
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "dark" => Some(ThemeMode::Dark),
            "light" => Some(ThemeMode::Light),
            _ => None,
        }
    }
}

/// Startup settings, taken from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub patient_dir: Option<PathBuf>,
    pub theme: ThemeMode,
    pub min_region_fraction: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            patient_dir: None,
            theme: ThemeMode::default(),
            min_region_fraction: DEFAULT_MIN_REGION_FRACTION,
        }
    }
}

impl Settings {
    /// Reads `.env` if present, then the process environment.
    pub fn from_env() -> Self {
        if let Err(err) = dotenvy::dotenv() {
            if !err.not_found() {
                log::warn!("Ignoring unreadable .env file: {err}");
            }
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Invalid values fall back to defaults with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let patient_dir = lookup(PATIENT_DIR_VAR)
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        let theme = match lookup(THEME_VAR) {
            Some(value) => ThemeMode::parse(&value).unwrap_or_else(|| {
                log::warn!("{THEME_VAR}={value} is not `dark` or `light`; using dark");
                defaults.theme
            }),
            None => defaults.theme,
        };

        let min_region_fraction = match lookup(MIN_REGION_FRACTION_VAR) {
            Some(value) => match value.trim().parse::<f64>() {
                Ok(fraction) if (0.0..1.0).contains(&fraction) => fraction,
                _ => {
                    log::warn!(
                        "{MIN_REGION_FRACTION_VAR}={value} is not a fraction in [0, 1); using {}",
                        defaults.min_region_fraction
                    );
                    defaults.min_region_fraction
                }
            },
            None => defaults.min_region_fraction,
        };

        Self {
            patient_dir,
            theme,
            min_region_fraction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> Settings {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Settings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_variables() {
        assert_eq!(settings(&[]), Settings::default());
    }

    #[test]
    fn reads_all_variables() {
        let parsed = settings(&[
            (PATIENT_DIR_VAR, "/data/patient-7"),
            (THEME_VAR, " Light "),
            (MIN_REGION_FRACTION_VAR, "0.02"),
        ]);

        assert_eq!(parsed.patient_dir, Some(PathBuf::from("/data/patient-7")));
        assert_eq!(parsed.theme, ThemeMode::Light);
        assert_eq!(parsed.min_region_fraction, 0.02);
    }

    #[test]
    fn invalid_values_fall_back() {
        let parsed = settings(&[
            (PATIENT_DIR_VAR, "  "),
            (THEME_VAR, "solarized"),
            (MIN_REGION_FRACTION_VAR, "1.5"),
        ]);

        assert_eq!(parsed, Settings::default());
    }
}
