use tracing::{debug, warn};

use crate::{
    host::{ColorInput, PreferenceStore, SystemThemeSignal},
    state::UiState,
};

pub const LIGHT_BACKGROUND: &str = "#f5f7fb";
pub const DARK_BACKGROUND: &str = "#0b0f1a";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn canonical_background(self) -> &'static str {
        match self {
            Self::Light => LIGHT_BACKGROUND,
            Self::Dark => DARK_BACKGROUND,
        }
    }
}

/// Persisted preference wins; an unset or unrecognized value falls back to
/// the system signal, which defaults to light.
pub fn resolve_initial_theme(stored: Option<&str>, prefers_dark: bool) -> Theme {
    match stored.and_then(Theme::parse) {
        Some(theme) => theme,
        None if prefers_dark => Theme::Dark,
        None => Theme::Light,
    }
}

/// Moves the input along with the theme unless the user picked their own
/// color. Returns whether the live value was overwritten.
pub fn sync_color_input(input: &mut dyn ColorInput, previous: Theme, next: Theme) -> bool {
    let next_color = next.canonical_background();
    let overwrite = input
        .value()
        .eq_ignore_ascii_case(previous.canonical_background());

    if overwrite {
        input.set_value(next_color);
        input.notify_change();
    }
    input.set_default_value(next_color);
    overwrite
}

pub struct ThemeToggle {
    store: Box<dyn PreferenceStore>,
    system: Box<dyn SystemThemeSignal>,
    color_input: Option<Box<dyn ColorInput>>,
    storage_key: &'static str,
}

impl ThemeToggle {
    pub fn new(
        store: Box<dyn PreferenceStore>,
        system: Box<dyn SystemThemeSignal>,
        color_input: Option<Box<dyn ColorInput>>,
        storage_key: &'static str,
    ) -> Self {
        Self {
            store,
            system,
            color_input,
            storage_key,
        }
    }

    pub fn init(&mut self, state: &mut UiState) -> Theme {
        let stored = self.store.get(self.storage_key);
        let theme = resolve_initial_theme(stored.as_deref(), self.system.prefers_dark());
        debug!(
            stored = stored.as_deref().unwrap_or("unset"),
            theme = theme.as_str(),
            "initial theme resolved"
        );

        state.set_theme(theme);
        self.sync_input(theme.toggled(), theme);
        theme
    }

    pub fn toggle(&mut self, state: &mut UiState) -> Theme {
        let previous = state.theme();
        let next = previous.toggled();

        state.set_theme(next);
        if let Err(error) = self.store.set(self.storage_key, next.as_str()) {
            warn!(%error, theme = next.as_str(), "failed to persist theme preference");
        }
        self.sync_input(previous, next);
        next
    }

    fn sync_input(&mut self, previous: Theme, next: Theme) {
        if let Some(input) = self.color_input.as_deref_mut() {
            let overwritten = sync_color_input(input, previous, next);
            debug!(overwritten, theme = next.as_str(), "background input synced");
        }
    }
}
