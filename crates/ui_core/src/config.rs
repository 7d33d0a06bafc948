pub const DEFAULT_THEME_STORAGE_KEY: &str = "visum-theme";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootClassNames {
    pub controls_hidden: &'static str,
    pub theme_dark: &'static str,
    pub theme_light: &'static str,
    pub menu_open: &'static str,
}

impl Default for RootClassNames {
    fn default() -> Self {
        Self {
            controls_hidden: "controls-hidden",
            theme_dark: "theme-dark",
            theme_light: "theme-light",
            menu_open: "menu-open",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlsLabels {
    pub hide: &'static str,
    pub show: &'static str,
}

impl Default for ControlsLabels {
    fn default() -> Self {
        Self {
            hide: "Hide controls",
            show: "Show controls",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiConfig {
    pub theme_storage_key: &'static str,
    pub classes: RootClassNames,
    pub controls_labels: ControlsLabels,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme_storage_key: DEFAULT_THEME_STORAGE_KEY,
            classes: RootClassNames::default(),
            controls_labels: ControlsLabels::default(),
        }
    }
}
