use crate::{config::RootClassNames, host::RootClasses, theme::Theme};

/// Page-lifetime UI flags, mirrored onto the document root as marker classes.
pub struct UiState {
    root: Box<dyn RootClasses>,
    classes: RootClassNames,
    controls_hidden: bool,
    theme: Theme,
    menu_open: bool,
}

impl UiState {
    /// Starts visible, light, closed. The root is not touched until a
    /// handler initializes its flag.
    pub fn new(root: Box<dyn RootClasses>, classes: RootClassNames) -> Self {
        Self {
            root,
            classes,
            controls_hidden: false,
            theme: Theme::Light,
            menu_open: false,
        }
    }

    pub fn controls_hidden(&self) -> bool {
        self.controls_hidden
    }

    pub fn set_controls_hidden(&mut self, hidden: bool) {
        self.controls_hidden = hidden;
        self.root.set_class(self.classes.controls_hidden, hidden);
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        self.root
            .set_class(self.classes.theme_dark, theme == Theme::Dark);
        self.root
            .set_class(self.classes.theme_light, theme == Theme::Light);
    }

    pub fn menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn set_menu_open(&mut self, open: bool) {
        self.menu_open = open;
        self.root.set_class(self.classes.menu_open, open);
    }
}
