use crate::menu::ClickTarget;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Binding {
    ControlsToggleClick,
    ThemeToggleClick,
    MenuToggleClick,
    MenuBodyClick,
    DocumentClick,
    WindowScroll,
    WindowResize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    ControlsToggleClicked,
    ThemeToggleClicked,
    MenuToggleClicked,
    MenuBodyClicked(ClickTarget),
    DocumentClicked(ClickTarget),
    Scrolled,
    Resized,
}

pub trait EventSource {
    fn bind(&mut self, binding: Binding);
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Handled {
    pub prevent_default: bool,
}

impl Handled {
    pub fn prevent_default() -> Self {
        Self {
            prevent_default: true,
        }
    }
}
