use tracing::{debug, info};

use crate::{
    controls::ControlsToggle,
    events::{Binding, EventSource, Handled, UiEvent},
    menu::HeaderMenu,
    state::UiState,
    sticky::StickyInterpolator,
    theme::ThemeToggle,
};

#[derive(Default)]
pub struct UiComponents {
    pub controls: Option<ControlsToggle>,
    pub theme: Option<ThemeToggle>,
    pub menu: Option<HeaderMenu>,
    pub sticky: Option<StickyInterpolator>,
}

pub struct UiController {
    state: UiState,
    components: UiComponents,
}

impl UiController {
    pub fn new(state: UiState, components: UiComponents) -> Self {
        Self { state, components }
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    /// Establishes initial visual state and requests listeners for every
    /// present handler, in page order. Absent handlers bind nothing.
    pub fn init(&mut self, source: &mut dyn EventSource) {
        let state = &mut self.state;

        if let Some(controls) = self.components.controls.as_mut() {
            controls.init(state);
            source.bind(Binding::ControlsToggleClick);
        }

        if let Some(theme) = self.components.theme.as_mut() {
            theme.init(state);
            source.bind(Binding::ThemeToggleClick);
        }

        if let Some(menu) = self.components.menu.as_ref() {
            menu.init(state);
            source.bind(Binding::MenuToggleClick);
            source.bind(Binding::MenuBodyClick);
            source.bind(Binding::DocumentClick);
        }

        if let Some(sticky) = self.components.sticky.as_mut() {
            sticky.update();
            source.bind(Binding::WindowScroll);
            source.bind(Binding::WindowResize);
        }

        info!(
            controls = self.components.controls.is_some(),
            theme = self.components.theme.is_some(),
            menu = self.components.menu.is_some(),
            sticky = self.components.sticky.is_some(),
            "ui controller initialized"
        );
    }

    pub fn handle(&mut self, event: UiEvent) -> Handled {
        let state = &mut self.state;
        match event {
            UiEvent::ControlsToggleClicked => {
                if let Some(controls) = self.components.controls.as_mut() {
                    let hidden = controls.toggle(state);
                    debug!(hidden, "controls toggled");
                }
                Handled::default()
            }
            UiEvent::ThemeToggleClicked => {
                if let Some(theme) = self.components.theme.as_mut() {
                    let theme = theme.toggle(state);
                    debug!(theme = theme.as_str(), "theme toggled");
                }
                Handled::default()
            }
            UiEvent::MenuToggleClicked => match self.components.menu.as_ref() {
                Some(menu) => menu.toggle_open(state),
                None => Handled::default(),
            },
            UiEvent::MenuBodyClicked(target) => match self.components.menu.as_ref() {
                Some(menu) => menu.handle_menu_click(state, target),
                None => Handled::default(),
            },
            UiEvent::DocumentClicked(target) => match self.components.menu.as_ref() {
                Some(menu) => menu.handle_document_click(state, target),
                None => Handled::default(),
            },
            UiEvent::Scrolled | UiEvent::Resized => {
                if let Some(sticky) = self.components.sticky.as_mut() {
                    sticky.update();
                }
                Handled::default()
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
