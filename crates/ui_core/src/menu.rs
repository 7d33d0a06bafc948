use tracing::debug;

use crate::{events::Handled, state::UiState};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MenuState {
    #[default]
    Closed,
    Open,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuInput {
    ToggleClick,
    MenuItemClick,
    /// Click inside the menu body that did not land on a button-like element.
    InsideClick,
    OutsideClick,
}

impl MenuState {
    pub fn from_open(open: bool) -> Self {
        if open {
            Self::Open
        } else {
            Self::Closed
        }
    }

    pub fn is_open(self) -> bool {
        self == Self::Open
    }

    pub fn transition(self, input: MenuInput) -> Self {
        match (self, input) {
            (Self::Closed, MenuInput::ToggleClick) => Self::Open,
            (Self::Open, MenuInput::ToggleClick)
            | (Self::Open, MenuInput::MenuItemClick)
            | (Self::Open, MenuInput::OutsideClick) => Self::Closed,
            (state, _) => state,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClickTarget {
    pub in_toggle: bool,
    pub in_menu: bool,
    pub on_menu_item: bool,
}

impl ClickTarget {
    pub fn outside() -> Self {
        Self::default()
    }

    pub fn menu_item() -> Self {
        Self {
            in_toggle: false,
            in_menu: true,
            on_menu_item: true,
        }
    }

    pub fn menu_body() -> Self {
        Self {
            in_toggle: false,
            in_menu: true,
            on_menu_item: false,
        }
    }

    pub fn toggle() -> Self {
        Self {
            in_toggle: true,
            in_menu: false,
            on_menu_item: false,
        }
    }
}

#[derive(Debug, Default)]
pub struct HeaderMenu;

impl HeaderMenu {
    pub fn new() -> Self {
        Self
    }

    pub fn init(&self, state: &mut UiState) {
        state.set_menu_open(false);
    }

    /// Toggle control activation. The toggle is a link, so default
    /// navigation is always suppressed.
    pub fn toggle_open(&self, state: &mut UiState) -> Handled {
        self.apply(state, MenuInput::ToggleClick);
        Handled::prevent_default()
    }

    pub fn handle_menu_click(&self, state: &mut UiState, target: ClickTarget) -> Handled {
        let input = if target.on_menu_item {
            MenuInput::MenuItemClick
        } else {
            MenuInput::InsideClick
        };
        self.apply(state, input);
        Handled::default()
    }

    /// Click delivered to the document. Clicks within the toggle or the menu
    /// already went through their own handlers on the way up, so only true
    /// outside clicks count here.
    pub fn handle_document_click(&self, state: &mut UiState, target: ClickTarget) -> Handled {
        if state.menu_open() && !target.in_toggle && !target.in_menu {
            self.apply(state, MenuInput::OutsideClick);
        }
        Handled::default()
    }

    fn apply(&self, state: &mut UiState, input: MenuInput) {
        let current = MenuState::from_open(state.menu_open());
        let next = current.transition(input);
        if next != current {
            debug!(?input, ?next, "header menu transition");
            state.set_menu_open(next.is_open());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_click_flips_both_ways() {
        assert_eq!(
            MenuState::Closed.transition(MenuInput::ToggleClick),
            MenuState::Open
        );
        assert_eq!(
            MenuState::Open.transition(MenuInput::ToggleClick),
            MenuState::Closed
        );
    }

    #[test]
    fn item_and_outside_clicks_close_an_open_menu() {
        assert_eq!(
            MenuState::Open.transition(MenuInput::MenuItemClick),
            MenuState::Closed
        );
        assert_eq!(
            MenuState::Open.transition(MenuInput::OutsideClick),
            MenuState::Closed
        );
    }

    #[test]
    fn inside_non_item_click_keeps_menu_open() {
        assert_eq!(
            MenuState::Open.transition(MenuInput::InsideClick),
            MenuState::Open
        );
    }

    #[test]
    fn closed_menu_only_opens_on_toggle() {
        for input in [
            MenuInput::MenuItemClick,
            MenuInput::InsideClick,
            MenuInput::OutsideClick,
        ] {
            assert_eq!(MenuState::Closed.transition(input), MenuState::Closed);
        }
    }
}
