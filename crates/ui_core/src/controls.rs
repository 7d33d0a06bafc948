use crate::{config::ControlsLabels, host::TextLabel, state::UiState};

/// Shows and hides the control panel. Not persisted: every page load starts
/// visible.
pub struct ControlsToggle {
    label: Box<dyn TextLabel>,
    labels: ControlsLabels,
}

impl ControlsToggle {
    pub fn new(label: Box<dyn TextLabel>, labels: ControlsLabels) -> Self {
        Self { label, labels }
    }

    pub fn init(&mut self, state: &mut UiState) {
        state.set_controls_hidden(false);
        self.label.set_text(self.labels.hide);
    }

    /// Returns the new `controls_hidden` value.
    pub fn toggle(&mut self, state: &mut UiState) -> bool {
        let hidden = !state.controls_hidden();
        state.set_controls_hidden(hidden);
        let text = if hidden {
            self.labels.show
        } else {
            self.labels.hide
        };
        self.label.set_text(text);
        hidden
    }
}
