pub mod config;
pub mod controller;
pub mod controls;
pub mod events;
pub mod host;
pub mod menu;
pub mod state;
pub mod sticky;
pub mod theme;

pub use config::{ControlsLabels, RootClassNames, UiConfig};
pub use controller::{UiComponents, UiController};
pub use controls::ControlsToggle;
pub use events::{Binding, EventSource, Handled, UiEvent};
pub use host::{
    ColorInput, MemoryStore, PreferenceStore, RootClasses, StickyHeader, SystemThemeSignal,
    TextLabel,
};
pub use menu::{ClickTarget, HeaderMenu, MenuInput, MenuState};
pub use state::UiState;
pub use sticky::{
    compute_sticky_style, sticky_progress, StickyInterpolator, StickyMetrics, StickyStyle,
};
pub use theme::{resolve_initial_theme, sync_color_input, Theme, ThemeToggle};
