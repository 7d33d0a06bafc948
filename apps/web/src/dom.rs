use std::{cell::RefCell, rc::Rc};

use anyhow::anyhow;
use tracing::{debug, warn};
use ui_core::{
    Binding, ClickTarget, ColorInput, ControlsToggle, EventSource, HeaderMenu, MemoryStore,
    PreferenceStore, RootClasses, StickyHeader, StickyInterpolator, StickyMetrics, StickyStyle,
    SystemThemeSignal, TextLabel, ThemeToggle, UiComponents, UiConfig, UiController, UiEvent,
    UiState,
};
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{
    AddEventListenerOptions, Document, Element, Event, EventInit, EventTarget, HtmlElement,
    HtmlInputElement, Node, Storage, Window,
};

use crate::host::js_error_message;

pub const CONTROLS_TOGGLE_ID: &str = "controls-toggle";
pub const THEME_TOGGLE_ID: &str = "theme-toggle";
pub const BACKGROUND_INPUT_ID: &str = "bg-color";
pub const MENU_TOGGLE_ID: &str = "menu-toggle";
pub const MENU_BODY_ID: &str = "header-menu";
pub const STICKY_HEADER_ID: &str = "sticky-header";
pub const STICKY_SUBTITLE_SELECTOR: &str = ".subtitle";
pub const STICKY_WORD_SELECTOR: &str = ".word";
pub const STICKY_ACTIONS_SELECTOR: &str = ".actions";
/// Elements inside the menu whose activation closes it.
pub const MENU_ITEM_SELECTOR: &str = "button, a, [role=\"button\"], [role=\"menuitem\"]";
pub const PREFERS_DARK_QUERY: &str = "(prefers-color-scheme: dark)";

#[derive(Clone)]
pub struct PageElements {
    pub root: HtmlElement,
    pub controls_toggle: Option<Element>,
    pub theme_toggle: Option<Element>,
    pub background_input: Option<HtmlInputElement>,
    pub menu_toggle: Option<Element>,
    pub menu_body: Option<Element>,
    pub sticky: Option<HtmlElement>,
}

impl PageElements {
    pub fn query(document: &Document) -> Option<Self> {
        let root = document
            .document_element()?
            .dyn_into::<HtmlElement>()
            .ok()?;
        Some(Self {
            root,
            controls_toggle: document.get_element_by_id(CONTROLS_TOGGLE_ID),
            theme_toggle: document.get_element_by_id(THEME_TOGGLE_ID),
            background_input: document
                .get_element_by_id(BACKGROUND_INPUT_ID)
                .and_then(|el| el.dyn_into::<HtmlInputElement>().ok()),
            menu_toggle: document.get_element_by_id(MENU_TOGGLE_ID),
            menu_body: document.get_element_by_id(MENU_BODY_ID),
            sticky: document
                .get_element_by_id(STICKY_HEADER_ID)
                .and_then(|el| el.dyn_into::<HtmlElement>().ok()),
        })
    }

    fn menu(&self) -> Option<(Element, Element)> {
        Some((self.menu_toggle.clone()?, self.menu_body.clone()?))
    }
}

pub struct DomRoot {
    element: HtmlElement,
}

impl DomRoot {
    pub fn new(element: HtmlElement) -> Self {
        Self { element }
    }
}

impl RootClasses for DomRoot {
    fn set_class(&mut self, class: &str, present: bool) {
        if let Err(e) = self.element.class_list().toggle_with_force(class, present) {
            warn!(class, error = %js_error_message(&e), "failed to update root class");
        }
    }
}

pub struct DomLabel {
    element: Element,
}

impl DomLabel {
    pub fn new(element: Element) -> Self {
        Self { element }
    }
}

impl TextLabel for DomLabel {
    fn set_text(&mut self, text: &str) {
        self.element.set_text_content(Some(text));
    }
}

pub struct DomColorInput {
    input: HtmlInputElement,
}

impl DomColorInput {
    pub fn new(input: HtmlInputElement) -> Self {
        Self { input }
    }
}

impl ColorInput for DomColorInput {
    fn value(&self) -> String {
        self.input.value()
    }

    fn set_value(&mut self, value: &str) {
        self.input.set_value(value);
    }

    fn set_default_value(&mut self, value: &str) {
        self.input.set_default_value(value);
    }

    fn notify_change(&mut self) {
        let init = EventInit::new();
        init.set_bubbles(true);
        let dispatched = Event::new_with_event_init_dict("change", &init)
            .and_then(|event| self.input.dispatch_event(&event));
        if let Err(e) = dispatched {
            warn!(error = %js_error_message(&e), "failed to dispatch change on background input");
        }
    }
}

pub struct LocalStorageStore {
    storage: Storage,
}

impl LocalStorageStore {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }
}

impl PreferenceStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        self.storage.set_item(key, value).map_err(|e| {
            let reason = js_error_message(&e);
            anyhow!("localStorage write of '{key}' failed: {reason}")
        })
    }
}

/// Durable storage when the browser allows it, session memory otherwise
/// (disabled storage, sandboxed iframes).
pub fn preference_store(window: &Window) -> Box<dyn PreferenceStore> {
    match window.local_storage() {
        Ok(Some(storage)) => Box::new(LocalStorageStore::new(storage)),
        Ok(None) => {
            warn!("localStorage unavailable; theme preference will not persist");
            Box::new(MemoryStore::new())
        }
        Err(e) => {
            warn!(error = %js_error_message(&e), "localStorage blocked; using memory store");
            Box::new(MemoryStore::new())
        }
    }
}

pub struct MediaQuerySignal {
    window: Window,
}

impl MediaQuerySignal {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl SystemThemeSignal for MediaQuerySignal {
    fn prefers_dark(&self) -> bool {
        self.window
            .match_media(PREFERS_DARK_QUERY)
            .ok()
            .flatten()
            .map(|query| query.matches())
            .unwrap_or(false)
    }
}

pub struct DomStickyHeader {
    window: Window,
    root: HtmlElement,
    sticky: HtmlElement,
}

impl DomStickyHeader {
    pub fn new(window: Window, root: HtmlElement, sticky: HtmlElement) -> Self {
        Self {
            window,
            root,
            sticky,
        }
    }

    /// Sub-elements are looked up on every measure so markup swapped in
    /// later is still picked up.
    fn child(&self, selector: &str) -> Option<Element> {
        self.sticky.query_selector(selector).ok().flatten()
    }

    fn child_width(&self, selector: &str) -> Option<f64> {
        self.child(selector)
            .map(|el| el.get_bounding_client_rect().width())
    }

    fn set_property(style_owner: &HtmlElement, name: &str, value: &str) {
        if let Err(e) = style_owner.style().set_property(name, value) {
            warn!(name, error = %js_error_message(&e), "failed to set sticky header property");
        }
    }
}

impl StickyHeader for DomStickyHeader {
    fn measure(&self) -> StickyMetrics {
        let rect = self.sticky.get_bounding_client_rect();
        StickyMetrics {
            scroll_y: self.window.scroll_y().unwrap_or(0.0),
            sticky_width: rect.width(),
            sticky_height: rect.height(),
            subtitle_natural_width: self
                .child(STICKY_SUBTITLE_SELECTOR)
                .map(|el| f64::from(el.scroll_width())),
            word_width: self.child_width(STICKY_WORD_SELECTOR),
            actions_width: self.child_width(STICKY_ACTIONS_SELECTOR),
        }
    }

    fn apply(&mut self, style: &StickyStyle) {
        for (name, value) in style.header_properties() {
            Self::set_property(&self.sticky, name, &value);
        }
        let (name, value) = style.root_property();
        Self::set_property(&self.root, name, &value);
    }
}

pub fn build_controller(
    window: &Window,
    elements: &PageElements,
    config: &UiConfig,
) -> UiController {
    let state = UiState::new(
        Box::new(DomRoot::new(elements.root.clone())),
        config.classes.clone(),
    );

    let components = UiComponents {
        controls: elements.controls_toggle.clone().map(|button| {
            ControlsToggle::new(
                Box::new(DomLabel::new(button)),
                config.controls_labels.clone(),
            )
        }),
        theme: elements.theme_toggle.as_ref().map(|_| {
            ThemeToggle::new(
                preference_store(window),
                Box::new(MediaQuerySignal::new(window.clone())),
                elements
                    .background_input
                    .clone()
                    .map(|input| Box::new(DomColorInput::new(input)) as Box<dyn ColorInput>),
                config.theme_storage_key,
            )
        }),
        menu: elements.menu().map(|_| HeaderMenu::new()),
        sticky: elements.sticky.clone().map(|sticky| {
            StickyInterpolator::new(Box::new(DomStickyHeader::new(
                window.clone(),
                elements.root.clone(),
                sticky,
            )))
        }),
    };

    UiController::new(state, components)
}

fn element_of(node: &Node) -> Option<Element> {
    match node.dyn_ref::<Element>() {
        Some(element) => Some(element.clone()),
        None => node.parent_element(),
    }
}

/// Resolves where a click landed relative to the menu toggle and body.
pub fn click_target(event: &Event, toggle: &Element, menu: &Element) -> ClickTarget {
    let Some(node) = event.target().and_then(|t| t.dyn_into::<Node>().ok()) else {
        return ClickTarget::outside();
    };

    let in_toggle = toggle.contains(Some(&node));
    let in_menu = menu.contains(Some(&node));
    let on_menu_item = in_menu
        && element_of(&node)
            .and_then(|el| el.closest(MENU_ITEM_SELECTOR).ok().flatten())
            .map(|item| {
                let item: &Node = &item;
                menu.contains(Some(item))
            })
            .unwrap_or(false);

    ClickTarget {
        in_toggle,
        in_menu,
        on_menu_item,
    }
}

pub struct DomEventSource {
    window: Window,
    document: Document,
    elements: PageElements,
    controller: Rc<RefCell<UiController>>,
}

impl DomEventSource {
    pub fn new(
        window: Window,
        document: Document,
        elements: PageElements,
        controller: Rc<RefCell<UiController>>,
    ) -> Self {
        Self {
            window,
            document,
            elements,
            controller,
        }
    }

    fn listen<F>(&self, target: &EventTarget, kind: &str, passive: bool, to_event: F)
    where
        F: Fn(&Event) -> UiEvent + 'static,
    {
        let controller = Rc::clone(&self.controller);
        let callback = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let ui_event = to_event(&event);
            let handled = match controller.try_borrow_mut() {
                Ok(mut controller) => controller.handle(ui_event),
                Err(_) => {
                    warn!(?ui_event, "dropped re-entrant ui event");
                    return;
                }
            };
            if handled.prevent_default {
                event.prevent_default();
            }
        });

        let options = AddEventListenerOptions::new();
        options.set_passive(passive);
        let added = target.add_event_listener_with_callback_and_add_event_listener_options(
            kind,
            callback.as_ref().unchecked_ref(),
            &options,
        );
        match added {
            Ok(()) => {
                debug!(kind, "listener installed");
                // Listeners live as long as the page.
                callback.forget();
            }
            Err(e) => warn!(kind, error = %js_error_message(&e), "failed to install listener"),
        }
    }
}

impl EventSource for DomEventSource {
    fn bind(&mut self, binding: Binding) {
        match binding {
            Binding::ControlsToggleClick => {
                if let Some(button) = &self.elements.controls_toggle {
                    self.listen(button, "click", false, |_| UiEvent::ControlsToggleClicked);
                }
            }
            Binding::ThemeToggleClick => {
                if let Some(button) = &self.elements.theme_toggle {
                    self.listen(button, "click", false, |_| UiEvent::ThemeToggleClicked);
                }
            }
            Binding::MenuToggleClick => {
                if let Some(toggle) = &self.elements.menu_toggle {
                    self.listen(toggle, "click", false, |_| UiEvent::MenuToggleClicked);
                }
            }
            Binding::MenuBodyClick => {
                if let Some((toggle, menu)) = self.elements.menu() {
                    let body = menu.clone();
                    self.listen(&body, "click", false, move |event| {
                        UiEvent::MenuBodyClicked(click_target(event, &toggle, &menu))
                    });
                }
            }
            Binding::DocumentClick => {
                if let Some((toggle, menu)) = self.elements.menu() {
                    let document = self.document.clone();
                    self.listen(&document, "click", false, move |event| {
                        UiEvent::DocumentClicked(click_target(event, &toggle, &menu))
                    });
                }
            }
            Binding::WindowScroll => {
                let window = self.window.clone();
                self.listen(&window, "scroll", true, |_| UiEvent::Scrolled);
            }
            Binding::WindowResize => {
                let window = self.window.clone();
                self.listen(&window, "resize", true, |_| UiEvent::Resized);
            }
        }
    }
}
