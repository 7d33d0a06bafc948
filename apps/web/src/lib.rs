//! Visum page bootstrap.
//!
//! On page-ready the UI controller is initialized synchronously, then the
//! application module is fetched and started in the background. The two are
//! independent: a module that never loads leaves the UI fully working.

use std::{cell::RefCell, rc::Rc};

use bootstrap::ModuleLoader;
use tracing::{debug, info};
use ui_core::{UiConfig, UiController};
use wasm_bindgen::{closure::Closure, prelude::*, JsCast};
use web_sys::{Document, Window};

pub mod dom;
pub mod host;
pub mod logging;
pub mod settings;

use dom::{build_controller, DomEventSource, PageElements};
use host::{js_error_message, BrowserFetcher, GoModuleHost};
use settings::PageSettings;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };

    let settings = PageSettings::from_document(&document);
    logging::init_logging(&settings.log_filter);

    on_page_ready(&document, move || boot(window, settings));
}

fn on_page_ready(document: &Document, ready: impl FnOnce() + 'static) {
    if document.ready_state() != "loading" {
        ready();
        return;
    }

    let callback = Closure::once_into_js(ready);
    if let Err(e) =
        document.add_event_listener_with_callback("DOMContentLoaded", callback.unchecked_ref())
    {
        tracing::error!(error = %js_error_message(&e), "failed to wait for DOMContentLoaded");
    }
}

fn boot(window: Window, settings: PageSettings) {
    if let Some(document) = window.document() {
        install_ui(&window, &document);
    }

    let loader = ModuleLoader::new(
        BrowserFetcher::new(window),
        GoModuleHost::new(),
        settings.module_url,
    );
    info!(url = loader.module_url(), "starting module load");
    wasm_bindgen_futures::spawn_local(async move {
        loader.load_and_report().await;
    });
}

/// Wires the UI controller to the page. Listeners keep the controller alive;
/// a page with none of the elements ends up with no controller at all.
pub fn install_ui(window: &Window, document: &Document) -> Option<Rc<RefCell<UiController>>> {
    let Some(elements) = PageElements::query(document) else {
        debug!("document has no root element; ui controller skipped");
        return None;
    };

    let config = UiConfig::default();
    let controller = Rc::new(RefCell::new(build_controller(window, &elements, &config)));
    let mut source = DomEventSource::new(
        window.clone(),
        document.clone(),
        elements,
        Rc::clone(&controller),
    );
    controller.borrow_mut().init(&mut source);
    Some(controller)
}
