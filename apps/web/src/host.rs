use async_trait::async_trait;
use bootstrap::{Fetcher, LoadError, ModuleHost};
use js_sys::{Object, Promise, Reflect, Uint8Array, WebAssembly};
use tracing::warn;
use wasm_bindgen::{prelude::*, JsCast};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Response, Window};

#[wasm_bindgen]
extern "C" {
    /// Runtime shim class installed globally by `wasm_exec.js`.
    #[derive(Clone)]
    pub type Go;

    #[wasm_bindgen(constructor, catch)]
    fn new() -> Result<Go, JsValue>;

    #[wasm_bindgen(method, getter, js_name = importObject)]
    fn import_object(this: &Go) -> Object;

    #[wasm_bindgen(method, catch)]
    fn run(this: &Go, instance: &WebAssembly::Instance) -> Result<Promise, JsValue>;
}

pub(crate) fn js_error_message(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

pub struct BrowserFetcher {
    window: Window,
}

impl BrowserFetcher {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

#[async_trait(?Send)]
impl Fetcher for BrowserFetcher {
    type Response = Response;

    async fn fetch(&self, url: &str) -> Result<Response, LoadError> {
        let value = JsFuture::from(self.window.fetch_with_str(url))
            .await
            .map_err(|e| LoadError::fetch(url, js_error_message(&e)))?;
        let response: Response = value
            .dyn_into()
            .map_err(|_| LoadError::fetch(url, "fetch did not resolve to a Response"))?;

        if !response.ok() {
            return Err(LoadError::Status {
                url: url.to_string(),
                status: response.status(),
            });
        }
        Ok(response)
    }

    async fn read_bytes(&self, url: &str, response: Response) -> Result<Vec<u8>, LoadError> {
        let promise = response
            .array_buffer()
            .map_err(|e| LoadError::read(url, js_error_message(&e)))?;
        let buffer = JsFuture::from(promise)
            .await
            .map_err(|e| LoadError::read(url, js_error_message(&e)))?;
        Ok(Uint8Array::new(&buffer).to_vec())
    }
}

/// `WebAssembly.instantiateStreaming` is missing from some engines (older
/// Safari, some embedded webviews).
pub fn host_supports_streaming() -> bool {
    Reflect::get(&js_sys::global(), &JsValue::from_str("WebAssembly"))
        .and_then(|ns| Reflect::has(&ns, &JsValue::from_str("instantiateStreaming")))
        .unwrap_or(false)
}

pub struct GoModuleHost {
    runtime: Result<Go, LoadError>,
    streaming: bool,
}

impl GoModuleHost {
    pub fn new() -> Self {
        let runtime = Go::new().map_err(|e| {
            LoadError::runtime(format!(
                "Go runtime shim not loaded (wasm_exec.js): {}",
                js_error_message(&e)
            ))
        });
        Self {
            runtime,
            streaming: host_supports_streaming(),
        }
    }

    fn runtime(&self) -> Result<&Go, LoadError> {
        self.runtime.as_ref().map_err(Clone::clone)
    }
}

impl Default for GoModuleHost {
    fn default() -> Self {
        Self::new()
    }
}

async fn instance_from(promise: Promise) -> Result<WebAssembly::Instance, LoadError> {
    let source = JsFuture::from(promise)
        .await
        .map_err(|e| LoadError::instantiate(js_error_message(&e)))?;
    Reflect::get(&source, &JsValue::from_str("instance"))
        .map_err(|e| LoadError::instantiate(js_error_message(&e)))?
        .dyn_into::<WebAssembly::Instance>()
        .map_err(|_| LoadError::instantiate("instantiation result has no instance"))
}

#[async_trait(?Send)]
impl ModuleHost for GoModuleHost {
    type Response = Response;
    type Instance = WebAssembly::Instance;

    fn supports_streaming(&self) -> bool {
        self.streaming
    }

    async fn instantiate_streaming(
        &self,
        response: Response,
    ) -> Result<WebAssembly::Instance, LoadError> {
        let imports = self.runtime()?.import_object();
        let response = Promise::resolve(&response);
        instance_from(WebAssembly::instantiate_streaming(&response, &imports)).await
    }

    async fn instantiate(&self, bytes: &[u8]) -> Result<WebAssembly::Instance, LoadError> {
        let imports = self.runtime()?.import_object();
        instance_from(WebAssembly::instantiate_buffer(bytes, &imports)).await
    }

    fn run(&self, instance: WebAssembly::Instance) -> Result<(), LoadError> {
        let exited = self
            .runtime()?
            .run(&instance)
            .map_err(|e| LoadError::runtime(js_error_message(&e)))?;

        // Resolves when the program exits; only a rejection is interesting.
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = JsFuture::from(exited).await {
                warn!(error = %js_error_message(&e), "module runtime stopped with an error");
            }
        });
        Ok(())
    }
}
