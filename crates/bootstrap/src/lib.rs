use async_trait::async_trait;
use tracing::{debug, error, info};

pub mod error;

pub use error::LoadError;

pub const DEFAULT_MODULE_URL: &str = "app.wasm";

#[async_trait(?Send)]
pub trait Fetcher {
    type Response;

    async fn fetch(&self, url: &str) -> Result<Self::Response, LoadError>;

    async fn read_bytes(&self, url: &str, response: Self::Response) -> Result<Vec<u8>, LoadError>;
}

#[async_trait(?Send)]
pub trait ModuleHost {
    type Response;
    type Instance;

    fn supports_streaming(&self) -> bool;

    async fn instantiate_streaming(
        &self,
        response: Self::Response,
    ) -> Result<Self::Instance, LoadError>;

    async fn instantiate(&self, bytes: &[u8]) -> Result<Self::Instance, LoadError>;

    /// Hands the instance to the runtime entry point. Returns once execution
    /// has started; the module keeps running cooperatively afterwards.
    fn run(&self, instance: Self::Instance) -> Result<(), LoadError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPath {
    Streaming,
    Buffered,
}

impl LoadPath {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Streaming => "streaming",
            Self::Buffered => "buffered",
        }
    }
}

pub struct ModuleLoader<F, H> {
    fetcher: F,
    host: H,
    module_url: String,
}

impl<F, H> ModuleLoader<F, H>
where
    F: Fetcher,
    H: ModuleHost<Response = F::Response>,
{
    pub fn new(fetcher: F, host: H, module_url: impl Into<String>) -> Self {
        Self {
            fetcher,
            host,
            module_url: module_url.into(),
        }
    }

    pub fn module_url(&self) -> &str {
        &self.module_url
    }

    /// Fetches, instantiates and starts the module. Not retried on failure.
    pub async fn load(&self) -> Result<LoadPath, LoadError> {
        let url = self.module_url.as_str();
        let path = if self.host.supports_streaming() {
            LoadPath::Streaming
        } else {
            LoadPath::Buffered
        };
        debug!(%url, path = path.as_str(), "loading module");

        let response = self.fetcher.fetch(url).await?;
        let instance = match path {
            LoadPath::Streaming => self.host.instantiate_streaming(response).await?,
            LoadPath::Buffered => {
                let bytes = self.fetcher.read_bytes(url, response).await?;
                debug!(%url, len = bytes.len(), "module buffered");
                self.host.instantiate(&bytes).await?
            }
        };

        self.host.run(instance)?;
        info!(%url, path = path.as_str(), "module running");
        Ok(path)
    }

    /// [`load`](Self::load) with the error routed to the log. This is the
    /// only place a `LoadError` is reported.
    pub async fn load_and_report(&self) -> Option<LoadPath> {
        match self.load().await {
            Ok(path) => Some(path),
            Err(err) => {
                error!(
                    url = %self.module_url,
                    network = err.is_network(),
                    error = %err,
                    "failed to load WebAssembly module"
                );
                None
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
