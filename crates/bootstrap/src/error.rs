use thiserror::Error;

/// Failure to bring the binary module up. Never fatal to the page.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("failed to fetch module from {url}: {reason}")]
    Fetch { url: String, reason: String },
    #[error("module request to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("failed to read module body from {url}: {reason}")]
    Read { url: String, reason: String },
    #[error("host runtime unavailable: {reason}")]
    Runtime { reason: String },
    #[error("module instantiation failed: {reason}")]
    Instantiate { reason: String },
}

impl LoadError {
    pub fn fetch(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Fetch {
            url: url.into(),
            reason: reason.into(),
        }
    }

    pub fn read(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Read {
            url: url.into(),
            reason: reason.into(),
        }
    }

    pub fn runtime(reason: impl Into<String>) -> Self {
        Self::Runtime {
            reason: reason.into(),
        }
    }

    pub fn instantiate(reason: impl Into<String>) -> Self {
        Self::Instantiate {
            reason: reason.into(),
        }
    }

    /// Network-side failures, as opposed to instantiation failures.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            Self::Fetch { .. } | Self::Status { .. } | Self::Read { .. }
        )
    }
}
