use bootstrap::DEFAULT_MODULE_URL;
use web_sys::Document;

use crate::logging::DEFAULT_LOG_FILTER;

pub const MODULE_URL_ATTR: &str = "data-visum-module";
pub const LOG_FILTER_ATTR: &str = "data-visum-log";

/// Per-page overrides, read from `data-*` attributes on `<html>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSettings {
    pub module_url: String,
    pub log_filter: String,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            module_url: DEFAULT_MODULE_URL.into(),
            log_filter: DEFAULT_LOG_FILTER.into(),
        }
    }
}

impl PageSettings {
    pub fn from_document(document: &Document) -> Self {
        match document.document_element() {
            Some(root) => Self::from_attributes(
                root.get_attribute(MODULE_URL_ATTR),
                root.get_attribute(LOG_FILTER_ATTR),
            ),
            None => Self::default(),
        }
    }

    pub fn from_attributes(module_url: Option<String>, log_filter: Option<String>) -> Self {
        let mut settings = Self::default();
        if let Some(v) = non_empty(module_url) {
            settings.module_url = v;
        }
        if let Some(v) = non_empty(log_filter) {
            settings.log_filter = v;
        }
        settings
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_attributes_keep_defaults() {
        assert_eq!(
            PageSettings::from_attributes(None, None),
            PageSettings::default()
        );
        assert_eq!(PageSettings::default().module_url, "app.wasm");
    }

    #[test]
    fn blank_attributes_are_ignored() {
        let settings = PageSettings::from_attributes(Some("  ".into()), Some(String::new()));
        assert_eq!(settings, PageSettings::default());
    }

    #[test]
    fn attributes_override_defaults() {
        let settings =
            PageSettings::from_attributes(Some(" build/visum.wasm ".into()), Some("debug".into()));
        assert_eq!(settings.module_url, "build/visum.wasm");
        assert_eq!(settings.log_filter, "debug");
    }
}
