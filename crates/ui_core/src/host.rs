use std::{cell::RefCell, collections::HashMap};

use crate::sticky::{StickyMetrics, StickyStyle};

pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> anyhow::Result<()>;
}

pub trait SystemThemeSignal {
    fn prefers_dark(&self) -> bool;
}

pub trait RootClasses {
    fn set_class(&mut self, class: &str, present: bool);
}

pub trait TextLabel {
    fn set_text(&mut self, text: &str);
}

pub trait ColorInput {
    fn value(&self) -> String;
    fn set_value(&mut self, value: &str);
    fn set_default_value(&mut self, value: &str);
    /// Emits a bubbling `change` so listeners inside the running module see
    /// the new value.
    fn notify_change(&mut self);
}

pub trait StickyHeader {
    /// Reads scroll position and live element geometry.
    fn measure(&self) -> StickyMetrics;
    fn apply(&mut self, style: &StickyStyle);
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        store
            .entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        store
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl<T: PreferenceStore + ?Sized> PreferenceStore for std::rc::Rc<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        (**self).set(key, value)
    }
}
