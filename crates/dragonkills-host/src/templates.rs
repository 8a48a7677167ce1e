//! In-memory `TemplateRegistry` implementation.

use std::collections::BTreeMap;
use std::sync::Mutex;

use dragonkills_core::template::{SceneTemplate, TemplateRegistry};

/// Template registry kept in process memory.
#[derive(Debug, Default)]
pub struct InMemoryTemplateRegistry {
    templates: Mutex<BTreeMap<String, SceneTemplate>>,
}

impl InMemoryTemplateRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl TemplateRegistry for InMemoryTemplateRegistry {
    fn register(&self, template: SceneTemplate) {
        let mut templates = self
            .templates
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        templates.insert(template.class.clone(), template);
    }

    fn unregister(&self, class: &str) -> Option<SceneTemplate> {
        self.templates
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .remove(class)
    }

    fn find(&self, class: &str) -> Option<SceneTemplate> {
        self.templates
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(class)
            .cloned()
    }
}
