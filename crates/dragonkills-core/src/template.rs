//! Scene templates and the registry they are resolved from.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Describes a kind of scene owned by a module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneTemplate {
    /// Template class, stored on every scene built from it.
    pub class: String,
    /// Library of the owning module.
    pub module: String,
}

impl SceneTemplate {
    /// Creates a template description.
    #[must_use]
    pub fn new(class: impl Into<String>, module: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            module: module.into(),
        }
    }
}

/// Registry of known scene templates, injected into modules.
pub trait TemplateRegistry: Send + Sync {
    /// Registers a template, replacing any previous one with the same class.
    fn register(&self, template: SceneTemplate);

    /// Removes a template, returning it if it was registered.
    fn unregister(&self, class: &str) -> Option<SceneTemplate>;

    /// Looks up a template by class.
    fn find(&self, class: &str) -> Option<SceneTemplate>;

    /// Looks up a template by class.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::TemplateNotRegistered` if the class is unknown.
    fn resolve(&self, class: &str) -> Result<SceneTemplate, EngineError> {
        self.find(class)
            .ok_or_else(|| EngineError::TemplateNotRegistered(class.to_owned()))
    }
}
