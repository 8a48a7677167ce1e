//! Generic string-keyed property storage.
//!
//! Characters and module records carry a property bag that any module may
//! read and write. Values are stored as JSON so that modules can keep
//! their own types without the host knowing about them.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// A string-keyed bag of JSON values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyBag(BTreeMap<String, serde_json::Value>);

impl PropertyBag {
    /// Creates an empty property bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value stored under `key`, or `None` if unset.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Property` if the stored value does not
    /// deserialize into `T`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, EngineError> {
        self.0
            .get(key)
            .map(|value| {
                serde_json::from_value(value.clone()).map_err(|source| EngineError::Property {
                    key: key.to_owned(),
                    source,
                })
            })
            .transpose()
    }

    /// Returns the value stored under `key`, or `default` if unset.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Property` if the stored value does not
    /// deserialize into `T`.
    pub fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> Result<T, EngineError> {
        Ok(self.get(key)?.unwrap_or(default))
    }

    /// Stores `value` under `key`, overwriting any previous value.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Property` if `value` cannot be serialized.
    pub fn set<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<(), EngineError> {
        let value = serde_json::to_value(value).map_err(|source| EngineError::Property {
            key: key.to_owned(),
            source,
        })?;
        self.0.insert(key.to_owned(), value);
        Ok(())
    }

    /// Removes the value stored under `key`, returning it if present.
    pub fn remove(&mut self, key: &str) -> Option<serde_json::Value> {
        self.0.remove(key)
    }

    /// Returns `true` if a value is stored under `key`.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }
}
