use serde_json::Value;

/// Hard failures raised while compiling a JSON document.
///
/// Only structurally mandatory keys produce errors. Everything the factory
/// cannot resolve (unregistered types, unparsable rules, ...) is dropped
/// silently instead.
#[derive(Debug, thiserror::Error)]
pub enum FactoryError {
    /// A mandatory key is absent (or has the wrong JSON type) in `object`.
    #[error("missing mandatory key '{key}' in {object}")]
    MissingKey { key: String, object: Value },

    /// The document text is not valid JSON.
    #[error("invalid JSON document: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

impl FactoryError {
    pub fn missing(key: &str, object: &Value) -> Self {
        FactoryError::MissingKey {
            key: key.to_owned(),
            object: object.clone(),
        }
    }

    /// The missing key name, if this is a missing-key error.
    pub fn missing_key(&self) -> Option<&str> {
        match self {
            FactoryError::MissingKey { key, .. } => Some(key),
            FactoryError::InvalidJson(_) => None,
        }
    }
}
