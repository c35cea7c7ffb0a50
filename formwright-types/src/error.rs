use std::collections::BTreeMap;

/// Error type for form operations that reach outside the in-memory editor.
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    /// The referenced form, section or field does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// The request was rejected because its content is invalid.
    #[error("Invalid request: {0}")]
    Invalid(String),

    /// Storage or transport failure.
    #[error("Persistence error: {0}")]
    Persistence(#[from] anyhow::Error),
}

impl FormError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// Create a persistence error from any error type.
    pub fn persistence(err: impl Into<anyhow::Error>) -> Self {
        Self::Persistence(err.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Problems found in a field configuration, keyed by configuration path
/// (`"label"`, `"minLength"`, `"options.1.value"`).
#[derive(Debug, Clone, Default, PartialEq, Eq, thiserror::Error)]
#[error("{}", self.summary())]
pub struct ConfigErrors {
    errors: BTreeMap<String, String>,
}

impl ConfigErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a problem. The first message recorded for a path wins.
    pub fn add(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.entry(path.into()).or_insert_with(|| message.into());
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.errors.get(path).map(String::as_str)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.errors.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// `Ok(())` when nothing was recorded.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }

    pub fn into_map(self) -> BTreeMap<String, String> {
        self.errors
    }

    /// `path: message` pairs joined with `"; "`.
    fn summary(&self) -> String {
        self.iter()
            .map(|(path, message)| format!("{path}: {message}"))
            .collect::<Vec<_>>()
            .join("; ")
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_message_wins() {
        let mut errors = ConfigErrors::new();
        errors.add("label", "Label is required");
        errors.add("label", "Label is too long");
        assert_eq!(errors.get("label"), Some("Label is required"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn display_joins_paths() {
        let mut errors = ConfigErrors::new();
        errors.add("min", "too big");
        errors.add("label", "missing");
        assert_eq!(errors.to_string(), "label: missing; min: too big");

        let boxed: Box<dyn std::error::Error> = Box::new(errors);
        assert_eq!(boxed.to_string(), "label: missing; min: too big");
    }

    #[test]
    fn not_found_message() {
        let err = FormError::not_found("Section", "s1");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Section not found: s1");
    }
}
