use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::FieldValue;

/// Values submitted for a form, keyed by field id.
///
/// Serializes as a flat JSON object: `{"field_name": "Ada", "field_terms": true}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Submission {
    values: HashMap<String, FieldValue>,
}

impl Submission {
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Insert a value for the given field id.
    pub fn insert(&mut self, field_id: impl Into<String>, value: impl Into<FieldValue>) {
        self.values.insert(field_id.into(), value.into());
    }

    /// Builder form of [`Submission::insert`].
    pub fn with(mut self, field_id: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(field_id, value);
        self
    }

    pub fn get(&self, field_id: &str) -> Option<&FieldValue> {
        self.values.get(field_id)
    }

    pub fn contains(&self, field_id: &str) -> bool {
        self.values.contains_key(field_id)
    }

    pub fn remove(&mut self, field_id: &str) -> Option<FieldValue> {
        self.values.remove(field_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Check if a field has a non-empty value.
    pub fn has_value(&self, field_id: &str) -> bool {
        self.get(field_id).is_some_and(|v| !v.is_empty())
    }
}

impl FromIterator<(String, FieldValue)> for Submission {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Submission {
    type Item = (String, FieldValue);
    type IntoIter = std::collections::hash_map::IntoIter<String, FieldValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_get() {
        let submission = Submission::new()
            .with("name", "Alice")
            .with("terms", true);

        assert_eq!(submission.get("name").and_then(FieldValue::as_str), Some("Alice"));
        assert_eq!(submission.get("terms").and_then(FieldValue::as_bool), Some(true));
        assert_eq!(submission.len(), 2);
    }

    #[test]
    fn has_value_ignores_empty() {
        let submission = Submission::new().with("name", "").with("tags", vec!["rust"]);
        assert!(!submission.has_value("name"));
        assert!(submission.has_value("tags"));
        assert!(!submission.has_value("missing"));
    }

    #[test]
    fn flat_json_object() {
        let submission: Submission =
            serde_json::from_str(r#"{"otp": "123456", "slider": [5]}"#).unwrap();
        assert_eq!(submission.get("otp"), Some(&FieldValue::from("123456")));
        assert_eq!(submission.get("slider"), Some(&FieldValue::Numbers(vec![5.0])));
    }
}
