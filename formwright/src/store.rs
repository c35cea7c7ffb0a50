//! Persistence for forms, sections and fields.
//!
//! [`FormStore`] is the seam between the editor and whatever backs it.
//! [`MemoryStore`] keeps everything in a map and can be told to fail, which
//! is how the editor's failure paths are exercised.
//!
//! # Example
//!
//! ```rust
//! use formwright::{FormConfiguration, FormStore, MemoryStore};
//!
//! let store = MemoryStore::new().with_form(FormConfiguration::new("form_1", "Signup"));
//! assert_eq!(store.get_form_by_id("form_1").unwrap().name, "Signup");
//! assert!(store.get_form_by_id("form_2").unwrap_err().is_not_found());
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{FieldConfiguration, FormConfiguration, FormError, SectionConfiguration};

/// Storage for form configurations.
pub trait FormStore {
    fn get_form_by_id(&self, form_id: &str) -> Result<FormConfiguration, FormError>;

    /// Persist a new section. Returns the section as stored.
    fn create_section(
        &mut self,
        section: &SectionConfiguration,
    ) -> Result<SectionConfiguration, FormError>;

    fn update_section(&mut self, section_id: &str, title: &str) -> Result<(), FormError>;

    /// Remove a section together with its fields.
    fn delete_section(&mut self, section_id: &str) -> Result<(), FormError>;

    /// Persist a new field into `field.section_id`. Returns the field as stored.
    fn create_field(&mut self, field: &FieldConfiguration) -> Result<FieldConfiguration, FormError>;

    /// Replace the stored field with the same id.
    fn update_field(&mut self, field: &FieldConfiguration) -> Result<FieldConfiguration, FormError>;

    fn delete_field(&mut self, section_id: &str, field_id: &str) -> Result<(), FormError>;
}

/// Wire shape of a store call: `{"success": true, "data": ...}` or
/// `{"success": false, "error": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionResponse<T> {
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ActionResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }

    /// Convert back into a result. A failed response without a message
    /// becomes a generic persistence error.
    pub fn into_result(self) -> Result<Option<T>, FormError> {
        if self.success {
            Ok(self.data)
        } else {
            let message = self
                .error
                .unwrap_or_else(|| "Unknown persistence error".to_string());
            Err(FormError::persistence(anyhow::anyhow!(message)))
        }
    }
}

impl<T> From<Result<T, FormError>> for ActionResponse<T> {
    fn from(result: Result<T, FormError>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(e) => Self::err(e.to_string()),
        }
    }
}

/// In-memory [`FormStore`].
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    forms: HashMap<String, FormConfiguration>,
    failure: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with a form.
    pub fn with_form(mut self, form: FormConfiguration) -> Self {
        self.insert_form(form);
        self
    }

    pub fn insert_form(&mut self, form: FormConfiguration) {
        self.forms.insert(form.id.clone(), form);
    }

    /// Make every subsequent call fail with `message` until [`MemoryStore::recover`].
    pub fn fail_with(&mut self, message: impl Into<String>) {
        self.failure = Some(message.into());
    }

    pub fn recover(&mut self) {
        self.failure = None;
    }

    /// Direct read access, bypassing failure injection.
    pub fn form(&self, form_id: &str) -> Option<&FormConfiguration> {
        self.forms.get(form_id)
    }

    fn available(&self) -> Result<(), FormError> {
        match &self.failure {
            Some(message) => Err(FormError::persistence(anyhow::anyhow!(message.clone()))),
            None => Ok(()),
        }
    }

    fn section_mut(&mut self, section_id: &str) -> Result<&mut SectionConfiguration, FormError> {
        self.forms
            .values_mut()
            .find_map(|form| form.section_mut(section_id))
            .ok_or_else(|| FormError::not_found("Section", section_id))
    }
}

impl FormStore for MemoryStore {
    fn get_form_by_id(&self, form_id: &str) -> Result<FormConfiguration, FormError> {
        self.available()?;
        self.forms
            .get(form_id)
            .cloned()
            .ok_or_else(|| FormError::not_found("Form", form_id))
    }

    fn create_section(
        &mut self,
        section: &SectionConfiguration,
    ) -> Result<SectionConfiguration, FormError> {
        self.available()?;
        let form = self
            .forms
            .get_mut(&section.form_id)
            .ok_or_else(|| FormError::not_found("Form", &section.form_id))?;
        if form.section(&section.id).is_some() {
            return Err(FormError::Invalid(format!(
                "Section already exists: {}",
                section.id
            )));
        }
        form.sections.push(section.clone());
        Ok(section.clone())
    }

    fn update_section(&mut self, section_id: &str, title: &str) -> Result<(), FormError> {
        self.available()?;
        self.section_mut(section_id)?.title = title.to_string();
        Ok(())
    }

    fn delete_section(&mut self, section_id: &str) -> Result<(), FormError> {
        self.available()?;
        for form in self.forms.values_mut() {
            let before = form.sections.len();
            form.sections.retain(|s| s.id != section_id);
            if form.sections.len() != before {
                return Ok(());
            }
        }
        Err(FormError::not_found("Section", section_id))
    }

    fn create_field(&mut self, field: &FieldConfiguration) -> Result<FieldConfiguration, FormError> {
        self.available()?;
        let section = self.section_mut(&field.section_id)?;
        if section.field(&field.id).is_some() {
            return Err(FormError::Invalid(format!("Field already exists: {}", field.id)));
        }
        section.fields.push(field.clone());
        Ok(field.clone())
    }

    fn update_field(&mut self, field: &FieldConfiguration) -> Result<FieldConfiguration, FormError> {
        self.available()?;
        let stored = self
            .section_mut(&field.section_id)?
            .fields
            .iter_mut()
            .find(|f| f.id == field.id)
            .ok_or_else(|| FormError::not_found("Field", &field.id))?;
        *stored = field.clone();
        Ok(field.clone())
    }

    fn delete_field(&mut self, section_id: &str, field_id: &str) -> Result<(), FormError> {
        self.available()?;
        let section = self.section_mut(section_id)?;
        let before = section.fields.len();
        section.fields.retain(|f| f.id != field_id);
        if section.fields.len() == before {
            return Err(FormError::not_found("Field", field_id));
        }
        Ok(())
    }
}
