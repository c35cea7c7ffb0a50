//! Live fill-in state for one form.
//!
//! # Example
//!
//! ```rust
//! use formwright::{FieldType, FieldConfiguration, FormConfiguration, SectionConfiguration};
//! use formwright_html::DynamicForm;
//!
//! let form = FormConfiguration::new("form_1", "Signup").with_sections(vec![
//!     SectionConfiguration::new("s1", "form_1", "Main").with_fields(vec![
//!         FieldConfiguration::new("code", "s1", FieldType::Otp, "Code").required(true),
//!     ]),
//! ]);
//!
//! let mut live = DynamicForm::new(form).unwrap();
//! assert!(live.submit().is_err());
//! assert_eq!(live.error("code"), Some("Code is required."));
//!
//! live.set_value("code", "123456").unwrap();
//! assert_eq!(live.error("code"), None);
//! assert!(live.submit().is_ok());
//! ```

use std::collections::BTreeMap;

use formwright::{FieldValue, FormConfiguration, Schema, SchemaError, Submission, ValidationErrors};

use crate::render::{HtmlOptions, render_form_with};

/// A form being filled in: current values, per-field errors and the
/// validator built from its configuration.
#[derive(Debug)]
pub struct DynamicForm {
    form: FormConfiguration,
    schema: Schema,
    values: Submission,
    errors: BTreeMap<String, String>,
    options: HtmlOptions,
}

impl DynamicForm {
    /// Start filling in `form`. Fails if a field's pattern does not compile.
    pub fn new(form: FormConfiguration) -> Result<Self, SchemaError> {
        let schema = Schema::for_form(&form)?;
        let values = initial_values(&form);
        Ok(Self {
            form,
            schema,
            values,
            errors: BTreeMap::new(),
            options: HtmlOptions::new(),
        })
    }

    pub fn with_options(mut self, options: HtmlOptions) -> Self {
        self.options = options;
        self
    }

    pub fn form(&self) -> &FormConfiguration {
        &self.form
    }

    pub fn value(&self, field_id: &str) -> Option<&FieldValue> {
        self.values.get(field_id)
    }

    pub fn values(&self) -> &Submission {
        &self.values
    }

    pub fn error(&self, field_id: &str) -> Option<&str> {
        self.errors.get(field_id).map(String::as_str)
    }

    pub fn errors(&self) -> &BTreeMap<String, String> {
        &self.errors
    }

    /// Store a value and revalidate that field only. Values for ids that
    /// are not part of the form are dropped.
    pub fn set_value(
        &mut self,
        field_id: &str,
        value: impl Into<FieldValue>,
    ) -> Result<(), String> {
        if self.form.field(field_id).is_none() {
            tracing::debug!(field_id, "Ignoring value for unknown field");
            return Ok(());
        }
        self.values.insert(field_id, value);

        let result = self.schema.validate_field(field_id, self.values.get(field_id));
        match &result {
            Ok(()) => {
                self.errors.remove(field_id);
            }
            Err(message) => {
                self.errors.insert(field_id.to_string(), message.clone());
            }
        }
        result
    }

    /// Validate every field. On success returns the submitted values; on
    /// failure records each field's message and returns them.
    pub fn submit(&mut self) -> Result<Submission, ValidationErrors> {
        match self.schema.validate(&self.values) {
            Ok(()) => {
                self.errors.clear();
                tracing::debug!(form_id = %self.form.id, "Form submitted");
                Ok(self.values.clone())
            }
            Err(errors) => {
                self.errors = errors.to_map();
                tracing::debug!(form_id = %self.form.id, failed = errors.len(), "Form rejected");
                Err(errors)
            }
        }
    }

    /// Back to initial values with no errors.
    pub fn reset(&mut self) {
        self.values = initial_values(&self.form);
        self.errors.clear();
    }

    /// HTML with current values and inline errors.
    pub fn render(&self) -> String {
        render_form_with(&self.form, &self.values, &self.errors, &self.options)
    }
}

fn initial_values(form: &FormConfiguration) -> Submission {
    form.ordered_fields()
        .into_iter()
        .map(|f| (f.id.clone(), f.initial_value()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use formwright::{FieldConfiguration, FieldType, SectionConfiguration};

    fn form() -> FormConfiguration {
        FormConfiguration::new("form_1", "Signup").with_sections(vec![
            SectionConfiguration::new("s1", "form_1", "Main").with_fields(vec![
                FieldConfiguration::new("name", "s1", FieldType::Input, "Name")
                    .required(true)
                    .with_length_bounds(Some(2), None),
                FieldConfiguration::new("terms", "s1", FieldType::Checkbox, "Terms")
                    .required(true)
                    .with_order(1),
                FieldConfiguration::new("volume", "s1", FieldType::Slider, "Volume")
                    .with_bounds(Some(0.0), Some(10.0))
                    .with_order(2),
            ]),
        ])
    }

    #[test]
    fn starts_from_initial_values() {
        let live = DynamicForm::new(form()).unwrap();
        assert_eq!(live.value("name"), Some(&FieldValue::from("")));
        assert_eq!(live.value("terms"), Some(&FieldValue::Bool(false)));
        assert_eq!(live.value("volume"), Some(&FieldValue::Numbers(vec![0.0])));
        assert!(live.errors().is_empty());
    }

    #[test]
    fn set_value_revalidates_one_field() {
        let mut live = DynamicForm::new(form()).unwrap();

        assert_eq!(live.set_value("name", "A"), Err("Name must be at least 2 characters.".to_string()));
        assert_eq!(live.error("name"), Some("Name must be at least 2 characters."));
        assert_eq!(live.error("terms"), None);

        live.set_value("name", "Ada").unwrap();
        assert_eq!(live.error("name"), None);

        assert!(live.set_value("nope", "x").is_ok());
        assert!(live.value("nope").is_none());
    }

    #[test]
    fn submit_records_errors() {
        let mut live = DynamicForm::new(form()).unwrap();
        let errors = live.submit().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(live.error("terms"), Some("Terms must be checked."));

        live.set_value("name", "Ada").unwrap();
        live.set_value("terms", true).unwrap();
        let submission = live.submit().unwrap();
        assert_eq!(submission.get("terms"), Some(&FieldValue::Bool(true)));
        assert!(live.errors().is_empty());
    }

    #[test]
    fn render_shows_values_and_errors() {
        let mut live = DynamicForm::new(form())
            .unwrap()
            .with_options(HtmlOptions::new().full_document(false));
        live.set_value("name", "A").ok();
        let html = live.render();
        assert!(html.contains("value=\"A\""));
        assert!(html.contains("Name must be at least 2 characters."));

        live.reset();
        assert!(!live.render().contains("form-error\""));
    }
}
