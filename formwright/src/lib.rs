//! # formwright
//!
//! Form builder core: configurable fields, validation schemas and an
//! editing session over a form.
//!
//! ## Usage
//!
//! ```rust
//! use formwright::{FieldType, FormConfiguration, FormEditor, SectionConfiguration, Submission};
//!
//! let form = FormConfiguration::new("form_1", "Contact")
//!     .with_sections(vec![SectionConfiguration::new("section_1", "form_1", "Details")]);
//!
//! let mut editor = FormEditor::from_form(form);
//! let email = editor.add_field("section_1", FieldType::Input).unwrap();
//!
//! let mut field = editor.field(&email).unwrap().clone();
//! field.label = "Email".to_string();
//! field.required = true;
//! editor.update_field(field);
//!
//! let schema = editor.schema().unwrap();
//! let errors = schema.validate(&Submission::new()).unwrap_err();
//! assert_eq!(errors.get(&email), Some("Email is required."));
//! ```
//!
//! ## Modules
//!
//! - [`schema`] - Turns field configurations into a validator for submitted values
//! - [`editor`] - Editing state, its transitions, and the `FormEditor` session
//! - [`store`] - The `FormStore` persistence seam and an in-memory store
//!
//! Every [`FieldType`] has exactly one validation rule here and one control in
//! `formwright-html`. Adding a type means touching both.

// Re-export all types from formwright-types
pub use formwright_types::*;

pub mod schema;
pub use schema::{FieldError, Schema, SchemaError, ValidationErrors};

pub mod editor;
pub use editor::{Action, FormBuilderState, FormEditor, reduce};

pub mod store;
pub use store::{ActionResponse, FormStore, MemoryStore};
