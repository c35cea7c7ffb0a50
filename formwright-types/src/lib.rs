//! Core types for the formwright crate.
//!
//! This crate provides the data a form builder works on:
//! - `FieldType` and `FieldCategory` - The closed set of input kinds and their palette groups
//! - `FieldConfiguration`, `SectionConfiguration`, `FormConfiguration` - The form model
//! - Registry lookups on `FieldType` - icon, label, description, default configuration
//! - `FieldValue` and `Submission` - Values entered into a form
//! - `FormError` and `ConfigErrors` - Failures reported by storage and configuration checks

mod field_type;
pub use field_type::{FieldCategory, FieldType};

mod value;
pub use value::{FieldValue, FileHandle, Location};

mod submission;
pub use submission::Submission;

mod field;
pub use field::{FieldConfiguration, FieldOption, MAX_LABEL_LEN};

mod section;
pub use section::{FormConfiguration, SectionConfiguration};

pub mod registry;

mod error;
pub use error::{ConfigErrors, FormError};
