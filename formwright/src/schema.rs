//! Compiles field configurations into a validator for submitted values.
//!
//! Each field becomes a fail-fast chain of [`Check`]s chosen by its
//! [`FieldType`], wrapped once in [`Required`] or [`Optional`]. Validating a
//! submission runs every field and reports the first failing message of each.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{Datelike, NaiveDate};
use regex::Regex;

use crate::{FieldConfiguration, FieldType, FieldValue, FormConfiguration, Submission};

/// Password length floor, independent of field configuration.
pub const PASSWORD_MIN_LEN: usize = 8;

pub const PHONE_PATTERN: &str = r"^\+?[\d\s\-\(\)]+$";

const DIGITS_PATTERN: &str = r"^\d+$";

/// Submitted OTP codes are always this long. `otp_length` only shapes the input.
pub const OTP_LEN: usize = 6;

/// Error building a schema from configurations.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("Invalid pattern '{pattern}' on field '{field_id}'")]
    InvalidPattern {
        field_id: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// A rule over a value that may be missing.
pub trait Rule: fmt::Debug + Send + Sync {
    /// `Err(message)` on the first failing constraint.
    fn check(&self, value: Option<&FieldValue>) -> Result<(), String>;
}

impl<R: Rule + ?Sized> Rule for Box<R> {
    fn check(&self, value: Option<&FieldValue>) -> Result<(), String> {
        (**self).check(value)
    }
}

/// One constraint of a field's type rule.
#[derive(Debug, Clone)]
pub enum Check {
    Text { message: String },
    MinChars { min: usize, message: String },
    MaxChars { max: usize, message: String },
    ExactChars { len: usize, message: String },
    Pattern { regex: Regex, message: String },
    MinWords { min: usize, message: String },
    /// At least one lowercase letter, one uppercase letter and one digit.
    CharClasses { message: String },
    Bool { message: String },
    OneOf { values: Vec<String>, message: String },
    TextList { message: String },
    NumberList { message: String },
    FileList { message: String },
    MinItems { min: usize, message: String },
    MaxItems { max: usize, message: String },
    /// Bounds element 0 of a number list.
    FirstAtLeast { min: f64, message: String },
    FirstAtMost { max: f64, message: String },
    Date { message: String },
    DateFrom { min: NaiveDate, message: String },
    DateUntil { max: NaiveDate, message: String },
    DateTime { message: String },
    /// A date-time value, or any text for the parser on the other end.
    DateTimeOrText { message: String },
    MaxFileBytes { max: u64, message: String },
    Location { message: String },
    Address { message: String },
}

impl Check {
    fn apply(&self, value: &FieldValue) -> Result<(), String> {
        let pass = match self {
            Self::Text { .. } => value.as_str().is_some(),
            Self::MinChars { min, .. } => text(value).chars().count() >= *min,
            Self::MaxChars { max, .. } => text(value).chars().count() <= *max,
            Self::ExactChars { len, .. } => text(value).chars().count() == *len,
            Self::Pattern { regex, .. } => regex.is_match(text(value)),
            Self::MinWords { min, .. } => text(value).split_whitespace().count() >= *min,
            Self::CharClasses { .. } => {
                let s = text(value);
                s.chars().any(|c| c.is_ascii_lowercase())
                    && s.chars().any(|c| c.is_ascii_uppercase())
                    && s.chars().any(|c| c.is_ascii_digit())
            }
            Self::Bool { .. } => value.as_bool().is_some(),
            Self::OneOf { values, .. } => value
                .as_str()
                .is_some_and(|s| values.iter().any(|v| v == s)),
            Self::TextList { .. } => value.as_texts().is_some(),
            Self::NumberList { .. } => value.as_numbers().is_some(),
            Self::FileList { .. } => value.as_files().is_some(),
            Self::MinItems { min, .. } => list_len(value) >= *min,
            Self::MaxItems { max, .. } => list_len(value) <= *max,
            Self::FirstAtLeast { min, .. } => first_number(value).is_some_and(|n| n >= *min),
            Self::FirstAtMost { max, .. } => first_number(value).is_some_and(|n| n <= *max),
            Self::Date { .. } => value.as_date().is_some(),
            Self::DateFrom { min, .. } => value.as_date().is_some_and(|d| d >= *min),
            Self::DateUntil { max, .. } => value.as_date().is_some_and(|d| d <= *max),
            Self::DateTime { .. } => value.as_datetime().is_some(),
            Self::DateTimeOrText { .. } => {
                value.as_datetime().is_some()
                    || value.as_date().is_some()
                    || value.as_str().is_some()
            }
            Self::MaxFileBytes { max, .. } => value
                .as_files()
                .is_some_and(|files| files.iter().all(|f| f.size <= *max)),
            Self::Location { .. } => value.as_location().is_some(),
            Self::Address { .. } => value
                .as_location()
                .is_some_and(|l| !l.address.is_empty()),
        };
        if pass { Ok(()) } else { Err(self.message().to_string()) }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Text { message }
            | Self::MinChars { message, .. }
            | Self::MaxChars { message, .. }
            | Self::ExactChars { message, .. }
            | Self::Pattern { message, .. }
            | Self::MinWords { message, .. }
            | Self::CharClasses { message }
            | Self::Bool { message }
            | Self::OneOf { message, .. }
            | Self::TextList { message }
            | Self::NumberList { message }
            | Self::FileList { message }
            | Self::MinItems { message, .. }
            | Self::MaxItems { message, .. }
            | Self::FirstAtLeast { message, .. }
            | Self::FirstAtMost { message, .. }
            | Self::Date { message }
            | Self::DateFrom { message, .. }
            | Self::DateUntil { message, .. }
            | Self::DateTime { message }
            | Self::DateTimeOrText { message }
            | Self::MaxFileBytes { message, .. }
            | Self::Location { message }
            | Self::Address { message } => message,
        }
    }
}

fn text(value: &FieldValue) -> &str {
    value.as_str().unwrap_or_default()
}

fn list_len(value: &FieldValue) -> usize {
    match value {
        FieldValue::Texts(v) => v.len(),
        FieldValue::Numbers(v) => v.len(),
        FieldValue::Files(v) => v.len(),
        _ => 0,
    }
}

fn first_number(value: &FieldValue) -> Option<f64> {
    value.as_numbers().and_then(|v| v.first().copied())
}

/// The type rule of a field: constraints run in order, stopping at the first failure.
#[derive(Debug, Clone)]
pub struct Chain {
    missing: String,
    checks: Vec<Check>,
}

impl Chain {
    /// `missing` is reported when there is no value at all.
    pub fn new(missing: impl Into<String>) -> Self {
        Self {
            missing: missing.into(),
            checks: Vec::new(),
        }
    }

    pub fn then(mut self, check: Check) -> Self {
        self.checks.push(check);
        self
    }

    pub fn then_if(self, check: Option<Check>) -> Self {
        match check {
            Some(check) => self.then(check),
            None => self,
        }
    }

    pub fn checks(&self) -> &[Check] {
        &self.checks
    }
}

impl Rule for Chain {
    fn check(&self, value: Option<&FieldValue>) -> Result<(), String> {
        let value = value.ok_or_else(|| self.missing.clone())?;
        self.checks.iter().try_for_each(|c| c.apply(value))
    }
}

/// What a required field must hold before its type rule runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Any non-empty value.
    NonEmpty,
    /// Exactly `true`.
    Checked,
}

/// Rejects a missing or empty value with `message`, then defers to `inner`.
#[derive(Debug, Clone)]
pub struct Required<R> {
    inner: R,
    presence: Presence,
    message: String,
}

impl<R: Rule> Required<R> {
    pub fn new(inner: R, presence: Presence, message: impl Into<String>) -> Self {
        Self {
            inner,
            presence,
            message: message.into(),
        }
    }
}

impl<R: Rule> Rule for Required<R> {
    fn check(&self, value: Option<&FieldValue>) -> Result<(), String> {
        let present = match (self.presence, value) {
            (_, None) => false,
            (Presence::NonEmpty, Some(v)) => !v.is_empty(),
            (Presence::Checked, Some(v)) => v.as_bool() == Some(true),
        };
        if !present {
            return Err(self.message.clone());
        }
        self.inner.check(value)
    }
}

/// Accepts a missing or empty value, otherwise defers to `inner`.
#[derive(Debug, Clone)]
pub struct Optional<R> {
    inner: R,
}

impl<R: Rule> Optional<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }
}

impl<R: Rule> Rule for Optional<R> {
    fn check(&self, value: Option<&FieldValue>) -> Result<(), String> {
        match value {
            None => Ok(()),
            Some(v) if v.is_empty() => Ok(()),
            Some(_) => self.inner.check(value),
        }
    }
}

/// One failing field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field_id: String,
    pub message: String,
}

/// Every field that failed validation, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq, thiserror::Error)]
#[error("{} field(s) failed validation", .errors.len())]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn get(&self, field_id: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field_id == field_id)
            .map(|e| e.message.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.errors
            .iter()
            .map(|e| (e.field_id.clone(), e.message.clone()))
            .collect()
    }
}

#[derive(Debug)]
struct FieldSchema {
    field_id: String,
    rule: Box<dyn Rule>,
}

/// Validator for a set of fields, keyed by field id.
#[derive(Debug)]
pub struct Schema {
    fields: Vec<FieldSchema>,
}

impl Schema {
    /// Build a validator for `fields`, evaluated in ascending `order`.
    pub fn build<'a>(
        fields: impl IntoIterator<Item = &'a FieldConfiguration>,
    ) -> Result<Self, SchemaError> {
        let mut fields: Vec<_> = fields.into_iter().collect();
        fields.sort_by_key(|f| f.order);
        Self::from_ordered(fields)
    }

    /// Build a validator for every field of a form, section by section.
    pub fn for_form(form: &FormConfiguration) -> Result<Self, SchemaError> {
        Self::from_ordered(form.ordered_fields())
    }

    fn from_ordered(fields: Vec<&FieldConfiguration>) -> Result<Self, SchemaError> {
        let fields = fields
            .into_iter()
            .map(|field| {
                Ok(FieldSchema {
                    field_id: field.id.clone(),
                    rule: field_rule(field)?,
                })
            })
            .collect::<Result<Vec<_>, SchemaError>>()?;
        tracing::debug!(fields = fields.len(), "Schema built");
        Ok(Self { fields })
    }

    /// Validate a whole submission. Keys that match no field are ignored.
    pub fn validate(&self, submission: &Submission) -> Result<(), ValidationErrors> {
        let errors: Vec<FieldError> = self
            .fields
            .iter()
            .filter_map(|f| {
                f.rule
                    .check(submission.get(&f.field_id))
                    .err()
                    .map(|message| FieldError {
                        field_id: f.field_id.clone(),
                        message,
                    })
            })
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            tracing::debug!(failed = errors.len(), "Submission rejected");
            Err(ValidationErrors { errors })
        }
    }

    /// Validate one field's value. Unknown field ids pass.
    pub fn validate_field(&self, field_id: &str, value: Option<&FieldValue>) -> Result<(), String> {
        match self.fields.iter().find(|f| f.field_id == field_id) {
            Some(f) => f.rule.check(value),
            None => Ok(()),
        }
    }

    pub fn field_ids(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.field_id.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// The full rule for one field: its type rule wrapped as required or optional.
pub fn field_rule(field: &FieldConfiguration) -> Result<Box<dyn Rule>, SchemaError> {
    let base = type_rule(field)?;
    let label = &field.label;

    Ok(match (field.required, field.field_type) {
        (true, FieldType::Checkbox) => Box::new(Required::new(
            base,
            Presence::Checked,
            format!("{label} must be checked."),
        )),
        (true, _) => Box::new(Required::new(
            base,
            Presence::NonEmpty,
            format!("{label} is required."),
        )),
        (false, _) => Box::new(Optional::new(base)),
    })
}

/// The type rule for one field, before required/optional wrapping.
pub fn type_rule(field: &FieldConfiguration) -> Result<Chain, SchemaError> {
    let label = &field.label;
    let missing = format!("{label} is required.");
    let text = || Check::Text {
        message: format!("{label} must be text."),
    };

    let chain = match field.field_type {
        FieldType::Input => {
            let pattern = field
                .pattern
                .as_deref()
                .map(|p| compile(&field.id, p))
                .transpose()?;
            Chain::new(missing)
                .then(text())
                .then_if(field.min_length.map(|min| Check::MinChars {
                    min,
                    message: format!("{label} must be at least {min} characters."),
                }))
                .then_if(field.max_length.map(|max| Check::MaxChars {
                    max,
                    message: format!("{label} must be no more than {max} characters."),
                }))
                .then_if(pattern.map(|regex| Check::Pattern {
                    regex,
                    message: format!("{label} format is invalid."),
                }))
        }

        FieldType::Textarea => Chain::new(missing)
            .then(text())
            .then_if(field.min_characters.map(|min| Check::MinChars {
                min,
                message: format!("{label} must be at least {min} characters."),
            }))
            .then_if(field.min_words.map(|min| Check::MinWords {
                min,
                message: format!("{label} must contain at least {min} words."),
            })),

        FieldType::Password => Chain::new(missing)
            .then(text())
            .then(Check::MinChars {
                min: PASSWORD_MIN_LEN,
                message: format!("Password must be at least {PASSWORD_MIN_LEN} characters."),
            })
            .then(Check::CharClasses {
                message: "Password must contain at least one uppercase letter, one lowercase letter, and one number.".to_string(),
            }),

        FieldType::Phone => Chain::new(missing).then(text()).then(Check::Pattern {
            regex: compile(&field.id, PHONE_PATTERN)?,
            message: "Please enter a valid phone number.".to_string(),
        }),

        FieldType::Checkbox | FieldType::Switch => Chain::new(missing).then(Check::Bool {
            message: format!("{label} must be true or false."),
        }),

        FieldType::Radio | FieldType::Select | FieldType::Combobox => {
            let values = field.option_values();
            let one_of = (!values.is_empty()).then(|| {
                let expected = values
                    .iter()
                    .map(|v| format!("'{v}'"))
                    .collect::<Vec<_>>()
                    .join(" | ");
                Check::OneOf {
                    values: values.into_iter().map(str::to_string).collect(),
                    message: format!("Invalid option for {label}. Expected {expected}."),
                }
            });
            Chain::new(missing).then(text()).then_if(one_of)
        }

        FieldType::Multiselect => Chain::new(missing)
            .then(Check::TextList {
                message: format!("{label} must be a list of options."),
            })
            .then_if(field.min_selections.map(|min| Check::MinItems {
                min,
                message: format!("Please select at least {min} options."),
            }))
            .then_if(field.max_selections.map(|max| Check::MaxItems {
                max,
                message: format!("Please select no more than {max} options."),
            })),

        FieldType::Slider => Chain::new(missing)
            .then(Check::NumberList {
                message: format!("{label} must be a list of numbers."),
            })
            .then_if(field.min.map(|min| Check::FirstAtLeast {
                min,
                message: format!("Value must be at least {min}."),
            }))
            .then_if(field.max.map(|max| Check::FirstAtMost {
                max,
                message: format!("Value must be no more than {max}."),
            })),

        FieldType::Date => Chain::new(missing)
            .then(Check::Date {
                message: "Please select a valid date.".to_string(),
            })
            .then_if(field.min_date.map(|min| Check::DateFrom {
                min,
                message: format!("Date must be after {}.", format_date(min)),
            }))
            .then_if(field.max_date.map(|max| Check::DateUntil {
                max,
                message: format!("Date must be before {}.", format_date(max)),
            })),

        FieldType::Datetime => Chain::new(missing).then(Check::DateTime {
            message: "Please select a valid date and time.".to_string(),
        }),

        FieldType::SmartDatetime => Chain::new(missing).then(Check::DateTimeOrText {
            message: "Please enter a date and time.".to_string(),
        }),

        FieldType::File => Chain::new(missing)
            .then(Check::FileList {
                message: format!("{label} must be a list of files."),
            })
            .then_if(field.max_files.map(|max| Check::MaxItems {
                max,
                message: format!("Maximum {max} files allowed."),
            }))
            .then_if(field.max_file_size.map(|mb| Check::MaxFileBytes {
                max: (mb * 1024.0 * 1024.0) as u64,
                message: format!("File size must be less than {mb}MB."),
            })),

        FieldType::Otp => Chain::new(missing)
            .then(text())
            .then(Check::ExactChars {
                len: OTP_LEN,
                message: format!("OTP must be exactly {OTP_LEN} digits."),
            })
            .then(Check::Pattern {
                regex: compile(&field.id, DIGITS_PATTERN)?,
                message: "OTP must contain only numbers.".to_string(),
            }),

        FieldType::Tags => Chain::new(missing)
            .then(Check::TextList {
                message: format!("{label} must be a list of tags."),
            })
            .then(Check::MinItems {
                min: 1,
                message: "Please add at least one tag.".to_string(),
            })
            .then_if(field.max_tags.map(|max| Check::MaxItems {
                max,
                message: format!("Please add no more than {max} tags."),
            })),

        FieldType::Location => Chain::new(missing)
            .then(Check::Location {
                message: format!("{label} must be a location."),
            })
            .then(Check::Address {
                message: "Address is required.".to_string(),
            }),

        FieldType::Signature => Chain::new(missing).then(text()).then(Check::MinChars {
            min: 1,
            message: "Signature is required.".to_string(),
        }),

        FieldType::Unknown => Chain::new(missing).then(text()),
    };

    Ok(chain)
}

fn compile(field_id: &str, pattern: &str) -> Result<Regex, SchemaError> {
    Regex::new(pattern).map_err(|source| SchemaError::InvalidPattern {
        field_id: field_id.to_string(),
        pattern: pattern.to_string(),
        source,
    })
}

/// Long date form used in messages, e.g. "April 29th, 2024".
pub fn format_date(date: NaiveDate) -> String {
    let day = date.day();
    let suffix = match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{} {day}{suffix}, {}", date.format("%B"), date.year())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FieldOption, FileHandle, Location};

    fn field(ty: FieldType, label: &str) -> FieldConfiguration {
        FieldConfiguration::new("f", "s", ty, label)
    }

    fn check(field: &FieldConfiguration, value: impl Into<FieldValue>) -> Result<(), String> {
        field_rule(field).unwrap().check(Some(&value.into()))
    }

    #[test]
    fn required_text_rejects_empty() {
        let f = field(FieldType::Input, "Full Name").required(true);
        let err = check(&f, "").unwrap_err();
        assert_eq!(err, "Full Name is required.");
        assert_eq!(field_rule(&f).unwrap().check(None).unwrap_err(), err);
    }

    #[test]
    fn optional_accepts_absence_for_every_type() {
        for ty in FieldType::ALL {
            let mut f = ty.default_field("f", "s", 0);
            f.required = false;
            let rule = field_rule(&f).unwrap();
            assert_eq!(rule.check(None), Ok(()), "{ty} absent");
            let empty = f.initial_value();
            if empty.is_empty() {
                assert_eq!(rule.check(Some(&empty)), Ok(()), "{ty} empty");
            }
        }
    }

    #[test]
    fn optional_still_checks_present_values() {
        let f = field(FieldType::Phone, "Phone");
        assert_eq!(
            check(&f, "call me").unwrap_err(),
            "Please enter a valid phone number."
        );
        assert!(check(&f, "+1 (555) 123-4567").is_ok());
    }

    #[test]
    fn text_constraints() {
        let f = field(FieldType::Input, "Name")
            .with_length_bounds(Some(2), Some(5))
            .with_pattern("^[a-z]+$");
        assert_eq!(check(&f, "a").unwrap_err(), "Name must be at least 2 characters.");
        assert_eq!(check(&f, "abcdef").unwrap_err(), "Name must be no more than 5 characters.");
        assert_eq!(check(&f, "AB").unwrap_err(), "Name format is invalid.");
        assert!(check(&f, "abc").is_ok());
    }

    #[test]
    fn invalid_pattern_fails_build() {
        let f = field(FieldType::Input, "Name").with_pattern("(");
        assert!(matches!(
            Schema::build([&f]),
            Err(SchemaError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn textarea_words_and_characters() {
        let mut f = field(FieldType::Textarea, "Bio");
        f.min_characters = Some(10);
        f.min_words = Some(3);
        assert_eq!(check(&f, "short").unwrap_err(), "Bio must be at least 10 characters.");
        assert_eq!(
            check(&f, "averyveryverylongword   x").unwrap_err(),
            "Bio must contain at least 3 words."
        );
        assert!(check(&f, "one two three").is_ok());
    }

    #[test]
    fn password_rule_is_fixed() {
        let f = field(FieldType::Password, "Password");
        assert_eq!(
            check(&f, "Abc12").unwrap_err(),
            "Password must be at least 8 characters."
        );
        let classes = check(&f, "abcdefgh").unwrap_err();
        assert!(classes.contains("uppercase"));
        assert!(classes.contains("lowercase"));
        assert!(classes.contains("number"));
        assert!(check(&f, "Abcdefg1").is_ok());
    }

    #[test]
    fn checkbox_must_be_checked_when_required() {
        let f = field(FieldType::Checkbox, "Terms").required(true);
        assert_eq!(check(&f, false).unwrap_err(), "Terms must be checked.");
        assert!(check(&f, true).is_ok());

        let optional = field(FieldType::Checkbox, "News");
        assert!(check(&optional, false).is_ok());
    }

    #[test]
    fn required_switch_accepts_off() {
        let f = field(FieldType::Switch, "Dark mode").required(true);
        assert!(check(&f, false).is_ok());
        assert!(field_rule(&f).unwrap().check(None).is_err());
    }

    #[test]
    fn single_choice_is_closed_when_options_exist() {
        let f = field(FieldType::Select, "Size")
            .with_options(vec![FieldOption::new("s", "Small"), FieldOption::new("l", "Large")]);
        assert!(check(&f, "s").is_ok());
        assert_eq!(
            check(&f, "xl").unwrap_err(),
            "Invalid option for Size. Expected 's' | 'l'."
        );

        let open = field(FieldType::Combobox, "City");
        assert!(check(&open, "Anywhere").is_ok());
    }

    #[test]
    fn multiselect_bounds() {
        let f = field(FieldType::Multiselect, "Topics").with_selection_bounds(Some(2), Some(3));
        assert_eq!(
            check(&f, vec!["a"]).unwrap_err(),
            "Please select at least 2 options."
        );
        assert!(check(&f, vec!["a", "b"]).is_ok());
        assert_eq!(
            check(&f, vec!["a", "b", "c", "d"]).unwrap_err(),
            "Please select no more than 3 options."
        );
    }

    #[test]
    fn slider_bounds_element_zero() {
        let f = field(FieldType::Slider, "Volume").with_bounds(Some(0.0), Some(10.0));
        assert_eq!(check(&f, vec![12.0]).unwrap_err(), "Value must be no more than 10.");
        assert!(check(&f, vec![5.0]).is_ok());
        assert_eq!(check(&f, vec![-1.0]).unwrap_err(), "Value must be at least 0.");
    }

    #[test]
    fn date_bounds_name_the_bound() {
        let min = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let max = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        let f = field(FieldType::Date, "Start").with_date_bounds(Some(min), Some(max));

        assert_eq!(
            check(&f, NaiveDate::from_ymd_opt(2023, 6, 1).unwrap()).unwrap_err(),
            "Date must be after January 1st, 2024."
        );
        assert_eq!(
            check(&f, "2025-02-01").unwrap_err(),
            "Date must be before December 31st, 2024."
        );
        assert!(check(&f, "2024-04-29").is_ok());
        assert_eq!(check(&f, "soon").unwrap_err(), "Please select a valid date.");
    }

    #[test]
    fn message_dates_use_ordinals() {
        let date = |d| format_date(NaiveDate::from_ymd_opt(2024, 3, d).unwrap());
        assert_eq!(date(2), "March 2nd, 2024");
        assert_eq!(date(3), "March 3rd, 2024");
        assert_eq!(date(11), "March 11th, 2024");
        assert_eq!(date(12), "March 12th, 2024");
        assert_eq!(date(22), "March 22nd, 2024");
        assert_eq!(date(23), "March 23rd, 2024");
    }

    #[test]
    fn datetime_requires_valid_value() {
        let f = field(FieldType::Datetime, "When");
        assert!(check(&f, "2024-04-29T09:15").is_ok());
        assert_eq!(
            check(&f, "2024-04-29").unwrap_err(),
            "Please select a valid date and time."
        );
    }

    #[test]
    fn file_count_and_size() {
        let mut f = field(FieldType::File, "Resume");
        f.max_files = Some(1);
        f.max_file_size = Some(1.0);

        let small = FileHandle::new("cv.pdf", 1024);
        let big = FileHandle::new("scan.png", 2 * 1024 * 1024);

        assert!(check(&f, vec![small.clone()]).is_ok());
        assert_eq!(
            check(&f, vec![small.clone(), small]).unwrap_err(),
            "Maximum 1 files allowed."
        );
        assert_eq!(check(&f, vec![big]).unwrap_err(), "File size must be less than 1MB.");
    }

    #[test]
    fn otp_digits_and_length() {
        let f = field(FieldType::Otp, "Code");
        assert_eq!(check(&f, "12a45b").unwrap_err(), "OTP must contain only numbers.");
        assert_eq!(check(&f, "12345").unwrap_err(), "OTP must be exactly 6 digits.");
        assert!(check(&f, "123456").is_ok());
    }

    #[test]
    fn otp_length_ignores_configured_length() {
        let mut f = field(FieldType::Otp, "Code").required(true);
        f.otp_length = Some(4);
        assert_eq!(check(&f, "1234").unwrap_err(), "OTP must be exactly 6 digits.");
        assert!(check(&f, "123456").is_ok());
    }

    #[test]
    fn tags_need_one() {
        let f = field(FieldType::Tags, "Tags");
        assert!(check(&f, vec!["rust"]).is_ok());

        let mut capped = f.clone();
        capped.max_tags = Some(1);
        assert_eq!(
            check(&capped, vec!["a", "b"]).unwrap_err(),
            "Please add no more than 1 tags."
        );

        // Present but empty is a failure only when required.
        let required = f.required(true);
        assert!(check(&required, Vec::<String>::new()).is_err());
    }

    #[test]
    fn location_needs_address() {
        let f = field(FieldType::Location, "Venue").required(true);
        assert!(check(&f, Location::new("1 Main St").with_coordinates(1.0, 2.0)).is_ok());
        assert_eq!(check(&f, "1 Main St").unwrap_err(), "Venue must be a location.");
    }

    #[test]
    fn signature_and_unknown() {
        let sig = field(FieldType::Signature, "Sign").required(true);
        assert!(check(&sig, "data:image/png;base64,AAAA").is_ok());

        let unknown = field(FieldType::Unknown, "Mystery");
        assert!(check(&unknown, "anything").is_ok());
        assert_eq!(check(&unknown, true).unwrap_err(), "Mystery must be text.");
    }

    #[test]
    fn wrapping_twice_changes_nothing() {
        let f = field(FieldType::Input, "Name").with_length_bounds(Some(3), None);
        let values = [
            None,
            Some(FieldValue::from("")),
            Some(FieldValue::from("ab")),
            Some(FieldValue::from("abc")),
            Some(FieldValue::Bool(true)),
        ];

        let once = Required::new(type_rule(&f).unwrap(), Presence::NonEmpty, "Name is required.");
        let twice = Required::new(once.clone(), Presence::NonEmpty, "Name is required.");
        let opt_once = Optional::new(type_rule(&f).unwrap());
        let opt_twice = Optional::new(opt_once.clone());

        for value in &values {
            assert_eq!(once.check(value.as_ref()), twice.check(value.as_ref()));
            assert_eq!(opt_once.check(value.as_ref()), opt_twice.check(value.as_ref()));
        }
    }

    #[test]
    fn revalidating_is_stable() {
        let f = field(FieldType::Input, "Name").required(true);
        let rule = field_rule(&f).unwrap();
        let value = FieldValue::from("Ada");
        assert_eq!(rule.check(Some(&value)), Ok(()));
        assert_eq!(rule.check(Some(&value)), Ok(()));
    }

    #[test]
    fn schema_reports_every_failing_field_once() {
        let name = FieldConfiguration::new("name", "s", FieldType::Input, "Name")
            .required(true)
            .with_length_bounds(Some(2), None)
            .with_order(0);
        let code = FieldConfiguration::new("code", "s", FieldType::Otp, "Code")
            .required(true)
            .with_order(1);
        let bio = FieldConfiguration::new("bio", "s", FieldType::Textarea, "Bio").with_order(2);

        let schema = Schema::build([&code, &bio, &name]).unwrap();
        assert_eq!(schema.field_ids().collect::<Vec<_>>(), vec!["name", "code", "bio"]);

        let submission = Submission::new().with("name", "A").with("code", "12").with("extra", 1.0);
        let errors = schema.validate(&submission).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("name"), Some("Name must be at least 2 characters."));
        assert_eq!(errors.get("code"), Some("OTP must be exactly 6 digits."));
        assert_eq!(errors.to_string(), "2 field(s) failed validation");

        let ok = Submission::new().with("name", "Ada").with("code", "123456");
        assert!(schema.validate(&ok).is_ok());
    }

    #[test]
    fn validate_single_field() {
        let f = FieldConfiguration::new("otp", "s", FieldType::Otp, "Code").required(true);
        let schema = Schema::build([&f]).unwrap();
        assert!(schema.validate_field("otp", Some(&"123456".into())).is_ok());
        assert!(schema.validate_field("otp", None).is_err());
        assert!(schema.validate_field("other", None).is_ok());
    }
}
