use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{ConfigErrors, FieldType, FieldValue};

/// Longest label or placeholder a field may carry.
pub const MAX_LABEL_LEN: usize = 255;

/// One entry of a choice field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
    /// Submitted value. Unique within its field.
    pub value: String,

    /// Text shown to the user.
    pub label: String,
}

impl FieldOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// One question of a form.
///
/// Only the constraints relevant to `field_type` are meaningful; the others
/// are carried along untouched so a type change in the editor loses nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldConfiguration {
    pub id: String,

    /// The section that owns this field.
    pub section_id: String,

    #[serde(rename = "type")]
    pub field_type: FieldType,

    pub label: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,

    #[serde(default)]
    pub required: bool,

    /// Display position within the section.
    #[serde(default)]
    pub order: u32,

    /// Choices for radio, select, combobox and multiselect.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<FieldOption>,

    // Text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_words: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_characters: Option<usize>,

    // Numeric
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,

    // Dates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_date: Option<NaiveDate>,

    // Multi-choice
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_selections: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_selections: Option<usize>,

    // Files
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_files: Option<usize>,
    /// Per-file limit in megabytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_file_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub accepted_formats: Vec<String>,

    // OTP / tags
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub otp_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tags: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<FieldValue>,

    /// Editor-only: the configuration panel is open for this field.
    #[serde(skip)]
    pub is_editing: bool,

    /// Editor-only: configuration problems keyed by configuration path.
    #[serde(skip)]
    pub validation_errors: BTreeMap<String, String>,
}

impl FieldConfiguration {
    /// Create a bare field with no constraints.
    pub fn new(
        id: impl Into<String>,
        section_id: impl Into<String>,
        field_type: FieldType,
        label: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            section_id: section_id.into(),
            field_type,
            label: label.into(),
            placeholder: None,
            required: false,
            order: 0,
            options: Vec::new(),
            min_length: None,
            max_length: None,
            pattern: None,
            min_words: None,
            min_characters: None,
            min: None,
            max: None,
            step: None,
            min_date: None,
            max_date: None,
            min_selections: None,
            max_selections: None,
            max_files: None,
            max_file_size: None,
            accepted_formats: Vec::new(),
            otp_length: None,
            max_tags: None,
            default_value: None,
            is_editing: false,
            validation_errors: BTreeMap::new(),
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_order(mut self, order: u32) -> Self {
        self.order = order;
        self
    }

    pub fn with_options(mut self, options: Vec<FieldOption>) -> Self {
        self.options = options;
        self
    }

    pub fn with_length_bounds(mut self, min: Option<usize>, max: Option<usize>) -> Self {
        self.min_length = min;
        self.max_length = max;
        self
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn with_bounds(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    pub fn with_date_bounds(mut self, min: Option<NaiveDate>, max: Option<NaiveDate>) -> Self {
        self.min_date = min;
        self.max_date = max;
        self
    }

    pub fn with_selection_bounds(mut self, min: Option<usize>, max: Option<usize>) -> Self {
        self.min_selections = min;
        self.max_selections = max;
        self
    }

    pub fn with_default(mut self, value: impl Into<FieldValue>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Check the configuration itself before it is saved.
    ///
    /// Returns every problem found, keyed by configuration path.
    pub fn check(&self) -> Result<(), ConfigErrors> {
        let mut errors = ConfigErrors::new();

        let label_len = self.label.chars().count();
        if label_len == 0 {
            errors.add("label", "Label is required");
        } else if label_len > MAX_LABEL_LEN {
            errors.add("label", "Label is too long");
        }
        if let Some(placeholder) = &self.placeholder
            && placeholder.chars().count() > MAX_LABEL_LEN
        {
            errors.add("placeholder", "Placeholder is too long");
        }

        if let (Some(min), Some(max)) = (self.min_length, self.max_length)
            && min > max
        {
            errors.add(
                "minLength",
                "Minimum length must be less than or equal to maximum length",
            );
        }
        if let (Some(min), Some(max)) = (self.min, self.max)
            && min > max
        {
            errors.add(
                "min",
                "Minimum value must be less than or equal to maximum value",
            );
        }
        if let (Some(min), Some(max)) = (self.min_selections, self.max_selections)
            && min > max
        {
            errors.add(
                "minSelections",
                "Minimum selections must be less than or equal to maximum selections",
            );
        }
        if let (Some(min), Some(max)) = (self.min_date, self.max_date)
            && min > max
        {
            errors.add(
                "minDate",
                "Minimum date must be on or before maximum date",
            );
        }

        if let Some(pattern) = &self.pattern
            && regex::Regex::new(pattern).is_err()
        {
            errors.add("pattern", "Pattern is not a valid regular expression");
        }

        if self.field_type.has_options() {
            self.check_options(&mut errors);
        }

        match self.field_type {
            FieldType::Slider => {
                if let Some(step) = self.step
                    && step < 0.001
                {
                    errors.add("step", "Step must be at least 0.001");
                }
            }
            FieldType::File => {
                if let Some(max_files) = self.max_files
                    && !(1..=100).contains(&max_files)
                {
                    errors.add("maxFiles", "Maximum files must be between 1 and 100");
                }
                if let Some(size) = self.max_file_size
                    && !(0.1..=1000.0).contains(&size)
                {
                    errors.add(
                        "maxFileSize",
                        "Maximum file size must be between 0.1 and 1000 MB",
                    );
                }
                if self.accepted_formats.is_empty() {
                    errors.add("acceptedFormats", "At least one file format is required");
                }
            }
            FieldType::Otp => {
                if let Some(length) = self.otp_length
                    && !(4..=8).contains(&length)
                {
                    errors.add("otpLength", "OTP length must be between 4 and 8");
                }
            }
            FieldType::Tags => {
                if let Some(max_tags) = self.max_tags
                    && !(1..=50).contains(&max_tags)
                {
                    errors.add("maxTags", "Maximum tags must be between 1 and 50");
                }
            }
            _ => {}
        }

        errors.into_result()
    }

    fn check_options(&self, errors: &mut ConfigErrors) {
        if self.options.is_empty() {
            errors.add("options", "At least one option is required");
            return;
        }

        let mut seen = HashSet::new();
        for (idx, option) in self.options.iter().enumerate() {
            if option.value.is_empty() {
                errors.add(format!("options.{idx}.value"), "Option value is required");
            } else if !seen.insert(option.value.as_str()) {
                errors.add(format!("options.{idx}.value"), "Option values must be unique");
            }
            if option.label.is_empty() {
                errors.add(format!("options.{idx}.label"), "Option label is required");
            }
        }
    }

    /// Option values in order.
    pub fn option_values(&self) -> Vec<&str> {
        self.options.iter().map(|o| o.value.as_str()).collect()
    }
}
