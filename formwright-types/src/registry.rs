//! Per-type metadata: palette icon, label, description, and the configuration
//! a freshly added field starts with.
//!
//! Every lookup is total. [`FieldType::Unknown`] gets a generic fallback so
//! the editor keeps working when it meets a type it does not know.

use crate::{FieldConfiguration, FieldOption, FieldType, FieldValue};

/// Megabytes allowed per file for a new file field.
pub const DEFAULT_MAX_FILE_SIZE_MB: f64 = 10.0;

/// Digits in a new OTP field.
pub const DEFAULT_OTP_LENGTH: usize = 6;

/// Formats accepted by a new file field.
pub const DEFAULT_ACCEPTED_FORMATS: [&str; 5] = [".pdf", ".doc", ".docx", ".jpg", ".png"];

impl FieldType {
    /// Glyph shown in the palette.
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Input => "📝",
            Self::Textarea => "📄",
            Self::Password => "🔒",
            Self::Phone => "📞",
            Self::Checkbox => "☑️",
            Self::Radio => "🔘",
            Self::Select => "📋",
            Self::Combobox => "🔽",
            Self::Multiselect => "✅",
            Self::Switch => "🔄",
            Self::Date => "📅",
            Self::Datetime => "🕒",
            Self::SmartDatetime => "⏰",
            Self::File => "📎",
            Self::Otp => "🔢",
            Self::Location => "📍",
            Self::Signature => "✍️",
            Self::Slider => "🎚️",
            Self::Tags => "🏷️",
            Self::Unknown => "❓",
        }
    }

    /// Human label in title case, e.g. "Smart Datetime".
    pub fn label(&self) -> String {
        if !self.is_known() {
            return "Unknown".to_string();
        }
        self.as_tag()
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    None => String::new(),
                    Some(first) => first
                        .to_uppercase()
                        .chain(chars.flat_map(char::to_lowercase))
                        .collect(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// One-line description shown under the label.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Input => "Single line text input",
            Self::Textarea => "Multi-line text input",
            Self::Password => "Password input with validation",
            Self::Phone => "Phone number input with formatting",
            Self::Checkbox => "Single checkbox toggle",
            Self::Radio => "Single choice from options",
            Self::Select => "Dropdown selection",
            Self::Combobox => "Searchable dropdown",
            Self::Multiselect => "Multiple choice selection",
            Self::Switch => "On/off toggle switch",
            Self::Date => "Date picker",
            Self::Datetime => "Date and time picker",
            Self::SmartDatetime => "Smart date and time picker",
            Self::File => "File upload with validation",
            Self::Otp => "One-time password input",
            Self::Location => "Location picker with map",
            Self::Signature => "Digital signature pad",
            Self::Slider => "Range slider input",
            Self::Tags => "Tag input with autocomplete",
            Self::Unknown => "Unknown field type",
        }
    }

    /// The configuration a field of this type starts with when dropped onto a section.
    pub fn default_field(
        &self,
        id: impl Into<String>,
        section_id: impl Into<String>,
        order: u32,
    ) -> FieldConfiguration {
        let name = self.as_tag().replace('_', " ").to_lowercase();
        let sentence = {
            let mut chars = name.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => first.to_uppercase().chain(chars).collect(),
            }
        };

        let mut field = FieldConfiguration::new(id, section_id, *self, format!("{sentence} Field"))
            .with_placeholder(format!("Enter {name}"))
            .with_order(order);

        match self {
            Self::Select | Self::Radio | Self::Combobox | Self::Multiselect => {
                field.options = vec![
                    FieldOption::new("option1", "Option 1"),
                    FieldOption::new("option2", "Option 2"),
                ];
            }
            Self::Slider => {
                field.min = Some(0.0);
                field.max = Some(100.0);
                field.step = Some(1.0);
                field.default_value = Some(FieldValue::Numbers(vec![50.0]));
            }
            Self::File => {
                field.max_files = Some(1);
                field.max_file_size = Some(DEFAULT_MAX_FILE_SIZE_MB);
                field.accepted_formats = DEFAULT_ACCEPTED_FORMATS
                    .iter()
                    .map(|s| s.to_string())
                    .collect();
            }
            Self::Input | Self::Textarea => {
                field.min_length = Some(1);
                field.max_length = Some(255);
            }
            Self::Otp => {
                field.otp_length = Some(DEFAULT_OTP_LENGTH);
            }
            _ => {}
        }

        field
    }
}

impl FieldConfiguration {
    /// The value a control starts with: the configured default, otherwise
    /// the type's natural empty value.
    pub fn initial_value(&self) -> FieldValue {
        if let Some(value) = &self.default_value {
            return value.clone();
        }
        match self.field_type {
            FieldType::Checkbox | FieldType::Switch => FieldValue::Bool(false),
            FieldType::Multiselect | FieldType::Tags => FieldValue::Texts(Vec::new()),
            FieldType::File => FieldValue::Files(Vec::new()),
            FieldType::Slider => FieldValue::Numbers(vec![self.min.unwrap_or(0.0)]),
            _ => FieldValue::Text(String::new()),
        }
    }
}
