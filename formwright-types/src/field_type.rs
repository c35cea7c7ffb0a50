use std::fmt;

use serde::{Deserialize, Serialize};

/// The kind of input a field collects.
///
/// The tag drives both how a submitted value is validated and which control
/// renders it. Tags serialize as `SCREAMING_SNAKE_CASE` (`"SMART_DATETIME"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldType {
    /// Single-line text input.
    Input,
    /// Multi-line text input.
    Textarea,
    /// Masked password input with a fixed strength rule.
    Password,
    /// Phone number input.
    Phone,
    /// A single boolean toggle that may be required to be checked.
    Checkbox,
    /// Pick one option from a visible list.
    Radio,
    /// Pick one option from a dropdown.
    Select,
    /// Pick one option from a searchable dropdown.
    Combobox,
    /// Pick any number of options.
    Multiselect,
    /// On/off switch.
    Switch,
    /// Calendar date.
    Date,
    /// Date and time of day.
    Datetime,
    /// Date and time entered as free text or picked.
    SmartDatetime,
    /// File upload.
    File,
    /// One-time password digits.
    Otp,
    /// Address with optional coordinates.
    Location,
    /// Drawn signature, stored serialized.
    Signature,
    /// Numeric range slider.
    Slider,
    /// Free-form tag list.
    Tags,
    /// Any tag this version does not know. Never produced by the registry.
    #[serde(other)]
    Unknown,
}

impl FieldType {
    /// Every known field type, in palette order.
    pub const ALL: [FieldType; 19] = [
        Self::Input,
        Self::Textarea,
        Self::Password,
        Self::Phone,
        Self::Checkbox,
        Self::Radio,
        Self::Select,
        Self::Combobox,
        Self::Multiselect,
        Self::Switch,
        Self::Date,
        Self::Datetime,
        Self::SmartDatetime,
        Self::File,
        Self::Otp,
        Self::Location,
        Self::Signature,
        Self::Slider,
        Self::Tags,
    ];

    /// The wire tag, e.g. `"SMART_DATETIME"`.
    pub fn as_tag(&self) -> &'static str {
        match self {
            Self::Input => "INPUT",
            Self::Textarea => "TEXTAREA",
            Self::Password => "PASSWORD",
            Self::Phone => "PHONE",
            Self::Checkbox => "CHECKBOX",
            Self::Radio => "RADIO",
            Self::Select => "SELECT",
            Self::Combobox => "COMBOBOX",
            Self::Multiselect => "MULTISELECT",
            Self::Switch => "SWITCH",
            Self::Date => "DATE",
            Self::Datetime => "DATETIME",
            Self::SmartDatetime => "SMART_DATETIME",
            Self::File => "FILE",
            Self::Otp => "OTP",
            Self::Location => "LOCATION",
            Self::Signature => "SIGNATURE",
            Self::Slider => "SLIDER",
            Self::Tags => "TAGS",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Parse a wire tag. Unrecognised tags become [`FieldType::Unknown`].
    pub fn from_tag(tag: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|ty| ty.as_tag() == tag)
            .unwrap_or(Self::Unknown)
    }

    /// Check if this type picks exactly one value out of configured options.
    pub fn is_single_choice(&self) -> bool {
        matches!(self, Self::Radio | Self::Select | Self::Combobox)
    }

    /// Check if this type is driven by an option list.
    pub fn has_options(&self) -> bool {
        self.is_single_choice() || matches!(self, Self::Multiselect)
    }

    /// Check if this type stores a date or date-time.
    pub fn is_temporal(&self) -> bool {
        matches!(self, Self::Date | Self::Datetime | Self::SmartDatetime)
    }

    /// Check if this is a recognised type.
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }

    /// The palette group this type belongs to, if any.
    pub fn category(&self) -> Option<FieldCategory> {
        FieldCategory::ALL
            .into_iter()
            .find(|category| category.field_types().contains(self))
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

impl From<&str> for FieldType {
    fn from(tag: &str) -> Self {
        Self::from_tag(tag)
    }
}

/// Palette grouping of field types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldCategory {
    BasicInputs,
    Selection,
    DateTime,
    Advanced,
}

impl FieldCategory {
    pub const ALL: [FieldCategory; 4] = [
        Self::BasicInputs,
        Self::Selection,
        Self::DateTime,
        Self::Advanced,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::BasicInputs => "Basic Inputs",
            Self::Selection => "Selection",
            Self::DateTime => "Date & Time",
            Self::Advanced => "Advanced",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::BasicInputs => "Standard text and input fields",
            Self::Selection => "Choose from options and selections",
            Self::DateTime => "Date and time picker components",
            Self::Advanced => "Specialized input components",
        }
    }

    /// The field types shown in this group, in palette order.
    pub fn field_types(&self) -> &'static [FieldType] {
        match self {
            Self::BasicInputs => &[
                FieldType::Input,
                FieldType::Textarea,
                FieldType::Password,
                FieldType::Phone,
            ],
            Self::Selection => &[
                FieldType::Checkbox,
                FieldType::Radio,
                FieldType::Select,
                FieldType::Combobox,
                FieldType::Multiselect,
                FieldType::Switch,
            ],
            Self::DateTime => &[
                FieldType::Date,
                FieldType::Datetime,
                FieldType::SmartDatetime,
            ],
            Self::Advanced => &[
                FieldType::File,
                FieldType::Otp,
                FieldType::Location,
                FieldType::Signature,
                FieldType::Slider,
                FieldType::Tags,
            ],
        }
    }
}
