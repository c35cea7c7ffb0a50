use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A value submitted for (or pre-filled into) a field.
///
/// Deserialization is untagged: JSON strings become [`FieldValue::Text`],
/// which is why date-like rules also accept text in ISO form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Toggle state (checkbox, switch).
    Bool(bool),

    /// A single number.
    Number(f64),

    /// Text (input, textarea, password, phone, single choice, otp, signature).
    Text(String),

    /// Numbers (slider position is element 0).
    Numbers(Vec<f64>),

    /// Strings (multiselect, tags).
    Texts(Vec<String>),

    /// Uploaded file handles.
    Files(Vec<FileHandle>),

    /// Address with optional coordinates.
    Location(Location),

    /// A calendar date.
    Date(NaiveDate),

    /// A date with time of day.
    DateTime(NaiveDateTime),
}

/// Metadata of an uploaded file. The bytes themselves live elsewhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileHandle {
    pub name: String,

    /// Size in bytes.
    pub size: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

impl FileHandle {
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
            content_type: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

impl Location {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            latitude: None,
            longitude: None,
        }
    }

    pub fn with_coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }
}

impl FieldValue {
    /// Check if this value counts as "nothing entered".
    ///
    /// Empty text, empty lists, and a location without an address are empty.
    /// Booleans, numbers and dates never are.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(s) => s.is_empty(),
            Self::Numbers(v) => v.is_empty(),
            Self::Texts(v) => v.is_empty(),
            Self::Files(v) => v.is_empty(),
            Self::Location(l) => l.address.is_empty(),
            Self::Bool(_) | Self::Number(_) | Self::Date(_) | Self::DateTime(_) => false,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_numbers(&self) -> Option<&[f64]> {
        match self {
            Self::Numbers(v) => Some(v),
            _ => None,
        }
    }

    /// Strings, also accepting an empty number list (JSON `[]`).
    pub fn as_texts(&self) -> Option<&[String]> {
        match self {
            Self::Texts(v) => Some(v),
            Self::Numbers(v) if v.is_empty() => Some(&[]),
            _ => None,
        }
    }

    /// Files, also accepting an empty number list (JSON `[]`).
    pub fn as_files(&self) -> Option<&[FileHandle]> {
        match self {
            Self::Files(v) => Some(v),
            Self::Numbers(v) if v.is_empty() => Some(&[]),
            _ => None,
        }
    }

    pub fn as_location(&self) -> Option<&Location> {
        match self {
            Self::Location(l) => Some(l),
            _ => None,
        }
    }

    /// A calendar date, from a date value or ISO `YYYY-MM-DD` text.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(d) => Some(*d),
            Self::DateTime(dt) => Some(dt.date()),
            Self::Text(s) => parse_date(s),
            _ => None,
        }
    }

    /// A date-time, from a date-time value or ISO text (`YYYY-MM-DDTHH:MM[:SS]`).
    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            Self::DateTime(dt) => Some(*dt),
            Self::Text(s) => parse_datetime(s),
            _ => None,
        }
    }
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| parse_datetime(s).map(|dt| dt.date()))
}

fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<Vec<f64>> for FieldValue {
    fn from(v: Vec<f64>) -> Self {
        Self::Numbers(v)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(v: Vec<String>) -> Self {
        Self::Texts(v)
    }
}

impl From<Vec<&str>> for FieldValue {
    fn from(v: Vec<&str>) -> Self {
        Self::Texts(v.into_iter().map(String::from).collect())
    }
}

impl From<Vec<FileHandle>> for FieldValue {
    fn from(v: Vec<FileHandle>) -> Self {
        Self::Files(v)
    }
}

impl From<Location> for FieldValue {
    fn from(l: Location) -> Self {
        Self::Location(l)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(d: NaiveDate) -> Self {
        Self::Date(d)
    }
}

impl From<NaiveDateTime> for FieldValue {
    fn from(dt: NaiveDateTime) -> Self {
        Self::DateTime(dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emptiness() {
        assert!(FieldValue::from("").is_empty());
        assert!(FieldValue::Texts(vec![]).is_empty());
        assert!(FieldValue::Location(Location::new("")).is_empty());
        assert!(!FieldValue::Bool(false).is_empty());
        assert!(!FieldValue::Numbers(vec![0.0]).is_empty());
    }

    #[test]
    fn untagged_json() {
        let v: FieldValue = serde_json::from_str("true").unwrap();
        assert_eq!(v, FieldValue::Bool(true));

        let v: FieldValue = serde_json::from_str("[50]").unwrap();
        assert_eq!(v, FieldValue::Numbers(vec![50.0]));

        let v: FieldValue = serde_json::from_str(r#"["a", "b"]"#).unwrap();
        assert_eq!(v, FieldValue::from(vec!["a", "b"]));

        let v: FieldValue =
            serde_json::from_str(r#"[{"name": "cv.pdf", "size": 2048}]"#).unwrap();
        assert_eq!(v, FieldValue::Files(vec![FileHandle::new("cv.pdf", 2048)]));

        let v: FieldValue = serde_json::from_str(r#"{"address": "1 Main St"}"#).unwrap();
        assert_eq!(v, FieldValue::Location(Location::new("1 Main St")));
    }

    #[test]
    fn empty_json_array_reads_as_any_list() {
        let v: FieldValue = serde_json::from_str("[]").unwrap();
        assert_eq!(v.as_texts(), Some(&[][..]));
        assert_eq!(v.as_files().map(<[_]>::len), Some(0));
    }

    #[test]
    fn dates_from_text() {
        let v = FieldValue::from("2024-04-29");
        assert_eq!(v.as_date(), NaiveDate::from_ymd_opt(2024, 4, 29));
        assert!(v.as_datetime().is_none());

        let v = FieldValue::from("2024-04-29T17:30");
        assert!(v.as_datetime().is_some());
        assert_eq!(v.as_date(), NaiveDate::from_ymd_opt(2024, 4, 29));

        assert!(FieldValue::from("next tuesday").as_date().is_none());
    }
}
