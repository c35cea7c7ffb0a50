use serde::{Deserialize, Serialize};

use crate::FieldConfiguration;

/// An ordered group of fields within one form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionConfiguration {
    pub id: String,

    /// The form that owns this section.
    pub form_id: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub order: u32,

    /// Fields in this section. Their `order` is relative to each other only.
    #[serde(default)]
    pub fields: Vec<FieldConfiguration>,
}

impl SectionConfiguration {
    pub fn new(id: impl Into<String>, form_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            form_id: form_id.into(),
            title: title.into(),
            order: 0,
            fields: Vec::new(),
        }
    }

    pub fn with_order(mut self, order: u32) -> Self {
        self.order = order;
        self
    }

    pub fn with_fields(mut self, fields: Vec<FieldConfiguration>) -> Self {
        self.fields = fields;
        self
    }

    pub fn field(&self, field_id: &str) -> Option<&FieldConfiguration> {
        self.fields.iter().find(|f| f.id == field_id)
    }

    /// Fields in display order. Ties keep their stored order.
    pub fn ordered_fields(&self) -> Vec<&FieldConfiguration> {
        let mut fields: Vec<_> = self.fields.iter().collect();
        fields.sort_by_key(|f| f.order);
        fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }
}

/// A whole form: its identity and its sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormConfiguration {
    pub id: String,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub sections: Vec<SectionConfiguration>,
}

impl FormConfiguration {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            sections: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_sections(mut self, sections: Vec<SectionConfiguration>) -> Self {
        self.sections = sections;
        self
    }

    pub fn section(&self, section_id: &str) -> Option<&SectionConfiguration> {
        self.sections.iter().find(|s| s.id == section_id)
    }

    pub fn section_mut(&mut self, section_id: &str) -> Option<&mut SectionConfiguration> {
        self.sections.iter_mut().find(|s| s.id == section_id)
    }

    /// Find a field in any section.
    pub fn field(&self, field_id: &str) -> Option<&FieldConfiguration> {
        self.sections.iter().find_map(|s| s.field(field_id))
    }

    /// Sections in display order.
    pub fn ordered_sections(&self) -> Vec<&SectionConfiguration> {
        let mut sections: Vec<_> = self.sections.iter().collect();
        sections.sort_by_key(|s| s.order);
        sections
    }

    /// Every field, section by section, each in display order.
    pub fn ordered_fields(&self) -> Vec<&FieldConfiguration> {
        self.ordered_sections()
            .into_iter()
            .flat_map(SectionConfiguration::ordered_fields)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FieldType;

    fn field(id: &str, order: u32) -> FieldConfiguration {
        FieldConfiguration::new(id, "s1", FieldType::Input, id).with_order(order)
    }

    #[test]
    fn ordered_fields_are_stable() {
        let section = SectionConfiguration::new("s1", "form", "Main").with_fields(vec![
            field("c", 2),
            field("a", 0),
            field("b", 0),
        ]);
        let ids: Vec<_> = section.ordered_fields().iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn form_lookups() {
        let form = FormConfiguration::new("form", "Signup").with_sections(vec![
            SectionConfiguration::new("s2", "form", "Second")
                .with_order(1)
                .with_fields(vec![field("x", 0)]),
            SectionConfiguration::new("s1", "form", "First").with_fields(vec![field("y", 0)]),
        ]);

        assert_eq!(form.field("x").map(|f| f.id.as_str()), Some("x"));
        assert!(form.field("nope").is_none());

        let ids: Vec<_> = form.ordered_fields().iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["y", "x"]);
    }
}
