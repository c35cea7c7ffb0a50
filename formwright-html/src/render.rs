//! HTML rendering of forms and single fields.

use std::collections::BTreeMap;

use formwright::{
    FieldConfiguration, FieldType, FieldValue, FormConfiguration, SectionConfiguration, Submission,
};

/// Options for HTML generation.
#[derive(Debug, Clone, Default)]
pub struct HtmlOptions {
    /// Title for the HTML document. Falls back to the form name.
    pub title: Option<String>,
    /// Whether to include default CSS styling.
    pub include_styles: bool,
    /// Whether to generate a complete HTML document (with html/head/body tags).
    pub full_document: bool,
    /// Custom CSS class prefix for all generated elements.
    pub class_prefix: String,
    /// Text of the submit button.
    pub submit_label: String,
}

impl HtmlOptions {
    /// Create new options with default values.
    pub fn new() -> Self {
        Self {
            title: None,
            include_styles: true,
            full_document: true,
            class_prefix: "form".to_string(),
            submit_label: "Submit".to_string(),
        }
    }

    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Enable or disable default CSS styling.
    pub fn with_styles(mut self, include: bool) -> Self {
        self.include_styles = include;
        self
    }

    /// Generate a complete HTML document or just the form fragment.
    pub fn full_document(mut self, full: bool) -> Self {
        self.full_document = full;
        self
    }

    /// Set a custom CSS class prefix.
    pub fn with_class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.class_prefix = prefix.into();
        self
    }

    pub fn with_submit_label(mut self, label: impl Into<String>) -> Self {
        self.submit_label = label.into();
        self
    }
}

/// Render a blank form: every control shows its field's initial value.
pub fn render_form(form: &FormConfiguration, options: &HtmlOptions) -> String {
    let values = form
        .ordered_fields()
        .into_iter()
        .map(|f| (f.id.clone(), f.initial_value()))
        .collect();
    render_form_with(form, &values, &BTreeMap::new(), options)
}

/// Render a form with the given values and per-field error messages.
pub fn render_form_with(
    form: &FormConfiguration,
    values: &Submission,
    errors: &BTreeMap<String, String>,
    options: &HtmlOptions,
) -> String {
    let mut html = String::new();
    let prefix = &options.class_prefix;
    let title = options.title.as_deref().unwrap_or(&form.name);

    if options.full_document {
        html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        html.push_str("  <meta charset=\"UTF-8\">\n");
        html.push_str(
            "  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
        );
        html.push_str(&format!("  <title>{}</title>\n", escape_html(title)));

        if options.include_styles {
            html.push_str(&generate_styles(prefix));
        }

        html.push_str("</head>\n<body>\n");
    }

    html.push_str(&format!(
        "<form class=\"{prefix}-form\" id=\"{}\" novalidate>\n",
        escape_html(&form.id)
    ));
    html.push_str(&format!(
        "  <h1 class=\"{prefix}-title\">{}</h1>\n",
        escape_html(title)
    ));
    if let Some(description) = &form.description {
        html.push_str(&format!(
            "  <p class=\"{prefix}-description\">{}</p>\n",
            escape_html(description)
        ));
    }

    for section in form.ordered_sections() {
        html.push_str(&generate_section(section, values, errors, prefix));
    }

    html.push_str(&format!(
        "  <button type=\"submit\" class=\"{prefix}-submit\">{}</button>\n",
        escape_html(&options.submit_label)
    ));
    html.push_str("</form>\n");

    if options.full_document {
        html.push_str("</body>\n</html>\n");
    }

    html
}

/// Render one field's control, label and error message.
pub fn render_field(
    field: &FieldConfiguration,
    value: Option<&FieldValue>,
    error: Option<&str>,
    options: &HtmlOptions,
) -> String {
    generate_field(field, value, error, &options.class_prefix, 0)
}

fn generate_section(
    section: &SectionConfiguration,
    values: &Submission,
    errors: &BTreeMap<String, String>,
    prefix: &str,
) -> String {
    let mut html = format!(
        "  <fieldset class=\"{prefix}-section\" id=\"{}\">\n",
        escape_html(&section.id)
    );
    if !section.title.is_empty() {
        html.push_str(&format!(
            "    <legend>{}</legend>\n",
            escape_html(&section.title)
        ));
    }
    for field in section.ordered_fields() {
        html.push_str(&generate_field(
            field,
            values.get(&field.id),
            errors.get(&field.id).map(String::as_str),
            prefix,
            2,
        ));
    }
    html.push_str("  </fieldset>\n");
    html
}

/// Label text with the required marker appended.
fn label_html(field: &FieldConfiguration, prefix: &str) -> String {
    let marker = if field.required {
        format!(" <span class=\"{prefix}-required\">*</span>")
    } else {
        String::new()
    };
    format!("{}{marker}", escape_html(&field.label))
}

/// Attributes every text-like control shares.
fn common_attrs(field: &FieldConfiguration, prefix: &str, error: Option<&str>) -> String {
    let id = escape_html(&field.id);
    let mut attrs = format!("id=\"{id}\" name=\"{id}\" class=\"{prefix}-input\"");
    if let Some(placeholder) = &field.placeholder {
        attrs.push_str(&format!(" placeholder=\"{}\"", escape_html(placeholder)));
    }
    if field.required {
        attrs.push_str(" required");
    }
    if error.is_some() {
        attrs.push_str(&format!(" aria-invalid=\"true\" aria-describedby=\"{id}-error\""));
    }
    attrs
}

fn value_attr(text: Option<&str>) -> String {
    text.filter(|s| !s.is_empty())
        .map(|s| format!(" value=\"{}\"", escape_html(s)))
        .unwrap_or_default()
}

/// Generate HTML for a single field.
fn generate_field(
    field: &FieldConfiguration,
    value: Option<&FieldValue>,
    error: Option<&str>,
    prefix: &str,
    indent: usize,
) -> String {
    let ind = "  ".repeat(indent);
    let id = escape_html(&field.id);
    let label = label_html(field, prefix);
    let text = value.and_then(FieldValue::as_str);
    let invalid = if error.is_some() {
        format!(" {prefix}-invalid")
    } else {
        String::new()
    };

    let mut html = String::new();
    let labelled = |html: &mut String, kind: &str| {
        html.push_str(&format!(
            "{ind}<div class=\"{prefix}-field {prefix}-{kind}{invalid}\" data-field-type=\"{}\">\n",
            field.field_type.as_tag()
        ));
        html.push_str(&format!("{ind}  <label for=\"{id}\">{label}</label>\n"));
    };

    match field.field_type {
        FieldType::Input => {
            labelled(&mut html, "text");
            let mut attrs = common_attrs(field, prefix, error);
            if let Some(min) = field.min_length {
                attrs.push_str(&format!(" minlength=\"{min}\""));
            }
            if let Some(max) = field.max_length {
                attrs.push_str(&format!(" maxlength=\"{max}\""));
            }
            if let Some(pattern) = &field.pattern {
                attrs.push_str(&format!(" pattern=\"{}\"", escape_html(pattern)));
            }
            html.push_str(&format!(
                "{ind}  <input type=\"text\" {attrs}{}>\n",
                value_attr(text)
            ));
        }

        FieldType::Textarea => {
            labelled(&mut html, "textarea");
            let attrs = common_attrs(field, prefix, error).replace(
                &format!("class=\"{prefix}-input\""),
                &format!("class=\"{prefix}-textarea\""),
            );
            html.push_str(&format!(
                "{ind}  <textarea {attrs} rows=\"4\">{}</textarea>\n",
                escape_html(text.unwrap_or_default())
            ));
        }

        FieldType::Password => {
            // Never echo a password back into the page.
            labelled(&mut html, "password");
            html.push_str(&format!(
                "{ind}  <input type=\"password\" {} autocomplete=\"new-password\">\n",
                common_attrs(field, prefix, error)
            ));
        }

        FieldType::Phone => {
            labelled(&mut html, "phone");
            html.push_str(&format!(
                "{ind}  <input type=\"tel\" {}{}>\n",
                common_attrs(field, prefix, error),
                value_attr(text)
            ));
        }

        FieldType::Checkbox | FieldType::Switch => {
            let (kind, role) = match field.field_type {
                FieldType::Switch => ("switch", " role=\"switch\""),
                _ => ("checkbox", ""),
            };
            let checked = if value.and_then(FieldValue::as_bool).unwrap_or(false) {
                " checked"
            } else {
                ""
            };
            let required = if field.required { " required" } else { "" };
            html.push_str(&format!(
                "{ind}<div class=\"{prefix}-field {prefix}-{kind}{invalid}\" data-field-type=\"{}\">\n",
                field.field_type.as_tag()
            ));
            html.push_str(&format!(
                "{ind}  <input type=\"checkbox\" id=\"{id}\" name=\"{id}\" value=\"true\"{role}{required}{checked}>\n"
            ));
            html.push_str(&format!("{ind}  <label for=\"{id}\">{label}</label>\n"));
        }

        FieldType::Radio | FieldType::Multiselect => {
            let (kind, input, name) = match field.field_type {
                FieldType::Radio => ("radio", "radio", id.clone()),
                _ => ("multiselect", "checkbox", format!("{id}[]")),
            };
            let chosen: Vec<&str> = match value {
                Some(FieldValue::Texts(v)) => v.iter().map(String::as_str).collect(),
                Some(v) => v.as_str().into_iter().collect(),
                None => Vec::new(),
            };

            html.push_str(&format!(
                "{ind}<fieldset class=\"{prefix}-field {prefix}-fieldset {prefix}-{kind}{invalid}\" id=\"{id}\" data-field-type=\"{}\">\n",
                field.field_type.as_tag()
            ));
            html.push_str(&format!("{ind}  <legend>{label}</legend>\n"));
            for (idx, option) in field.options.iter().enumerate() {
                let option_id = format!("{id}-{idx}");
                let checked = if chosen.contains(&option.value.as_str()) {
                    " checked"
                } else {
                    ""
                };
                html.push_str(&format!("{ind}  <div class=\"{prefix}-{kind}-option\">\n"));
                html.push_str(&format!(
                    "{ind}    <input type=\"{input}\" id=\"{option_id}\" name=\"{name}\" value=\"{}\"{checked}>\n",
                    escape_html(&option.value)
                ));
                html.push_str(&format!(
                    "{ind}    <label for=\"{option_id}\">{}</label>\n",
                    escape_html(&option.label)
                ));
                html.push_str(&format!("{ind}  </div>\n"));
            }
            push_error(&mut html, &ind, prefix, &id, error);
            html.push_str(&format!("{ind}</fieldset>\n"));
            return html;
        }

        FieldType::Select => {
            labelled(&mut html, "select");
            let required = if field.required { " required" } else { "" };
            html.push_str(&format!(
                "{ind}  <select id=\"{id}\" name=\"{id}\" class=\"{prefix}-select\"{required}>\n"
            ));
            let placeholder = field.placeholder.as_deref().unwrap_or("Select an option");
            html.push_str(&format!(
                "{ind}    <option value=\"\">{}</option>\n",
                escape_html(placeholder)
            ));
            for option in &field.options {
                let selected = if text == Some(option.value.as_str()) {
                    " selected"
                } else {
                    ""
                };
                html.push_str(&format!(
                    "{ind}    <option value=\"{}\"{selected}>{}</option>\n",
                    escape_html(&option.value),
                    escape_html(&option.label)
                ));
            }
            html.push_str(&format!("{ind}  </select>\n"));
        }

        FieldType::Combobox => {
            labelled(&mut html, "combobox");
            html.push_str(&format!(
                "{ind}  <input type=\"text\" {} list=\"{id}-options\"{}>\n",
                common_attrs(field, prefix, error),
                value_attr(text)
            ));
            html.push_str(&format!("{ind}  <datalist id=\"{id}-options\">\n"));
            for option in &field.options {
                html.push_str(&format!(
                    "{ind}    <option value=\"{}\">{}</option>\n",
                    escape_html(&option.value),
                    escape_html(&option.label)
                ));
            }
            html.push_str(&format!("{ind}  </datalist>\n"));
        }

        FieldType::Date => {
            labelled(&mut html, "date");
            let mut attrs = common_attrs(field, prefix, error);
            if let Some(min) = field.min_date {
                attrs.push_str(&format!(" min=\"{}\"", min.format("%Y-%m-%d")));
            }
            if let Some(max) = field.max_date {
                attrs.push_str(&format!(" max=\"{}\"", max.format("%Y-%m-%d")));
            }
            let current = value
                .and_then(FieldValue::as_date)
                .map(|d| d.format("%Y-%m-%d").to_string());
            html.push_str(&format!(
                "{ind}  <input type=\"date\" {attrs}{}>\n",
                value_attr(current.as_deref())
            ));
        }

        FieldType::Datetime => {
            labelled(&mut html, "datetime");
            let current = value
                .and_then(FieldValue::as_datetime)
                .map(|d| d.format("%Y-%m-%dT%H:%M").to_string());
            html.push_str(&format!(
                "{ind}  <input type=\"datetime-local\" {}{}>\n",
                common_attrs(field, prefix, error),
                value_attr(current.as_deref())
            ));
        }

        FieldType::SmartDatetime => {
            labelled(&mut html, "smart-datetime");
            let current = match value.and_then(FieldValue::as_datetime) {
                Some(dt) => Some(dt.format("%Y-%m-%d %H:%M").to_string()),
                None => text.map(str::to_string),
            };
            html.push_str(&format!(
                "{ind}  <input type=\"text\" {} data-smart-datetime{}>\n",
                common_attrs(field, prefix, error),
                value_attr(current.as_deref())
            ));
        }

        FieldType::File => {
            labelled(&mut html, "file");
            let mut attrs = common_attrs(field, prefix, error);
            if !field.accepted_formats.is_empty() {
                attrs.push_str(&format!(
                    " accept=\"{}\"",
                    escape_html(&field.accepted_formats.join(","))
                ));
            }
            if field.max_files.is_some_and(|n| n > 1) {
                attrs.push_str(" multiple");
            }
            if let Some(mb) = field.max_file_size {
                attrs.push_str(&format!(" data-max-size-mb=\"{mb}\""));
            }
            html.push_str(&format!("{ind}  <input type=\"file\" {attrs}>\n"));
            if let Some(files) = value.and_then(FieldValue::as_files)
                && !files.is_empty()
            {
                html.push_str(&format!("{ind}  <ul class=\"{prefix}-files\">\n"));
                for file in files {
                    html.push_str(&format!("{ind}    <li>{}</li>\n", escape_html(&file.name)));
                }
                html.push_str(&format!("{ind}  </ul>\n"));
            }
        }

        FieldType::Otp => {
            labelled(&mut html, "otp");
            let len = field
                .otp_length
                .unwrap_or(formwright::registry::DEFAULT_OTP_LENGTH);
            html.push_str(&format!(
                "{ind}  <input type=\"text\" {} inputmode=\"numeric\" autocomplete=\"one-time-code\" maxlength=\"{len}\" pattern=\"\\d{{{len}}}\"{}>\n",
                common_attrs(field, prefix, error),
                value_attr(text)
            ));
        }

        FieldType::Location => {
            labelled(&mut html, "location");
            let location = value.and_then(FieldValue::as_location);
            let address = location.map(|l| l.address.as_str());
            let coordinate = |c: Option<f64>| c.map(|c| format!(" value=\"{c}\"")).unwrap_or_default();
            html.push_str(&format!(
                "{ind}  <input type=\"text\" {}{}>\n",
                common_attrs(field, prefix, error).replacen(
                    &format!("name=\"{id}\""),
                    &format!("name=\"{id}[address]\""),
                    1
                ),
                value_attr(address)
            ));
            html.push_str(&format!(
                "{ind}  <input type=\"hidden\" name=\"{id}[latitude]\"{}>\n",
                coordinate(location.and_then(|l| l.latitude))
            ));
            html.push_str(&format!(
                "{ind}  <input type=\"hidden\" name=\"{id}[longitude]\"{}>\n",
                coordinate(location.and_then(|l| l.longitude))
            ));
        }

        FieldType::Signature => {
            labelled(&mut html, "signature");
            html.push_str(&format!(
                "{ind}  <canvas class=\"{prefix}-signature-pad\" data-for=\"{id}\" width=\"400\" height=\"150\"></canvas>\n"
            ));
            html.push_str(&format!(
                "{ind}  <input type=\"hidden\" id=\"{id}\" name=\"{id}\"{}>\n",
                value_attr(text)
            ));
        }

        FieldType::Slider => {
            labelled(&mut html, "slider");
            let min = field.min.unwrap_or(0.0);
            let max = field.max.unwrap_or(100.0);
            let step = field.step.unwrap_or(1.0);
            let current = value
                .and_then(FieldValue::as_numbers)
                .and_then(|v| v.first().copied())
                .unwrap_or(min);
            html.push_str(&format!(
                "{ind}  <input type=\"range\" id=\"{id}\" name=\"{id}\" class=\"{prefix}-range\" min=\"{min}\" max=\"{max}\" step=\"{step}\" value=\"{current}\">\n"
            ));
            html.push_str(&format!(
                "{ind}  <output for=\"{id}\" class=\"{prefix}-range-value\">{current}</output>\n"
            ));
        }

        FieldType::Tags => {
            labelled(&mut html, "tags");
            let mut attrs = common_attrs(field, prefix, error);
            if let Some(max) = field.max_tags {
                attrs.push_str(&format!(" data-max-tags=\"{max}\""));
            }
            let joined = value
                .and_then(FieldValue::as_texts)
                .map(|tags| tags.join(", "));
            html.push_str(&format!(
                "{ind}  <input type=\"text\" {attrs}{}>\n",
                value_attr(joined.as_deref())
            ));
        }

        FieldType::Unknown => {
            html.push_str(&format!(
                "{ind}<div class=\"{prefix}-field {prefix}-unknown\" data-field-type=\"{}\">\n",
                field.field_type.as_tag()
            ));
            html.push_str(&format!("{ind}  <span class=\"{prefix}-label\">{label}</span>\n"));
            html.push_str(&format!(
                "{ind}  <div class=\"{prefix}-placeholder\">Unknown Component</div>\n"
            ));
        }
    }

    push_error(&mut html, &ind, prefix, &id, error);
    html.push_str(&format!("{ind}</div>\n"));
    html
}

fn push_error(html: &mut String, ind: &str, prefix: &str, id: &str, error: Option<&str>) {
    if let Some(message) = error {
        html.push_str(&format!(
            "{ind}  <p class=\"{prefix}-error\" id=\"{id}-error\">{}</p>\n",
            escape_html(message)
        ));
    }
}

/// Escape HTML special characters.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Generate default CSS styles.
fn generate_styles(prefix: &str) -> String {
    format!(
        r#"  <style>
    .{prefix}-form {{
      max-width: 640px;
      margin: 2rem auto;
      padding: 1rem;
      font-family: sans-serif;
    }}
    .{prefix}-description {{
      color: #555;
    }}
    .{prefix}-section {{
      margin: 1rem 0;
      padding: 1rem;
      border: 1px solid #ddd;
      border-radius: 8px;
    }}
    .{prefix}-field {{
      margin: 0.75rem 0;
    }}
    .{prefix}-field label {{
      display: block;
      margin-bottom: 0.25rem;
    }}
    .{prefix}-input, .{prefix}-textarea, .{prefix}-select {{
      width: 100%;
      padding: 0.5rem;
      box-sizing: border-box;
    }}
    .{prefix}-checkbox, .{prefix}-switch {{
      display: flex;
      align-items: center;
      gap: 0.5rem;
    }}
    .{prefix}-checkbox label, .{prefix}-switch label {{
      display: inline;
    }}
    .{prefix}-radio-option, .{prefix}-multiselect-option {{
      margin: 0.25rem 0;
    }}
    .{prefix}-required {{
      color: #c62828;
    }}
    .{prefix}-invalid .{prefix}-input, .{prefix}-invalid .{prefix}-textarea {{
      border-color: #c62828;
    }}
    .{prefix}-error {{
      margin: 0.25rem 0 0;
      color: #c62828;
      font-size: 0.875rem;
    }}
    .{prefix}-signature-pad {{
      border: 1px dashed #999;
    }}
    .{prefix}-unknown .{prefix}-placeholder {{
      padding: 0.5rem;
      background: #fff3e0;
    }}
    .{prefix}-submit {{
      margin-top: 1rem;
      padding: 0.5rem 1rem;
    }}
  </style>
"#
    )
}
