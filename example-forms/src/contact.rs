use formwright_types::{
    FieldConfiguration, FieldOption, FieldType, FormConfiguration, SectionConfiguration,
};

pub const CONTACT_FORM_ID: &str = "form_simple_contact";

const SECTION: &str = "section_contact_info";

/// Loose address check: something, an @, something with a dot.
pub const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";

/// A single-section "Contact Us" form.
pub fn contact_form() -> FormConfiguration {
    let fields = vec![
        FieldConfiguration::new("field_contact_name", SECTION, FieldType::Input, "Your Name")
            .with_placeholder("Enter your full name")
            .required(true)
            .with_order(0),
        FieldConfiguration::new(
            "field_contact_email",
            SECTION,
            FieldType::Input,
            "Email Address",
        )
        .with_placeholder("your.email@example.com")
        .required(true)
        .with_pattern(EMAIL_PATTERN)
        .with_order(1),
        FieldConfiguration::new("field_contact_subject", SECTION, FieldType::Select, "Subject")
            .required(true)
            .with_options(vec![
                FieldOption::new("general", "General Inquiry"),
                FieldOption::new("support", "Technical Support"),
                FieldOption::new("feedback", "Feedback"),
                FieldOption::new("partnership", "Partnership"),
            ])
            .with_order(2),
        FieldConfiguration {
            min_characters: Some(10),
            max_length: Some(1000),
            ..FieldConfiguration::new("field_contact_message", SECTION, FieldType::Textarea, "Message")
                .with_placeholder("Please describe your inquiry...")
                .required(true)
                .with_order(3)
        },
    ];

    FormConfiguration::new(CONTACT_FORM_ID, "Contact Us")
        .with_description("Get in touch with our team")
        .with_sections(vec![
            SectionConfiguration::new(SECTION, CONTACT_FORM_ID, "Contact").with_fields(fields),
        ])
}
