//! A five-section event registration form exercising most field types.

use chrono::NaiveDate;
use formwright_types::{
    FieldConfiguration, FieldOption, FieldType, FieldValue, FormConfiguration,
    SectionConfiguration, Submission,
};

use crate::contact::EMAIL_PATTERN;

pub const EVENT_FORM_ID: &str = "form_2024_user_registration";

fn options(pairs: &[(&str, &str)]) -> Vec<FieldOption> {
    pairs
        .iter()
        .map(|(value, label)| FieldOption::new(*value, *label))
        .collect()
}

fn section(id: &str, title: &str, order: u32, fields: Vec<FieldConfiguration>) -> SectionConfiguration {
    SectionConfiguration::new(id, EVENT_FORM_ID, title)
        .with_order(order)
        .with_fields(fields)
}

fn personal_info() -> SectionConfiguration {
    const S: &str = "section_personal_info";
    section(
        S,
        "Personal Information",
        0,
        vec![
            FieldConfiguration::new("field_full_name", S, FieldType::Input, "Full Name")
                .with_placeholder("Enter your full name")
                .required(true)
                .with_length_bounds(Some(2), Some(100))
                .with_pattern(r"^[a-zA-Z\s]+$")
                .with_order(0),
            FieldConfiguration::new("field_email", S, FieldType::Input, "Email Address")
                .with_placeholder("your.email@example.com")
                .required(true)
                .with_length_bounds(None, Some(255))
                .with_pattern(EMAIL_PATTERN)
                .with_order(1),
            FieldConfiguration::new("field_phone", S, FieldType::Phone, "Phone Number")
                .with_placeholder("+1 (555) 123-4567")
                .required(true)
                .with_order(2),
            FieldConfiguration::new("field_date_of_birth", S, FieldType::Date, "Date of Birth")
                .with_date_bounds(None, NaiveDate::from_ymd_opt(2006, 1, 1))
                .with_order(3),
            FieldConfiguration::new("field_gender", S, FieldType::Select, "Gender")
                .with_options(options(&[
                    ("male", "Male"),
                    ("female", "Female"),
                    ("other", "Other"),
                    ("prefer_not_to_say", "Prefer not to say"),
                ]))
                .with_order(4),
            FieldConfiguration::new("field_home_city", S, FieldType::Location, "Home City")
                .with_placeholder("Where are you travelling from?")
                .with_order(5),
        ],
    )
}

fn professional_info() -> SectionConfiguration {
    const S: &str = "section_professional_info";
    section(
        S,
        "Professional Background",
        1,
        vec![
            FieldConfiguration::new("field_occupation", S, FieldType::Input, "Current Occupation")
                .with_placeholder("e.g., Software Developer, Product Manager, Student")
                .required(true)
                .with_length_bounds(None, Some(100))
                .with_order(0),
            FieldConfiguration::new("field_company", S, FieldType::Input, "Company/Organization")
                .with_placeholder("Enter your company name")
                .with_length_bounds(None, Some(100))
                .with_order(1),
            FieldConfiguration::new("field_experience_level", S, FieldType::Radio, "Experience Level")
                .required(true)
                .with_options(options(&[
                    ("beginner", "Beginner (0-2 years)"),
                    ("intermediate", "Intermediate (2-5 years)"),
                    ("senior", "Senior (5-10 years)"),
                    ("expert", "Expert (10+ years)"),
                ]))
                .with_order(2),
            FieldConfiguration {
                max_tags: Some(10),
                ..FieldConfiguration::new("field_skills", S, FieldType::Tags, "Technical Skills")
                    .with_placeholder("Add your skills (e.g., JavaScript, Python, React)")
                    .with_order(3)
            },
            FieldConfiguration::new("field_bio", S, FieldType::Textarea, "Brief Bio")
                .with_placeholder("Tell us a bit about yourself and your interests...")
                .with_length_bounds(None, Some(500))
                .with_order(4),
        ],
    )
}

fn event_preferences() -> SectionConfiguration {
    const S: &str = "section_event_preferences";
    section(
        S,
        "Event Preferences",
        2,
        vec![
            FieldConfiguration::new(
                "field_session_interests",
                S,
                FieldType::Multiselect,
                "Session Topics of Interest",
            )
            .required(true)
            .with_options(options(&[
                ("web_development", "Web Development"),
                ("mobile_development", "Mobile Development"),
                ("ai_ml", "AI/Machine Learning"),
                ("cloud_computing", "Cloud Computing"),
                ("devops", "DevOps"),
                ("blockchain", "Blockchain"),
                ("iot", "Internet of Things"),
                ("cybersecurity", "Cybersecurity"),
            ]))
            .with_selection_bounds(Some(1), None)
            .with_order(0),
            FieldConfiguration {
                step: Some(1.0),
                ..FieldConfiguration::new(
                    "field_networking_interest",
                    S,
                    FieldType::Slider,
                    "Interest in Networking",
                )
                .with_bounds(Some(1.0), Some(10.0))
                .with_default(vec![5.0])
                .with_order(1)
            },
            FieldConfiguration::new(
                "field_volunteer",
                S,
                FieldType::Switch,
                "Would you like to volunteer at the event?",
            )
            .with_default(false)
            .with_order(2),
            FieldConfiguration::new(
                "field_dietary_restrictions",
                S,
                FieldType::Multiselect,
                "Dietary Restrictions",
            )
            .with_options(options(&[
                ("vegetarian", "Vegetarian"),
                ("vegan", "Vegan"),
                ("gluten_free", "Gluten-Free"),
                ("halal", "Halal"),
                ("kosher", "Kosher"),
                ("none", "No restrictions"),
            ]))
            .with_order(3),
            FieldConfiguration::new(
                "field_transportation",
                S,
                FieldType::Combobox,
                "How will you get to the event?",
            )
            .with_options(options(&[
                ("car", "Personal Car"),
                ("public_transport", "Public Transportation"),
                ("rideshare", "Rideshare (Uber/Lyft)"),
                ("bike", "Bicycle"),
                ("walk", "Walking"),
                ("other", "Other"),
            ]))
            .with_order(4),
            FieldConfiguration::new(
                "field_arrival",
                S,
                FieldType::Datetime,
                "Expected Arrival",
            )
            .with_order(5),
        ],
    )
}

fn additional_info() -> SectionConfiguration {
    const S: &str = "section_additional_info";
    section(
        S,
        "Additional Information",
        3,
        vec![
            FieldConfiguration::new(
                "field_emergency_contact",
                S,
                FieldType::Input,
                "Emergency Contact Name",
            )
            .with_placeholder("Full name of emergency contact")
            .with_length_bounds(None, Some(100))
            .with_order(0),
            FieldConfiguration::new(
                "field_emergency_phone",
                S,
                FieldType::Phone,
                "Emergency Contact Phone",
            )
            .with_placeholder("+1 (555) 123-4567")
            .with_order(1),
            FieldConfiguration::new(
                "field_special_requirements",
                S,
                FieldType::Textarea,
                "Special Requirements or Accessibility Needs",
            )
            .with_placeholder("Please describe any special accommodations you need...")
            .with_length_bounds(None, Some(500))
            .with_order(2),
            FieldConfiguration {
                max_files: Some(1),
                max_file_size: Some(5.0),
                accepted_formats: vec![".pdf".into(), ".doc".into(), ".docx".into()],
                ..FieldConfiguration::new(
                    "field_resume_upload",
                    S,
                    FieldType::File,
                    "Upload Resume (Optional)",
                )
                .with_order(3)
            },
            FieldConfiguration::new("field_signature", S, FieldType::Signature, "Digital Signature")
                .with_order(4),
        ],
    )
}

fn agreement() -> SectionConfiguration {
    const S: &str = "section_agreement";
    section(
        S,
        "Terms and Agreement",
        4,
        vec![
            FieldConfiguration::new(
                "field_terms_acceptance",
                S,
                FieldType::Checkbox,
                "I agree to the Terms and Conditions",
            )
            .required(true)
            .with_order(0),
            FieldConfiguration::new(
                "field_marketing_consent",
                S,
                FieldType::Checkbox,
                "Send me updates about future events",
            )
            .with_order(1),
            FieldConfiguration {
                otp_length: Some(6),
                ..FieldConfiguration::new(
                    "field_verification_code",
                    S,
                    FieldType::Otp,
                    "Verification Code",
                )
                .with_placeholder("Enter 6-digit code sent to your email")
                .required(true)
                .with_order(2)
            },
        ],
    )
}

/// Registration form for a community tech event.
pub fn event_registration() -> FormConfiguration {
    FormConfiguration::new(EVENT_FORM_ID, "GDG Event Registration Form")
        .with_description(
            "Complete registration form for our upcoming tech event. Please fill all required fields.",
        )
        .with_sections(vec![
            agreement(),
            personal_info(),
            professional_info(),
            event_preferences(),
            additional_info(),
        ])
}

/// A submission that passes every rule of [`event_registration`].
pub fn event_registration_submission() -> Submission {
    Submission::new()
        .with("field_full_name", "Ada Lovelace")
        .with("field_email", "ada@example.com")
        .with("field_phone", "+44 (20) 7946-0000")
        .with("field_occupation", "Engineer")
        .with("field_experience_level", "senior")
        .with("field_session_interests", vec!["ai_ml", "devops"])
        .with("field_networking_interest", vec![7.0])
        .with("field_volunteer", true)
        .with("field_terms_acceptance", true)
        .with("field_verification_code", "123456")
        .with("field_skills", FieldValue::Texts(vec!["Rust".into(), "Go".into()]))
}
