//! Integration tests for formwright

use example_forms::{contact_form, event_registration, event_registration_submission};
use formwright::{
    Action, FieldConfiguration, FieldOption, FieldType, FieldValue, FormBuilderState, FormEditor,
    FormStore, MemoryStore, Schema, SectionConfiguration, Submission, reduce,
};

fn field(ty: FieldType, label: &str) -> FieldConfiguration {
    FieldConfiguration::new("field_1", "section_1", ty, label)
}

fn validate(field: &FieldConfiguration, value: impl Into<FieldValue>) -> Result<(), String> {
    let schema = Schema::build([field]).unwrap();
    schema.validate_field(&field.id, Some(&value.into()))
}

#[test]
fn test_required_text_names_the_label() {
    for ty in [FieldType::Input, FieldType::Textarea] {
        let f = field(ty, "Company").required(true);
        let err = validate(&f, "").unwrap_err();
        assert!(err.contains("Company"), "{ty}: {err}");
    }
}

#[test]
fn test_optional_fields_accept_absence() {
    for ty in FieldType::ALL {
        let f = ty.default_field("field_1", "section_1", 0);
        assert!(!f.required);
        let schema = Schema::build([&f]).unwrap();
        assert!(schema.validate(&Submission::new()).is_ok(), "{ty}");
    }
}

#[test]
fn test_password_rules() {
    let f = field(FieldType::Password, "Password").required(true);
    assert!(validate(&f, "abcdefg1").is_err());
    assert!(validate(&f, "abcdefgh").is_err());
    assert!(validate(&f, "Abcdefg1").is_ok());
}

#[test]
fn test_slider_bounds() {
    let f = field(FieldType::Slider, "Level").with_bounds(Some(0.0), Some(10.0));
    assert!(validate(&f, vec![12.0]).is_err());
    assert!(validate(&f, vec![5.0]).is_ok());
}

#[test]
fn test_multiselect_minimum() {
    let f = field(FieldType::Multiselect, "Topics").with_selection_bounds(Some(2), None);
    assert!(validate(&f, vec!["a"]).is_err());
    assert!(validate(&f, vec!["a", "b"]).is_ok());
}

#[test]
fn test_add_then_delete_restores_section() {
    let field = FieldConfiguration::new("field_new", "section_1", FieldType::Input, "New");
    let state = FormBuilderState {
        sections: vec![
            SectionConfiguration::new("section_1", "form_1", "Main").with_fields(vec![
                FieldConfiguration::new("a", "section_1", FieldType::Input, "A"),
                FieldConfiguration::new("b", "section_1", FieldType::Phone, "B").with_order(1),
            ]),
        ],
        ..FormBuilderState::new()
    };

    let added = reduce(
        &state,
        Action::AddField {
            section_id: "section_1".to_string(),
            field,
        },
    );
    assert_eq!(added.selected_field.as_deref(), Some("field_new"));

    let removed = reduce(
        &added,
        Action::DeleteField {
            section_id: "section_1".to_string(),
            field_id: "field_new".to_string(),
        },
    );
    assert_eq!(removed.sections, state.sections);
}

#[test]
fn test_reducer_is_deterministic() {
    let actions = vec![
        Action::AddSection(SectionConfiguration::new("s1", "form_1", "One")),
        Action::AddField {
            section_id: "s1".to_string(),
            field: FieldConfiguration::new("f1", "s1", FieldType::Otp, "Code"),
        },
        Action::UpdateSection {
            section_id: "s1".to_string(),
            title: "Renamed".to_string(),
        },
        Action::SelectField(None),
        Action::SetLoading(true),
        Action::SetError(Some("oops".to_string())),
    ];

    let run = || {
        actions
            .iter()
            .cloned()
            .fold(FormBuilderState::new(), |state, action| reduce(&state, action))
    };
    assert_eq!(run(), run());
}

#[test]
fn test_select_field_end_to_end() {
    let mut editor = FormEditor::new();
    editor.dispatch(Action::AddSection(SectionConfiguration::new(
        "section_1",
        "form_1",
        "Main",
    )));
    let id = editor.add_field("section_1", FieldType::Select).unwrap();

    let options: Vec<_> = editor
        .field(&id)
        .unwrap()
        .options
        .iter()
        .map(|o| (o.value.as_str(), o.label.as_str()))
        .collect();
    assert_eq!(options, vec![("option1", "Option 1"), ("option2", "Option 2")]);

    let mut field = editor.field(&id).unwrap().clone();
    field.options = vec![FieldOption::new("x", "X")];
    field.required = true;
    editor.dispatch(Action::UpdateField(field));

    let schema = editor.schema().unwrap();
    let errors = schema.validate(&Submission::new()).unwrap_err();
    assert_eq!(errors.get(&id), Some("Select Field is required."));
    assert!(schema.validate(&Submission::new().with(id.as_str(), "x")).is_ok());
}

#[test]
fn test_otp_end_to_end() {
    let f = field(FieldType::Otp, "Code").required(true);
    assert_eq!(validate(&f, "12a45b").unwrap_err(), "OTP must contain only numbers.");
    assert_eq!(validate(&f, "12345").unwrap_err(), "OTP must be exactly 6 digits.");
    assert!(validate(&f, "123456").is_ok());
}

#[test]
fn test_event_registration_validates() {
    let form = event_registration();
    let schema = Schema::for_form(&form).unwrap();
    assert_eq!(schema.len(), form.ordered_fields().len());

    // Sections are evaluated in display order regardless of storage order.
    assert_eq!(schema.field_ids().next(), Some("field_full_name"));
    assert_eq!(schema.field_ids().last(), Some("field_verification_code"));

    assert!(schema.validate(&event_registration_submission()).is_ok());

    let errors = schema.validate(&Submission::new()).unwrap_err();
    let failed: Vec<_> = errors.iter().map(|e| e.field_id.as_str()).collect();
    assert_eq!(
        failed,
        vec![
            "field_full_name",
            "field_email",
            "field_phone",
            "field_occupation",
            "field_experience_level",
            "field_session_interests",
            "field_terms_acceptance",
            "field_verification_code",
        ]
    );
    assert_eq!(
        errors.get("field_terms_acceptance"),
        Some("I agree to the Terms and Conditions must be checked.")
    );
}

#[test]
fn test_event_registration_rejects_bad_values() {
    let schema = Schema::for_form(&event_registration()).unwrap();
    let submission = event_registration_submission()
        .with("field_full_name", "R2-D2")
        .with("field_email", "not-an-email")
        .with("field_date_of_birth", "2010-05-05")
        .with("field_networking_interest", vec![11.0]);

    let errors = schema.validate(&submission).unwrap_err();
    assert_eq!(errors.get("field_full_name"), Some("Full Name format is invalid."));
    assert_eq!(errors.get("field_email"), Some("Email Address format is invalid."));
    assert_eq!(
        errors.get("field_date_of_birth"),
        Some("Date must be before January 1st, 2006.")
    );
    assert_eq!(
        errors.get("field_networking_interest"),
        Some("Value must be no more than 10.")
    );
}

#[test]
fn test_example_configurations_pass_their_own_checks() {
    for form in [contact_form(), event_registration()] {
        for field in form.ordered_fields() {
            assert!(field.check().is_ok(), "{}: {:?}", field.id, field.check());
        }
    }
}

#[test]
fn test_editor_persists_through_store() -> anyhow::Result<()> {
    let mut store = MemoryStore::new().with_form(contact_form());
    let mut editor = FormEditor::new();
    editor.load(&store, "form_simple_contact")?;

    let section = editor.create_section(&mut store, "Follow-up")?;
    let id = editor.add_field_persisted(&mut store, &section, FieldType::Switch)?;

    let mut field = editor.field(&id).unwrap().clone();
    field.label = "Call me back".to_string();
    editor.save_field(&mut store, field)?;

    let stored = store.get_form_by_id("form_simple_contact")?;
    assert_eq!(stored.field(&id).unwrap().label, "Call me back");
    assert_eq!(stored, editor.to_form().with_description("Get in touch with our team"));
    Ok(())
}

#[test]
fn test_configuration_json_shape() {
    let form = contact_form();
    let json = serde_json::to_value(&form).unwrap();
    let first = &json["sections"][0]["fields"][0];
    assert_eq!(first["type"], "INPUT");
    assert_eq!(first["sectionId"], "section_contact_info");
    assert!(first.get("isEditing").is_none());

    let back: formwright::FormConfiguration = serde_json::from_value(json).unwrap();
    assert_eq!(back, form);
}
