//! The form builder's editing state and the only ways to change it.
//!
//! [`reduce`] is a pure transition function over [`FormBuilderState`].
//! [`FormEditor`] owns one editing session: it dispatches actions, mints ids
//! for new fields and sections, and coordinates with a [`FormStore`].

use std::collections::BTreeMap;
use std::fmt;

use uuid::Uuid;

use crate::schema::{Schema, SchemaError};
use crate::store::FormStore;
use crate::{
    ConfigErrors, FieldConfiguration, FieldType, FormConfiguration, FormError,
    SectionConfiguration,
};

/// Everything the builder UI works from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormBuilderState {
    pub form_id: String,
    pub form_name: String,
    pub sections: Vec<SectionConfiguration>,
    /// Field whose configuration is open.
    pub selected_field: Option<String>,
    /// Palette entry currently being dragged.
    pub dragged_field_type: Option<FieldType>,
    pub is_dragging: bool,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl FormBuilderState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_form(form: FormConfiguration) -> Self {
        Self {
            form_id: form.id,
            form_name: form.name,
            sections: form.sections,
            ..Self::default()
        }
    }

    pub fn section(&self, section_id: &str) -> Option<&SectionConfiguration> {
        self.sections.iter().find(|s| s.id == section_id)
    }

    pub fn field(&self, field_id: &str) -> Option<&FieldConfiguration> {
        self.sections.iter().find_map(|s| s.field(field_id))
    }

    pub fn selected_field(&self) -> Option<&FieldConfiguration> {
        self.selected_field.as_deref().and_then(|id| self.field(id))
    }

    pub fn to_form(&self) -> FormConfiguration {
        FormConfiguration::new(&self.form_id, &self.form_name).with_sections(self.sections.clone())
    }

    fn section_mut(&mut self, section_id: &str) -> Option<&mut SectionConfiguration> {
        self.sections.iter_mut().find(|s| s.id == section_id)
    }

    fn field_mut(&mut self, field_id: &str) -> Option<&mut FieldConfiguration> {
        self.sections
            .iter_mut()
            .flat_map(|s| s.fields.iter_mut())
            .find(|f| f.id == field_id)
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::SetForm { id, name, sections } => {
                self.form_id = id;
                self.form_name = name;
                self.sections = sections;
                self.is_loading = false;
                self.error = None;
            }
            Action::AddSection(section) => self.sections.push(section),
            Action::UpdateSection { section_id, title } => {
                if let Some(section) = self.section_mut(&section_id) {
                    section.title = title;
                }
            }
            Action::DeleteSection { section_id } => {
                self.sections.retain(|s| s.id != section_id);
            }
            Action::AddField { section_id, field } => {
                if let Some(section) = self.section_mut(&section_id) {
                    let field_id = field.id.clone();
                    section.fields.push(field);
                    self.selected_field = Some(field_id);
                }
            }
            Action::UpdateField(field) => {
                if let Some(stored) = self.field_mut(&field.id) {
                    *stored = field;
                }
            }
            Action::DeleteField {
                section_id,
                field_id,
            } => {
                if let Some(section) = self.section_mut(&section_id) {
                    section.fields.retain(|f| f.id != field_id);
                }
                self.selected_field = None;
            }
            Action::ReorderFields { section_id, fields } => {
                if let Some(section) = self.section_mut(&section_id) {
                    section.fields = fields;
                }
            }
            Action::SelectField(field_id) => self.selected_field = field_id,
            Action::SetFieldValidationErrors { field_id, errors } => {
                if let Some(field) = self.field_mut(&field_id) {
                    field.validation_errors = errors;
                }
            }
            Action::SetFieldEditing {
                field_id,
                is_editing,
            } => {
                if let Some(field) = self.field_mut(&field_id) {
                    field.is_editing = is_editing;
                }
            }
            Action::SetDragging {
                field_type,
                is_dragging,
            } => {
                self.dragged_field_type = field_type;
                self.is_dragging = is_dragging;
            }
            Action::SetLoading(is_loading) => self.is_loading = is_loading,
            Action::SetError(error) => {
                self.error = error;
                self.is_loading = false;
            }
        }
    }
}

/// A transition of [`FormBuilderState`].
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Replace the whole form. Clears loading and error.
    SetForm {
        id: String,
        name: String,
        sections: Vec<SectionConfiguration>,
    },
    AddSection(SectionConfiguration),
    UpdateSection {
        section_id: String,
        title: String,
    },
    /// Remove a section and its fields.
    DeleteSection {
        section_id: String,
    },
    /// Append a field to a section and select it. No-op if the section is missing.
    AddField {
        section_id: String,
        field: FieldConfiguration,
    },
    /// Replace the field with the same id, in whichever section holds it.
    UpdateField(FieldConfiguration),
    /// Remove a field from a section and clear the selection.
    DeleteField {
        section_id: String,
        field_id: String,
    },
    /// Replace a section's fields wholesale.
    ReorderFields {
        section_id: String,
        fields: Vec<FieldConfiguration>,
    },
    SelectField(Option<String>),
    /// Attach configuration problems to a field without touching its configuration.
    SetFieldValidationErrors {
        field_id: String,
        errors: BTreeMap<String, String>,
    },
    SetFieldEditing {
        field_id: String,
        is_editing: bool,
    },
    SetDragging {
        field_type: Option<FieldType>,
        is_dragging: bool,
    },
    SetLoading(bool),
    /// Set or clear the error. Always clears loading.
    SetError(Option<String>),
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SetForm { .. } => "SET_FORM",
            Self::AddSection(_) => "ADD_SECTION",
            Self::UpdateSection { .. } => "UPDATE_SECTION",
            Self::DeleteSection { .. } => "DELETE_SECTION",
            Self::AddField { .. } => "ADD_FIELD",
            Self::UpdateField(_) => "UPDATE_FIELD",
            Self::DeleteField { .. } => "DELETE_FIELD",
            Self::ReorderFields { .. } => "REORDER_FIELDS",
            Self::SelectField(_) => "SELECT_FIELD",
            Self::SetFieldValidationErrors { .. } => "SET_FIELD_VALIDATION_ERRORS",
            Self::SetFieldEditing { .. } => "SET_FIELD_EDITING",
            Self::SetDragging { .. } => "SET_DRAGGING",
            Self::SetLoading(_) => "SET_LOADING",
            Self::SetError(_) => "SET_ERROR",
        }
    }
}

/// Apply one action to a state, returning the next state.
pub fn reduce(state: &FormBuilderState, action: Action) -> FormBuilderState {
    let mut next = state.clone();
    next.apply(action);
    next
}

/// Mints ids for new sections and fields. Receives the entity prefix.
pub type IdGenerator = Box<dyn FnMut(&str) -> String + Send>;

/// `<prefix>_<uuid v7>`.
pub fn generate_id(prefix: &str) -> String {
    format!("{prefix}_{}", Uuid::now_v7().simple())
}

/// One editing session over one form.
pub struct FormEditor {
    state: FormBuilderState,
    next_id: IdGenerator,
}

impl fmt::Debug for FormEditor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormEditor")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl Default for FormEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl FormEditor {
    pub fn new() -> Self {
        Self {
            state: FormBuilderState::new(),
            next_id: Box::new(generate_id),
        }
    }

    pub fn from_form(form: FormConfiguration) -> Self {
        Self {
            state: FormBuilderState::from_form(form),
            ..Self::new()
        }
    }

    /// Replace how ids are minted, e.g. with a counter in tests.
    pub fn with_id_generator(mut self, generator: impl FnMut(&str) -> String + Send + 'static) -> Self {
        self.next_id = Box::new(generator);
        self
    }

    pub fn state(&self) -> &FormBuilderState {
        &self.state
    }

    pub fn to_form(&self) -> FormConfiguration {
        self.state.to_form()
    }

    pub fn dispatch(&mut self, action: Action) {
        tracing::debug!(action = action.name(), form_id = %self.state.form_id, "Dispatch");
        self.state.apply(action);
    }

    pub fn section(&self, section_id: &str) -> Option<&SectionConfiguration> {
        self.state.section(section_id)
    }

    pub fn field(&self, field_id: &str) -> Option<&FieldConfiguration> {
        self.state.field(field_id)
    }

    pub fn selected_field(&self) -> Option<&FieldConfiguration> {
        self.state.selected_field()
    }

    /// The default configuration for `field_type`, placed at the end of a section.
    fn new_field(&mut self, section_id: &str, field_type: FieldType) -> Option<FieldConfiguration> {
        let order = next_order(self.section(section_id)?.fields.iter().map(|f| f.order));
        let id = (self.next_id)("field");
        Some(field_type.default_field(id, section_id, order))
    }

    /// Add a field of `field_type` with registry defaults. Returns its id, or
    /// `None` if the section does not exist.
    pub fn add_field(&mut self, section_id: &str, field_type: FieldType) -> Option<String> {
        let field = self.new_field(section_id, field_type)?;
        let id = field.id.clone();
        self.dispatch(Action::AddField {
            section_id: section_id.to_string(),
            field,
        });
        Some(id)
    }

    pub fn update_field(&mut self, field: FieldConfiguration) {
        self.dispatch(Action::UpdateField(field));
    }

    pub fn delete_field(&mut self, section_id: &str, field_id: &str) {
        self.dispatch(Action::DeleteField {
            section_id: section_id.to_string(),
            field_id: field_id.to_string(),
        });
    }

    pub fn select_field(&mut self, field_id: Option<&str>) {
        self.dispatch(Action::SelectField(field_id.map(str::to_string)));
    }

    /// Move a field to `to` within its section and renumber `order`.
    /// Returns `false` if the section or field does not exist.
    pub fn move_field(&mut self, section_id: &str, field_id: &str, to: usize) -> bool {
        let Some(section) = self.section(section_id) else {
            return false;
        };
        let mut fields: Vec<_> = section.ordered_fields().into_iter().cloned().collect();
        let Some(from) = fields.iter().position(|f| f.id == field_id) else {
            return false;
        };

        let field = fields.remove(from);
        fields.insert(to.min(fields.len()), field);
        for (order, field) in fields.iter_mut().enumerate() {
            field.order = order as u32;
        }

        self.dispatch(Action::ReorderFields {
            section_id: section_id.to_string(),
            fields,
        });
        true
    }

    /// Check a field's configuration and attach the result to it.
    /// Unknown field ids pass.
    pub fn check_field(&mut self, field_id: &str) -> Result<(), ConfigErrors> {
        let Some(field) = self.field(field_id) else {
            return Ok(());
        };
        let result = field.check();
        let errors = match &result {
            Ok(()) => BTreeMap::new(),
            Err(e) => e
                .iter()
                .map(|(path, message)| (path.to_string(), message.to_string()))
                .collect(),
        };
        self.dispatch(Action::SetFieldValidationErrors {
            field_id: field_id.to_string(),
            errors,
        });
        result
    }

    /// Validator for the form as currently edited.
    pub fn schema(&self) -> Result<Schema, SchemaError> {
        Schema::for_form(&self.to_form())
    }

    /// Run a store call with the loading flag raised. A failure is recorded
    /// as the editor error and returned.
    fn persist<T>(
        &mut self,
        operation: &'static str,
        call: impl FnOnce() -> Result<T, FormError>,
    ) -> Result<T, FormError> {
        self.dispatch(Action::SetLoading(true));
        match call() {
            Ok(value) => {
                tracing::info!(operation, form_id = %self.state.form_id, "Persisted");
                self.dispatch(Action::SetError(None));
                Ok(value)
            }
            Err(e) => {
                tracing::warn!(operation, form_id = %self.state.form_id, error = %e, "Persistence failed");
                self.dispatch(Action::SetError(Some(e.to_string())));
                Err(e)
            }
        }
    }

    /// Replace the session's form with the stored one.
    pub fn load<S: FormStore + ?Sized>(&mut self, store: &S, form_id: &str) -> Result<(), FormError> {
        let form = self.persist("load", || store.get_form_by_id(form_id))?;
        self.dispatch(Action::SetForm {
            id: form.id,
            name: form.name,
            sections: form.sections,
        });
        Ok(())
    }

    /// Create a section at the end of the form. Applied locally once stored.
    pub fn create_section<S: FormStore + ?Sized>(
        &mut self,
        store: &mut S,
        title: &str,
    ) -> Result<String, FormError> {
        let section = SectionConfiguration::new((self.next_id)("section"), &self.state.form_id, title)
            .with_order(next_order(self.state.sections.iter().map(|s| s.order)));
        let stored = self.persist("create_section", || store.create_section(&section))?;
        let id = stored.id.clone();
        self.dispatch(Action::AddSection(stored));
        Ok(id)
    }

    /// Retitle a section locally, then store it. A failure keeps the local title.
    pub fn rename_section<S: FormStore + ?Sized>(
        &mut self,
        store: &mut S,
        section_id: &str,
        title: &str,
    ) -> Result<(), FormError> {
        self.dispatch(Action::UpdateSection {
            section_id: section_id.to_string(),
            title: title.to_string(),
        });
        self.persist("update_section", || store.update_section(section_id, title))
    }

    /// Delete a section from the store, then locally.
    pub fn remove_section<S: FormStore + ?Sized>(
        &mut self,
        store: &mut S,
        section_id: &str,
    ) -> Result<(), FormError> {
        self.persist("delete_section", || store.delete_section(section_id))?;
        self.dispatch(Action::DeleteSection {
            section_id: section_id.to_string(),
        });
        Ok(())
    }

    /// Add a field with registry defaults. Applied locally once stored.
    pub fn add_field_persisted<S: FormStore + ?Sized>(
        &mut self,
        store: &mut S,
        section_id: &str,
        field_type: FieldType,
    ) -> Result<String, FormError> {
        let field = self
            .new_field(section_id, field_type)
            .ok_or_else(|| FormError::not_found("Section", section_id))?;
        let stored = self.persist("create_field", || store.create_field(&field))?;
        let id = stored.id.clone();
        self.dispatch(Action::AddField {
            section_id: section_id.to_string(),
            field: stored,
        });
        Ok(id)
    }

    /// Apply a field edit locally, then store it. A failure keeps the local edit.
    pub fn save_field<S: FormStore + ?Sized>(
        &mut self,
        store: &mut S,
        field: FieldConfiguration,
    ) -> Result<(), FormError> {
        self.dispatch(Action::UpdateField(field.clone()));
        self.persist("update_field", || store.update_field(&field))?;
        Ok(())
    }

    /// Delete a field from the store, then locally.
    pub fn remove_field<S: FormStore + ?Sized>(
        &mut self,
        store: &mut S,
        section_id: &str,
        field_id: &str,
    ) -> Result<(), FormError> {
        self.persist("delete_field", || store.delete_field(section_id, field_id))?;
        self.delete_field(section_id, field_id);
        Ok(())
    }
}

/// One past the highest order in use, so orders stay unique after deletions.
fn next_order(orders: impl Iterator<Item = u32>) -> u32 {
    orders.max().map_or(0, |max| max + 1)
}
