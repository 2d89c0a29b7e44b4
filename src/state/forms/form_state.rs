//! Form state machine: per-field values, touched flags and whole-form validity

use std::collections::HashSet;

use super::field::{resolve, RenderSpec};
use super::schema::{FormField, FormSchema};
use super::validation::{FieldValidationError, FieldValidator};

/// Trait for common focus navigation over a form
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
}

/// Lifecycle phase of a single field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPhase {
    /// Not changed since the schema was loaded
    Pristine,
    /// Changed at least once; never reverts
    Dirty,
}

/// Value and validation status of one rendered field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldState {
    pub value: String,
    pub touched: bool,
    pub error: Option<String>,
}

impl FieldState {
    fn pristine(value: String) -> Self {
        Self {
            value,
            touched: false,
            error: None,
        }
    }

    pub fn phase(&self) -> FieldPhase {
        if self.touched {
            FieldPhase::Dirty
        } else {
            FieldPhase::Pristine
        }
    }

    /// Error to display; pristine fields stay silent
    pub fn visible_error(&self) -> Option<&str> {
        if self.touched {
            self.error.as_deref()
        } else {
            None
        }
    }
}

/// Whole-form predicates derived after every transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormStatus {
    pub all_valid: bool,
    pub any_touched: bool,
    pub submittable: bool,
}

impl FormStatus {
    fn derive(all_valid: bool, any_touched: bool) -> Self {
        Self {
            all_valid,
            any_touched,
            submittable: all_valid && any_touched,
        }
    }

    /// One-word readiness shown in the status bar
    pub fn summary(&self) -> &'static str {
        match (self.any_touched, self.all_valid) {
            (false, _) => "untouched",
            (true, false) => "incomplete",
            (true, true) => "ready",
        }
    }
}

/// A field that made it through the registry
#[derive(Debug, Clone)]
pub struct RenderedField {
    pub field: FormField,
    pub spec: RenderSpec,
    pub state: FieldState,
    validator: FieldValidator,
    valid: bool,
}

impl RenderedField {
    pub fn id(&self) -> &str {
        &self.field.id
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Index of the current value within the options, if it is one of them
    pub fn selected_option(&self) -> Option<usize> {
        self.spec
            .options()
            .iter()
            .position(|opt| opt.value == self.state.value)
    }
}

/// Owns every field state of the loaded schema
#[derive(Debug, Clone)]
pub struct FormStateMachine {
    title: String,
    description: String,
    fields: Vec<RenderedField>,
    status: FormStatus,
    active_field_index: usize,
}

impl FormStateMachine {
    /// Build a fresh, all-pristine machine for a schema.
    ///
    /// Unknown field kinds are dropped here and never take part in validation
    /// or submission. A field reusing an earlier rendered field's id is
    /// dropped too, so every id owns exactly one state.
    pub fn new(schema: &FormSchema) -> Self {
        let mut seen: HashSet<&str> = HashSet::new();
        let fields: Vec<RenderedField> = schema
            .fields
            .iter()
            .filter_map(|field| {
                let spec = resolve(field);
                if !spec.is_rendered() {
                    return None;
                }
                if !seen.insert(field.id.as_str()) {
                    tracing::warn!(field_id = %field.id, "skipping field with a duplicate id");
                    return None;
                }
                let validator = FieldValidator::new(field);
                tracing::debug!(
                    field_id = %field.id,
                    kind = field.kind.tag(),
                    pattern = validator.has_pattern(),
                    "field registered"
                );
                let value = spec.initial_value();
                let valid = validator.evaluate(&value).valid;
                Some(RenderedField {
                    field: field.clone(),
                    spec,
                    state: FieldState::pristine(value),
                    validator,
                    valid,
                })
            })
            .collect();

        let mut machine = Self {
            title: schema.form_title.clone(),
            description: schema.form_description.clone(),
            fields,
            status: FormStatus::derive(true, false),
            active_field_index: 0,
        };
        machine.recompute();
        machine
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn status(&self) -> FormStatus {
        self.status
    }

    /// Rendered fields in render order
    pub fn fields(&self) -> &[RenderedField] {
        &self.fields
    }

    #[allow(dead_code)]
    pub fn field_state(&self, field_id: &str) -> Option<&FieldState> {
        self.find(field_id).map(|f| &f.state)
    }

    /// Read-only view of every field state, in render order
    pub fn field_states(&self) -> impl Iterator<Item = (&str, &FieldState)> {
        self.fields.iter().map(|f| (f.id(), &f.state))
    }

    /// Errors of touched fields, in render order
    pub fn field_errors(&self) -> Vec<FieldValidationError> {
        self.fields
            .iter()
            .filter_map(|f| {
                f.state.visible_error().map(|message| FieldValidationError {
                    field_id: f.id().to_string(),
                    message: message.to_string(),
                })
            })
            .collect()
    }

    /// Apply a change event. Returns false when no rendered field has that id.
    pub fn on_field_change(&mut self, field_id: &str, raw_value: impl Into<String>) -> bool {
        let Some(index) = self.fields.iter().position(|f| f.id() == field_id) else {
            tracing::warn!(field_id, "change event for a field that is not rendered");
            return false;
        };
        self.apply(index, raw_value.into());
        true
    }

    fn apply(&mut self, index: usize, value: String) {
        let entry = &mut self.fields[index];
        let result = entry.validator.evaluate(&value);
        entry.state.value = value;
        entry.state.touched = true;
        entry.state.error = result.message;
        entry.valid = result.valid;
        tracing::debug!(
            field_id = %entry.field.id,
            valid = entry.valid,
            "field changed"
        );
        self.recompute();
    }

    fn recompute(&mut self) {
        let all_valid = self.fields.iter().all(RenderedField::is_valid);
        let any_touched = self.fields.iter().any(|f| f.state.touched);
        self.status = FormStatus::derive(all_valid, any_touched);
    }

    fn find(&self, field_id: &str) -> Option<&RenderedField> {
        self.fields.iter().find(|f| f.id() == field_id)
    }

    /// The focused field, or None when the submit button has focus
    pub fn active(&self) -> Option<&RenderedField> {
        self.fields.get(self.active_field_index)
    }

    pub fn is_submit_active(&self) -> bool {
        self.active_field_index == self.fields.len()
    }

    /// Type a character into the focused free-text field
    pub fn input_char(&mut self, c: char) {
        let index = self.active_field_index;
        if let Some(entry) = self.fields.get(index) {
            if entry.spec.is_free_text() {
                let mut value = entry.state.value.clone();
                value.push(c);
                self.apply(index, value);
            }
        }
    }

    /// Insert a line break into the focused multi-line field
    pub fn newline(&mut self) {
        if self.active().is_some_and(|f| f.spec.is_multiline()) {
            self.input_char('\n');
        }
    }

    /// Delete the last character of the focused free-text field
    pub fn backspace(&mut self) {
        let index = self.active_field_index;
        if let Some(entry) = self.fields.get(index) {
            if entry.spec.is_free_text() && !entry.state.value.is_empty() {
                let mut value = entry.state.value.clone();
                value.pop();
                self.apply(index, value);
            }
        }
    }

    /// Select the next option of the focused choice field
    pub fn next_option(&mut self) {
        self.step_option(true);
    }

    /// Select the previous option of the focused choice field
    pub fn prev_option(&mut self) {
        self.step_option(false);
    }

    fn step_option(&mut self, forward: bool) {
        let index = self.active_field_index;
        let Some(entry) = self.fields.get(index) else {
            return;
        };
        let options = entry.spec.options();
        if options.is_empty() {
            return;
        }
        let last = options.len() - 1;
        let target = match (entry.selected_option(), forward) {
            (Some(i), true) => (i + 1) % options.len(),
            (Some(0), false) => last,
            (Some(i), false) => i - 1,
            (None, true) => 0,
            (None, false) => last,
        };
        let value = options[target].value.clone();
        self.apply(index, value);
    }
}

impl Form for FormStateMachine {
    fn field_count(&self) -> usize {
        self.fields.len() + 1 // rendered fields, submit button
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(self.fields.len());
    }
}
