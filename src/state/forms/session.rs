//! Callback surface the host UI drives: schema text, field changes, submit

use serde_json::Value;

use super::field::resolve;
use super::form_state::{FormStateMachine, FormStatus};
use super::schema::{FormSchema, SchemaError};
use super::submission::{submit, SubmissionRecord, SubmitError};

/// Loaded schema together with the JSON it was decoded from
#[derive(Debug, Clone)]
pub struct LoadedSchema {
    pub schema: FormSchema,
    pub raw: Value,
}

impl LoadedSchema {
    /// Ids of the fields the registry renders, in schema order
    pub fn rendered_ids(&self) -> Vec<&str> {
        self.schema
            .fields
            .iter()
            .filter(|field| resolve(field).is_rendered())
            .map(|field| field.id.as_str())
            .collect()
    }
}

/// Current schema, its form state and the last accepted submission
#[derive(Debug, Default)]
pub struct FormSession {
    loaded: Option<LoadedSchema>,
    form: Option<FormStateMachine>,
    schema_error: Option<SchemaError>,
    last_submission: Option<SubmissionRecord>,
}

impl FormSession {
    /// Replace the current schema with whatever `text` describes.
    ///
    /// Any failure clears the previous form; blank text means no schema and
    /// no error.
    pub fn on_schema_text_change(&mut self, text: &str) {
        self.loaded = None;
        self.form = None;
        self.schema_error = None;

        if text.trim().is_empty() {
            tracing::debug!("schema text cleared");
            return;
        }

        match FormSchema::parse(text) {
            Ok((schema, raw)) => {
                let form = FormStateMachine::new(&schema);
                tracing::info!(
                    title = %schema.form_title,
                    declared = schema.fields.len(),
                    rendered = form.fields().len(),
                    "schema loaded"
                );
                self.form = Some(form);
                self.loaded = Some(LoadedSchema { schema, raw });
            }
            Err(err) => {
                tracing::info!(structure = err.is_structure(), "schema rejected: {err}");
                self.schema_error = Some(err);
            }
        }
    }

    /// Forward a change event to the loaded form
    pub fn on_field_change(&mut self, field_id: &str, raw_value: impl Into<String>) {
        match self.form.as_mut() {
            Some(form) => {
                form.on_field_change(field_id, raw_value);
            }
            None => tracing::warn!(field_id, "field change without a loaded schema"),
        }
    }

    /// Run the submission pipeline; a success becomes the last submission
    pub fn on_submit_attempt(&mut self) -> Result<SubmissionRecord, SubmitError> {
        let (Some(form), Some(loaded)) = (self.form.as_ref(), self.loaded.as_ref()) else {
            return Err(SubmitError::Blocked);
        };
        let record = submit(form.status(), &loaded.rendered_ids(), form.field_states())?;
        tracing::info!(
            fields = record.len(),
            ids = ?record.keys().collect::<Vec<_>>(),
            "form submitted"
        );
        self.last_submission = Some(record.clone());
        Ok(record)
    }

    pub fn form(&self) -> Option<&FormStateMachine> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut FormStateMachine> {
        self.form.as_mut()
    }

    pub fn loaded(&self) -> Option<&LoadedSchema> {
        self.loaded.as_ref()
    }

    pub fn schema_error(&self) -> Option<&SchemaError> {
        self.schema_error.as_ref()
    }

    /// Banner text for the editor, if the last load failed
    pub fn banner(&self) -> Option<String> {
        self.schema_error().map(SchemaError::banner)
    }

    pub fn status(&self) -> Option<FormStatus> {
        self.form.as_ref().map(FormStateMachine::status)
    }

    pub fn is_submittable(&self) -> bool {
        self.status().is_some_and(|s| s.submittable)
    }

    pub fn last_submission(&self) -> Option<&SubmissionRecord> {
        self.last_submission.as_ref()
    }

    /// The loaded schema as pretty JSON, exactly as it was written
    pub fn schema_json(&self) -> Option<serde_json::Result<String>> {
        self.loaded()
            .map(|loaded| serde_json::to_string_pretty(&loaded.raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::RenderedField;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    const TEST_SCHEMA: &str = r#"{
        "formTitle": "Test Form",
        "formDescription": "Please fill out the form",
        "fields": [
            {"id": "name", "label": "Full Name", "type": "text", "required": true,
             "placeholder": "Enter your name"},
            {"id": "email", "label": "Email Address", "type": "email", "required": true,
             "placeholder": "Enter your email",
             "validation": {
                "pattern": "^[^\\s@]+@[^\\s@]+\\.[^\\s@]+$",
                "message": "Please enter a valid email address"
             }}
        ]
    }"#;

    fn loaded_session() -> FormSession {
        let mut session = FormSession::default();
        session.on_schema_text_change(TEST_SCHEMA);
        session
    }

    #[test]
    fn test_new_session_has_nothing() {
        let session = FormSession::default();
        assert!(session.form().is_none());
        assert!(session.banner().is_none());
        assert!(!session.is_submittable());
        assert!(session.schema_json().is_none());
    }

    #[test]
    fn test_valid_schema_loads_form() {
        let session = loaded_session();
        let form = session.form().unwrap();
        assert_eq!(form.fields().iter().map(RenderedField::id).collect::<Vec<_>>(), vec!["name", "email"]);
        assert!(session.banner().is_none());
    }

    #[test]
    fn test_structure_error_clears_previous_form() {
        let mut session = loaded_session();
        session.on_schema_text_change(r#"{"formTitle": "Only a title"}"#);
        assert!(session.form().is_none());
        assert!(session.loaded().is_none());
        assert!(session.schema_error().unwrap().is_structure());
        assert!(session.banner().unwrap().starts_with("Invalid JSON: "));
    }

    #[test]
    fn test_parse_error_clears_previous_form() {
        let mut session = loaded_session();
        session.on_schema_text_change("{ not json");
        assert!(session.form().is_none());
        assert!(!session.schema_error().unwrap().is_structure());
    }

    #[test]
    fn test_blank_text_is_no_schema_without_banner() {
        let mut session = loaded_session();
        session.on_schema_text_change("  \n ");
        assert!(session.form().is_none());
        assert!(session.banner().is_none());
    }

    #[test]
    fn test_reload_discards_field_states() {
        let mut session = loaded_session();
        session.on_field_change("name", "John Doe");
        session.on_schema_text_change(TEST_SCHEMA);
        let state = session.form().unwrap().field_state("name").unwrap();
        assert_eq!(state.value, "");
        assert!(!state.touched);
    }

    #[test]
    fn test_full_submission_flow() {
        let mut session = loaded_session();
        assert_eq!(session.on_submit_attempt(), Err(SubmitError::Blocked));

        session.on_field_change("name", "John Doe");
        session.on_field_change("email", "john.doe@example.com");
        assert!(session.is_submittable());

        let record = session.on_submit_attempt().unwrap();
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({"name": "John Doe", "email": "john.doe@example.com"})
        );
        assert_eq!(session.last_submission(), Some(&record));
    }

    #[test]
    fn test_invalid_email_blocks_submission() {
        let mut session = loaded_session();
        session.on_field_change("name", "John Doe");
        session.on_field_change("email", "invalidemail");
        assert!(!session.is_submittable());
        assert_eq!(session.on_submit_attempt(), Err(SubmitError::Blocked));
        assert!(session.last_submission().is_none());
    }

    #[test]
    fn test_submit_without_schema_is_blocked() {
        let mut session = FormSession::default();
        assert_eq!(session.on_submit_attempt(), Err(SubmitError::Blocked));
    }

    #[test]
    fn test_rendered_ids_skip_unknown_kinds() {
        let mut session = FormSession::default();
        session.on_schema_text_change(
            r#"{"formTitle": "T", "formDescription": "D", "fields": [
                {"id": "a", "type": "text", "label": "A", "required": false},
                {"id": "b", "type": "color", "label": "B", "required": false}
            ]}"#,
        );
        assert_eq!(session.loaded().unwrap().rendered_ids(), vec!["a"]);
    }

    #[test]
    fn test_unknown_type_dropped_from_record() {
        let mut session = FormSession::default();
        session.on_schema_text_change(
            r#"{"formTitle": "T", "formDescription": "D", "fields": [
                {"id": "a", "type": "text", "label": "A", "required": false},
                {"id": "b", "type": "color", "label": "B", "required": false},
                {"id": "c", "type": "textarea", "label": "C", "required": false}
            ]}"#,
        );
        assert_eq!(session.form().unwrap().fields().len(), 2);
        session.on_field_change("a", "1");
        let record = session.on_submit_attempt().unwrap();
        assert_eq!(record.len(), 2);
        assert_eq!(record.get("b"), None);
        assert_eq!(record.get("c"), Some(""));
    }

    #[test]
    fn test_schema_json_round_trips_raw_members() {
        let mut session = FormSession::default();
        session.on_schema_text_change(
            r#"{"formTitle": "T", "formDescription": "D", "fields": [], "version": 2}"#,
        );
        let text = session.schema_json().unwrap().unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["version"], json!(2));
    }
}
