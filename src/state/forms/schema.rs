//! Form schema model and the structural gate that admits it

use serde_json::{Map, Value};
use thiserror::Error;

use super::field::FieldKind;

/// Why a schema text was rejected
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The text is not well-formed JSON
    #[error("{0}")]
    Parse(#[from] serde_json::Error),
    /// Well-formed, but a required top-level member is absent or mistyped
    #[error(
        "Invalid JSON structure. Make sure formTitle, formDescription, and fields are present. (problem with `{0}`)"
    )]
    MissingField(&'static str),
}

impl SchemaError {
    /// True for structure errors, false for parse errors
    pub fn is_structure(&self) -> bool {
        matches!(self, SchemaError::MissingField(_))
    }

    /// Single-line message for the editor banner
    pub fn banner(&self) -> String {
        format!("Invalid JSON: {self}")
    }
}

/// Pattern rule attached to a text or email field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValidation {
    pub pattern: String,
    pub message: String,
}

/// One choice of a select or radio field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldOption {
    pub value: String,
    pub label: String,
}

/// A single field description as written in the schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub id: String,
    pub kind: FieldKind,
    pub label: String,
    pub required: bool,
    pub placeholder: Option<String>,
    pub validation: Option<FieldValidation>,
    pub options: Vec<FieldOption>,
}

impl FormField {
    /// Decode a field entry without ever failing.
    ///
    /// Missing or mistyped members fall back to empty values; an entry that is
    /// not an object becomes an unknown-kind field and is never rendered.
    pub fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Self::unknown(String::new());
        };

        let kind = match obj.get("type").and_then(Value::as_str) {
            Some(tag) => FieldKind::from_tag(tag),
            None => FieldKind::Unknown(String::new()),
        };
        if !kind.is_known() {
            tracing::debug!(kind = kind.tag(), "field type has no renderer");
        }

        let validation = obj
            .get("validation")
            .and_then(Value::as_object)
            .and_then(|rule| {
                let pattern = string_member(rule, "pattern")?;
                Some(FieldValidation {
                    pattern,
                    message: string_member(rule, "message").unwrap_or_default(),
                })
            });

        let options = obj
            .get("options")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_object)
                    .map(|opt| FieldOption {
                        value: string_member(opt, "value").unwrap_or_default(),
                        label: string_member(opt, "label").unwrap_or_default(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            id: string_member(obj, "id").unwrap_or_default(),
            kind,
            label: string_member(obj, "label").unwrap_or_default(),
            required: obj
                .get("required")
                .and_then(Value::as_bool)
                .unwrap_or(false),
            placeholder: string_member(obj, "placeholder"),
            validation,
            options,
        }
    }

    fn unknown(tag: String) -> Self {
        Self {
            id: String::new(),
            kind: FieldKind::Unknown(tag),
            label: String::new(),
            required: false,
            placeholder: None,
            validation: None,
            options: Vec::new(),
        }
    }
}

/// A structurally valid form schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSchema {
    pub form_title: String,
    pub form_description: String,
    /// Render order
    pub fields: Vec<FormField>,
}

impl FormSchema {
    /// Structural gate over an already-decoded JSON value.
    ///
    /// Only the three top-level members are checked. Empty title or
    /// description strings are rejected like absent ones.
    pub fn validate(raw: &Value) -> Result<Self, SchemaError> {
        let obj = raw
            .as_object()
            .ok_or(SchemaError::MissingField("formTitle"))?;

        let form_title = non_empty_string(obj, "formTitle")?;
        let form_description = non_empty_string(obj, "formDescription")?;
        let fields = obj
            .get("fields")
            .and_then(Value::as_array)
            .ok_or(SchemaError::MissingField("fields"))?
            .iter()
            .map(FormField::from_value)
            .collect();

        Ok(Self {
            form_title,
            form_description,
            fields,
        })
    }

    /// Decode JSON text and run the structural gate.
    ///
    /// The decoded value is returned alongside the schema so the host can copy
    /// the schema back out exactly as written.
    pub fn parse(text: &str) -> Result<(Self, Value), SchemaError> {
        let raw: Value = serde_json::from_str(text)?;
        let schema = Self::validate(&raw)?;
        Ok((schema, raw))
    }
}

fn string_member(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(str::to_string)
}

fn non_empty_string(obj: &Map<String, Value>, key: &'static str) -> Result<String, SchemaError> {
    match obj.get(key).and_then(Value::as_str) {
        Some(s) if !s.is_empty() => Ok(s.to_string()),
        _ => Err(SchemaError::MissingField(key)),
    }
}
