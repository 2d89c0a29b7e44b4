//! Submission gate and the record it produces

use serde::ser::{Serialize, SerializeMap, Serializer};
use thiserror::Error;

use super::form_state::{FieldState, FormStatus};

/// Why a submit attempt produced no record
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("form is not submittable")]
    Blocked,
    #[error(transparent)]
    Record(#[from] RecordError),
}

/// A record key that does not belong to the loaded schema
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("field `{0}` is not a rendered field of the loaded schema")]
    UnknownField(String),
    #[error("field `{0}` appears more than once")]
    DuplicateField(String),
}

/// Field id to value mapping handed to the host on submit.
///
/// Keys keep render order and serialize as a flat JSON object.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubmissionRecord {
    entries: Vec<(String, String)>,
}

impl SubmissionRecord {
    /// Build a record whose keys must all be in `allowed_ids`
    pub fn build<'a, I>(allowed_ids: &[&str], values: I) -> Result<Self, RecordError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut record = Self::default();
        for (id, value) in values {
            if !allowed_ids.contains(&id) {
                return Err(RecordError::UnknownField(id.to_string()));
            }
            if record.get(id).is_some() {
                return Err(RecordError::DuplicateField(id.to_string()));
            }
            record.entries.push((id.to_string(), value.to_string()));
        }
        Ok(record)
    }

    pub fn get(&self, field_id: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(id, _)| id == field_id)
            .map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(id, _)| id.as_str())
    }

    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl Serialize for SubmissionRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (id, value) in &self.entries {
            map.serialize_entry(id, value)?;
        }
        map.end()
    }
}

/// Re-check the gate and snapshot the current values.
///
/// `rendered_ids` is the rendered id set of the loaded schema; every key of
/// the record must belong to it.
pub fn submit<'a, I>(
    status: FormStatus,
    rendered_ids: &[&str],
    field_states: I,
) -> Result<SubmissionRecord, SubmitError>
where
    I: IntoIterator<Item = (&'a str, &'a FieldState)>,
{
    if !status.submittable {
        tracing::warn!("submit attempted while the form is blocked");
        return Err(SubmitError::Blocked);
    }

    let values = field_states
        .into_iter()
        .map(|(id, state)| (id, state.value.as_str()));
    SubmissionRecord::build(rendered_ids, values).map_err(|err| {
        tracing::error!("submission record rejected: {err}");
        SubmitError::from(err)
    })
}
