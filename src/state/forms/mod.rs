//! Form domain layer
//!
//! Schema decoding, the field registry, validation, per-field state and the
//! submission gate. Nothing in here touches the terminal.

mod field;
mod form_state;
mod schema;
mod session;
mod submission;
mod validation;

pub use field::{ChoiceStyle, LineInput, RenderSpec};
pub use form_state::{FieldPhase, Form, FormStateMachine, RenderedField};
pub use session::FormSession;
pub use submission::SubmissionRecord;

#[cfg(test)]
pub use schema::FormSchema;
