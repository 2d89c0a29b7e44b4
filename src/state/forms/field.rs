//! Field kinds and the registry that maps them to render contracts

use super::schema::{FieldOption, FormField};

/// Closed set of field kinds understood by the preview
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Select,
    Radio,
    Textarea,
    /// Any other `type` tag; the field is not rendered
    Unknown(String),
}

impl FieldKind {
    /// Every kind with a render contract
    pub const KNOWN: [FieldKind; 5] = [
        FieldKind::Text,
        FieldKind::Email,
        FieldKind::Select,
        FieldKind::Radio,
        FieldKind::Textarea,
    ];

    pub fn from_tag(tag: &str) -> Self {
        Self::KNOWN
            .into_iter()
            .find(|kind| kind.tag() == tag)
            .unwrap_or_else(|| FieldKind::Unknown(tag.to_string()))
    }

    pub fn tag(&self) -> &str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Email => "email",
            FieldKind::Select => "select",
            FieldKind::Radio => "radio",
            FieldKind::Textarea => "textarea",
            FieldKind::Unknown(tag) => tag,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, FieldKind::Unknown(_))
    }

    /// Whether `validation.pattern` applies to this kind
    pub fn accepts_pattern(&self) -> bool {
        match self {
            FieldKind::Text | FieldKind::Email => true,
            FieldKind::Select | FieldKind::Radio | FieldKind::Textarea => false,
            FieldKind::Unknown(_) => false,
        }
    }
}

/// Single-line input flavor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineInput {
    Text,
    Email,
}

/// How a closed-choice field lays out its options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoiceStyle {
    /// One control showing the current option
    Dropdown,
    /// One control per option, grouped under the field id
    RadioGroup,
}

/// What the preview draws for a field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderSpec {
    SingleLine {
        input: LineInput,
        placeholder: Option<String>,
    },
    MultiLine {
        placeholder: Option<String>,
    },
    Choice {
        style: ChoiceStyle,
        options: Vec<FieldOption>,
    },
    /// Unrecognized kind: omitted from rendering, validation and submission
    Hidden,
}

impl RenderSpec {
    pub fn is_rendered(&self) -> bool {
        !matches!(self, RenderSpec::Hidden)
    }

    pub fn is_multiline(&self) -> bool {
        matches!(self, RenderSpec::MultiLine { .. })
    }

    /// Whether keystrokes edit the value as free text
    pub fn is_free_text(&self) -> bool {
        match self {
            RenderSpec::SingleLine { .. } | RenderSpec::MultiLine { .. } => true,
            RenderSpec::Choice { .. } | RenderSpec::Hidden => false,
        }
    }

    /// Value a freshly loaded field starts with
    pub fn initial_value(&self) -> String {
        match self {
            RenderSpec::Choice {
                style: ChoiceStyle::Dropdown,
                options,
            } => options
                .first()
                .map(|opt| opt.value.clone())
                .unwrap_or_default(),
            RenderSpec::Choice {
                style: ChoiceStyle::RadioGroup,
                ..
            } => String::new(),
            RenderSpec::SingleLine { .. } | RenderSpec::MultiLine { .. } | RenderSpec::Hidden => {
                String::new()
            }
        }
    }

    /// Options of a choice field, empty otherwise
    pub fn options(&self) -> &[FieldOption] {
        match self {
            RenderSpec::Choice { options, .. } => options,
            RenderSpec::SingleLine { .. } | RenderSpec::MultiLine { .. } | RenderSpec::Hidden => {
                &[]
            }
        }
    }
}

/// Resolve a field to its render contract
pub fn resolve(field: &FormField) -> RenderSpec {
    match &field.kind {
        FieldKind::Text => RenderSpec::SingleLine {
            input: LineInput::Text,
            placeholder: field.placeholder.clone(),
        },
        FieldKind::Email => RenderSpec::SingleLine {
            input: LineInput::Email,
            placeholder: field.placeholder.clone(),
        },
        FieldKind::Select => RenderSpec::Choice {
            style: ChoiceStyle::Dropdown,
            options: field.options.clone(),
        },
        FieldKind::Radio => RenderSpec::Choice {
            style: ChoiceStyle::RadioGroup,
            options: field.options.clone(),
        },
        FieldKind::Textarea => RenderSpec::MultiLine {
            placeholder: field.placeholder.clone(),
        },
        FieldKind::Unknown(tag) => {
            tracing::debug!(field_id = %field.id, tag = %tag, "omitting field of unknown type");
            RenderSpec::Hidden
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn field(kind: FieldKind) -> FormField {
        FormField {
            id: "f".to_string(),
            kind,
            label: "F".to_string(),
            required: false,
            placeholder: Some("type here".to_string()),
            validation: None,
            options: vec![
                FieldOption {
                    value: "a".to_string(),
                    label: "Alpha".to_string(),
                },
                FieldOption {
                    value: "b".to_string(),
                    label: "Beta".to_string(),
                },
            ],
        }
    }

    #[test]
    fn test_every_known_kind_renders() {
        for kind in FieldKind::KNOWN {
            let spec = resolve(&field(kind.clone()));
            assert!(spec.is_rendered(), "{} must render", kind.tag());
            assert_eq!(FieldKind::from_tag(kind.tag()), kind);
        }
    }

    #[test]
    fn test_unknown_kind_is_hidden() {
        let spec = resolve(&field(FieldKind::from_tag("date")));
        assert_eq!(spec, RenderSpec::Hidden);
        assert!(!spec.is_rendered());
    }

    #[test]
    fn test_tag_round_trips_unknown() {
        let kind = FieldKind::from_tag("checkbox");
        assert_eq!(kind.tag(), "checkbox");
        assert!(!kind.is_known());
    }

    #[test]
    fn test_pattern_eligibility() {
        assert!(FieldKind::Text.accepts_pattern());
        assert!(FieldKind::Email.accepts_pattern());
        assert!(!FieldKind::Select.accepts_pattern());
        assert!(!FieldKind::Radio.accepts_pattern());
        assert!(!FieldKind::Textarea.accepts_pattern());
    }

    #[test]
    fn test_select_starts_on_first_option() {
        let spec = resolve(&field(FieldKind::Select));
        assert_eq!(spec.initial_value(), "a");
    }

    #[test]
    fn test_select_without_options_starts_empty() {
        let mut f = field(FieldKind::Select);
        f.options.clear();
        assert_eq!(resolve(&f).initial_value(), "");
    }

    #[test]
    fn test_radio_starts_unselected() {
        let spec = resolve(&field(FieldKind::Radio));
        assert_eq!(spec.initial_value(), "");
        assert_eq!(spec.options().len(), 2);
    }

    #[test]
    fn test_text_kinds() {
        let text = resolve(&field(FieldKind::Text));
        assert!(text.is_free_text());
        assert!(!text.is_multiline());

        let area = resolve(&field(FieldKind::Textarea));
        assert!(area.is_free_text());
        assert!(area.is_multiline());
        assert!(area.options().is_empty());
    }
}
