//! Form data contract shared by every master-data entity.
//!
//! A form is validated against its static field metadata before it is handed to
//! the resource client. Optional text fields follow one convention: the UI may
//! hold `Some("")`, the payload never does (`normalize` turns it into `None`,
//! and `None` is skipped during serialization).

use super::metadata::{find_field, FieldMetadata, FieldType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Borrowed view of a single form field for validation and input binding
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Number(Option<f64>),
    Reference(Option<i64>),
    Absent,
}

impl FieldValue<'_> {
    /// Value rendered into an `<input>`
    pub fn to_input_string(&self) -> String {
        match self {
            FieldValue::Text(s) => s.to_string(),
            FieldValue::Number(Some(n)) if n.fract() == 0.0 => format!("{}", *n as i64),
            FieldValue::Number(Some(n)) => n.to_string(),
            FieldValue::Reference(Some(id)) => id.to_string(),
            FieldValue::Number(None) | FieldValue::Reference(None) | FieldValue::Absent => {
                String::new()
            }
        }
    }
}

/// A single field-level rule violation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

/// Field-scoped validation errors; at most one message per field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    violations: Vec<FieldViolation>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        let field = field.into();
        if self.for_field(&field).is_none() {
            self.violations.push(FieldViolation {
                field,
                message: message.into(),
            });
        }
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldViolation> {
        self.violations.iter()
    }

    /// Message attributed to `field`, if any
    pub fn for_field(&self, field: &str) -> Option<&str> {
        self.violations
            .iter()
            .find(|v| v.field == field)
            .map(|v| v.message.as_str())
    }

}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.violations.iter().map(|v| v.message.as_str()).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

impl FromIterator<FieldViolation> for ValidationErrors {
    fn from_iter<I: IntoIterator<Item = FieldViolation>>(iter: I) -> Self {
        let mut errors = ValidationErrors::new();
        for v in iter {
            errors.push(v.field, v.message);
        }
        errors
    }
}

/// Create/update payload of a master-data entity
pub trait FormData: Clone + Default + PartialEq + fmt::Debug + Serialize + Send + Sync + 'static {
    /// Static metadata of the fields this form edits
    fn field_metadata() -> &'static [FieldMetadata];

    /// Current value of a field by wire name; unknown names are `Absent`
    fn value(&self, field: &str) -> FieldValue<'_>;

    /// Apply raw input text to a field
    fn set_value(&mut self, field: &str, raw: &str);

    /// Apply raw input text, reporting input the field cannot hold (text in a
    /// numeric field) instead of letting it read as an empty value
    fn apply_input(&mut self, field: &str, raw: &str) -> Result<(), String> {
        self.set_value(field, raw);
        match find_field(Self::field_metadata(), field) {
            Some(meta) => input_violation(meta, raw).map_or(Ok(()), Err),
            None => Ok(()),
        }
    }

    /// Turn placeholder empty strings of optional fields into `None`
    fn normalize(&mut self);

    fn validate(&self) -> Result<(), ValidationErrors> {
        validate_form(self)
    }

    /// Normalize, then validate. The only way a form reaches the client.
    fn into_validated(mut self) -> Result<Self, ValidationErrors> {
        self.normalize();
        self.validate()?;
        Ok(self)
    }
}

/// Evaluate every form-visible field's rules
pub fn validate_form<F: FormData>(form: &F) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    for field in F::field_metadata().iter().filter(|f| f.visible_in_form()) {
        let label = field.ui.label;
        let rules = field.validation;
        let result = match form.value(field.name) {
            FieldValue::Text(s) => rules.validate_string(s, label),
            FieldValue::Number(n) => rules.validate_number(n, label),
            FieldValue::Reference(id) => rules.validate_reference(id, label),
            FieldValue::Absent => match field.field_type {
                FieldType::Number => rules.validate_number(None, label),
                FieldType::AggregateRef => rules.validate_reference(None, label),
                _ => rules.validate_string("", label),
            },
        };
        if let Err(message) = result {
            errors.push(field.name, message);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// `Some("")` / whitespace-only becomes `None`
pub fn normalize_optional(value: &mut Option<String>) {
    if value.as_deref().is_some_and(|s| s.trim().is_empty()) {
        *value = None;
    }
}

/// Raw input for an optional text field
pub fn optional_text(raw: &str) -> Option<String> {
    Some(raw.to_string())
}

/// Format error of raw input that does not fit the field's type
pub fn input_violation(field: &FieldMetadata, raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match field.field_type {
        FieldType::Number if parse_number(raw).is_none() => {
            Some(format!("{} must be a number", field.ui.label))
        }
        FieldType::AggregateRef if parse_id(raw).is_none() => {
            Some(format!("{} is not a valid selection", field.ui.label))
        }
        _ => None,
    }
}

/// Raw input for a numeric field; unparsable input holds no value, see
/// [`input_violation`] for the matching error
pub fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Raw input for a foreign-key field
pub fn parse_id(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}

/// Text view of an optional field
pub fn text_of(value: &Option<String>) -> FieldValue<'_> {
    match value {
        Some(s) => FieldValue::Text(s),
        None => FieldValue::Absent,
    }
}
