//! Request body validation.
//!
//! Bodies are checked field by field and every violation is collected, so a
//! client sees all problems at once as `{formErrors, fieldErrors}`.

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Field-level description of why a body was rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldErrors {
    /// Problems with the body as a whole.
    pub form_errors: Vec<String>,
    pub field_errors: BTreeMap<String, Vec<String>>,
}

impl FieldErrors {
    pub fn form(message: impl Into<String>) -> Self {
        Self {
            form_errors: vec![message.into()],
            field_errors: BTreeMap::new(),
        }
    }

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.field_errors
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.form_errors.is_empty() && self.field_errors.is_empty()
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let fields: Vec<String> = self
            .field_errors
            .iter()
            .map(|(field, msgs)| format!("{field}: {}", msgs.join(", ")))
            .collect();
        let all: Vec<&str> = self
            .form_errors
            .iter()
            .map(String::as_str)
            .chain(fields.iter().map(String::as_str))
            .collect();
        write!(f, "{}", all.join("; "))
    }
}

/// JSON type name as reported in validation messages.
fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Collects violations while reading fields out of a JSON object body.
pub struct BodyValidator {
    fields: Map<String, Value>,
    errors: FieldErrors,
}

impl BodyValidator {
    /// Parse raw bytes as a JSON object. An empty body counts as `{}`.
    pub fn parse(body: &[u8]) -> Result<Self, FieldErrors> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::from_object(Map::new()));
        }

        let value: Value =
            serde_json::from_slice(body).map_err(|_| FieldErrors::form("Invalid JSON body"))?;

        match value {
            Value::Object(fields) => Ok(Self::from_object(fields)),
            other => Err(FieldErrors::form(format!(
                "Expected object, received {}",
                type_name(&other)
            ))),
        }
    }

    fn from_object(fields: Map<String, Value>) -> Self {
        Self {
            fields,
            errors: FieldErrors::default(),
        }
    }

    /// Read a string field of at least `min` UTF-16 code units.
    ///
    /// Returns `None` and records the violation when the field is missing,
    /// not a string, or too short.
    pub fn string_min(&mut self, field: &str, min: usize) -> Option<String> {
        match self.fields.get(field) {
            None => {
                self.errors.push(field, "Required");
                None
            }
            Some(Value::String(s)) if s.encode_utf16().count() < min => {
                self.errors.push(
                    field,
                    format!("String must contain at least {min} character(s)"),
                );
                None
            }
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => {
                self.errors.push(
                    field,
                    format!("Expected string, received {}", type_name(other)),
                );
                None
            }
        }
    }

    /// Finish validation, yielding `value` only if no violation was recorded.
    pub fn finish<T>(self, value: Option<T>) -> Result<T, FieldErrors> {
        match value {
            Some(v) if self.errors.is_empty() => Ok(v),
            _ => Err(self.errors),
        }
    }
}
