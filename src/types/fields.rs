//! Field-by-field decoding of procedure input.
//!
//! Every key is decoded on its own, so a missing field or an unknown enum
//! literal does not hide the other problems in the same payload. Decoding
//! failures and `validator` rule violations are reported together in one
//! `ValidationErrors`, keyed by field name.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use validator::{Validate, ValidationError, ValidationErrors};

/// Input shapes that can be assembled from a JSON object one field at a time.
pub trait FromFields: Validate + Sized {
    /// Builds the shape. Fields that fail to decode are recorded on `fields`
    /// and replaced by a placeholder; the placeholder is never returned to
    /// callers because `parse_input` rejects any input with recorded failures.
    fn from_fields(fields: &mut Fields) -> Self;
}

/// The keys of one JSON object, consumed as the shape asks for them.
pub struct Fields {
    map: Map<String, Value>,
    failures: Vec<(&'static str, ValidationError)>,
}

impl Fields {
    fn fail(&mut self, key: &'static str, code: &'static str, message: String) {
        let mut err = ValidationError::new(code);
        err.message = Some(message.into());
        self.failures.push((key, err));
    }

    fn decode<T: DeserializeOwned>(&mut self, key: &'static str, value: Value) -> Option<T> {
        match serde_json::from_value(value) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                self.fail(key, "invalid_type", e.to_string());
                None
            }
        }
    }

    /// A field that must be present and non-null.
    pub fn required_or<T: DeserializeOwned>(&mut self, key: &'static str, placeholder: T) -> T {
        match self.map.remove(key) {
            None | Some(Value::Null) => {
                self.fail(key, "required", format!("{key} is required"));
                placeholder
            }
            Some(value) => self.decode(key, value).unwrap_or(placeholder),
        }
    }

    pub fn required<T: DeserializeOwned + Default>(&mut self, key: &'static str) -> T {
        self.required_or(key, T::default())
    }

    /// A field that may be left out; `null` reads the same as absent.
    pub fn optional<T: DeserializeOwned>(&mut self, key: &'static str) -> Option<T> {
        match self.map.remove(key) {
            None | Some(Value::Null) => None,
            Some(value) => self.decode(key, value),
        }
    }

    /// A partial-update field for a nullable column: absent keeps the stored
    /// value, `null` clears it.
    pub fn nullable<T: DeserializeOwned>(&mut self, key: &'static str) -> Option<Option<T>> {
        match self.map.remove(key) {
            None => None,
            Some(Value::Null) => Some(None),
            Some(value) => self.decode(key, value).map(Some),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Decodes and validates one procedure input, collecting every violation.
pub fn parse_input<T: FromFields>(value: Value) -> Result<T, ValidationErrors> {
    let map = match value {
        Value::Object(map) => map,
        other => {
            let mut err = ValidationError::new("invalid_type");
            err.message = Some(format!("expected an object, found {}", json_kind(&other)).into());
            let mut errors = ValidationErrors::new();
            errors.add("input", err);
            return Err(errors);
        }
    };

    let mut fields = Fields {
        map,
        failures: Vec::new(),
    };
    let input = T::from_fields(&mut fields);

    let mut errors = input.validate().err().unwrap_or_else(ValidationErrors::new);
    for (key, err) in fields.failures {
        // Rule results for a placeholder say nothing about the caller's value.
        errors.errors_mut().remove(key);
        errors.add(key, err);
    }

    if errors.is_empty() {
        Ok(input)
    } else {
        Err(errors)
    }
}
