//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every helper yields an `invalid_request` [`Error`] whose details name the
//! offending field and a machine-readable reason code.

use serde_json::{Value, json};

use crate::domain::Error;

/// Reason codes reported in validation error details.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValidationCode {
    MissingField,
    UnknownField,
    ImmutableField,
    InvalidType,
    InvalidValue,
    InvalidDate,
    EmptyPatch,
}

impl ValidationCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::UnknownField => "unknown_field",
            Self::ImmutableField => "immutable_field",
            Self::InvalidType => "invalid_type",
            Self::InvalidValue => "invalid_value",
            Self::InvalidDate => "invalid_date",
            Self::EmptyPatch => "empty_patch",
        }
    }
}

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub(crate) fn as_str(&self) -> &'static str {
        self.0
    }
}

fn field_error(field: &str, code: ValidationCode, message: String, value: Option<&Value>) -> Error {
    let mut details = json!({
        "field": field,
        "code": code.as_str(),
    });
    if let (Some(value), Some(map)) = (value, details.as_object_mut()) {
        map.insert("value".to_owned(), value.clone());
    }
    Error::invalid_request(message).with_details(details)
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    field_error(
        field,
        ValidationCode::MissingField,
        format!("missing required field: {field}"),
        None,
    )
}

pub(crate) fn unknown_field_error(field: &str) -> Error {
    field_error(
        field,
        ValidationCode::UnknownField,
        format!("unknown field: {field}"),
        None,
    )
}

pub(crate) fn immutable_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    field_error(
        field,
        ValidationCode::ImmutableField,
        format!("{field} cannot be changed"),
        None,
    )
}

pub(crate) fn invalid_type_error(field: FieldName, expected: &str, value: &Value) -> Error {
    let field = field.as_str();
    field_error(
        field,
        ValidationCode::InvalidType,
        format!("{field} must be {expected}"),
        Some(value),
    )
}

pub(crate) fn invalid_value_error(field: FieldName, message: &str, value: &Value) -> Error {
    let field = field.as_str();
    field_error(
        field,
        ValidationCode::InvalidValue,
        format!("{field} {message}"),
        Some(value),
    )
}

pub(crate) fn invalid_date_error(field: FieldName, value: &Value) -> Error {
    let field = field.as_str();
    field_error(
        field,
        ValidationCode::InvalidDate,
        format!("{field} must be a date in YYYY-MM-DD format"),
        Some(value),
    )
}

pub(crate) fn empty_patch_error() -> Error {
    Error::invalid_request("update must change at least one field").with_details(json!({
        "code": ValidationCode::EmptyPatch.as_str(),
    }))
}
