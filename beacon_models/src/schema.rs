//! Declarative validation of untrusted JSON objects.
//!
//! A [`Schema`] lists every accepted field together with the [`Rule`] its
//! value has to satisfy. [`Schema::evaluate`] checks a parsed JSON value
//! against that description and either returns the normalized string values
//! or every violation it found, grouped by field.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::email_address::EmailAddress;

/// A strict object schema: fields not listed here are rejected.
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    pub fields: &'static [FieldSchema],
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSchema {
    pub name: &'static str,
    /// Human readable field name used in error messages.
    pub label: &'static str,
    pub required: bool,
    pub rule: Rule,
}

#[derive(Debug, Clone, Copy)]
pub enum Rule {
    /// A string that is trimmed before checking. Blank optional values are
    /// treated as absent.
    Text { max_chars: usize },
    /// A trimmed email address with a dotted domain.
    Email { max_chars: usize },
    /// One of a fixed set of strings, `default` when absent.
    OneOf {
        values: &'static [&'static str],
        default: &'static str,
    },
}

/// Field errors reported when no root object was supplied.
pub const BODY_FIELD: &str = "body";

impl Schema {
    pub fn evaluate(&self, value: &Value) -> Result<Fields, ValidationErrors> {
        let Value::Object(object) = value else {
            return Err(ValidationErrors::single(BODY_FIELD, "Expected a JSON object"));
        };

        let mut fields = Fields::default();
        let mut errors = ValidationErrors::default();

        for key in object.keys() {
            if !self.fields.iter().any(|field| field.name == key) {
                errors.push(key.as_str(), "Unrecognized field");
            }
        }

        for field in self.fields {
            match field.evaluate(object.get(field.name)) {
                Ok(Some(value)) => fields.insert(field.name, value),
                Ok(None) => {}
                Err(messages) => {
                    for message in messages {
                        errors.push(field.name, message);
                    }
                }
            }
        }

        if errors.is_empty() {
            Ok(fields)
        } else {
            Err(errors)
        }
    }
}

impl FieldSchema {
    fn evaluate(&self, value: Option<&Value>) -> Result<Option<String>, Vec<String>> {
        match self.rule {
            Rule::OneOf { values, default } => self.evaluate_one_of(value, values, default),
            Rule::Text { max_chars } => self.evaluate_string(value, max_chars, false),
            Rule::Email { max_chars } => self.evaluate_string(value, max_chars, true),
        }
    }

    fn evaluate_one_of(
        &self,
        value: Option<&Value>,
        values: &[&str],
        default: &str,
    ) -> Result<Option<String>, Vec<String>> {
        match value {
            None => Ok(Some(default.into())),
            Some(Value::String(s)) if values.contains(&s.as_str()) => Ok(Some(s.clone())),
            Some(_) => Err(vec![format!(
                "Invalid {}. Expected one of: {}",
                self.name,
                values.join(", ")
            )]),
        }
    }

    fn evaluate_string(
        &self,
        value: Option<&Value>,
        max_chars: usize,
        email: bool,
    ) -> Result<Option<String>, Vec<String>> {
        let value = match value {
            None => None,
            Some(Value::String(s)) => Some(s.trim()).filter(|s| !s.is_empty()),
            Some(_) => return Err(vec!["Expected a string".into()]),
        };

        let Some(value) = value else {
            return if self.required {
                Err(vec![format!("{} is required", self.label)])
            } else {
                Ok(None)
            };
        };

        let mut messages = Vec::new();
        if value.chars().count() > max_chars {
            messages.push(format!(
                "{} must be at most {max_chars} characters",
                self.label
            ));
        }
        if email && !is_valid_email(value) {
            messages.push("Invalid email address".into());
        }

        if messages.is_empty() {
            Ok(Some(value.into()))
        } else {
            Err(messages)
        }
    }
}

pub fn is_valid_email(value: &str) -> bool {
    value
        .parse::<EmailAddress>()
        .is_ok_and(|address| address.has_dotted_domain())
}

/// Normalized field values produced by [`Schema::evaluate`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fields(BTreeMap<&'static str, String>);

impl Fields {
    fn insert(&mut self, name: &'static str, value: String) {
        self.0.insert(name, value);
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }
}

/// Violation messages keyed by field name, in the order they were found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "validation failed for ")?;
        for (i, field) in self.fields().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{field}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl ValidationErrors {
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.push(field, message);
        errors
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}
