use std::str::FromStr;

use nutype::nutype;
use serde::Serialize;
use serde_json::Value;

use crate::{
    email_address::EmailAddress,
    schema::{FieldSchema, Rule, Schema, ValidationErrors},
};

pub const CONTACT_NAME_MAX_CHARS: usize = 120;
pub const CONTACT_EMAIL_MAX_CHARS: usize = 254;
pub const CONTACT_MESSAGE_MAX_CHARS: usize = 5000;

/// The accepted shape of a contact form submission.
pub static CONTACT_SUBMISSION_SCHEMA: Schema = Schema {
    fields: &[
        FieldSchema {
            name: "source",
            label: "Source",
            required: false,
            rule: Rule::OneOf {
                values: ContactSource::VALUES,
                default: ContactSource::Unknown.as_str(),
            },
        },
        FieldSchema {
            name: "name",
            label: "Name",
            required: false,
            rule: Rule::Text {
                max_chars: CONTACT_NAME_MAX_CHARS,
            },
        },
        FieldSchema {
            name: "email",
            label: "Email",
            required: true,
            rule: Rule::Email {
                max_chars: CONTACT_EMAIL_MAX_CHARS,
            },
        },
        FieldSchema {
            name: "message",
            label: "Message",
            required: true,
            rule: Rule::Text {
                max_chars: CONTACT_MESSAGE_MAX_CHARS,
            },
        },
    ],
};

/// Where on the site a contact form was submitted from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContactSource {
    Footer,
    ContactPage,
    #[default]
    Unknown,
}

impl ContactSource {
    pub const VALUES: &'static [&'static str] = &["footer", "contact-page", "unknown"];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Footer => "footer",
            Self::ContactPage => "contact-page",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for ContactSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContactSource {
    type Err = UnknownContactSource;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "footer" => Ok(Self::Footer),
            "contact-page" => Ok(Self::ContactPage),
            "unknown" => Ok(Self::Unknown),
            _ => Err(UnknownContactSource),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownContactSource;

#[nutype(
    sanitize(trim),
    validate(not_empty, len_char_max = 120),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize)
)]
pub struct ContactName(String);

#[nutype(
    sanitize(trim),
    validate(not_empty, len_char_max = 5000),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize)
)]
pub struct ContactMessageContent(String);

/// An untrusted contact form submission, as decoded from the request body.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactSubmission(pub Value);

/// A contact form submission that passed [`CONTACT_SUBMISSION_SCHEMA`].
///
/// Serializes back into the submission format, so validating the serialized
/// payload again yields the same payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidatedContactPayload {
    pub source: ContactSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<ContactName>,
    pub email: EmailAddress,
    pub message: ContactMessageContent,
}

impl ContactSubmission {
    pub fn validate(&self) -> Result<ValidatedContactPayload, ValidationErrors> {
        let fields = CONTACT_SUBMISSION_SCHEMA.evaluate(&self.0)?;

        let source = fields
            .get("source")
            .and_then(|source| source.parse().ok())
            .unwrap_or_default();

        let name = fields
            .get("name")
            .map(|name| ContactName::try_new(name.to_owned()))
            .transpose()
            .map_err(|err| ValidationErrors::single("name", err.to_string()))?;

        let email = fields
            .get("email")
            .ok_or_else(|| ValidationErrors::single("email", "Email is required"))?
            .parse::<EmailAddress>()
            .map_err(|_| ValidationErrors::single("email", "Invalid email address"))?;

        let message = fields
            .get("message")
            .ok_or_else(|| ValidationErrors::single("message", "Message is required"))
            .and_then(|message| {
                ContactMessageContent::try_new(message.to_owned())
                    .map_err(|err| ValidationErrors::single("message", err.to_string()))
            })?;

        Ok(ValidatedContactPayload {
            source,
            name,
            email,
            message,
        })
    }
}
