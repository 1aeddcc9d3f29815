use beacon_models::schema::ValidationErrors;
use serde::Serialize;

/// The envelope of every response body returned by the contact api.
#[derive(Debug, Serialize)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<ValidationErrors>,
}

impl ApiResponse {
    pub fn success() -> Self {
        Self {
            success: true,
            message: None,
            errors: None,
        }
    }

    pub fn failure(message: &'static str) -> Self {
        Self {
            success: false,
            message: Some(message),
            errors: None,
        }
    }

    pub fn with_errors(self, errors: ValidationErrors) -> Self {
        Self {
            errors: Some(errors),
            ..self
        }
    }
}
