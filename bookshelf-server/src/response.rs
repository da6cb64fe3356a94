//! The uniform response envelope returned by every endpoint.

use serde::Serialize;

/// Wrapper shape shared by all JSON responses:
/// `{success, message?, count?, data?, errors?, error?}` with absent fields
/// omitted from the output.
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> Envelope<T> {
    fn base(success: bool) -> Self {
        Self {
            success,
            message: None,
            count: None,
            data: None,
            errors: None,
            error: None,
        }
    }

    /// A successful response carrying only data.
    pub fn data(data: T) -> Self {
        Self {
            data: Some(data),
            ..Self::base(true)
        }
    }

    /// A successful response with a human-readable message and data.
    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            message: Some(message.into()),
            data: Some(data),
            ..Self::base(true)
        }
    }

    /// A successful list response carrying a result count and data.
    pub fn list(count: usize, data: T) -> Self {
        Self {
            count: Some(count),
            data: Some(data),
            ..Self::base(true)
        }
    }
}

impl Envelope<()> {
    /// A failure response with a single message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::base(false)
        }
    }

    /// A failure response listing every violated field constraint.
    pub fn validation(errors: Vec<String>) -> Self {
        Self {
            errors: Some(errors),
            ..Self::base(false)
        }
    }

    /// A 500 response; `error` carries the raw failure text only when the
    /// server runs in development mode.
    pub fn server_error(error: Option<String>) -> Self {
        Self {
            message: Some("Server error".to_string()),
            error,
            ..Self::base(false)
        }
    }
}
