use reqwest::StatusCode;
use serde_json::Value as JsonValue;

pub type Result<T> = std::result::Result<T, Error>;

/// Shown when the server gave no `detail` and the failure has no better wording.
pub const GENERIC_ERROR_MESSAGE: &str = "Произошла ошибка. Попробуйте снова.";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Invalid {field}: {message}")]
    Invalid {
        field: &'static str,
        message: String,
    },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("API error ({status}): {}", detail.as_deref().unwrap_or("no detail"))]
    Api {
        status: StatusCode,
        detail: Option<String>,
    },

    #[error("Session error: {0}")]
    Session(String),

    #[error("Wizard error: {0}")]
    Wizard(String),

    #[error("Request already in progress: {0}")]
    Busy(&'static str),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Error::Invalid {
            field,
            message: message.into(),
        }
    }

    /// True when the caller should send the user back to the login screen.
    pub fn is_unauthorized(&self) -> bool {
        match self {
            Error::Unauthorized(_) => true,
            Error::Api { status, .. } => *status == StatusCode::UNAUTHORIZED,
            _ => false,
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::Reqwest(err) => err.status(),
            _ => None,
        }
    }

    /// Inline text for the UI: server detail verbatim, validation messages,
    /// or the localized fallback.
    pub fn user_message(&self) -> String {
        match self {
            Error::Api {
                detail: Some(detail),
                ..
            } => detail.clone(),
            Error::Api { detail: None, .. } | Error::Reqwest(_) | Error::Json(_) => {
                GENERIC_ERROR_MESSAGE.to_string()
            }
            Error::Validation(errors) => validation_messages(errors).join("; "),
            Error::Invalid { message, .. } => message.clone(),
            Error::Session(message) | Error::Wizard(message) => message.clone(),
            Error::Busy(_) => "Запрос уже выполняется, подождите.".to_string(),
            Error::Unauthorized(_) => "Сессия истекла. Войдите снова.".to_string(),
            other => other.to_string(),
        }
    }

    pub(crate) fn from_response_body(status: StatusCode, body: &str) -> Self {
        Error::Api {
            status,
            detail: extract_detail(body),
        }
    }
}

fn validation_messages(errors: &validator::ValidationErrors) -> Vec<String> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));
    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| match &err.message {
                Some(message) => message.to_string(),
                None => format!("{}: {}", field, err.code),
            })
        })
        .collect()
}

/// Pulls a human-readable message out of an error body: `detail` as a string,
/// FastAPI's `detail` array of `{msg}` objects, or a bare `error` field.
pub(crate) fn extract_detail(body: &str) -> Option<String> {
    let value: JsonValue = serde_json::from_str(body).ok()?;
    match value.get("detail") {
        Some(JsonValue::String(detail)) if !detail.trim().is_empty() => {
            return Some(detail.clone())
        }
        Some(JsonValue::Array(items)) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                .collect();
            if !messages.is_empty() {
                return Some(messages.join("; "));
            }
        }
        _ => {}
    }
    value
        .get("error")
        .and_then(|e| e.as_str())
        .filter(|e| !e.trim().is_empty())
        .map(str::to_string)
}
