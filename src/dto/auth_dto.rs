use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::utils::validation::{
    self, is_valid_email_shape, is_valid_full_name, EMAIL_MESSAGE, NAME_MESSAGE,
};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginPayload {
    #[validate(length(min = 1, message = "Введите email"))]
    pub email: String,
    #[validate(length(min = 1, message = "Введите пароль"))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterUserPayload {
    pub email: String,
    #[validate(length(min = 6, message = "Пароль должен содержать минимум 6 символов"))]
    pub password: String,
    pub full_name: String,
}

impl RegisterUserPayload {
    pub fn check(&self) -> Result<(), ValidationErrors> {
        validation::validate_with(self, |errors| {
            check_identity(errors, &self.full_name, &self.email)
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterHrPayload {
    pub email: String,
    #[validate(length(min = 6, message = "Пароль должен содержать минимум 6 символов"))]
    pub password: String,
    pub full_name: String,
    #[validate(length(min = 1, message = "Укажите телефон"))]
    pub contact_info: String,
    #[validate(length(min = 1, message = "Укажите название компании"))]
    pub company: String,
}

impl RegisterHrPayload {
    pub fn check(&self) -> Result<(), ValidationErrors> {
        validation::validate_with(self, |errors| {
            check_identity(errors, &self.full_name, &self.email)
        })
    }
}

fn check_identity(errors: &mut ValidationErrors, full_name: &str, email: &str) {
    if !is_valid_full_name(full_name) {
        errors.add("full_name", validation::error("name_charset", NAME_MESSAGE));
    }
    if !is_valid_email_shape(email) {
        errors.add("email", validation::error("email_shape", EMAIL_MESSAGE));
    }
}

/// Token pair returned by login, user signup and refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshPayload {
    pub refresh_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}
