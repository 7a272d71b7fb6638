use std::borrow::Cow;
use validator::{Validate, ValidationError, ValidationErrors};

pub const NAME_MESSAGE: &str = "Имя должно содержать только буквы";
pub const EMAIL_MESSAGE: &str = "Некорректный email";
pub const PASSWORD_MESSAGE: &str = "Пароль должен содержать минимум 6 символов";
pub const PHONE_MAX_DIGITS: usize = 15;

pub fn validate<T: Validate>(val: &T) -> Result<(), ValidationErrors> {
    val.validate()
}

/// Runs the derived rules, then lets `extra` add checks the derive cannot
/// express. All failures are reported together.
pub fn validate_with<T, F>(val: &T, extra: F) -> Result<(), ValidationErrors>
where
    T: Validate,
    F: FnOnce(&mut ValidationErrors),
{
    let mut errors = match val.validate() {
        Ok(()) => ValidationErrors::new(),
        Err(errors) => errors,
    };
    extra(&mut errors);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

pub fn error(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

/// Latin or Cyrillic letters and whitespace only.
pub fn is_valid_full_name(name: &str) -> bool {
    !name.is_empty()
        && name.chars().all(|c| {
            c.is_ascii_alphabetic()
                || c.is_whitespace()
                || matches!(c, 'А'..='я' | 'Ё' | 'ё')
        })
}

/// Only the shape check done before sending; the server does the real one.
pub fn is_valid_email_shape(email: &str) -> bool {
    email.contains('@')
}

/// Keeps digits only, at most fifteen of them.
pub fn normalize_phone(input: &str) -> String {
    input
        .chars()
        .filter(|c| c.is_ascii_digit())
        .take(PHONE_MAX_DIGITS)
        .collect()
}
