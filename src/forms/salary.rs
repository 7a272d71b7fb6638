use rust_decimal::Decimal;
use std::str::FromStr;

pub const SALARY_RANGE_MESSAGE: &str = "Минимальная зарплата должна быть меньше максимальной";

/// Longest salary the field accepts; anything typed past it is dropped.
pub const SALARY_MAX_DIGITS: usize = 15;

pub fn digits_only(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit())
        .take(SALARY_MAX_DIGITS)
        .collect()
}

/// `1234567` → `1 234 567`. Non-digits are dropped first.
pub fn group_thousands(raw: &str) -> String {
    let digits = digits_only(raw);
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }
    grouped
}

/// A salary text field: keeps digits only and shows them grouped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SalaryInput {
    digits: String,
}

impl SalaryInput {
    pub fn new(raw: &str) -> Self {
        Self {
            digits: digits_only(raw),
        }
    }

    pub fn from_amount(amount: Option<Decimal>) -> Self {
        match amount {
            Some(amount) => Self::new(&amount.trunc().to_string()),
            None => Self::default(),
        }
    }

    pub fn set(&mut self, raw: &str) {
        self.digits = digits_only(raw);
    }

    pub fn display(&self) -> String {
        group_thousands(&self.digits)
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    /// `None` for an empty field.
    pub fn amount(&self) -> Option<Decimal> {
        if self.digits.is_empty() {
            return None;
        }
        Decimal::from_str(&self.digits).ok()
    }
}

/// Minimum must be strictly below maximum when both are given.
pub fn check_salary_range(min: Option<Decimal>, max: Option<Decimal>) -> Result<(), &'static str> {
    match (min, max) {
        (Some(min), Some(max)) if min >= max => Err(SALARY_RANGE_MESSAGE),
        _ => Ok(()),
    }
}
