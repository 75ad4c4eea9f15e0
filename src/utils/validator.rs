use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::employee::EmployeeInput;

pub const MAX_SALARY: f64 = 1_000_000_000.0;

pub const NAME_TOO_SHORT: &str = "name must contain at least 2 characters";
pub const INVALID_EMAIL: &str = "invalid email format";
pub const INVALID_PHONE: &str = "invalid phone format";
pub const INVALID_SALARY: &str = "salary must be greater than 0 and at most 1 000 000 000";

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email pattern")
});

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[1-9][0-9]{0,15}$").expect("phone pattern"));

pub fn valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Spaces and hyphens are ignored.
pub fn valid_phone(phone: &str) -> bool {
    let compact: String = phone.chars().filter(|c| *c != ' ' && *c != '-').collect();
    PHONE_RE.is_match(&compact)
}

pub fn valid_salary(salary: f64) -> bool {
    salary > 0.0 && salary <= MAX_SALARY
}

pub fn valid_name(name: &str) -> bool {
    name.trim().chars().count() >= 2
}

/// Runs every check and returns one message per violation.
pub fn validate(input: &EmployeeInput) -> Vec<String> {
    let checks = [
        (valid_name(&input.name), NAME_TOO_SHORT),
        (valid_email(&input.email), INVALID_EMAIL),
        (valid_phone(&input.phone), INVALID_PHONE),
        (valid_salary(input.salary), INVALID_SALARY),
    ];

    checks
        .into_iter()
        .filter(|(ok, _)| !ok)
        .map(|(_, message)| message.to_string())
        .collect()
}
