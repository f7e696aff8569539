//! Field-level validation. Each function takes the raw client input and
//! either returns the normalized value or an `Error::Validation` naming
//! the offending field.

use crate::{users::Role, Error, Result};
use regex::Regex;

lazy_static! {
    static ref EMAIL_REGEX: Regex =
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").unwrap();
    static ref PHONE_REGEX: Regex = Regex::new(r"^\+?[1-9]\d{10}$").unwrap();
}

/// Accepted emails are lower-cased so that uniqueness is case-insensitive.
pub fn email(raw: &str) -> Result<String> {
    let value = raw.trim();
    if EMAIL_REGEX.is_match(value) {
        Ok(value.to_lowercase())
    } else {
        Err(Error::Validation {
            field: "email",
            message: "Invalid email address".to_owned(),
        })
    }
}

/// 11 digits, optionally prefixed with `+`.
pub fn phone(raw: &str) -> Result<String> {
    let value = raw.trim();
    if PHONE_REGEX.is_match(value) {
        Ok(value.to_owned())
    } else {
        Err(Error::Validation {
            field: "phone",
            message: "Invalid phone number".to_owned(),
        })
    }
}

pub fn password(raw: &str) -> Result<String> {
    let value = raw.trim();
    if value.len() >= 6 {
        Ok(value.to_owned())
    } else {
        Err(Error::Validation {
            field: "password",
            message: "Password should be at least 6 characters long".to_owned(),
        })
    }
}

pub fn role(value: i32) -> Result<Role> {
    match value {
        0 => Ok(Role::Reader),
        1 => Ok(Role::Author),
        2 => Ok(Role::Admin),
        _ => Err(Error::Validation {
            field: "role",
            message: "Role should be 0 (reader), 1 (author) or 2 (admin)".to_owned(),
        }),
    }
}

pub fn pen_name(raw: &str) -> Result<String> {
    let value = raw.trim();
    if value.is_empty() || value.len() > 128 {
        Err(Error::Validation {
            field: "pen_name",
            message: "Pen name should be between 1 and 128 characters long".to_owned(),
        })
    } else {
        Ok(value.to_owned())
    }
}
