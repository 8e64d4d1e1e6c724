//! Structural validators for user-entered contact and form data.
//!
//! These mirror the checks the cabinet UI runs before submitting: cheap
//! shape tests, not authoritative verification. The server re-validates
//! everything.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Field name → human-readable message. Empty means the form is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: BTreeMap<String, String>,
}

impl ValidationErrors {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Message for a field, if that field failed.
    pub fn message(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.errors.keys().map(String::as_str)
    }

    fn add(&mut self, field: &str, message: &str) {
        self.errors.insert(field.to_string(), message.to_string());
    }
}

/// Validate a phone number.
///
/// Strips everything except ASCII digits and `+` first. An empty result is
/// valid (the field is optional); otherwise the cleaned string must be `+`
/// followed by exactly 10–15 digits.
pub fn validate_phone(phone: &str) -> bool {
    let cleaned: String = phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect();
    if cleaned.is_empty() {
        return true;
    }
    let Some(digits) = cleaned.strip_prefix('+') else {
        return false;
    };
    (10..=15).contains(&digits.len()) && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Validate an email address.
///
/// Empty is valid (the field is optional). Otherwise splitting on `@` must
/// yield exactly two non-empty parts, with the domain part containing a `.`
/// and longer than 2 characters. This is a deliberately loose existence
/// check, not RFC validation; the accepted input set is part of the display
/// contract and must not be tightened.
pub fn validate_email(email: &str) -> bool {
    if email.is_empty() {
        return true;
    }
    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && domain.chars().count() > 2
}

/// Validate the procurement-creation form.
///
/// Collects every violation (no short-circuit), at most one message per
/// field. The deadline must be strictly after `now`; a form without a
/// deadline produces no deadline error, matching the behavior of the
/// deployed module when the date input is blank.
pub fn validate_procurement_form(
    title: &str,
    description: &str,
    city: &str,
    target_amount: f64,
    deadline: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    if title.trim().is_empty() {
        errors.add("title", "Название обязательно");
    } else if title.chars().count() > 200 {
        errors.add("title", "Название не должно превышать 200 символов");
    }

    if description.trim().is_empty() {
        errors.add("description", "Описание обязательно");
    }

    if city.trim().is_empty() {
        errors.add("city", "Город обязателен");
    }

    if target_amount <= 0.0 {
        errors.add("target_amount", "Целевая сумма должна быть положительной");
    }

    if let Some(deadline) = deadline
        && deadline <= now
    {
        errors.add("deadline", "Дедлайн должен быть в будущем");
    }

    errors
}
