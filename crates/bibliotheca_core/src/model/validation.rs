//! Construction-time validation shared by every entity constructor.
use regex::Regex;
use std::sync::LazyLock;

static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+7\d{10}$").expect("Regex must be valid"));

/// Signals malformed or out-of-range input. Construction never partially succeeds: when this is
/// returned, no entity exists.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {field}: {reason}")]
pub struct ValidationError {
    /// Name of the offending field
    pub field: &'static str,
    /// Human-readable description of what is wrong with it
    pub reason: String,
}

impl ValidationError {
    #[must_use]
    #[inline]
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// Trims `value` and rejects it if nothing is left.
pub(crate) fn required(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(field, "must not be empty"));
    }
    Ok(trimmed.to_owned())
}

/// Phone numbers are `+7` followed by exactly ten digits.
pub(crate) fn phone(value: &str) -> Result<String, ValidationError> {
    let phone = required("phone", value)?;
    if !PHONE_PATTERN.is_match(&phone) {
        return Err(ValidationError::new(
            "phone",
            format!("'{phone}' does not match +7XXXXXXXXXX"),
        ));
    }
    Ok(phone)
}

pub(crate) fn email(value: &str) -> Result<String, ValidationError> {
    let email = required("email", value)?;
    if !email.contains('@') {
        return Err(ValidationError::new("email", format!("'{email}' has no '@'")));
    }
    Ok(email)
}

/// Checks that `value` lies in the closed range `min..=max`.
pub(crate) fn in_range(
    field: &'static str,
    value: u8,
    min: u8,
    max: u8,
) -> Result<u8, ValidationError> {
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(ValidationError::new(
            field,
            format!("{value} is outside {min}..={max}"),
        ))
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "Tests are predefined and guaranteed to be Some/Ok"
)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn required_trims_input() {
        assert_eq!(required("title", "  Dune \n").unwrap(), "Dune");
        assert_eq!(required("title", "   ").unwrap_err().field, "title");
    }

    #[test]
    fn phone_pattern() {
        assert_eq!(phone(" +79161234567 ").unwrap(), "+79161234567");
        for bad in ["89161234567", "+7916123456", "+791612345678", "+7916123456a", ""] {
            assert_eq!(phone(bad).unwrap_err().field, "phone", "{bad} must be rejected");
        }
    }

    #[test]
    fn email_needs_at_sign() {
        assert!(email("ana@example.org").is_ok());
        assert_eq!(email("not an email").unwrap_err().field, "email");
    }

    #[test]
    fn ranges_are_closed() {
        assert_eq!(in_range("rating", 1, 1, 5).unwrap(), 1);
        assert_eq!(in_range("rating", 5, 1, 5).unwrap(), 5);
        assert!(in_range("rating", 0, 1, 5).is_err());
        assert!(in_range("course", 7, 1, 6).is_err());
    }
}
