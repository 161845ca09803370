//! Validation Rules
//!
//! Pure predicates. Callers trim values before the shape checks.

use regex::Regex;
use std::sync::LazyLock;

static EMAIL: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok());
static PHONE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"^\([0-9]{2}\) [0-9]{4,5}-[0-9]{4}$").ok());
static POSTAL_CODE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"^[0-9]{5}-[0-9]{3}$").ok());

fn is_match(pattern: &LazyLock<Option<Regex>>, value: &str) -> bool {
    pattern.as_ref().is_some_and(|re| re.is_match(value))
}

/// What the required rule needs to know about a control
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldState {
    /// Checkbox or radio button
    Checkable { checked: bool },
    /// Any other control, with its current value
    Value(String),
}

impl FieldState {
    pub fn value(value: impl Into<String>) -> Self {
        Self::Value(value.into())
    }

    pub fn checkable(checked: bool) -> Self {
        Self::Checkable { checked }
    }
}

/// Required rule. An absent field is vacuously valid.
pub fn validate_required(field: Option<&FieldState>) -> bool {
    match field {
        None => true,
        Some(FieldState::Checkable { checked }) => *checked,
        Some(FieldState::Value(value)) => !value.trim().is_empty(),
    }
}

/// `local@domain.tld` shape: no whitespace, exactly one `@`, a dot after it
pub fn validate_email(value: &str) -> bool {
    is_match(&EMAIL, value)
}

/// `(DD) DDDD-DDDD` or `(DD) DDDDD-DDDD`
pub fn validate_phone(value: &str) -> bool {
    is_match(&PHONE, value)
}

/// CEP, `DDDDD-DDD`
pub fn validate_postal_code(value: &str) -> bool {
    is_match(&POSTAL_CODE, value)
}

/// CPF check digits. Punctuation is ignored; eleven repeated digits are
/// rejected even though their check digits work out.
pub fn validate_tax_id(value: &str) -> bool {
    let digits: Vec<u32> = value.chars().filter_map(|c| c.to_digit(10)).collect();
    if digits.len() != 11 {
        return false;
    }
    if digits.iter().all(|&d| d == digits[0]) {
        return false;
    }

    check_digit(&digits[..9]) == digits[9] && check_digit(&digits[..10]) == digits[10]
}

/// Weighted sum with weights `len + 1` down to 2, mapped through mod 11
fn check_digit(digits: &[u32]) -> u32 {
    let top = digits.len() as u32 + 1;
    let sum: u32 = digits.iter().zip((2..=top).rev()).map(|(d, w)| d * w).sum();
    match sum % 11 {
        r if r < 2 => 0,
        r => 11 - r,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required() {
        assert!(validate_required(None));
        assert!(!validate_required(Some(&FieldState::value("   "))));
        assert!(validate_required(Some(&FieldState::value(" Ana "))));
        assert!(validate_required(Some(&FieldState::checkable(true))));
        assert!(!validate_required(Some(&FieldState::checkable(false))));
    }

    #[test]
    fn test_email() {
        assert!(validate_email("ana@exemplo.com.br"));
        assert!(validate_email("a@b.c"));
        assert!(!validate_email("ana@exemplo"));
        assert!(!validate_email("ana exemplo@x.com"));
        assert!(!validate_email("ana@@x.com"));
        assert!(!validate_email("@x.com"));
    }

    #[test]
    fn test_phone() {
        assert!(validate_phone("(11) 91234-5678"));
        assert!(validate_phone("(11) 1234-5678"));
        assert!(!validate_phone("(11) 1234-567"));
        assert!(!validate_phone("11 91234-5678"));
        assert!(!validate_phone("(11)91234-5678"));
        assert!(!validate_phone("(11) 912345-678"));
    }

    #[test]
    fn test_phone_rejects_non_ascii_digits() {
        assert!(!validate_phone("(١١) 91234-5678"));
    }

    #[test]
    fn test_postal_code() {
        assert!(validate_postal_code("01234-567"));
        assert!(!validate_postal_code("1234-567"));
        assert!(!validate_postal_code("01234567"));
        assert!(!validate_postal_code("01234-5678"));
    }

    #[test]
    fn test_tax_id() {
        assert!(validate_tax_id("529.982.247-25"));
        assert!(validate_tax_id("52998224725"));
        assert!(!validate_tax_id("529.982.247-26"));
        assert!(!validate_tax_id("111.111.111-11"));
        assert!(!validate_tax_id("5299822472"));
        assert!(!validate_tax_id(""));
    }

    #[test]
    fn test_check_digit_zero_when_remainder_small() {
        assert_eq!(check_digit(&[0, 0, 0, 0, 0, 0, 0, 0, 0]), 0);
        assert_eq!(check_digit(&[5, 2, 9, 9, 8, 2, 2, 4, 7]), 2);
    }
}
