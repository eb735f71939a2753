//! # Input Validation
//!
//! Boundary validation for values arriving from the UI layer or catalog
//! forms. Business rules (stock limits, payment sufficiency) live with the
//! cart and the settlement engine; these functions only answer "is this a
//! well-formed value at all".

use crate::error::{ValidationError, ValidationResult};

/// Validates a customer phone number: 10-12 ASCII digits, nothing else.
///
/// The phone is optional on an invoice; callers skip this check entirely
/// when no phone was entered.
///
/// ```rust
/// use pharma_core::validation::validate_phone;
///
/// assert!(validate_phone("9876543210").is_ok());
/// assert!(validate_phone("123456789012").is_ok());
/// assert!(validate_phone("12345").is_err());
/// assert!(validate_phone("98765-43210").is_err());
/// ```
pub fn validate_phone(phone: &str) -> ValidationResult<()> {
    let digits_only = phone.chars().all(|c| c.is_ascii_digit());
    if !digits_only || phone.len() < 10 || phone.len() > 12 {
        return Err(ValidationError::InvalidPhone);
    }
    Ok(())
}

/// Validates that a customer name is present (non-blank after trimming).
pub fn validate_customer_name(name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "customer name",
        });
    }
    Ok(())
}

/// Validates a tax or discount rate: 0 to 10000 bps (0-100%).
///
/// The pricing engine assumes in-range rates and does not clamp; this is
/// the check catalog forms run before a rate is persisted.
pub fn validate_rate(field: &'static str, bps: u32) -> ValidationResult<()> {
    if bps > 10_000 {
        return Err(ValidationError::RateOutOfRange { field, bps });
    }
    Ok(())
}

/// Validates a price in paise: zero is allowed, negative is not.
pub fn validate_price_paise(paise: i64) -> ValidationResult<()> {
    if paise < 0 {
        return Err(ValidationError::NegativeAmount { field: "price" });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_lengths() {
        assert!(validate_phone("9876543210").is_ok()); // 10 digits
        assert!(validate_phone("98765432101").is_ok()); // 11
        assert!(validate_phone("987654321012").is_ok()); // 12
        assert!(validate_phone("987654321").is_err()); // 9
        assert!(validate_phone("9876543210123").is_err()); // 13
        assert!(validate_phone("").is_err());
    }

    #[test]
    fn phone_rejects_non_digits() {
        assert!(validate_phone("98765 43210").is_err());
        assert!(validate_phone("+919876543210").is_err());
        assert!(validate_phone("98765abc10").is_err());
    }

    #[test]
    fn customer_name_required() {
        assert!(validate_customer_name("Asha Rao").is_ok());
        assert!(validate_customer_name("").is_err());
        assert!(validate_customer_name("   ").is_err());
    }

    #[test]
    fn rate_bounds() {
        assert!(validate_rate("discount", 0).is_ok());
        assert!(validate_rate("discount", 10_000).is_ok());
        assert!(validate_rate("discount", 10_001).is_err());
    }

    #[test]
    fn price_non_negative() {
        assert!(validate_price_paise(0).is_ok());
        assert!(validate_price_paise(9_999).is_ok());
        assert!(validate_price_paise(-1).is_err());
    }
}
