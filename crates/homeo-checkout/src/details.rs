use std::sync::LazyLock;

use homeo_core::UserDetails;
use regex::Regex;

use crate::error::CheckoutError;

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+\d{10,15}$").expect("valid phone regex"));

/// The checkout form as the customer filled it in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerDetails {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub address: String,
}

impl CustomerDetails {
    #[must_use]
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        phone: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            phone: phone.into(),
            address: address.into(),
        }
    }

    /// Trims every field, checks none is empty and normalizes the phone.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::Validation`] when a field is blank or the
    /// phone is not a plausible international number.
    pub fn validate(&self) -> Result<UserDetails, CheckoutError> {
        let first_name = self.first_name.trim();
        let last_name = self.last_name.trim();
        let phone = self.phone.trim();
        let address = self.address.trim();
        if [first_name, last_name, phone, address]
            .iter()
            .any(|f| f.is_empty())
        {
            return Err(CheckoutError::Validation(
                "Please fill in all fields".to_owned(),
            ));
        }

        Ok(UserDetails {
            first_name: first_name.to_owned(),
            last_name: last_name.to_owned(),
            phone: normalize_phone(phone)?,
            address: address.to_owned(),
        })
    }
}

/// Strips spaces, dashes and parentheses, adds a leading `+` when missing,
/// and requires 10–15 digits after it.
///
/// # Errors
///
/// Returns [`CheckoutError::Validation`] when the result is not `+` followed
/// by 10–15 digits.
pub fn normalize_phone(raw: &str) -> Result<String, CheckoutError> {
    let compact: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '(' | ')'))
        .collect();
    let with_plus = if compact.starts_with('+') {
        compact
    } else {
        format!("+{compact}")
    };
    if PHONE_RE.is_match(&with_plus) {
        Ok(with_plus)
    } else {
        Err(CheckoutError::Validation(format!(
            "Invalid phone number: {raw}"
        )))
    }
}
