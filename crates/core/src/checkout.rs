//! Checkout form validation.
//!
//! The form is validated as a whole so every problem is reported at once,
//! keyed by field. Composition only happens on a clean form.

use core::fmt;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::order::ContactDetails;

/// A checkout form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    FullName,
    Phone,
    Address,
    Notes,
}

impl Field {
    /// Maximum length in characters, measured after trimming.
    #[must_use]
    pub const fn max_length(self) -> usize {
        match self {
            Self::FullName => 100,
            Self::Phone => 20,
            Self::Address => 300,
            Self::Notes => 500,
        }
    }

    /// The field name as used by the form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FullName => "fullName",
            Self::Phone => "phone",
            Self::Address => "address",
            Self::Notes => "notes",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a field was rejected.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldError {
    /// The field is empty or only whitespace.
    #[error("this field is required")]
    Required,
    /// The field is longer than allowed.
    #[error("must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
}

/// Field-keyed validation failures.
#[derive(thiserror::Error, Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
#[error("checkout form has {} invalid field(s)", .0.len())]
pub struct ValidationErrors(BTreeMap<Field, FieldError>);

impl ValidationErrors {
    /// The error recorded for a field, if any.
    #[must_use]
    pub fn get(&self, field: Field) -> Option<&FieldError> {
        self.0.get(&field)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Fields with errors, in form order.
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.0.keys().copied()
    }

    fn insert(&mut self, field: Field, error: FieldError) {
        self.0.insert(field, error);
    }
}

/// The checkout form as submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutForm {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub notes: Option<String>,
}

impl CheckoutForm {
    /// Validate the form and produce trimmed contact details.
    ///
    /// Full name, phone, and address are required. Notes are optional; blank
    /// notes are treated as absent.
    ///
    /// # Errors
    ///
    /// Returns every field error found.
    pub fn validate(&self) -> Result<ContactDetails, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let full_name = required(&mut errors, Field::FullName, &self.full_name);
        let phone = required(&mut errors, Field::Phone, &self.phone);
        let address = required(&mut errors, Field::Address, &self.address);

        let notes = self
            .notes
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty());
        if let Some(notes) = notes {
            check_length(&mut errors, Field::Notes, notes);
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(ContactDetails {
            full_name: full_name.to_owned(),
            phone: phone.to_owned(),
            address: address.to_owned(),
            notes: notes.map(str::to_owned),
        })
    }
}

fn required<'a>(errors: &mut ValidationErrors, field: Field, value: &'a str) -> &'a str {
    let value = value.trim();
    if value.is_empty() {
        errors.insert(field, FieldError::Required);
    } else {
        check_length(errors, field, value);
    }
    value
}

fn check_length(errors: &mut ValidationErrors, field: Field, value: &str) {
    let max = field.max_length();
    if value.chars().count() > max {
        errors.insert(field, FieldError::TooLong { max });
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn form(full_name: &str, phone: &str, address: &str) -> CheckoutForm {
        CheckoutForm {
            full_name: full_name.to_owned(),
            phone: phone.to_owned(),
            address: address.to_owned(),
            notes: None,
        }
    }

    #[test]
    fn test_valid_form_is_trimmed() {
        let contact = form("  Jane Doe ", " +96170000000", "Beirut  ")
            .validate()
            .unwrap();
        assert_eq!(contact, ContactDetails::new("Jane Doe", "+96170000000", "Beirut"));
    }

    #[test]
    fn test_empty_name_only() {
        let errors = form("", "123", "X").validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(Field::FullName), Some(&FieldError::Required));
    }

    #[test]
    fn test_whitespace_counts_as_empty() {
        let errors = form("   ", "\t", "X").validate().unwrap_err();
        assert_eq!(
            errors.fields().collect::<Vec<_>>(),
            [Field::FullName, Field::Phone]
        );
    }

    #[test]
    fn test_name_too_long() {
        let errors = form(&"A".repeat(101), "1", "X").validate().unwrap_err();
        assert_eq!(
            errors.get(Field::FullName),
            Some(&FieldError::TooLong { max: 100 })
        );
        assert!(form(&"A".repeat(100), "1", "X").validate().is_ok());
    }

    #[test]
    fn test_phone_and_address_limits() {
        let errors = form("A", &"1".repeat(21), &"X".repeat(301))
            .validate()
            .unwrap_err();
        assert_eq!(errors.get(Field::Phone), Some(&FieldError::TooLong { max: 20 }));
        assert_eq!(
            errors.get(Field::Address),
            Some(&FieldError::TooLong { max: 300 })
        );
    }

    #[test]
    fn test_length_counts_characters() {
        // 100 two-byte characters are within the name limit.
        assert!(form(&"é".repeat(100), "1", "X").validate().is_ok());
    }

    #[test]
    fn test_all_missing() {
        let errors = CheckoutForm::default().validate().unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.get(Field::Notes).is_none());
    }

    #[test]
    fn test_notes_optional_and_bounded() {
        let mut with_notes = form("A", "1", "X");
        with_notes.notes = Some("  leave at door ".to_owned());
        let contact = with_notes.validate().unwrap();
        assert_eq!(contact.notes.as_deref(), Some("leave at door"));

        with_notes.notes = Some("   ".to_owned());
        assert_eq!(with_notes.validate().unwrap().notes, None);

        with_notes.notes = Some("n".repeat(501));
        let errors = with_notes.validate().unwrap_err();
        assert_eq!(errors.get(Field::Notes), Some(&FieldError::TooLong { max: 500 }));
    }

    #[test]
    fn test_errors_serialize_by_field_name() {
        let errors = form("", "123", "X").validate().unwrap_err();
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json, serde_json::json!({ "fullName": { "kind": "required" } }));
    }

    #[test]
    fn test_form_deserializes_camel_case() {
        let parsed: CheckoutForm =
            serde_json::from_str(r#"{"fullName":"Jane","phone":"1","address":"X"}"#).unwrap();
        assert_eq!(parsed.full_name, "Jane");
        assert_eq!(parsed.notes, None);
    }
}
