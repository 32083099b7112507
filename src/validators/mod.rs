//! Checksum and format validators
//!
//! Every validator is a pure predicate over a raw (unmasked) value. None of
//! them fail loudly: input of the wrong length, wrong characters or a bad
//! checksum is simply `false`.
//!
//! The registry is [`ValidatorKind`], keyed by name so configuration files can
//! refer to validators as strings. [`validate_field`] is the form-level step
//! the UI layer runs against a field's stored value.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::config::FieldConfig;
use crate::error::{FieldError, ValidationFailure};

pub mod calendar;
pub mod checksum;
pub mod shape;

pub use calendar::DateOrder;

// =============================================================================
// REGISTRY
// =============================================================================

/// Built-in validators, addressable by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValidatorKind {
    /// Turkish national ID (TCKN)
    #[serde(alias = "tckn")]
    NationalId,
    Luhn,
    Email,
    Expiry,
    Date,
    Iban,
    Url,
    /// Turkish tax ID (VKN)
    #[serde(alias = "vkn")]
    TaxId,
}

impl ValidatorKind {
    pub const ALL: [ValidatorKind; 8] = [
        Self::NationalId,
        Self::Luhn,
        Self::Email,
        Self::Expiry,
        Self::Date,
        Self::Iban,
        Self::Url,
        Self::TaxId,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::NationalId => "national-id",
            Self::Luhn => "luhn",
            Self::Email => "email",
            Self::Expiry => "expiry",
            Self::Date => "date",
            Self::Iban => "iban",
            Self::Url => "url",
            Self::TaxId => "tax-id",
        }
    }

    /// Run the validator. `order` is only consulted by [`ValidatorKind::Date`].
    pub fn check(&self, value: &str, order: DateOrder) -> bool {
        match self {
            Self::NationalId => checksum::national_id(value),
            Self::Luhn => checksum::luhn(value),
            Self::Email => shape::email(value),
            Self::Expiry => calendar::expiry(value),
            Self::Date => calendar::date(value, order),
            Self::Iban => checksum::iban(value),
            Self::Url => shape::url(value),
            Self::TaxId => checksum::tax_id(value),
        }
    }
}

impl fmt::Display for ValidatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ValidatorKind {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tckn" => Ok(Self::NationalId),
            "vkn" => Ok(Self::TaxId),
            other => Self::ALL
                .into_iter()
                .find(|kind| kind.name() == other)
                .ok_or_else(|| FieldError::UnknownValidator(other.to_string())),
        }
    }
}

// =============================================================================
// FIELD VALIDATOR
// =============================================================================

/// Custom validation predicate supplied by the integrating code
pub type Predicate = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// The validator attached to a field: a named built-in or a custom predicate
#[derive(Clone)]
pub enum Validator {
    Named(ValidatorKind),
    Custom(Predicate),
}

impl Validator {
    pub fn custom(predicate: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        Self::Custom(Arc::new(predicate))
    }

    pub fn check(&self, value: &str, order: DateOrder) -> bool {
        match self {
            Self::Named(kind) => kind.check(value, order),
            Self::Custom(predicate) => predicate(value),
        }
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(kind) => f.debug_tuple("Named").field(kind).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl From<ValidatorKind> for Validator {
    fn from(kind: ValidatorKind) -> Self {
        Self::Named(kind)
    }
}

// Custom predicates cannot round-trip through a config file; they serialize
// as the placeholder name "custom".
impl Serialize for Validator {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Named(kind) => kind.serialize(serializer),
            Self::Custom(_) => serializer.serialize_str("custom"),
        }
    }
}

impl<'de> Deserialize<'de> for Validator {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        ValidatorKind::deserialize(deserializer).map(Self::Named)
    }
}

/// Validate a field's stored value against its configuration.
///
/// Passes when validation is disabled, when no validator is configured, or
/// when the value is empty (emptiness is a "required" concern, not a format
/// one). On failure the configured error message is used if there is one.
pub fn validate_field(config: &FieldConfig, value: &str) -> Result<(), ValidationFailure> {
    if !config.validate || value.is_empty() {
        return Ok(());
    }
    let Some(validator) = &config.validator else {
        return Ok(());
    };

    if validator.check(value, config.date_order) {
        Ok(())
    } else {
        Err(config
            .error_message
            .as_deref()
            .map(ValidationFailure::new)
            .unwrap_or_default())
    }
}
