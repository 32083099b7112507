//! Built-in field presets
//!
//! Read-only catalogue of ready-made field configurations. A schema can use a
//! preset as-is (`card`) or extend it with overrides.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{FieldConfig, FieldValues, MaskResolver, Schema};
use crate::card::is_amex;
use crate::currency::CurrencyConfig;
use crate::error::FieldError;
use crate::filter::CharClass;
use crate::validators::{DateOrder, ValidatorKind};

/// Mask patterns used by the presets
pub mod masks {
    pub const CARD: &str = "9999 9999 9999 9999";
    pub const AMEX: &str = "9999 999999 99999";
    pub const EXPIRY: &str = "99/99";
    pub const CVV_3: &str = "999";
    pub const CVV_4: &str = "9999";
    pub const TCKN: &str = "99999999999";
    pub const PHONE: &str = "(999) 999 99 99";
    /// The 24 digits after the `TR` display prefix
    pub const IBAN: &str = "99 9999 9999 9999 9999 9999 99";
    pub const DATE: &str = "99/99/9999";
    pub const TAX_NUMBER: &str = "9999999999";
    pub const ZIP_CODE: &str = "99999";
}

// =============================================================================
// CHARACTER SETS
// =============================================================================

static EMAIL_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-zA-Z0-9@._+-]").unwrap());

static URL_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-zA-Z0-9@:%._+~#=/?&-]").unwrap());

/// Latin letters plus the Turkish alphabet, and spaces
static ALPHA_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-zA-ZçÇğĞıİöÖşŞüÜ ]").unwrap());

// =============================================================================
// PRESETS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    Card,
    Expiry,
    Cvv,
    #[serde(alias = "national-id")]
    Tckn,
    Phone,
    Email,
    Url,
    Username,
    Alpha,
    Password,
    Text,
    Currency,
    Iban,
    Numeric,
    Date,
    #[serde(alias = "tax-id", alias = "taxNumber")]
    TaxNumber,
    #[serde(alias = "zipCode")]
    ZipCode,
}

impl Preset {
    pub const ALL: [Preset; 17] = [
        Self::Card,
        Self::Expiry,
        Self::Cvv,
        Self::Tckn,
        Self::Phone,
        Self::Email,
        Self::Url,
        Self::Username,
        Self::Alpha,
        Self::Password,
        Self::Text,
        Self::Currency,
        Self::Iban,
        Self::Numeric,
        Self::Date,
        Self::TaxNumber,
        Self::ZipCode,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Card => "card",
            Self::Expiry => "expiry",
            Self::Cvv => "cvv",
            Self::Tckn => "tckn",
            Self::Phone => "phone",
            Self::Email => "email",
            Self::Url => "url",
            Self::Username => "username",
            Self::Alpha => "alpha",
            Self::Password => "password",
            Self::Text => "text",
            Self::Currency => "currency",
            Self::Iban => "iban",
            Self::Numeric => "numeric",
            Self::Date => "date",
            Self::TaxNumber => "tax-number",
            Self::ZipCode => "zip-code",
        }
    }

    /// Build the preset's configuration
    pub fn config(self) -> FieldConfig {
        match self {
            Self::Card => FieldConfig::masked(masks::CARD)
                .with_allowed(CharClass::Digit)
                .with_validator(ValidatorKind::Luhn)
                .with_resolver(MaskResolver::new(card_mask))
                .with_issuer(),
            Self::Expiry => FieldConfig::masked(masks::EXPIRY)
                .with_allowed(CharClass::Digit)
                .with_validator(ValidatorKind::Expiry),
            Self::Cvv => FieldConfig::masked(masks::CVV_3)
                .with_allowed(CharClass::Digit)
                .with_resolver(MaskResolver::new(cvv_mask)),
            Self::Tckn => FieldConfig::masked(masks::TCKN)
                .with_allowed(CharClass::Digit)
                .with_validator(ValidatorKind::NationalId),
            Self::Phone => FieldConfig::masked(masks::PHONE).with_allowed(CharClass::Digit),
            Self::Email => FieldConfig::default()
                .with_allowed(CharClass::Pattern(EMAIL_CHARS.clone()))
                .with_validator(ValidatorKind::Email),
            Self::Url => FieldConfig::default()
                .with_allowed(CharClass::Pattern(URL_CHARS.clone()))
                .with_validator(ValidatorKind::Url),
            Self::Username => FieldConfig {
                slug_format: true,
                ..FieldConfig::default()
            },
            Self::Alpha => FieldConfig {
                alpha_format: true,
                ..FieldConfig::default().with_allowed(CharClass::Pattern(ALPHA_CHARS.clone()))
            },
            Self::Password | Self::Text => FieldConfig::default(),
            Self::Currency => FieldConfig::currency(CurrencyConfig::default()),
            Self::Iban => FieldConfig::masked(masks::IBAN)
                .with_prefix("TR")
                .with_allowed(CharClass::Digit)
                .with_validator(ValidatorKind::Iban),
            Self::Numeric => FieldConfig::default().with_allowed(CharClass::Digit),
            Self::Date => FieldConfig {
                date_order: DateOrder::Dmy,
                ..FieldConfig::masked(masks::DATE)
                    .with_allowed(CharClass::Digit)
                    .with_validator(ValidatorKind::Date)
            },
            Self::TaxNumber => FieldConfig::masked(masks::TAX_NUMBER)
                .with_allowed(CharClass::Digit)
                .with_validator(ValidatorKind::TaxId),
            Self::ZipCode => FieldConfig::masked(masks::ZIP_CODE).with_allowed(CharClass::Digit),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "national-id" => Ok(Self::Tckn),
            "tax-id" | "taxNumber" => Ok(Self::TaxNumber),
            "zipCode" => Ok(Self::ZipCode),
            other => Self::ALL
                .into_iter()
                .find(|preset| preset.name() == other)
                .ok_or_else(|| FieldError::UnknownPreset(other.to_string())),
        }
    }
}

// =============================================================================
// CROSS-FIELD RESOLVERS
// =============================================================================

/// Amex numbers are grouped 4-6-5
fn card_mask(value: &str, _values: &FieldValues, _schema: &Schema) -> Option<String> {
    let mask = if is_amex(value) { masks::AMEX } else { masks::CARD };
    Some(mask.to_string())
}

/// Amex security codes have four digits; look at the first card field in the
/// schema that currently holds a value.
fn cvv_mask(_value: &str, values: &FieldValues, schema: &Schema) -> Option<String> {
    let mask = match schema.card_value(values) {
        Some(card) if is_amex(card) => masks::CVV_4,
        _ => masks::CVV_3,
    };
    Some(mask.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mask::capacity;

    #[test]
    fn test_names_round_trip() {
        for preset in Preset::ALL {
            assert_eq!(preset.name().parse::<Preset>().unwrap(), preset);
            let json = serde_json::to_string(&preset).unwrap();
            assert_eq!(json, format!("\"{}\"", preset.name()));
        }
    }

    #[test]
    fn test_aliases() {
        assert_eq!("taxNumber".parse::<Preset>().unwrap(), Preset::TaxNumber);
        assert_eq!("national-id".parse::<Preset>().unwrap(), Preset::Tckn);
        let preset: Preset = serde_json::from_str("\"zipCode\"").unwrap();
        assert_eq!(preset, Preset::ZipCode);
        assert!(matches!(
            "bogus".parse::<Preset>(),
            Err(FieldError::UnknownPreset(_))
        ));
    }

    #[test]
    fn test_mask_capacities() {
        assert_eq!(capacity(masks::CARD), 16);
        assert_eq!(capacity(masks::AMEX), 15);
        assert_eq!(capacity(masks::IBAN), 24);
        assert_eq!(capacity(masks::TCKN), 11);
        assert_eq!(capacity(masks::TAX_NUMBER), 10);
        assert_eq!(capacity(masks::DATE), 8);
    }

    #[test]
    fn test_card_resolver() {
        let schema = Schema::default();
        let values = FieldValues::new();
        assert_eq!(
            card_mask("3782", &values, &schema).as_deref(),
            Some(masks::AMEX)
        );
        assert_eq!(
            card_mask("4111", &values, &schema).as_deref(),
            Some(masks::CARD)
        );
    }

    #[test]
    fn test_cvv_resolver_follows_card_field() {
        let schema = Schema::new()
            .with_field("number", Preset::Card)
            .with_field("cvv", Preset::Cvv);
        let mut values = FieldValues::new();
        assert_eq!(cvv_mask("", &values, &schema).as_deref(), Some(masks::CVV_3));

        values.insert("number".to_string(), "378282246310005".to_string());
        assert_eq!(cvv_mask("", &values, &schema).as_deref(), Some(masks::CVV_4));

        values.insert("number".to_string(), "4111111111111111".to_string());
        assert_eq!(cvv_mask("", &values, &schema).as_deref(), Some(masks::CVV_3));
    }

    #[test]
    fn test_every_preset_builds() {
        for preset in Preset::ALL {
            let config = preset.config();
            if config.validate {
                assert!(config.validator.is_some(), "{} validates without a validator", preset);
            }
        }
    }
}
