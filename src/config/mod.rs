//! Field configuration
//!
//! A field is described by a [`FieldSpec`]: either a bare [`Preset`] name or a
//! set of [`FieldOptions`] that may extend a preset. Before any processing the
//! spec is resolved into a concrete [`FieldConfig`], so the engine never has
//! to branch on the shape of the configuration.
//!
//! ```yaml
//! card_number: card
//! amount:
//!   preset: currency
//!   currency:
//!     symbol: "₺"
//!     symbol_position: suffix
//! nickname:
//!   allowed: "[a-z0-9_]"
//!   transform: lower
//! ```

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::currency::CurrencyConfig;
use crate::filter::CharClass;
use crate::validators::{DateOrder, Validator};

pub mod loader;
pub mod presets;
pub mod schema;

pub use loader::SchemaLoader;
pub use presets::{masks, Preset};
pub use schema::{FieldValues, Schema};

// =============================================================================
// CASE TRANSFORM
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseTransform {
    #[default]
    None,
    #[serde(alias = "uppercase")]
    Upper,
    #[serde(alias = "lowercase")]
    Lower,
}

impl CaseTransform {
    pub fn apply(self, value: &str) -> String {
        match self {
            Self::None => value.to_string(),
            Self::Upper => value.to_uppercase(),
            Self::Lower => value.to_lowercase(),
        }
    }
}

// =============================================================================
// MASK RESOLVER
// =============================================================================

type ResolveFn = dyn Fn(&str, &FieldValues, &Schema) -> Option<String> + Send + Sync;

/// Picks an alternate mask from the field's current value and a read-only
/// snapshot of its siblings. Returning `None` keeps the configured mask.
#[derive(Clone)]
pub struct MaskResolver(Arc<ResolveFn>);

impl MaskResolver {
    pub fn new(
        resolve: impl Fn(&str, &FieldValues, &Schema) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        Self(Arc::new(resolve))
    }

    pub fn resolve(&self, value: &str, values: &FieldValues, schema: &Schema) -> Option<String> {
        (self.0)(value, values, schema)
    }
}

impl fmt::Debug for MaskResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MaskResolver(..)")
    }
}

// =============================================================================
// FIELD CONFIG
// =============================================================================

/// Fully resolved configuration for one field
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Mask pattern; selects mask mode when set
    pub mask: Option<String>,
    pub allowed: Option<CharClass>,
    pub forbidden: Option<CharClass>,
    /// Currency parameters; selects currency mode when set
    pub currency: Option<CurrencyConfig>,
    pub transform: CaseTransform,
    /// Whether the validation step runs for this field
    pub validate: bool,
    pub validator: Option<Validator>,
    pub error_message: Option<String>,
    pub date_order: DateOrder,
    /// Collapse whitespace runs and trim the stored value
    pub alpha_format: bool,
    /// Slug (username) mode
    pub slug_format: bool,
    /// Shown in front of the masked value but never stored
    pub display_prefix: Option<String>,
    #[serde(skip)]
    pub mask_resolver: Option<MaskResolver>,
    /// Report the card issuer of the input on every edit
    pub notify_issuer: bool,
}

impl FieldConfig {
    pub fn masked(mask: impl Into<String>) -> Self {
        Self {
            mask: Some(mask.into()),
            ..Self::default()
        }
    }

    pub fn currency(currency: CurrencyConfig) -> Self {
        Self {
            currency: Some(currency),
            allowed: Some(CharClass::Digit),
            ..Self::default()
        }
    }

    pub fn with_allowed(mut self, allowed: CharClass) -> Self {
        self.allowed = Some(allowed);
        self
    }

    pub fn with_forbidden(mut self, forbidden: CharClass) -> Self {
        self.forbidden = Some(forbidden);
        self
    }

    pub fn with_transform(mut self, transform: CaseTransform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.display_prefix = Some(prefix.into());
        self
    }

    pub fn with_validator(mut self, validator: impl Into<Validator>) -> Self {
        self.validate = true;
        self.validator = Some(validator.into());
        self
    }

    pub fn with_resolver(mut self, resolver: MaskResolver) -> Self {
        self.mask_resolver = Some(resolver);
        self
    }

    pub fn with_issuer(mut self) -> Self {
        self.notify_issuer = true;
        self
    }
}

// =============================================================================
// FIELD OPTIONS / SPEC
// =============================================================================

/// Per-field overrides, optionally extending a preset. Every field left as
/// `None` falls through to the preset (or to the default config).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FieldOptions {
    pub preset: Option<Preset>,
    pub mask: Option<String>,
    pub allowed: Option<CharClass>,
    pub forbidden: Option<CharClass>,
    pub currency: Option<CurrencyConfig>,
    pub transform: Option<CaseTransform>,
    pub validate: Option<bool>,
    pub validator: Option<Validator>,
    pub error_message: Option<String>,
    pub date_order: Option<DateOrder>,
    pub alpha_format: Option<bool>,
    pub slug_format: Option<bool>,
    pub display_prefix: Option<String>,
    #[serde(skip)]
    pub mask_resolver: Option<MaskResolver>,
    pub notify_issuer: Option<bool>,
}

impl FieldOptions {
    pub fn extending(preset: Preset) -> Self {
        Self {
            preset: Some(preset),
            ..Self::default()
        }
    }

    /// Merge these options over the preset they extend
    pub fn resolve(&self) -> FieldConfig {
        let base = self.preset.map(Preset::config).unwrap_or_default();
        let options = self.clone();

        FieldConfig {
            mask: options.mask.or(base.mask),
            allowed: options.allowed.or(base.allowed),
            forbidden: options.forbidden.or(base.forbidden),
            currency: options.currency.or(base.currency),
            transform: options.transform.unwrap_or(base.transform),
            validate: options.validate.unwrap_or(base.validate),
            validator: options.validator.or(base.validator),
            error_message: options.error_message.or(base.error_message),
            date_order: options.date_order.unwrap_or(base.date_order),
            alpha_format: options.alpha_format.unwrap_or(base.alpha_format),
            slug_format: options.slug_format.unwrap_or(base.slug_format),
            display_prefix: options.display_prefix.or(base.display_prefix),
            mask_resolver: options.mask_resolver.or(base.mask_resolver),
            notify_issuer: options.notify_issuer.unwrap_or(base.notify_issuer),
        }
    }
}

/// How a field is declared in a schema
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldSpec {
    Preset(Preset),
    Options(FieldOptions),
}

impl FieldSpec {
    pub fn resolve(&self) -> FieldConfig {
        match self {
            Self::Preset(preset) => preset.config(),
            Self::Options(options) => options.resolve(),
        }
    }

    /// Whether the field holds a card number. Cross-field resolvers use this
    /// to find the card a CVV belongs to.
    pub fn is_card(&self) -> bool {
        match self {
            Self::Preset(preset) => *preset == Preset::Card,
            Self::Options(options) => {
                options.preset == Some(Preset::Card)
                    || options.mask.as_deref() == Some(masks::CARD)
            }
        }
    }
}

impl From<Preset> for FieldSpec {
    fn from(preset: Preset) -> Self {
        Self::Preset(preset)
    }
}

impl From<FieldOptions> for FieldSpec {
    fn from(options: FieldOptions) -> Self {
        Self::Options(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::ValidatorKind;

    #[test]
    fn test_case_transform() {
        assert_eq!(CaseTransform::Upper.apply("abç"), "ABÇ");
        assert_eq!(CaseTransform::Lower.apply("ABC"), "abc");
        assert_eq!(CaseTransform::None.apply("aBc"), "aBc");
        let t: CaseTransform = serde_json::from_str("\"uppercase\"").unwrap();
        assert_eq!(t, CaseTransform::Upper);
    }

    #[test]
    fn test_options_override_preset() {
        let options = FieldOptions {
            error_message: Some("Bad phone".to_string()),
            mask: Some("999-999-9999".to_string()),
            ..FieldOptions::extending(Preset::Phone)
        };
        let config = options.resolve();
        assert_eq!(config.mask.as_deref(), Some("999-999-9999"));
        assert_eq!(config.allowed, Some(CharClass::Digit));
        assert_eq!(config.error_message.as_deref(), Some("Bad phone"));
    }

    #[test]
    fn test_options_without_preset() {
        let options = FieldOptions {
            transform: Some(CaseTransform::Upper),
            ..FieldOptions::default()
        };
        let config = options.resolve();
        assert!(config.mask.is_none());
        assert_eq!(config.transform, CaseTransform::Upper);
        assert!(!config.validate);
    }

    #[test]
    fn test_options_keep_preset_resolver() {
        let config = FieldOptions::extending(Preset::Card).resolve();
        assert!(config.mask_resolver.is_some());
        assert!(matches!(
            config.validator,
            Some(Validator::Named(ValidatorKind::Luhn))
        ));
    }

    #[test]
    fn test_spec_deserialize_shapes() {
        let spec: FieldSpec = serde_yaml::from_str("card").unwrap();
        assert!(matches!(spec, FieldSpec::Preset(Preset::Card)));

        let spec: FieldSpec =
            serde_yaml::from_str("preset: currency\ncurrency:\n  symbol: \"$\"\n").unwrap();
        let config = spec.resolve();
        let currency = config.currency.unwrap();
        assert_eq!(currency.symbol, "$");
        assert_eq!(currency.precision, 2);

        let spec: FieldSpec = serde_yaml::from_str("allowed: \"[a-z]\"\ntransform: upper\n").unwrap();
        assert_eq!(spec.resolve().transform, CaseTransform::Upper);
    }

    #[test]
    fn test_spec_rejects_unknown_keys() {
        let spec: Result<FieldSpec, _> = serde_yaml::from_str("maks: \"999\"\n");
        assert!(spec.is_err());
    }

    #[test]
    fn test_is_card() {
        assert!(FieldSpec::from(Preset::Card).is_card());
        assert!(FieldSpec::from(FieldOptions::extending(Preset::Card)).is_card());
        assert!(FieldSpec::from(FieldOptions {
            mask: Some(masks::CARD.to_string()),
            ..FieldOptions::default()
        })
        .is_card());
        assert!(!FieldSpec::from(Preset::Cvv).is_card());
    }
}
