//! Form schema: named fields and their specs

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{FieldConfig, FieldSpec};
use crate::error::{FieldError, Result};
use crate::processor::{process_input, ProcessingResult};

/// Snapshot of every field's current raw value, keyed by field name
pub type FieldValues = BTreeMap<String, String>;

/// Field name → spec. Iteration is in name order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schema {
    fields: BTreeMap<String, FieldSpec>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, name: impl Into<String>, spec: impl Into<FieldSpec>) -> Self {
        self.insert(name, spec);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, spec: impl Into<FieldSpec>) {
        self.fields.insert(name.into(), spec.into());
    }

    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.get(name)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldSpec)> {
        self.fields.iter().map(|(name, spec)| (name.as_str(), spec))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Static configuration of a field, before any mask resolver runs
    pub fn config(&self, name: &str) -> Result<FieldConfig> {
        self.get(name)
            .map(FieldSpec::resolve)
            .ok_or_else(|| FieldError::UnknownField(name.to_string()))
    }

    /// Configuration for processing `value` in field `name`.
    ///
    /// When the field has a mask resolver, it is given the value, the sibling
    /// snapshot and this schema; a returned mask replaces the configured one.
    pub fn effective_config(
        &self,
        name: &str,
        value: &str,
        values: &FieldValues,
    ) -> Result<FieldConfig> {
        let mut config = self.config(name)?;
        if let Some(resolver) = &config.mask_resolver {
            if let Some(mask) = resolver.resolve(value, values, self) {
                debug!(field = name, mask = %mask, "mask resolver override");
                config.mask = Some(mask);
            }
        }
        Ok(config)
    }

    /// Raw value of the first card field (in name order) that holds one
    pub fn card_value<'v>(&self, values: &'v FieldValues) -> Option<&'v str> {
        self.fields
            .iter()
            .filter(|(_, spec)| spec.is_card())
            .find_map(|(name, _)| values.get(name).filter(|v| !v.is_empty()))
            .map(String::as_str)
    }

    /// Process one edit of field `name`, resolving its effective config first
    pub fn process(
        &self,
        name: &str,
        text: &str,
        caret: Option<usize>,
        previous: &str,
        values: &FieldValues,
    ) -> Result<ProcessingResult> {
        let config = self.effective_config(name, text, values)?;
        process_input(text, &config, caret, previous)
    }
}
