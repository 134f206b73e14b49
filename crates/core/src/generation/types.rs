//! Generation data types.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::GenerationError;
use crate::formula::Bindings;
use crate::pricing::LineItem;

/// Named building parameters bound as formula variables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuildingParameters(BTreeMap<String, Decimal>);

impl BuildingParameters {
    /// Creates an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a parameter.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: Decimal) -> Self {
        self.0.insert(name.into(), value);
        self
    }

    /// Sets a parameter.
    pub fn set(&mut self, name: impl Into<String>, value: Decimal) {
        self.0.insert(name.into(), value);
    }

    /// Returns a parameter value.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Decimal> {
        self.0.get(name).copied()
    }

    /// Number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Bindings for BuildingParameters {
    fn lookup(&self, name: &str) -> Option<Decimal> {
        self.get(name)
    }
}

impl<K: Into<String>> FromIterator<(K, Decimal)> for BuildingParameters {
    fn from_iter<I: IntoIterator<Item = (K, Decimal)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// A priced item whose quantity comes from a formula.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemTemplate {
    /// Item description.
    pub description: String,
    /// Category label.
    #[serde(default)]
    pub category: String,
    /// Optional subcategory label.
    #[serde(default)]
    pub subcategory: Option<String>,
    /// Unit of measure.
    #[serde(default)]
    pub unit: String,
    /// Material cost per unit.
    pub material_cost: Decimal,
    /// Labor cost per unit.
    pub labor_cost: Decimal,
    /// Quantity formula, e.g. `ceil(area * 1.05)`.
    pub quantity_formula: String,
}

/// A template that did not produce a line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedTemplate {
    /// Template description.
    pub description: String,
    /// The quantity formula that failed.
    pub formula: String,
    /// Human-readable reason.
    pub reason: String,
    /// Typed reason.
    #[serde(skip)]
    pub error: GenerationError,
}

impl SkippedTemplate {
    pub(crate) fn new(template: &ItemTemplate, error: GenerationError) -> Self {
        Self {
            description: template.description.clone(),
            formula: template.quantity_formula.clone(),
            reason: error.to_string(),
            error,
        }
    }
}

/// Outcome of generating line items from templates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    /// Generated items, in template order.
    pub items: Vec<LineItem>,
    /// Templates that were skipped, in template order.
    pub skipped: Vec<SkippedTemplate>,
}

impl GenerationReport {
    /// Returns true if every template produced an item.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}
