//! Pricing data types.

use buildcost_shared::config::ProfileDefaults;
use buildcost_shared::types::Rate;
use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for a line item.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ItemError {
    /// Material unit cost is negative.
    #[error("Material cost cannot be negative: {0}")]
    NegativeMaterialCost(Decimal),

    /// Labor unit cost is negative.
    #[error("Labor cost cannot be negative: {0}")]
    NegativeLaborCost(Decimal),

    /// Quantity is zero or negative.
    #[error("Quantity must be positive: {0}")]
    NonPositiveQuantity(Decimal),
}

/// A bill-of-quantities line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Item description.
    pub description: String,
    /// Category label (display only).
    #[serde(default)]
    pub category: String,
    /// Optional subcategory label (display only).
    #[serde(default)]
    pub subcategory: Option<String>,
    /// Unit of measure (e.g., "m2", "pcs").
    #[serde(default)]
    pub unit: String,
    /// Material cost per unit.
    pub material_cost: Decimal,
    /// Labor cost per unit.
    pub labor_cost: Decimal,
    /// Quantity.
    pub quantity: Decimal,
}

impl LineItem {
    /// Creates an uncategorized line item.
    #[must_use]
    pub fn new(
        description: impl Into<String>,
        material_cost: Decimal,
        labor_cost: Decimal,
        quantity: Decimal,
    ) -> Self {
        Self {
            description: description.into(),
            category: String::new(),
            subcategory: None,
            unit: String::new(),
            material_cost,
            labor_cost,
            quantity,
        }
    }

    /// Sets the category and subcategory labels.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>, subcategory: Option<String>) -> Self {
        self.category = category.into();
        self.subcategory = subcategory;
        self
    }

    /// Sets the unit of measure.
    #[must_use]
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    /// Builds a line item from floating-point form input.
    ///
    /// NaN and infinite values (and finite values outside decimal range)
    /// become zero so they contribute nothing to the summary. This masks bad
    /// upstream input; callers should still validate.
    #[must_use]
    pub fn from_f64_parts(
        description: impl Into<String>,
        material_cost: f64,
        labor_cost: f64,
        quantity: f64,
    ) -> Self {
        let description = description.into();
        let material_cost = clamp_to_decimal(&description, "material_cost", material_cost);
        let labor_cost = clamp_to_decimal(&description, "labor_cost", labor_cost);
        let quantity = clamp_to_decimal(&description, "quantity", quantity);
        Self::new(description, material_cost, labor_cost, quantity)
    }

    /// Material cost × quantity, or `None` if it cannot be represented.
    #[must_use]
    pub fn material_total(&self) -> Option<Decimal> {
        self.material_cost.checked_mul(self.quantity)
    }

    /// Labor cost × quantity, or `None` if it cannot be represented.
    #[must_use]
    pub fn labor_total(&self) -> Option<Decimal> {
        self.labor_cost.checked_mul(self.quantity)
    }

    /// Material and labor total for this line, or `None` if it cannot be
    /// represented.
    #[must_use]
    pub fn total(&self) -> Option<Decimal> {
        self.material_total()?.checked_add(self.labor_total()?)
    }

    /// Checks the item before it is handed to the pricing pipeline.
    ///
    /// # Errors
    ///
    /// Returns `ItemError` for negative costs or a non-positive quantity.
    pub fn validate(&self) -> Result<(), ItemError> {
        if self.material_cost < Decimal::ZERO {
            return Err(ItemError::NegativeMaterialCost(self.material_cost));
        }
        if self.labor_cost < Decimal::ZERO {
            return Err(ItemError::NegativeLaborCost(self.labor_cost));
        }
        if self.quantity <= Decimal::ZERO {
            return Err(ItemError::NonPositiveQuantity(self.quantity));
        }
        Ok(())
    }
}

fn clamp_to_decimal(description: &str, field: &'static str, value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::warn!(
            item = %description,
            field,
            value,
            "Non-representable value clamped to zero"
        );
        Decimal::ZERO
    })
}

/// Business adjustment percentages applied on top of the subtotal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustmentProfile {
    /// Material waste allowance.
    #[serde(default)]
    pub waste: Rate,
    /// Site overhead.
    #[serde(default)]
    pub overhead: Rate,
    /// Contingency for estimation error.
    #[serde(default)]
    pub contingency: Rate,
    /// Profit markup.
    #[serde(default)]
    pub markup: Rate,
    /// Value-added tax.
    #[serde(default)]
    pub vat: Rate,
}

impl From<ProfileDefaults> for AdjustmentProfile {
    fn from(defaults: ProfileDefaults) -> Self {
        Self {
            waste: defaults.waste,
            overhead: defaults.overhead,
            contingency: defaults.contingency,
            markup: defaults.markup,
            vat: defaults.vat,
        }
    }
}

/// How a discount is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum DiscountKind {
    /// Percentage of the grand total.
    Percent(Decimal),
    /// Fixed amount.
    Fixed(Decimal),
}

/// A discount on the grand total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discount {
    /// Discount value.
    #[serde(flatten)]
    pub kind: DiscountKind,
    /// Optional free-text description.
    #[serde(default)]
    pub description: Option<String>,
}

impl Discount {
    /// A percentage discount.
    #[must_use]
    pub const fn percent(value: Decimal) -> Self {
        Self {
            kind: DiscountKind::Percent(value),
            description: None,
        }
    }

    /// A fixed-amount discount.
    #[must_use]
    pub const fn fixed(value: Decimal) -> Self {
        Self {
            kind: DiscountKind::Fixed(value),
            description: None,
        }
    }

    /// Attaches a description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Discount amount for a given grand total, or `None` if it cannot be
    /// represented.
    #[must_use]
    pub fn amount(&self, grand_total: Decimal) -> Option<Decimal> {
        match self.kind {
            DiscountKind::Percent(value) => Rate::percent(value).checked_of(grand_total),
            DiscountKind::Fixed(value) => Some(value),
        }
    }
}

/// Withholding tax deducted from the payable amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithholdingTax {
    /// Withholding rate.
    pub rate: Rate,
    /// Tax category label (display only).
    #[serde(default)]
    pub category: Option<String>,
}

impl WithholdingTax {
    /// Creates a withholding tax without a category label.
    #[must_use]
    pub const fn new(rate: Rate) -> Self {
        Self {
            rate,
            category: None,
        }
    }

    /// A zero rate means no withholding.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.rate.is_zero()
    }
}

/// Complete monetary breakdown of an estimate.
///
/// Always produced by `PricingService::compute_summary`; never patched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonetarySummary {
    /// Σ material cost × quantity.
    pub subtotal_material: Decimal,
    /// Σ labor cost × quantity.
    pub subtotal_labor: Decimal,
    /// Material plus labor subtotal.
    pub subtotal: Decimal,
    /// Waste allowance on the subtotal.
    pub waste: Decimal,
    /// Overhead on the subtotal.
    pub overhead: Decimal,
    /// Contingency on the subtotal.
    pub contingency: Decimal,
    /// Subtotal plus waste, overhead and contingency.
    pub total_before_markup: Decimal,
    /// Markup on the total before markup.
    pub markup: Decimal,
    /// Total before markup plus markup.
    pub total_before_vat: Decimal,
    /// VAT on the total before VAT.
    pub vat: Decimal,
    /// Total before VAT plus VAT.
    pub grand_total: Decimal,
    /// Discount on the grand total (zero when there is none).
    pub discount_amount: Decimal,
    /// Grand total minus discount.
    pub total_after_discount: Decimal,
    /// Withholding on the total before VAT, when withholding is active.
    pub withholding_amount: Option<Decimal>,
    /// Total after discount minus withholding, when withholding is active.
    pub net_payable: Option<Decimal>,
}

impl MonetarySummary {
    /// The amount the client actually pays, which installments partition.
    #[must_use]
    pub fn payable(&self) -> Decimal {
        self.net_payable.unwrap_or(self.total_after_discount)
    }

    /// Returns a copy with every figure rounded for display using Banker's
    /// Rounding. Rounded copies are not guaranteed to satisfy the chain.
    #[must_use]
    pub fn rounded(&self, decimal_places: u32) -> Self {
        let round =
            |v: Decimal| v.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointNearestEven);
        Self {
            subtotal_material: round(self.subtotal_material),
            subtotal_labor: round(self.subtotal_labor),
            subtotal: round(self.subtotal),
            waste: round(self.waste),
            overhead: round(self.overhead),
            contingency: round(self.contingency),
            total_before_markup: round(self.total_before_markup),
            markup: round(self.markup),
            total_before_vat: round(self.total_before_vat),
            vat: round(self.vat),
            grand_total: round(self.grand_total),
            discount_amount: round(self.discount_amount),
            total_after_discount: round(self.total_after_discount),
            withholding_amount: self.withholding_amount.map(round),
            net_payable: self.net_payable.map(round),
        }
    }
}
