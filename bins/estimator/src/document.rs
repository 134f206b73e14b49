//! Estimate documents and the snapshot computed from them.

use buildcost_core::generation::{BuildingParameters, ItemTemplate, QuantityGenerator, SkippedTemplate};
use buildcost_core::installment::{BalanceCheck, InstallmentService, PaymentTerm};
use buildcost_core::pricing::{
    AdjustmentProfile, Discount, LineItem, MonetarySummary, PricingService, WithholdingTax,
};
use buildcost_shared::types::DocumentId;
use buildcost_shared::{AppConfig, AppError, AppResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

/// An estimate document as read from disk.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EstimateDocument {
    /// Document identifier; generated when absent.
    #[serde(default)]
    pub id: Option<DocumentId>,
    /// Priced line items.
    #[serde(default)]
    pub items: Vec<LineItem>,
    /// Templates whose quantities come from `parameters`.
    #[serde(default)]
    pub templates: Vec<ItemTemplate>,
    /// Building parameters for the templates.
    #[serde(default)]
    pub parameters: BuildingParameters,
    /// Fail instead of skipping templates that cannot be evaluated.
    #[serde(default)]
    pub strict_templates: bool,
    /// Adjustment percentages; the configured defaults when absent.
    #[serde(default)]
    pub profile: Option<AdjustmentProfile>,
    /// Discount on the grand total.
    #[serde(default)]
    pub discount: Option<Discount>,
    /// Withholding tax; the configured default rate when absent.
    #[serde(default)]
    pub withholding: Option<WithholdingTax>,
    /// Payment schedule.
    #[serde(default)]
    pub terms: Vec<PaymentTerm>,
    /// Number of equal installments, used when `terms` is empty.
    #[serde(default)]
    pub installments: Option<u32>,
    /// Let the last installment absorb any difference.
    #[serde(default)]
    pub rebalance: bool,
}

/// Everything computed for a document, ready to persist or render.
#[derive(Debug, Clone, Serialize)]
pub struct EstimateSnapshot {
    /// Document identifier.
    pub id: DocumentId,
    /// Items priced, generated ones after the given ones.
    pub items: Vec<LineItem>,
    /// Templates that did not produce an item.
    pub skipped: Vec<SkippedTemplate>,
    /// Exact summary.
    pub summary: MonetarySummary,
    /// Summary rounded for display.
    pub display: MonetarySummary,
    /// Final payment schedule.
    pub terms: Vec<PaymentTerm>,
    /// Amount owed per installment.
    pub amounts: Vec<Decimal>,
    /// Reconciliation of `amounts` against the payable total.
    pub balance: Option<BalanceCheck>,
}

/// Prices a document and balances its payment schedule.
///
/// # Errors
///
/// Returns `AppError::Validation` for invalid items or terms, and
/// `AppError::Evaluation` when `strict_templates` is set and a template
/// fails.
pub fn run(document: EstimateDocument, config: &AppConfig) -> AppResult<EstimateSnapshot> {
    let id = document.id.unwrap_or_else(DocumentId::new);

    let report = QuantityGenerator::generate(&document.templates, &document.parameters);
    if document.strict_templates
        && let Some(skipped) = report.skipped.first()
    {
        return Err(AppError::Evaluation(format!(
            "{} ({}): {}",
            skipped.description, skipped.formula, skipped.reason
        )));
    }

    let mut items = document.items;
    items.extend(report.items);
    for item in &items {
        item.validate()
            .map_err(|e| AppError::Validation(format!("{}: {e}", item.description)))?;
    }

    let profile = document
        .profile
        .unwrap_or_else(|| AdjustmentProfile::from(config.pricing.default_profile));
    let withholding = document
        .withholding
        .or_else(|| Some(WithholdingTax::new(config.pricing.default_withholding_rate)))
        .filter(WithholdingTax::is_active);

    let summary = PricingService::compute_summary(
        &items,
        &profile,
        document.discount.as_ref(),
        withholding.as_ref(),
    );
    let total = summary.payable();

    let mut terms = document.terms;
    if terms.is_empty()
        && let Some(count) = document.installments
    {
        terms = InstallmentService::even_split(count, "Installment")
            .map_err(|e| AppError::Validation(e.to_string()))?;
    }
    InstallmentService::validate_terms(&terms).map_err(|e| AppError::Validation(e.to_string()))?;

    if document.rebalance {
        terms = InstallmentService::rebalance_last(total, &terms, config.balancing.epsilon);
    }

    let amounts = InstallmentService::allocate(total, &terms);
    let balance = (!terms.is_empty())
        .then(|| InstallmentService::validate(total, &amounts, config.balancing.epsilon));

    info!(
        document = %id,
        items = items.len(),
        skipped = report.skipped.len(),
        %total,
        balanced = balance.as_ref().is_none_or(|b| b.balanced),
        "Estimate computed"
    );

    Ok(EstimateSnapshot {
        id,
        display: summary.rounded(config.balancing.decimal_places),
        items,
        skipped: report.skipped,
        summary,
        terms,
        amounts,
        balance,
    })
}
