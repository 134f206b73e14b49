//! Cascading adjustment pipeline.
//!
//! Turns priced line items and a profile of business percentages into a
//! fully reconciled monetary breakdown. The order of adjustments is fixed:
//!
//! 1. Material and labor subtotals
//! 2. Waste, overhead and contingency on the subtotal
//! 3. Markup on the total before markup
//! 4. VAT on the total before VAT
//! 5. Discount on the grand total
//! 6. Withholding tax on the total before VAT

pub mod service;
pub mod types;

#[cfg(test)]
mod props;

pub use service::PricingService;
pub use types::{
    AdjustmentProfile, Discount, DiscountKind, ItemError, LineItem, MonetarySummary,
    WithholdingTax,
};
