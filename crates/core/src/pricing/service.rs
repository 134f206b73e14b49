//! Pricing service computing the monetary summary.

use rust_decimal::Decimal;

use super::types::{AdjustmentProfile, Discount, LineItem, MonetarySummary, WithholdingTax};

/// Pricing service for business logic.
pub struct PricingService;

impl PricingService {
    /// Computes the full monetary breakdown.
    ///
    /// The order of steps is part of the contract:
    ///
    /// - subtotal = Σ material × qty + Σ labor × qty
    /// - waste, overhead, contingency = subtotal × rate
    /// - markup = total_before_markup × rate
    /// - vat = total_before_vat × rate
    /// - discount = grand_total × rate, or the fixed amount
    /// - withholding = total_before_vat × rate (independent of the discount)
    ///
    /// Callers are responsible for rejecting negative prices and quantities
    /// (see `LineItem::validate`). A line item whose total cannot be
    /// represented contributes zero, as does any figure further down the
    /// chain that falls outside the decimal range. Both are logged.
    ///
    /// # Example
    ///
    /// ```
    /// use buildcost_core::pricing::{AdjustmentProfile, LineItem, PricingService};
    /// use buildcost_shared::types::Rate;
    /// use rust_decimal_macros::dec;
    ///
    /// let items = vec![LineItem::new("Wall tile", dec!(100), dec!(50), dec!(2))];
    /// let profile = AdjustmentProfile {
    ///     vat: Rate::percent(dec!(7)),
    ///     ..AdjustmentProfile::default()
    /// };
    /// let summary = PricingService::compute_summary(&items, &profile, None, None);
    /// assert_eq!(summary.grand_total, dec!(321));
    /// ```
    #[must_use]
    pub fn compute_summary(
        items: &[LineItem],
        profile: &AdjustmentProfile,
        discount: Option<&Discount>,
        withholding: Option<&WithholdingTax>,
    ) -> MonetarySummary {
        let (subtotal_material, subtotal_labor) = subtotals(items);
        let subtotal = in_range("subtotal", subtotal_material.checked_add(subtotal_labor));

        let waste = in_range("waste", profile.waste.checked_of(subtotal));
        let overhead = in_range("overhead", profile.overhead.checked_of(subtotal));
        let contingency = in_range("contingency", profile.contingency.checked_of(subtotal));
        let total_before_markup = in_range(
            "total_before_markup",
            subtotal
                .checked_add(waste)
                .and_then(|v| v.checked_add(overhead))
                .and_then(|v| v.checked_add(contingency)),
        );

        let markup = in_range("markup", profile.markup.checked_of(total_before_markup));
        let total_before_vat =
            in_range("total_before_vat", total_before_markup.checked_add(markup));

        let vat = in_range("vat", profile.vat.checked_of(total_before_vat));
        let grand_total = in_range("grand_total", total_before_vat.checked_add(vat));

        let discount_amount = discount.map_or(Decimal::ZERO, |d| {
            in_range("discount_amount", d.amount(grand_total))
        });
        let total_after_discount =
            in_range("total_after_discount", grand_total.checked_sub(discount_amount));

        let withholding_amount = withholding
            .filter(|w| w.is_active())
            .map(|w| in_range("withholding_amount", w.rate.checked_of(total_before_vat)));
        let net_payable = withholding_amount
            .map(|amount| in_range("net_payable", total_after_discount.checked_sub(amount)));

        tracing::debug!(
            items = items.len(),
            %subtotal,
            %grand_total,
            %total_after_discount,
            withholding = withholding_amount.is_some(),
            "Computed monetary summary"
        );

        MonetarySummary {
            subtotal_material,
            subtotal_labor,
            subtotal,
            waste,
            overhead,
            contingency,
            total_before_markup,
            markup,
            total_before_vat,
            vat,
            grand_total,
            discount_amount,
            total_after_discount,
            withholding_amount,
            net_payable,
        }
    }
}

/// Sums material and labor over all items.
///
/// An item is left out of both sums if its totals, or the sums including
/// it, cannot be represented.
fn subtotals(items: &[LineItem]) -> (Decimal, Decimal) {
    let mut material = Decimal::ZERO;
    let mut labor = Decimal::ZERO;

    for item in items {
        let next = item.material_total().zip(item.labor_total()).and_then(|(m, l)| {
            let material = material.checked_add(m)?;
            let labor = labor.checked_add(l)?;
            material.checked_add(labor)?;
            Some((material, labor))
        });

        match next {
            Some((m, l)) => {
                material = m;
                labor = l;
            }
            None => tracing::warn!(
                item = %item.description,
                "Line item total out of range, contributes zero"
            ),
        }
    }

    (material, labor)
}

fn in_range(figure: &'static str, value: Option<Decimal>) -> Decimal {
    value.unwrap_or_else(|| {
        tracing::warn!(figure, "Summary figure out of range, clamped to zero");
        Decimal::ZERO
    })
}
