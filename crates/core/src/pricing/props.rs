//! Property-based tests for the pricing pipeline.
//!
//! - Summary fields always satisfy the adjustment chain
//! - Computation is deterministic and independent of item order
//! - Withholding never depends on the discount

use buildcost_shared::types::Rate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::service::PricingService;
use super::types::{AdjustmentProfile, Discount, LineItem, WithholdingTax};

/// Strategy to generate unit costs (0.00 to 100,000.00).
fn unit_cost() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate positive quantities (0.01 to 10,000.00).
fn quantity() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000i64).prop_map(|v| Decimal::new(v, 2))
}

/// Strategy to generate rates (0.00% to 100.00%).
fn rate() -> impl Strategy<Value = Rate> {
    (0i64..=10_000i64).prop_map(|v| Rate::percent(Decimal::new(v, 2)))
}

fn line_item() -> impl Strategy<Value = LineItem> {
    (unit_cost(), unit_cost(), quantity())
        .prop_map(|(material, labor, qty)| LineItem::new("item", material, labor, qty))
}

fn profile() -> impl Strategy<Value = AdjustmentProfile> {
    (rate(), rate(), rate(), rate(), rate()).prop_map(
        |(waste, overhead, contingency, markup, vat)| AdjustmentProfile {
            waste,
            overhead,
            contingency,
            markup,
            vat,
        },
    )
}

fn discount() -> impl Strategy<Value = Option<Discount>> {
    prop_oneof![
        Just(None),
        rate().prop_map(|r| Some(Discount::percent(r.value()))),
        unit_cost().prop_map(|v| Some(Discount::fixed(v))),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Every field follows from the fields before it.
    #[test]
    fn prop_summary_satisfies_chain(
        items in prop::collection::vec(line_item(), 0..20),
        profile in profile(),
        discount in discount(),
        withholding in rate(),
    ) {
        let withholding = WithholdingTax::new(withholding);
        let s = PricingService::compute_summary(
            &items,
            &profile,
            discount.as_ref(),
            Some(&withholding),
        );

        prop_assert_eq!(s.subtotal, s.subtotal_material + s.subtotal_labor);
        prop_assert_eq!(
            s.total_before_markup,
            s.subtotal + s.waste + s.overhead + s.contingency
        );
        prop_assert_eq!(s.total_before_vat, s.total_before_markup + s.markup);
        prop_assert_eq!(s.grand_total, s.total_before_vat + s.vat);
        prop_assert_eq!(s.total_after_discount, s.grand_total - s.discount_amount);

        if withholding.is_active() {
            let amount = s.withholding_amount.unwrap();
            prop_assert_eq!(Some(amount), withholding.rate.checked_of(s.total_before_vat));
            prop_assert_eq!(s.net_payable, Some(s.total_after_discount - amount));
        } else {
            prop_assert_eq!(s.withholding_amount, None);
            prop_assert_eq!(s.net_payable, None);
        }
    }

    /// Identical inputs give field-for-field identical summaries.
    #[test]
    fn prop_summary_is_deterministic(
        items in prop::collection::vec(line_item(), 0..20),
        profile in profile(),
        discount in discount(),
    ) {
        let first = PricingService::compute_summary(&items, &profile, discount.as_ref(), None);
        let second = PricingService::compute_summary(&items, &profile, discount.as_ref(), None);
        prop_assert_eq!(first, second);
    }

    /// Reordering line items does not change the result.
    #[test]
    fn prop_item_order_is_irrelevant(
        items in prop::collection::vec(line_item(), 1..20),
        profile in profile(),
    ) {
        let mut reversed = items.clone();
        reversed.reverse();
        let forward = PricingService::compute_summary(&items, &profile, None, None);
        let backward = PricingService::compute_summary(&reversed, &profile, None, None);
        prop_assert_eq!(forward, backward);
    }

    /// The withholding amount is the same with or without a discount.
    #[test]
    fn prop_withholding_ignores_discount(
        items in prop::collection::vec(line_item(), 1..10),
        profile in profile(),
        discount in discount(),
        rate in rate(),
    ) {
        let withholding = WithholdingTax::new(rate);
        let with_discount = PricingService::compute_summary(
            &items, &profile, discount.as_ref(), Some(&withholding),
        );
        let without_discount = PricingService::compute_summary(
            &items, &profile, None, Some(&withholding),
        );
        prop_assert_eq!(with_discount.withholding_amount, without_discount.withholding_amount);
    }
}
