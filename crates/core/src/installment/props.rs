//! Property-based tests for installment balancing.
//!
//! - Percentages summing to 100 always balance
//! - Last-term correction balances any schedule and is idempotent
//! - Even splits always sum to exactly 100%

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::service::{DEFAULT_EPSILON, InstallmentService};
use super::split::split_evenly;
use super::types::{PaymentTerm, TermValue};

/// Strategy to generate non-negative totals (0.00 to 10,000,000.00).
fn total() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate 1-10 percentages (two decimals) that sum to exactly 100.
fn percentages_summing_to_100() -> impl Strategy<Value = Vec<Decimal>> {
    prop::collection::vec(1u32..100, 1..10).prop_map(|weights| {
        let sum: u32 = weights.iter().sum();
        let mut percentages: Vec<Decimal> = weights
            .iter()
            .map(|w| (Decimal::ONE_HUNDRED * Decimal::from(*w) / Decimal::from(sum)).round_dp(2))
            .collect();
        let assigned: Decimal = percentages[..percentages.len() - 1].iter().copied().sum();
        if let Some(last) = percentages.last_mut() {
            *last = Decimal::ONE_HUNDRED - assigned;
        }
        percentages
    })
}

/// Strategy to generate arbitrary mixed schedules (1-8 terms).
fn mixed_terms() -> impl Strategy<Value = Vec<PaymentTerm>> {
    prop::collection::vec(
        prop_oneof![
            (0i64..10_000i64).prop_map(|v| TermValue::Percent(Decimal::new(v, 2))),
            (0i64..100_000_000i64).prop_map(|v| TermValue::Fixed(Decimal::new(v, 2))),
        ],
        1..8,
    )
    .prop_map(|values| {
        (1u32..)
            .zip(values)
            .map(|(installment, value)| match value {
                TermValue::Percent(p) => PaymentTerm::percent(installment, p, "term"),
                TermValue::Fixed(a) => PaymentTerm::fixed(installment, a, "term"),
            })
            .collect()
    })
}

fn percent_terms(percentages: &[Decimal]) -> Vec<PaymentTerm> {
    (1u32..)
        .zip(percentages)
        .map(|(i, p)| PaymentTerm::percent(i, *p, "term"))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Percentage-only schedules that sum to 100 are balanced.
    #[test]
    fn prop_full_percentages_balance(
        total in total(),
        percentages in percentages_summing_to_100(),
    ) {
        let terms = percent_terms(&percentages);
        let amounts = InstallmentService::allocate(total, &terms);
        let check = InstallmentService::validate(total, &amounts, DEFAULT_EPSILON);
        prop_assert!(check.balanced, "difference {} for {:?}", check.difference, percentages);
    }

    /// After correction any schedule is balanced, and correcting again
    /// changes nothing. A rewritten schedule sums exactly.
    #[test]
    fn prop_rebalance_last_balances_and_is_idempotent(
        total in total(),
        terms in mixed_terms(),
    ) {
        let once = InstallmentService::rebalance_last(total, &terms, DEFAULT_EPSILON);
        let check = InstallmentService::check(total, &once, DEFAULT_EPSILON);
        prop_assert!(check.balanced);
        if once != terms {
            prop_assert_eq!(check.difference, Decimal::ZERO);
        }

        let twice = InstallmentService::rebalance_last(total, &once, DEFAULT_EPSILON);
        prop_assert_eq!(&once, &twice);

        // Only the last term may change.
        let n = terms.len();
        prop_assert_eq!(&once[..n - 1], &terms[..n - 1]);
    }

    /// A 99.99% schedule is fixed by the last-term correction.
    #[test]
    fn prop_rounding_leftover_is_absorbed(total in total()) {
        let terms = percent_terms(&[
            Decimal::new(3333, 2),
            Decimal::new(3333, 2),
            Decimal::new(3333, 2),
        ]);
        let fixed = InstallmentService::rebalance_last(total, &terms, DEFAULT_EPSILON);
        prop_assert!(InstallmentService::check(total, &fixed, DEFAULT_EPSILON).balanced);
        prop_assert_eq!(
            InstallmentService::rebalance_last(total, &fixed, DEFAULT_EPSILON),
            fixed
        );
    }

    /// Even splits cover exactly 100%.
    #[test]
    fn prop_even_split_sums_to_100(count in 1u32..50) {
        let terms = InstallmentService::even_split(count, "Installment").unwrap();
        let sum: Decimal = terms.iter().map(|t| t.value.raw()).sum();
        prop_assert_eq!(sum, Decimal::ONE_HUNDRED);
        prop_assert!(InstallmentService::validate_terms(&terms).is_ok());
    }

    /// Even shares differ by at most one unit.
    #[test]
    fn prop_split_evenly_is_fair(
        total in total(),
        count in 1usize..40,
    ) {
        let shares = split_evenly(total, count, 2);
        prop_assert_eq!(shares.iter().copied().sum::<Decimal>(), total);
        let max = shares.iter().copied().max().unwrap();
        let min = shares.iter().copied().min().unwrap();
        prop_assert!(max - min <= Decimal::new(1, 2));
    }
}
