//! Installment service for allocation, validation and correction.

use rust_decimal::Decimal;

use super::error::InstallmentError;
use super::split::split_evenly;
use super::types::{BalanceCheck, PaymentTerm, TermValue};

/// Default tolerance for a balanced schedule: one cent.
pub const DEFAULT_EPSILON: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Installment service for business logic.
pub struct InstallmentService;

impl InstallmentService {
    /// Computes the amount owed for each term, in order.
    ///
    /// Percentage terms take their share of `total`; fixed terms take their
    /// value. Terms are not normalized against each other.
    #[must_use]
    pub fn allocate(total: Decimal, terms: &[PaymentTerm]) -> Vec<Decimal> {
        terms.iter().map(|term| term.amount(total)).collect()
    }

    /// Reconciles allocated amounts against `total`.
    ///
    /// An unbalanced result is a normal outcome for the caller to act on.
    #[must_use]
    pub fn validate(total: Decimal, amounts: &[Decimal], epsilon: Decimal) -> BalanceCheck {
        let total_allocated: Decimal = amounts.iter().copied().sum();
        let difference = total - total_allocated;
        BalanceCheck {
            balanced: difference.abs() <= epsilon,
            total_allocated,
            difference,
        }
    }

    /// `allocate` followed by `validate`.
    #[must_use]
    pub fn check(total: Decimal, terms: &[PaymentTerm], epsilon: Decimal) -> BalanceCheck {
        Self::validate(total, &Self::allocate(total, terms), epsilon)
    }

    /// Rewrites the last term of an unbalanced schedule as a fixed amount
    /// equal to whatever the earlier terms leave of `total`.
    ///
    /// Earlier terms are returned unchanged. A schedule already balanced
    /// within `epsilon` is returned as it is, so applying this twice gives
    /// the same result as applying it once.
    #[must_use]
    pub fn rebalance_last(
        total: Decimal,
        terms: &[PaymentTerm],
        epsilon: Decimal,
    ) -> Vec<PaymentTerm> {
        if Self::check(total, terms, epsilon).balanced {
            return terms.to_vec();
        }

        let mut terms = terms.to_vec();
        if let Some((last, earlier)) = terms.split_last_mut() {
            let earlier_sum: Decimal = earlier.iter().map(|term| term.amount(total)).sum();
            let remainder = total - earlier_sum;

            tracing::info!(
                installment = last.installment,
                %total,
                %remainder,
                "Last installment absorbs rounding difference"
            );
            last.value = TermValue::Fixed(remainder);
        }

        terms
    }

    /// Builds `count` percentage terms that add up to exactly 100%.
    ///
    /// Percentages are split at two decimal places; earlier installments get
    /// the extra hundredths (3 terms: 33.34%, 33.33%, 33.33%).
    ///
    /// # Errors
    ///
    /// Returns `InstallmentError::ZeroCount` when `count` is zero.
    pub fn even_split(count: u32, description_prefix: &str) -> Result<Vec<PaymentTerm>, InstallmentError> {
        if count == 0 {
            return Err(InstallmentError::ZeroCount);
        }

        let shares = split_evenly(Decimal::ONE_HUNDRED, count as usize, 2);
        Ok((1..=count)
            .zip(shares)
            .map(|(installment, percent)| {
                PaymentTerm::percent(
                    installment,
                    percent,
                    format!("{description_prefix} {installment}"),
                )
            })
            .collect())
    }

    /// Checks installment numbering and sign of values.
    ///
    /// # Errors
    ///
    /// Returns `InstallmentError::NonContiguous` if numbers do not run
    /// 1..=n in order, or `InstallmentError::NegativeValue` for a negative
    /// percentage or amount.
    pub fn validate_terms(terms: &[PaymentTerm]) -> Result<(), InstallmentError> {
        for (expected, term) in (1u32..).zip(terms) {
            if term.installment != expected {
                return Err(InstallmentError::NonContiguous {
                    expected,
                    found: term.installment,
                });
            }
            let value = term.value.raw();
            if value < Decimal::ZERO {
                return Err(InstallmentError::NegativeValue {
                    installment: term.installment,
                    value,
                });
            }
        }
        Ok(())
    }
}
