//! Installment data types.

use buildcost_shared::types::Rate;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How much a payment term asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum TermValue {
    /// Percentage of the total.
    Percent(Decimal),
    /// Fixed amount.
    Fixed(Decimal),
}

impl TermValue {
    /// Amount owed for this term against `total`.
    ///
    /// A percentage share that cannot be represented counts as zero.
    #[must_use]
    pub fn amount(self, total: Decimal) -> Decimal {
        match self {
            Self::Percent(value) => Rate::percent(value).checked_of(total).unwrap_or_else(|| {
                tracing::warn!(percent = %value, %total, "Installment share out of range");
                Decimal::ZERO
            }),
            Self::Fixed(value) => value,
        }
    }

    /// The raw percentage or fixed amount.
    #[must_use]
    pub const fn raw(self) -> Decimal {
        match self {
            Self::Percent(value) | Self::Fixed(value) => value,
        }
    }
}

/// One scheduled partial payment.
///
/// The payment-status fields are filled in by the receipt workflow and are
/// carried through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentTerm {
    /// 1-based installment number.
    pub installment: u32,
    /// Percentage or fixed amount.
    #[serde(flatten)]
    pub value: TermValue,
    /// Description (e.g., "Deposit", "On completion").
    #[serde(default)]
    pub description: String,
    /// Optional due date.
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    /// Whether the installment has been paid.
    #[serde(default)]
    pub paid: bool,
    /// Date the payment was received.
    #[serde(default)]
    pub paid_date: Option<NaiveDate>,
    /// Amount actually received.
    #[serde(default)]
    pub paid_amount: Option<Decimal>,
    /// Receipt reference.
    #[serde(default)]
    pub receipt_number: Option<String>,
}

impl PaymentTerm {
    /// Creates an unpaid percentage term.
    #[must_use]
    pub fn percent(installment: u32, percent: Decimal, description: impl Into<String>) -> Self {
        Self::with_value(installment, TermValue::Percent(percent), description.into())
    }

    /// Creates an unpaid fixed-amount term.
    #[must_use]
    pub fn fixed(installment: u32, amount: Decimal, description: impl Into<String>) -> Self {
        Self::with_value(installment, TermValue::Fixed(amount), description.into())
    }

    fn with_value(installment: u32, value: TermValue, description: String) -> Self {
        Self {
            installment,
            value,
            description,
            due_date: None,
            paid: false,
            paid_date: None,
            paid_amount: None,
            receipt_number: None,
        }
    }

    /// Sets the due date.
    #[must_use]
    pub fn due_on(mut self, date: NaiveDate) -> Self {
        self.due_date = Some(date);
        self
    }

    /// Amount owed for this term against `total`.
    #[must_use]
    pub fn amount(&self, total: Decimal) -> Decimal {
        self.value.amount(total)
    }
}

/// Result of reconciling term amounts against a total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceCheck {
    /// True when the difference is within tolerance.
    pub balanced: bool,
    /// Σ term amounts.
    pub total_allocated: Decimal,
    /// Total minus allocated; positive means under-allocated.
    pub difference: Decimal,
}
