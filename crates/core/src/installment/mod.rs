//! Installment allocation and balancing.
//!
//! A payable total is partitioned into payment terms, each a percentage of
//! the total or a fixed amount. Imbalance is reported, never raised; the
//! only correction is an explicit rewrite of the last term.

pub mod error;
pub mod service;
pub mod split;
pub mod types;

#[cfg(test)]
mod props;

pub use error::InstallmentError;
pub use service::{DEFAULT_EPSILON, InstallmentService};
pub use split::split_evenly;
pub use types::{BalanceCheck, PaymentTerm, TermValue};
