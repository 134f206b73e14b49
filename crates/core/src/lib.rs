//! Financial computation core for Buildcost.
//!
//! This crate contains pure business logic with ZERO I/O dependencies.
//! Every function is deterministic and reads only its arguments.
//!
//! # Modules
//!
//! - `formula` - Restricted arithmetic formulas
//! - `generation` - Line items from building parameters and formulas
//! - `pricing` - Cascading adjustment pipeline
//! - `installment` - Payment term allocation and balancing

pub mod formula;
pub mod generation;
pub mod installment;
pub mod pricing;
