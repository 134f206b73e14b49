//! Formula-driven line item generation.
//!
//! Building parameters (area, perimeter, seat count, ...) are bound as
//! formula variables; each item template's quantity formula is evaluated
//! against them. A template whose formula fails is skipped on its own and
//! never given a fallback quantity.

pub mod error;
pub mod service;
pub mod types;

pub use error::GenerationError;
pub use service::QuantityGenerator;
pub use types::{BuildingParameters, GenerationReport, ItemTemplate, SkippedTemplate};
