//! Common types used across the application.

pub mod id;
pub mod rate;


pub use id::DocumentId;
pub use rate::Rate;
