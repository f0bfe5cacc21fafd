//! Common types used across the application.

pub mod id;
pub mod money;
pub mod pagination;

pub use id::*;
pub use money::{display_value, format_amount, format_plain};
pub use pagination::PageRequest;
