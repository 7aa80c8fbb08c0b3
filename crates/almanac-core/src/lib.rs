//! Shared building blocks for the almanac workspace.
//!
//! Holds the error type, value types, and runtime configuration that every
//! other crate depends on. Nothing in here performs calendar arithmetic.

pub mod config;
pub mod constants;
pub mod error;
pub mod types;

pub use error::{CoreError, CoreResult};
pub use types::{Classification, DateRange, WeekendDays, WeekendShiftPolicy};
