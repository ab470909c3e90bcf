//! Field checks for tabcheck validation stages.
//!
//! Every check is built once from its configuration parameters by a [`CheckFactory`] and
//! then run against any number of tables. Checks never mutate the table and always scan
//! all rows so that every violation is reported, not just the first.

pub mod check;
pub mod checks;
mod params;

pub use check::{Check, CheckFactory, missing_columns};
pub use checks::{
    AdditionalColumns, HierarchyCheck, NotEmpty, NullCheck, RequiredColumns, ValueBounds,
    ValueRange, builtin_checks,
};
