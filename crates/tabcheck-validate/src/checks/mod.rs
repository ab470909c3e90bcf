//! Built-in checks.
//!
//! Each submodule holds one rule family. [`builtin_checks`] lists the names under which
//! they are registered, legacy aliases included.

mod columns;
mod hierarchy;
mod not_empty;
mod nulls;
mod range;

pub use columns::{AdditionalColumns, RequiredColumns};
pub use hierarchy::HierarchyCheck;
pub use not_empty::NotEmpty;
pub use nulls::NullCheck;
pub use range::{ValueBounds, ValueRange};

use crate::check::CheckFactory;

/// Every built-in check as `(name, factory)`, canonical names first.
pub fn builtin_checks() -> Vec<(&'static str, CheckFactory)> {
    vec![
        ("required_columns", RequiredColumns::build),
        ("additional_columns", AdditionalColumns::build),
        ("not_empty", NotEmpty::build),
        ("null_check", NullCheck::build),
        ("value_range", ValueRange::build),
        ("hierarchy_check", HierarchyCheck::build),
        ("is_empty_dataframe", NotEmpty::build),
        ("check_null_values", NullCheck::build),
    ]
}
