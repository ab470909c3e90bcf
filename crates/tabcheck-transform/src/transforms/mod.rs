//! Built-in transformers.

mod columns;
mod derive;
mod passthrough;
mod strings;

pub use columns::RenameColumns;
pub use derive::DeriveColumn;
pub use passthrough::Passthrough;
pub use strings::{CaseTransform, LetterCase, StripWhitespace};

use crate::transform::TransformFactory;

/// Every built-in transformer as `(name, factory)`, canonical names first.
pub fn builtin_transforms() -> Vec<(&'static str, TransformFactory)> {
    vec![
        ("strip_whitespace", StripWhitespace::build),
        ("case_transform", CaseTransform::build),
        ("rename_columns", RenameColumns::build),
        ("derive_column", DeriveColumn::build),
        ("passthrough", Passthrough::build),
        ("strings_strip_whitespace", StripWhitespace::build),
        ("blank", Passthrough::build),
    ]
}
