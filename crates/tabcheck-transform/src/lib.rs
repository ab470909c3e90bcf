//! Table transformers for tabcheck transformation stages.
//!
//! A [`Transform`] takes the current table and either returns a new one or fails. The
//! engine chains transformers within a stage and stops at the first failure, keeping the
//! last good table.

pub mod formula;
pub mod transform;
pub mod transforms;

pub use formula::{Formula, FormulaError, FormulaOutput};
pub use transform::{Transform, TransformFactory, TransformFailure, Transformed};
pub use transforms::{
    CaseTransform, DeriveColumn, LetterCase, Passthrough, RenameColumns, StripWhitespace,
    builtin_transforms,
};
