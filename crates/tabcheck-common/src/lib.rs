//! Cell helpers shared by the tabcheck validators and transformers.
//!
//! [`cells`] reads individual values as text or numbers; [`nulls`] decides which of them
//! count as null under a configured token set.

pub mod cells;
pub mod nulls;

pub use cells::{cell_at, cell_number, cell_text, format_number};
pub use nulls::{NullCount, NullTokenSet, is_native_missing};
