//! Library components of the `tabcheck` command-line runner.

pub mod logging;
pub mod report;
pub mod settings;
pub mod summary;
