//! Table ingestion for tabcheck.
//!
//! - **discovery**: walk an input folder and list candidate files
//! - **loader**: read CSV or Parquet files into a Polars `DataFrame`
//! - **writer**: write output tables or copy untouched files

pub mod discovery;
pub mod error;
pub mod loader;
pub mod writer;

pub use discovery::{InputLayout, list_input_files};
pub use error::{IngestError, Result};
pub use loader::{LoadOptions, TableFormat, load_table};
pub use writer::{copy_file, output_path, write_table};
