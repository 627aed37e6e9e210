//! Output generation.
//!
//! # Submodules
//!
//! - [`csv`]: writes the `URL,Title,Summary` result table
//!
//! # Output Structure
//!
//! ```text
//! output/
//! └── perplexity-summary-<input stem>.csv
//! ```

pub mod csv;
