//! Report writers.
//!
//! - [`json`]: the full report, one file per run
//! - [`markdown`]: a human-readable results table
//!
//! ```text
//! json_output_dir/2018-06-07.json
//! markdown_output_dir/2018-06-07.md
//! ```

pub mod json;
pub mod markdown;
