//! # nbpatch-core
//!
//! Library for preparing Jupyter notebooks (.ipynb, nbformat 4.x) for CI
//! execution:
//! - discover notebooks under a directory tree, skipping generated test
//!   copies and an exclusion list
//! - apply metadata-directed source substitutions (the `test_replace`
//!   per-cell mapping) to shrink test workloads
//! - clear execution outputs and counters
//! - write the result next to the original as `test_<name>.ipynb`
//!
//! ## Example
//!
//! ```no_run
//! use nbpatch_core::{apply_replacements, clear_outputs, read_notebook,
//!                    test_output_path, write_notebook};
//! use std::path::Path;
//!
//! let path = Path::new("demo.ipynb");
//! let mut notebook = read_notebook(path)?;
//! let applied = apply_replacements(&mut notebook, path)?;
//! clear_outputs(&mut notebook);
//! write_notebook(&notebook, &test_output_path(path))?;
//! println!("{} substitutions applied", applied.len());
//! # Ok::<(), nbpatch_core::PatchError>(())
//! ```

/// Error types for notebook patching
pub mod error;
/// Jupyter notebook (ipynb) data model and (de)serialization
pub mod ipynb;
/// Metadata-directed source substitution
pub mod patch;
/// Execution output clearing
pub mod sanitize;
/// Notebook discovery under a directory tree
pub mod scanner;

pub use error::{PatchError, Result};
pub use ipynb::{
    parse_notebook, read_notebook, test_output_path, write_notebook, Cell, Notebook, SourceValue,
    NOTEBOOK_EXTENSION,
};
pub use patch::{apply_replacements, Replacement, REPLACE_KEY, TEST_MARKER};
pub use sanitize::clear_outputs;
pub use scanner::{discover, is_candidate, EXCLUDED_NOTEBOOKS, TEST_PREFIX};
