use crate::ipynb::{Cell, Notebook};

/// Cell metadata keys dropped alongside outputs, so cleared notebooks stay
/// diff-stable across interactive sessions
const DROPPED_METADATA_KEYS: &[&str] = &["collapsed", "scrolled"];

/// Clear all execution results from a notebook in place
///
/// Every code cell loses its outputs and execution counter; markdown and
/// raw cells are untouched.
pub fn clear_outputs(notebook: &mut Notebook) {
    for cell in &mut notebook.cells {
        if let Cell::Code {
            execution_count,
            outputs,
            metadata,
            ..
        } = cell
        {
            *execution_count = None;
            outputs.clear();
            for key in DROPPED_METADATA_KEYS {
                metadata.remove(*key);
            }
        }
    }
}
