use crate::error::{PatchError, Result};
use crate::ipynb::Notebook;
use std::path::Path;

/// Marker line prepended to every patched cell
pub const TEST_MARKER: &str = "# Modified for testing";

/// Cell metadata key holding the substitution mapping
pub const REPLACE_KEY: &str = "test_replace";

/// One substitution that was applied to a cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    /// Literal text that was replaced
    pub source: String,
    /// Text it was replaced with
    pub target: String,
}

/// Apply every cell's `test_replace` mapping to its source text
///
/// Substitutions run in mapping iteration order. Each one replaces all
/// occurrences of the source string and prepends the marker line, so a cell
/// with several substitutions stacks several markers. `origin` names the
/// notebook in error messages.
///
/// Returns the applied replacements in order; an empty list means no cell
/// declared a mapping.
///
/// # Errors
///
/// Returns [`PatchError::MissingTarget`] when a declared source string is
/// absent from the cell's current text, or [`PatchError::InvalidReplace`]
/// when the mapping is not an object of strings.
pub fn apply_replacements(notebook: &mut Notebook, origin: &Path) -> Result<Vec<Replacement>> {
    let mut applied = Vec::new();

    for cell in &mut notebook.cells {
        let Some(raw) = cell.metadata().get(REPLACE_KEY) else {
            continue;
        };
        let Some(mapping) = raw.as_object() else {
            return Err(PatchError::InvalidReplace {
                notebook: origin.to_path_buf(),
                detail: format!("expected an object of strings, got {raw}"),
            });
        };

        let mut pairs = Vec::with_capacity(mapping.len());
        for (source, target) in mapping {
            let Some(target) = target.as_str() else {
                return Err(PatchError::InvalidReplace {
                    notebook: origin.to_path_buf(),
                    detail: format!("replacement for '{source}' is not a string"),
                });
            };
            pairs.push((source.clone(), target.to_string()));
        }

        for (source, target) in pairs {
            // Each pair sees the text as left by the previous one,
            // marker line included.
            let text = cell.source().to_text();
            if !text.contains(&source) {
                return Err(PatchError::MissingTarget {
                    notebook: origin.to_path_buf(),
                    needle: source,
                });
            }
            let replaced = text.replace(&source, &target);
            *cell.source_mut() = format!("{TEST_MARKER}\n{replaced}").into();
            applied.push(Replacement { source, target });
        }
    }

    Ok(applied)
}
