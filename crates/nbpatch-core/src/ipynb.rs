use crate::error::{PatchError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// File extension for Jupyter notebooks
pub const NOTEBOOK_EXTENSION: &str = "ipynb";

/// Parsed Jupyter notebook document (nbformat 4.x)
///
/// Unknown top-level keys are captured in `additional` so a notebook
/// survives a read-modify-write cycle without losing fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notebook {
    /// Ordered list of cells in the notebook
    pub cells: Vec<Cell>,
    /// Notebook-level metadata (kernelspec, language_info, ...)
    #[serde(default)]
    pub metadata: Map<String, Value>,
    /// Major format version
    pub nbformat: u32,
    /// Minor format version
    pub nbformat_minor: u32,
    /// Any additional top-level fields, preserved verbatim
    #[serde(flatten)]
    pub additional: Map<String, Value>,
}

/// Individual notebook cell, tagged by `cell_type`
///
/// Only code cells carry outputs and an execution count; markdown and raw
/// cells must not gain those keys on rewrite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cell_type", rename_all = "lowercase")]
pub enum Cell {
    /// Executable code cell
    Code {
        /// Cell identifier (nbformat >= 4.5; omitted when absent)
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<String>,
        /// Cell source content
        source: SourceValue,
        /// Per-cell metadata annotations
        #[serde(default)]
        metadata: Map<String, Value>,
        /// Execution counter, null when the cell has not run
        #[serde(default)]
        execution_count: Option<i64>,
        /// Captured execution outputs
        #[serde(default)]
        outputs: Vec<Value>,
        /// Any additional cell fields, preserved verbatim
        #[serde(flatten)]
        additional: Map<String, Value>,
    },
    /// Markdown documentation cell
    Markdown {
        /// Cell identifier (nbformat >= 4.5; omitted when absent)
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<String>,
        /// Cell source content
        source: SourceValue,
        /// Per-cell metadata annotations
        #[serde(default)]
        metadata: Map<String, Value>,
        /// Any additional cell fields (e.g. attachments), preserved verbatim
        #[serde(flatten)]
        additional: Map<String, Value>,
    },
    /// Raw text cell (no formatting)
    Raw {
        /// Cell identifier (nbformat >= 4.5; omitted when absent)
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<String>,
        /// Cell source content
        source: SourceValue,
        /// Per-cell metadata annotations
        #[serde(default)]
        metadata: Map<String, Value>,
        /// Any additional cell fields, preserved verbatim
        #[serde(flatten)]
        additional: Map<String, Value>,
    },
}

impl Cell {
    /// Cell source, regardless of cell type
    pub fn source(&self) -> &SourceValue {
        match self {
            Self::Code { source, .. } | Self::Markdown { source, .. } | Self::Raw { source, .. } => {
                source
            }
        }
    }

    /// Mutable cell source
    pub fn source_mut(&mut self) -> &mut SourceValue {
        match self {
            Self::Code { source, .. } | Self::Markdown { source, .. } | Self::Raw { source, .. } => {
                source
            }
        }
    }

    /// Per-cell metadata mapping
    pub fn metadata(&self) -> &Map<String, Value> {
        match self {
            Self::Code { metadata, .. }
            | Self::Markdown { metadata, .. }
            | Self::Raw { metadata, .. } => metadata,
        }
    }

    /// Whether this is an executable code cell
    pub const fn is_code(&self) -> bool {
        matches!(self, Self::Code { .. })
    }
}

/// Cell source as stored in the interchange format: either a single string
/// or a list of line strings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SourceValue {
    /// Source as one string
    Text(String),
    /// Source split into lines (each usually newline-terminated)
    Lines(Vec<String>),
}

impl Default for SourceValue {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl SourceValue {
    /// Full source text, joining line lists without a separator
    pub fn to_text(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Lines(lines) => lines.concat(),
        }
    }

    /// Whether the source text contains `needle` verbatim
    pub fn contains(&self, needle: &str) -> bool {
        match self {
            Self::Text(s) => s.contains(needle),
            Self::Lines(_) => self.to_text().contains(needle),
        }
    }
}

impl From<String> for SourceValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

/// Read and parse a Jupyter notebook from a file path
///
/// # Errors
///
/// Returns an error if the file cannot be read or the notebook JSON is
/// malformed.
pub fn read_notebook<P: AsRef<Path>>(path: P) -> Result<Notebook> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    parse_notebook(&content, path)
}

/// Parse a Jupyter notebook from a string; `origin` names the notebook in
/// error messages
///
/// # Errors
///
/// Returns an error if the notebook JSON is malformed.
pub fn parse_notebook(content: &str, origin: &Path) -> Result<Notebook> {
    serde_json::from_str(content).map_err(|source| PatchError::Json {
        notebook: origin.to_path_buf(),
        source,
    })
}

/// Serialize a notebook as pretty-printed UTF-8 JSON and write it to `path`,
/// overwriting any existing file
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn write_notebook(notebook: &Notebook, path: &Path) -> Result<()> {
    let mut serialized =
        serde_json::to_string_pretty(notebook).map_err(|source| PatchError::Json {
            notebook: path.to_path_buf(),
            source,
        })?;
    serialized.push('\n');
    fs::write(path, serialized)?;
    Ok(())
}

/// Destination path for the patched copy: the original filename prefixed
/// with `test_`, in the same directory
pub fn test_output_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!("test_{name}"))
}
