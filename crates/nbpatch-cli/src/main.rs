//! nbpatch CLI - Prepare Jupyter notebooks for CI execution
//!
//! Recursively patches notebooks under a directory: applies the
//! `test_replace` substitutions declared in cell metadata, clears all
//! execution outputs, and writes a `test_`-prefixed copy of each notebook.

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use nbpatch_core::{
    apply_replacements, clear_outputs, discover, read_notebook, test_output_path, write_notebook,
};
use std::path::{Path, PathBuf};

/// Verbosity level for output control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Verbosity {
    /// Suppress all output except errors
    Quiet,
    /// Normal output (default)
    Normal,
    /// Verbose output with extra details
    Verbose,
}

impl Verbosity {
    /// Create from CLI flags
    const fn from_flags(quiet: bool, verbose: bool) -> Self {
        if quiet {
            Self::Quiet
        } else if verbose {
            Self::Verbose
        } else {
            Self::Normal
        }
    }

    /// Check if output should be shown (not quiet)
    const fn should_show_output(self) -> bool {
        !matches!(self, Self::Quiet)
    }

    /// Check if verbose output is requested
    const fn is_verbose(self) -> bool {
        matches!(self, Self::Verbose)
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "nbpatch",
    about = "Patch Jupyter notebooks for CI test execution",
    long_about = "Patch Jupyter notebooks for CI test execution.\n\
                  \n\
                  Recursively finds *.ipynb files under the given directory, applies the\n\
                  substitutions declared in each cell's `test_replace` metadata (e.g. shrink\n\
                  epoch counts), clears all execution outputs, and writes a test_ prefixed\n\
                  copy next to each notebook. Already-generated test_* copies and notebooks\n\
                  on the exclusion list are skipped.\n\
                  \n\
                  Example cell metadata:\n\
                    {\"test_replace\": {\"epochs = 15\": \"epochs = 1\"}}",
    version
)]
struct Args {
    /// Notebooks root directory (default: current directory)
    #[arg(value_name = "NOTEBOOKS_DIR")]
    root: Option<PathBuf>,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,

    /// Show detailed processing information
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Run the full pipeline but do not write any files
    #[arg(long)]
    dry_run: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let verbosity = Verbosity::from_flags(args.quiet, args.verbose);
    let root = args.root.unwrap_or_else(|| PathBuf::from("."));

    let notebooks = discover(&root)?;
    if verbosity.is_verbose() {
        eprintln!(
            "{} Found {} candidate notebook(s) under {}",
            "Info:".blue().bold(),
            notebooks.len(),
            root.display()
        );
    }

    for path in &notebooks {
        patch_notebook(path, args.dry_run, verbosity)?;
    }

    Ok(())
}

/// Run the per-notebook pipeline: parse, substitute, sanitize, write
///
/// Failures abort the whole run; outputs already written for earlier
/// notebooks are left in place.
fn patch_notebook(path: &Path, dry_run: bool, verbosity: Verbosity) -> Result<()> {
    let mut notebook = read_notebook(path)
        .with_context(|| format!("Failed to load notebook: {}", path.display()))?;

    let applied = apply_replacements(&mut notebook, path)?;
    if verbosity.should_show_output() {
        if applied.is_empty() {
            println!("No replacements found for {}", path.display());
        } else {
            for replacement in &applied {
                println!(
                    "{} {}: {} -> {}",
                    "Processed".green().bold(),
                    path.display(),
                    replacement.source.cyan(),
                    replacement.target.cyan()
                );
            }
        }
    }

    clear_outputs(&mut notebook);

    let dest = test_output_path(path);
    if dry_run {
        if verbosity.should_show_output() {
            println!("Would write {}", dest.display());
        }
        return Ok(());
    }

    write_notebook(&notebook, &dest)
        .with_context(|| format!("Failed to write notebook: {}", dest.display()))?;
    if verbosity.is_verbose() {
        eprintln!("{} Wrote {}", "Info:".blue().bold(), dest.display());
    }

    Ok(())
}
