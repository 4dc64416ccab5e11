//! Actions on classified file system entries.
//!
//! Actions run after classification and only in file system mode. A failure
//! on one entry is logged and recorded; the remaining entries are still
//! processed.
//!
//! # Example
//!
//! ```rust,ignore
//! use timegaps::actions::{Action, perform};
//!
//! let action = Action::move_to("/backups/expired")?;
//! let report = perform(&action, &partition.rejected);
//! if !report.is_success() {
//!     eprintln!("{}", report.summary());
//! }
//! ```

use crate::input::{EntryKind, FileSystemEntry};
use crate::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

/// What to do with the selected entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Remove the entries.
    Delete {
        /// Also remove non-empty directories.
        recursive: bool,
    },
    /// Move the entries into a directory, keeping their basenames.
    Move {
        /// Destination directory.
        target: PathBuf,
    },
}

impl Action {
    /// Creates a move action after checking that `target` is a directory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if `target` is not a directory.
    pub fn move_to(target: impl Into<PathBuf>) -> Result<Self> {
        let target = target.into();
        if !target.is_dir() {
            return Err(Error::InvalidInput(format!(
                "move target is not a directory: '{}'",
                target.display()
            )));
        }
        Ok(Self::Move { target })
    }

    /// Short name for logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Delete { .. } => "delete",
            Self::Move { .. } => "move",
        }
    }
}

/// Outcome of applying an action to a batch of entries.
#[derive(Debug, Clone, Default)]
pub struct ActionReport {
    /// Entries the action succeeded on.
    pub succeeded: usize,
    /// Entries the action failed on, with the reason.
    pub failed: Vec<(PathBuf, String)>,
}

impl ActionReport {
    /// Returns `true` if no entry failed.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Human-readable one-line summary.
    #[must_use]
    pub fn summary(&self) -> String {
        if self.failed.is_empty() {
            format!("{} entries processed", self.succeeded)
        } else {
            format!(
                "{} entries processed, {} failed",
                self.succeeded,
                self.failed.len()
            )
        }
    }
}

/// Applies `action` to every entry.
#[instrument(
    name = "timegaps.actions.perform",
    skip(entries),
    fields(action = action.name(), entries = entries.len())
)]
pub fn perform(action: &Action, entries: &[FileSystemEntry]) -> ActionReport {
    let mut report = ActionReport::default();

    for entry in entries {
        let outcome = match action {
            Action::Delete { recursive } => delete_entry(entry, *recursive),
            Action::Move { target } => move_entry(entry, target),
        };
        match outcome {
            Ok(()) => {
                debug!(
                    path = %entry.path.display(),
                    kind = entry.kind.as_str(),
                    "Action applied"
                );
                report.succeeded += 1;
            },
            Err(e) => {
                warn!(path = %entry.path.display(), error = %e, "Action failed");
                report.failed.push((entry.path.clone(), e.to_string()));
            },
        }
    }

    metrics::counter!("timegaps_action_failures_total", "action" => action.name())
        .increment(report.failed.len() as u64);
    info!(
        succeeded = report.succeeded,
        failed = report.failed.len(),
        "Action completed"
    );
    report
}

fn delete_entry(entry: &FileSystemEntry, recursive: bool) -> Result<()> {
    // `kind` describes the link target when symlinks are followed; the link
    // itself is what gets removed.
    let is_link = fs::symlink_metadata(&entry.path).map(|m| m.file_type().is_symlink());
    let result = match (is_link, entry.kind) {
        (Err(e), _) => Err(e),
        (Ok(true), _) => fs::remove_file(&entry.path),
        (Ok(false), EntryKind::Dir) if recursive => fs::remove_dir_all(&entry.path),
        (Ok(false), EntryKind::Dir) => fs::remove_dir(&entry.path),
        (Ok(false), EntryKind::File | EntryKind::Symlink | EntryKind::Other) => {
            fs::remove_file(&entry.path)
        },
    };
    result.map_err(|e| Error::OperationFailed {
        operation: "delete".to_string(),
        cause: format!("{}: {e}", entry.path.display()),
    })
}

fn move_entry(entry: &FileSystemEntry, target: &Path) -> Result<()> {
    let Some(name) = entry.path.file_name() else {
        return Err(Error::InvalidInput(format!(
            "cannot move '{}': path has no basename",
            entry.path.display()
        )));
    };
    let destination = target.join(name);
    if fs::symlink_metadata(&destination).is_ok() {
        return Err(Error::OperationFailed {
            operation: "move".to_string(),
            cause: format!("'{}' already exists", destination.display()),
        });
    }
    fs::rename(&entry.path, &destination).map_err(|e| Error::OperationFailed {
        operation: "move".to_string(),
        cause: format!(
            "{} -> {}: {e}",
            entry.path.display(),
            destination.display()
        ),
    })
}
