//! File system entries and plain string items.

use super::time::{parse_local_time, system_time_to_timestamp};
use crate::models::Timestamped;
use crate::{Error, Result};
use std::fmt;
use std::fs::Metadata;
use std::path::{Path, PathBuf};

/// What kind of file system object an entry is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Regular file.
    File,
    /// Directory.
    Dir,
    /// Symbolic link (only when links are not followed).
    Symlink,
    /// Anything else: sockets, fifos, devices.
    Other,
}

impl EntryKind {
    fn from_metadata(metadata: &Metadata) -> Self {
        let file_type = metadata.file_type();
        if file_type.is_symlink() {
            Self::Symlink
        } else if file_type.is_dir() {
            Self::Dir
        } else if file_type.is_file() {
            Self::File
        } else {
            Self::Other
        }
    }

    /// Short lowercase name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Dir => "dir",
            Self::Symlink => "symlink",
            Self::Other => "other",
        }
    }
}

/// Where an item's timestamp comes from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TimeSource {
    /// The entry's modification time.
    #[default]
    ModificationTime,
    /// Parsed from the path's basename with the given strftime format.
    Basename(String),
}

/// A validated path plus the data the classifier needs.
#[derive(Debug, Clone, PartialEq)]
pub struct FileSystemEntry {
    /// Path as given by the user.
    pub path: PathBuf,
    /// Entry type as seen at inspection time.
    pub kind: EntryKind,
    /// Seconds since the Unix epoch.
    pub modtime: f64,
}

impl FileSystemEntry {
    /// Inspects `path` and determines its timestamp.
    ///
    /// With `follow_symlinks` a symbolic link reports the type and
    /// modification time of its target; otherwise those of the link itself.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OperationFailed`] if the path cannot be inspected and
    /// [`Error::InvalidInput`] if the basename does not match the time
    /// format.
    pub fn from_path(
        path: impl Into<PathBuf>,
        source: &TimeSource,
        follow_symlinks: bool,
    ) -> Result<Self> {
        let path = path.into();
        let metadata = if follow_symlinks {
            std::fs::metadata(&path)
        } else {
            std::fs::symlink_metadata(&path)
        }
        .map_err(|e| Error::OperationFailed {
            operation: "inspect_path".to_string(),
            cause: format!("{}: {e}", path.display()),
        })?;

        let modtime = match source {
            TimeSource::ModificationTime => {
                let modified = metadata.modified().map_err(|e| Error::OperationFailed {
                    operation: "read_modification_time".to_string(),
                    cause: format!("{}: {e}", path.display()),
                })?;
                system_time_to_timestamp(modified)
            },
            TimeSource::Basename(format) => time_from_basename(&path, format)?,
        };

        Ok(Self {
            kind: EntryKind::from_metadata(&metadata),
            path,
            modtime,
        })
    }
}

impl Timestamped for FileSystemEntry {
    fn timestamp(&self) -> f64 {
        self.modtime
    }
}

impl fmt::Display for FileSystemEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

/// Parses a local time from the final component of `path`.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] if the path has no UTF-8 basename or the
/// basename does not match `format`.
pub fn time_from_basename(path: &Path, format: &str) -> Result<f64> {
    let basename = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| {
            Error::InvalidInput(format!("'{}' has no UTF-8 basename", path.display()))
        })?;
    parse_local_time(basename, format)
}

/// An arbitrary string whose timestamp is parsed from the string itself.
#[derive(Debug, Clone, PartialEq)]
pub struct TextItem {
    /// The string as given.
    pub text: String,
    /// Seconds since the Unix epoch.
    pub timestamp: f64,
}

impl TextItem {
    /// Parses `text` with a strftime-style format (local time).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if `text` does not match `format`.
    pub fn parse(text: impl Into<String>, format: &str) -> Result<Self> {
        let text = text.into();
        let timestamp = parse_local_time(&text, format)?;
        Ok(Self { text, timestamp })
    }
}

impl Timestamped for TextItem {
    fn timestamp(&self) -> f64 {
        self.timestamp
    }
}

impl fmt::Display for TextItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
