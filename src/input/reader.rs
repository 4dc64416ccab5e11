//! Reading item strings from a stream.

use crate::{Error, Result};
use std::io::Read;

/// Separator between items on input and output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Separator {
    /// `\n`
    #[default]
    Newline,
    /// `\0`, for paths that may contain newlines.
    Nul,
}

impl Separator {
    /// Picks the separator for the `--nullsep` flag.
    #[must_use]
    pub const fn from_nullsep(nullsep: bool) -> Self {
        if nullsep { Self::Nul } else { Self::Newline }
    }

    /// The separator byte.
    #[must_use]
    pub const fn as_byte(self) -> u8 {
        match self {
            Self::Newline => b'\n',
            Self::Nul => b'\0',
        }
    }
}

/// Reads separator-delimited items from `reader`.
///
/// A single trailing separator is allowed. Empty items anywhere else are an
/// error, as is input that is not valid UTF-8.
///
/// # Errors
///
/// Returns [`Error::OperationFailed`] on read errors and
/// [`Error::InvalidInput`] for empty items or invalid UTF-8.
pub fn read_items<R: Read>(mut reader: R, separator: Separator) -> Result<Vec<String>> {
    let mut buffer = Vec::new();
    reader
        .read_to_end(&mut buffer)
        .map_err(|e| Error::OperationFailed {
            operation: "read_items".to_string(),
            cause: e.to_string(),
        })?;
    let text = String::from_utf8(buffer)
        .map_err(|e| Error::InvalidInput(format!("input is not valid UTF-8: {e}")))?;

    if text.is_empty() {
        return Ok(Vec::new());
    }

    let sep = char::from(separator.as_byte());
    let body = text.strip_suffix(sep).unwrap_or(&text);
    body.split(sep)
        .enumerate()
        .map(|(index, item)| {
            if item.is_empty() {
                Err(Error::InvalidInput(format!(
                    "item {} read from input is empty",
                    index + 1
                )))
            } else {
                Ok(item.to_string())
            }
        })
        .collect()
}
