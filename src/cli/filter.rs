//! The filter command.
//!
//! Prepares items, classifies them, writes the selected half to the output
//! and optionally applies an action to it. All options arrive in one
//! explicit [`FilterOptions`] value.

use crate::actions::{self, Action, ActionReport};
use crate::input::{FileSystemEntry, Separator, TextItem, TimeSource, read_items};
use crate::models::Timestamped;
use crate::retention::{Partition, RuleSet, classify};
use crate::{Error, Result};
use std::fmt::Display;
use std::io::{Read, Write};
use tracing::{debug, info, instrument, warn};

/// How item arguments are interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemMode {
    /// Items are paths to existing file system entries.
    Paths {
        /// Where the timestamp comes from.
        source: TimeSource,
        /// Inspect symlink targets instead of the links.
        follow_symlinks: bool,
    },
    /// Items are plain strings carrying their own time.
    Strings {
        /// strftime-style format to parse each string with.
        format: String,
    },
}

impl Default for ItemMode {
    fn default() -> Self {
        Self::Paths {
            source: TimeSource::ModificationTime,
            follow_symlinks: false,
        }
    }
}

/// Everything the filter command needs.
#[derive(Debug, Clone, Default)]
pub struct FilterOptions {
    /// Retention rules.
    pub rules: RuleSet,
    /// Items given as arguments.
    pub items: Vec<String>,
    /// Read items from the input stream instead of `items`.
    pub stdin: bool,
    /// Item separator for input and output.
    pub separator: Separator,
    /// Output and act on accepted items instead of rejected ones.
    pub accepted: bool,
    /// Reference time; now when `None`.
    pub reference_time: Option<f64>,
    /// Item interpretation.
    pub mode: ItemMode,
    /// Action to apply to the selected items.
    pub action: Option<Action>,
}

/// Result of a filter run.
#[derive(Debug, Clone, Default)]
pub struct FilterOutcome {
    /// Number of accepted items.
    pub accepted: usize,
    /// Number of rejected items.
    pub rejected: usize,
    /// Action report, if an action was requested.
    pub action: Option<ActionReport>,
}

impl FilterOutcome {
    /// Returns `true` unless an action failed on some entry.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.action.as_ref().is_none_or(ActionReport::is_success)
    }
}

/// Runs the filter command.
///
/// `input` is only read in stdin mode. Selected items are written to
/// `output`, each followed by the separator.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] for contradicting options or unparsable
/// items, [`Error::OperationFailed`] if an item path cannot be inspected or
/// output cannot be written, and classifier errors unchanged.
#[instrument(
    name = "timegaps.cli.filter",
    skip_all,
    fields(rules = %options.rules, stdin = options.stdin, accepted = options.accepted)
)]
pub fn execute<R: Read, W: Write>(
    options: &FilterOptions,
    input: R,
    output: &mut W,
) -> Result<FilterOutcome> {
    validate(options)?;

    let reference_time = options
        .reference_time
        .unwrap_or_else(crate::current_timestamp);
    info!(reference_time, "Using reference time");

    if options.rules.is_empty() {
        warn!("All rule counts are zero, every item will be rejected");
    } else {
        info!(max_accepted = options.rules.total_capacity(), "Rules validated");
    }

    let raw = if options.stdin {
        read_items(input, options.separator)?
    } else {
        options.items.clone()
    };
    info!(items = raw.len(), "Collected items");

    match &options.mode {
        ItemMode::Paths {
            source,
            follow_symlinks,
        } => {
            let entries = raw
                .into_iter()
                .map(|path| FileSystemEntry::from_path(path, source, *follow_symlinks))
                .collect::<Result<Vec<_>>>()?;
            let partition = classify_and_write(entries, reference_time, options, output)?;
            let report = options.action.as_ref().map(|action| {
                actions::perform(action, partition.select(options.accepted))
            });
            Ok(FilterOutcome {
                accepted: partition.accepted.len(),
                rejected: partition.rejected.len(),
                action: report,
            })
        },
        ItemMode::Strings { format } => {
            let items = raw
                .into_iter()
                .map(|text| TextItem::parse(text, format))
                .collect::<Result<Vec<_>>>()?;
            let partition = classify_and_write(items, reference_time, options, output)?;
            Ok(FilterOutcome {
                accepted: partition.accepted.len(),
                rejected: partition.rejected.len(),
                action: None,
            })
        },
    }
}

fn validate(options: &FilterOptions) -> Result<()> {
    if options.stdin && !options.items.is_empty() {
        return Err(Error::InvalidInput(
            "no ITEM must be given when reading from stdin".to_string(),
        ));
    }
    if !options.stdin && options.items.is_empty() {
        return Err(Error::InvalidInput(
            "at least one ITEM must be given unless reading from stdin".to_string(),
        ));
    }
    if options.action.is_some() && matches!(options.mode, ItemMode::Strings { .. }) {
        return Err(Error::InvalidInput(
            "actions require file system items, not plain strings".to_string(),
        ));
    }
    Ok(())
}

fn classify_and_write<T, W>(
    items: Vec<T>,
    reference_time: f64,
    options: &FilterOptions,
    output: &mut W,
) -> Result<Partition<T>>
where
    T: Timestamped + Display,
    W: Write,
{
    let classifications = classify(&items, &options.rules, reference_time)?;
    for (item, classification) in items.iter().zip(&classifications) {
        match classification.bucket {
            Some(bucket) => debug!(
                item = %item,
                bucket = %bucket,
                verdict = ?classification.verdict,
                "Item classified"
            ),
            None => debug!(item = %item, verdict = ?classification.verdict, "Item classified"),
        }
    }

    let partition = Partition::from_verdicts(
        items
            .into_iter()
            .zip(classifications.into_iter().map(|c| c.verdict)),
    );
    info!(
        accepted = partition.accepted.len(),
        rejected = partition.rejected.len(),
        "Filtering completed"
    );

    write_items(partition.select(options.accepted), options.separator, output)?;
    Ok(partition)
}

fn write_items<T: Display, W: Write>(items: &[T], separator: Separator, output: &mut W) -> Result<()> {
    let write_error = |e: std::io::Error| Error::OperationFailed {
        operation: "write_output".to_string(),
        cause: e.to_string(),
    };
    for item in items {
        write!(output, "{item}").map_err(write_error)?;
        output.write_all(&[separator.as_byte()]).map_err(write_error)?;
    }
    output.flush().map_err(write_error)
}
