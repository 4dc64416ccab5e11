//! Item preparation.
//!
//! Turns command line arguments or stdin lines into values the classifier
//! can work with:
//!
//! - [`FileSystemEntry`]: a path whose timestamp is its modification time
//!   or is parsed from its basename
//! - [`TextItem`]: a plain string whose timestamp is parsed from the string
//!
//! All file system access of the tool (besides actions) happens here.

mod entry;
mod reader;
mod time;

pub use entry::{EntryKind, FileSystemEntry, TextItem, TimeSource, time_from_basename};
pub use reader::{Separator, read_items};
pub use time::{parse_local_time, parse_reference_time, system_time_to_timestamp};
