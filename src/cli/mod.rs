//! Command line support.
//!
//! The binary parses arguments with `clap` and turns them into a
//! [`FilterOptions`] value; everything after that lives here so it can be
//! exercised without spawning a process.

mod filter;

pub use filter::{FilterOptions, FilterOutcome, ItemMode, execute};

/// Long help describing how items are classified.
pub const CLASSIFICATION_HELP: &str = "\
Classification method:
  Each item is classified as accepted or rejected based on its timestamp and
  the RULES. For the rules 'hours12,days5,weeks4' the newest item is accepted
  from each of the last 12 hours, each of the last 5 days and each of the
  last 4 weeks; everything else is rejected.

  An item is X units old if it is at least X and less than X+1 units older
  than the reference time (default: now). Units are linear:

      hours:  60 minutes (    3600 seconds)
      days:   24 hours   (   86400 seconds)
      weeks:   7 days    (  604800 seconds)
      months: 30 days    ( 2592000 seconds)
      years: 365 days    (31536000 seconds)

  Younger categories take priority where rules overlap. With 'days10,weeks1'
  an 8 day old item is claimed by the days rule and never competes for the
  1-week slot; an 11 day old item can win the 1-week slot.

  The special category 'recent' covers items younger than one hour; its
  count selects the newest such items.

Output:
  Rejected items are written to stdout (accepted ones with --accepted),
  separated by newlines or by NUL with --nullsep. Logs go to stderr.";
