//! Data models.
//!
//! Categories describe the time granularities a retention rule can ask for;
//! [`Timestamped`] is the only thing the classifier needs from an item.

mod category;
mod item;

pub use category::{Category, RECENT_WINDOW_SECS};
pub use item::{Item, Timestamped};
