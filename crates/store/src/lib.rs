//! FieldPlan entity store - canonical in-memory site state.
//!
//! One [`ProjectStore`] per project holds tasks, ranked sections,
//! environmental signals, funds, and the activity feed. Single-writer:
//! embedding systems with concurrent callers must serialize access.

#![warn(missing_docs)]

mod error;
mod feed;
mod ordering;
mod project;
mod snapshot;

pub use error::{Result, StoreError};
pub use feed::{ActivityFeed, FEED_CAP};
pub use project::ProjectStore;
