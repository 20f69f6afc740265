//! Rolling Median Degree of a Transaction Graph
//!
//! Each transaction event adds an edge between two participants. After every
//! event the engine reports the median vertex degree of the graph formed by
//! the edges inside a trailing 60-second window of event time.
//!
//! # Window
//!
//! The window is anchored to the newest timestamp seen so far (the
//! high-water mark). An event strictly newer than the mark advances it and
//! evicts edges more than [`WINDOW_SECS`] older. An event at or behind the
//! mark is inserted without eviction, unless it is more than
//! [`WINDOW_SECS`] behind, in which case it is ignored and the previous
//! median is reported again.
//!
//! # Degrees
//!
//! Degrees live in a [`DegreeRegistry`] that keeps a [`DegreeRankIndex`]
//! ordered by `(degree, identifier)`. The index is a size-augmented treap
//! ([`RankTree`]) so the median is two O(log n) rank lookups, not a scan.
//!
//! # Edges
//!
//! An edge is identified by `(time, actor, target)`. Re-sending an active
//! edge is absorbed without touching degrees. `A -> B` and `B -> A` at the
//! same instant are two edges. A self-payment counts twice toward its
//! participant.

mod engine;
mod event;
mod median;
mod rank_index;
pub mod rank_tree;
mod registry;
mod window;

pub use engine::{EngineStats, MedianEngine, WindowSnapshot};
pub use event::{Event, ParticipantId, Timestamp};
pub use median::{Degree, Median};
pub use rank_index::{DegreeRankIndex, RankedParticipant};
pub use rank_tree::RankTree;
pub use registry::DegreeRegistry;
pub use window::{ActiveWindow, Admission};

/// Width of the rolling window in seconds.
pub const WINDOW_SECS: i64 = 60;

/// Digits after the decimal point when a median is displayed.
pub const MEDIAN_PRECISION: usize = 2;
