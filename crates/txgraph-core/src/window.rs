//! The set of transactions currently inside the rolling window.
//!
//! The window is anchored to its high-water mark: the largest timestamp it
//! holds. Only an event strictly newer than the high-water mark moves the
//! anchor, and only then are old edges evicted. Late events that are still
//! within `WINDOW_SECS` of the anchor are inserted without any eviction
//! check; events further behind are rejected outright.

use std::collections::BTreeSet;

use tracing::{debug, trace};

use crate::event::{Event, Timestamp};
use crate::WINDOW_SECS;

/// Result of offering an event to the window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
    /// More than `WINDOW_SECS` behind the high-water mark. Nothing changed.
    Stale,
    /// The event is now in the window.
    Accepted {
        /// `false` when an identical `(time, actor, target)` event was
        /// already present, so degrees must not be bumped again.
        inserted: bool,
        /// Edges pushed out by this admission, oldest first.
        evicted: Vec<Event>,
    },
}

impl Admission {
    /// Whether the event was taken into the window.
    pub fn is_accepted(&self) -> bool {
        matches!(self, Admission::Accepted { .. })
    }

    /// Whether the event is new to the window (accepted and not a duplicate).
    pub fn is_inserted(&self) -> bool {
        matches!(self, Admission::Accepted { inserted: true, .. })
    }

    /// Edges evicted by this admission.
    pub fn evicted(&self) -> &[Event] {
        match self {
            Admission::Stale => &[],
            Admission::Accepted { evicted, .. } => evicted,
        }
    }
}

/// Time-ordered set of active edges.
#[derive(Debug, Default)]
pub struct ActiveWindow {
    edges: BTreeSet<Event>,
}

impl ActiveWindow {
    /// Create an empty window.
    pub fn new() -> Self {
        Self {
            edges: BTreeSet::new(),
        }
    }

    /// Largest timestamp in the window, if any.
    pub fn high_water_mark(&self) -> Option<Timestamp> {
        self.edges.last().map(|e| e.time)
    }

    /// Offer an event to the window.
    ///
    /// 1. Non-empty window and `event.time` more than `WINDOW_SECS` behind the
    ///    high-water mark: [`Admission::Stale`].
    /// 2. Empty window or `event.time <= high-water mark`: insert, no eviction.
    /// 3. Otherwise evict every edge more than `WINDOW_SECS` older than the
    ///    event, then insert.
    pub fn admit(&mut self, event: Event) -> Admission {
        let Some(high_water) = self.high_water_mark() else {
            let inserted = self.edges.insert(event);
            return Admission::Accepted {
                inserted,
                evicted: Vec::new(),
            };
        };

        if high_water - event.time > WINDOW_SECS {
            debug!(
                time = %event.time,
                high_water = %high_water,
                "Rejected stale event"
            );
            return Admission::Stale;
        }

        if event.time <= high_water {
            trace!(time = %event.time, "Admitted event without advancing window");
            let inserted = self.edges.insert(event);
            return Admission::Accepted {
                inserted,
                evicted: Vec::new(),
            };
        }

        let evicted = self.evict_older_than(event.time);
        if !evicted.is_empty() {
            debug!(
                evicted = evicted.len(),
                high_water = %event.time,
                remaining = self.edges.len(),
                "Advanced window"
            );
        }

        // A strictly newer event cannot already be present.
        let inserted = self.edges.insert(event);
        Admission::Accepted { inserted, evicted }
    }

    fn evict_older_than(&mut self, newest: Timestamp) -> Vec<Event> {
        let mut evicted = Vec::new();
        while let Some(oldest) = self.edges.first() {
            if newest - oldest.time <= WINDOW_SECS {
                break;
            }
            if let Some(edge) = self.edges.pop_first() {
                evicted.push(edge);
            }
        }
        evicted
    }

    /// Active edges, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.edges.iter()
    }

    /// Number of active edges.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Drop every edge.
    pub fn clear(&mut self) {
        self.edges.clear();
    }
}
