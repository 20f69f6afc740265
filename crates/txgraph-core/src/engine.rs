//! Per-event orchestration: window admission, degree updates, median.

use tracing::{debug, trace};

use crate::event::{Event, ParticipantId, Timestamp};
use crate::median::{Degree, Median};
use crate::rank_index::RankedParticipant;
use crate::registry::DegreeRegistry;
use crate::window::{ActiveWindow, Admission};

/// Running counters over everything an engine has seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineStats {
    /// Valid events processed (each produced one median).
    pub processed: u64,
    /// Events that failed validity and produced nothing.
    pub invalid: u64,
    /// Events too far behind the high-water mark.
    pub stale: u64,
    /// Accepted events already present in the window.
    pub duplicates: u64,
    /// Edges evicted from the window.
    pub evicted: u64,
}

/// Point-in-time view of the engine state.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowSnapshot {
    /// Largest timestamp in the window.
    pub high_water_mark: Option<Timestamp>,
    /// Active edges, oldest first.
    pub edges: Vec<Event>,
    /// Participants ascending by `(degree, identifier)`.
    pub degrees: Vec<RankedParticipant>,
    /// Most recently emitted median.
    pub median: Median,
}

/// Rolling median of vertex degree over a 60-second event-time window.
///
/// Feed events in arrival order with [`MedianEngine::process`]; every valid
/// event yields exactly one median.
///
/// # Example
///
/// ```
/// use txgraph_core::{Event, MedianEngine, Timestamp};
///
/// let mut engine = MedianEngine::new();
/// let median = engine.process(Event::new(Timestamp::from_secs(1_460_000_000), "alice", "bob"));
/// assert_eq!(median.map(|m| m.to_string()), Some("1.00".to_string()));
/// ```
#[derive(Debug, Default)]
pub struct MedianEngine {
    window: ActiveWindow,
    registry: DegreeRegistry,
    last_median: Median,
    stats: EngineStats,
}

impl MedianEngine {
    /// Create an empty engine. The initial median is zero.
    pub fn new() -> Self {
        Self {
            window: ActiveWindow::new(),
            registry: DegreeRegistry::new(),
            last_median: Median::ZERO,
            stats: EngineStats::default(),
        }
    }

    /// Process one event.
    ///
    /// - invalid event: `None`, nothing changes
    /// - stale event: the previous median, nothing changes
    /// - otherwise: evictions are uncounted, the event is counted unless it
    ///   duplicates an active edge, and the recomputed median is returned
    pub fn process(&mut self, event: Event) -> Option<Median> {
        if !event.is_valid() {
            self.stats.invalid += 1;
            debug!(?event, "Skipped invalid event");
            return None;
        }
        self.stats.processed += 1;

        match self.window.admit(event.clone()) {
            Admission::Stale => {
                self.stats.stale += 1;
            }
            Admission::Accepted { inserted, evicted } => {
                for edge in &evicted {
                    self.registry.apply_eviction(edge);
                }
                self.stats.evicted += evicted.len() as u64;

                if inserted {
                    self.registry.apply_admission(&event);
                } else {
                    self.stats.duplicates += 1;
                    debug!(?event, "Absorbed duplicate event");
                }

                self.last_median = self.registry.median_degree();
                trace!(
                    time = %event.time,
                    participants = self.registry.len(),
                    edges = self.window.len(),
                    median = %self.last_median,
                    "Processed event"
                );
            }
        }

        Some(self.last_median)
    }

    /// Most recently computed median.
    pub fn last_median(&self) -> Median {
        self.last_median
    }

    /// Counters since creation or the last reset.
    pub fn stats(&self) -> EngineStats {
        self.stats
    }

    /// Largest timestamp in the window.
    pub fn high_water_mark(&self) -> Option<Timestamp> {
        self.window.high_water_mark()
    }

    /// Current degree of a participant.
    pub fn degree_of(&self, participant: &ParticipantId) -> Option<Degree> {
        self.registry.degree_of(participant)
    }

    /// Number of participants with a non-zero degree.
    pub fn participants(&self) -> usize {
        self.registry.len()
    }

    /// Number of active edges.
    pub fn len(&self) -> usize {
        self.window.len()
    }

    /// Check if the window is empty.
    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    /// The active window.
    pub fn window(&self) -> &ActiveWindow {
        &self.window
    }

    /// The degree registry.
    pub fn registry(&self) -> &DegreeRegistry {
        &self.registry
    }

    /// Copy out the full state.
    pub fn snapshot(&self) -> WindowSnapshot {
        WindowSnapshot {
            high_water_mark: self.window.high_water_mark(),
            edges: self.window.iter().cloned().collect(),
            degrees: self.registry.ranked().cloned().collect(),
            median: self.last_median,
        }
    }

    /// Return to the empty state with a zero median.
    pub fn reset(&mut self) {
        self.window.clear();
        self.registry.clear();
        self.last_median = Median::ZERO;
        self.stats = EngineStats::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const BASE: i64 = 1_460_000_000;

    fn at(offset: i64, actor: &str, target: &str) -> Event {
        Event::new(Timestamp::from_secs(BASE + offset), actor, target)
    }

    fn run(engine: &mut MedianEngine, events: Vec<Event>) -> Vec<String> {
        events
            .into_iter()
            .filter_map(|e| engine.process(e))
            .map(|m| m.to_string())
            .collect()
    }

    #[test]
    fn eviction_scenario() {
        let mut engine = MedianEngine::new();
        let out = run(
            &mut engine,
            vec![at(0, "A", "B"), at(10, "C", "D"), at(65, "A", "C")],
        );
        assert_eq!(out, vec!["1.00", "1.00", "1.00"]);
        assert_eq!(engine.degree_of(&"C".into()), Some(2));
        assert_eq!(engine.degree_of(&"D".into()), Some(1));
        assert_eq!(engine.degree_of(&"A".into()), Some(1));
        assert_eq!(engine.degree_of(&"B".into()), None);
        assert_eq!(engine.stats().evicted, 1);
    }

    #[test]
    fn shared_actor_scenario() {
        let mut engine = MedianEngine::new();
        let out = run(&mut engine, vec![at(0, "A", "B"), at(5, "A", "C")]);
        assert_eq!(out, vec!["1.00", "1.00"]);
    }

    #[test]
    fn even_count_averages() {
        let mut engine = MedianEngine::new();
        let out = run(
            &mut engine,
            vec![at(0, "A", "B"), at(1, "A", "C"), at(2, "A", "D"), at(3, "E", "F")],
        );
        // {A:3, B:1, C:1, D:1}, then {A:3, B:1, C:1, D:1, E:1, F:1}
        assert_eq!(out, vec!["1.00", "1.00", "1.00", "1.00"]);

        let out = run(&mut engine, vec![at(4, "B", "C")]);
        // {B:2, C:2, D:1, E:1, F:1, A:3} -> 1,1,1,2,2,3
        assert_eq!(out, vec!["1.50"]);
    }

    #[test]
    fn self_pair_alone() {
        let mut engine = MedianEngine::new();
        assert_eq!(
            engine.process(at(0, "A", "A")).map(|m| m.to_string()),
            Some("2.00".to_string())
        );
    }

    #[test]
    fn invalid_event_emits_nothing() {
        let mut engine = MedianEngine::new();
        let out = run(
            &mut engine,
            vec![at(0, "A", "B"), at(1, "", "C"), at(2, "C", "D")],
        );
        assert_eq!(out.len(), 2);
        assert_eq!(engine.stats().invalid, 1);
        assert_eq!(engine.participants(), 4);
    }

    #[test]
    fn undefined_time_is_invalid() {
        let mut engine = MedianEngine::new();
        assert_eq!(engine.process(Event::new(Timestamp::UNSET, "A", "B")), None);
        assert!(engine.is_empty());
    }

    #[test]
    fn stale_event_repeats_previous_median() {
        let mut engine = MedianEngine::new();
        let out = run(
            &mut engine,
            vec![at(0, "A", "B"), at(61, "A", "C"), at(62, "A", "D")],
        );
        let before = engine.snapshot();

        let stale = engine.process(at(1, "X", "Y")).map(|m| m.to_string());
        assert_eq!(stale.as_deref(), out.last().map(String::as_str));
        assert_eq!(engine.snapshot(), before);
        assert_eq!(engine.stats().stale, 1);
    }

    #[test]
    fn duplicate_does_not_double_count() {
        let mut engine = MedianEngine::new();
        engine.process(at(0, "A", "B"));
        engine.process(at(0, "A", "B"));
        assert_eq!(engine.degree_of(&"A".into()), Some(1));
        assert_eq!(engine.len(), 1);
        assert_eq!(engine.stats().duplicates, 1);
    }

    #[test]
    fn duplicate_with_reversed_roles_is_a_new_edge() {
        let mut engine = MedianEngine::new();
        engine.process(at(0, "A", "B"));
        engine.process(at(0, "B", "A"));
        assert_eq!(engine.degree_of(&"A".into()), Some(2));
        assert_eq!(engine.len(), 2);
    }

    #[test]
    fn reset_returns_to_empty() {
        let mut engine = MedianEngine::new();
        engine.process(at(0, "A", "B"));
        engine.reset();
        assert!(engine.is_empty());
        assert_eq!(engine.participants(), 0);
        assert_eq!(engine.last_median(), Median::ZERO);
        assert_eq!(engine.stats(), EngineStats::default());
    }

    #[test]
    fn snapshot_lists_edges_and_ranking() {
        let mut engine = MedianEngine::new();
        engine.process(at(5, "A", "C"));
        engine.process(at(0, "A", "B"));
        let snapshot = engine.snapshot();
        assert_eq!(snapshot.high_water_mark, Some(Timestamp::from_secs(BASE + 5)));
        assert_eq!(snapshot.edges, vec![at(0, "A", "B"), at(5, "A", "C")]);
        let ranked: Vec<_> = snapshot
            .degrees
            .iter()
            .map(|e| (e.participant.as_str(), e.degree))
            .collect();
        assert_eq!(ranked, vec![("B", 1), ("C", 1), ("A", 2)]);
    }

    fn arb_event() -> impl Strategy<Value = Event> {
        let names = prop::sample::select(vec!["a", "b", "c", "d", "e", "f"]);
        (0i64..240, names.clone(), names).prop_map(|(t, a, b)| at(t, a, b))
    }

    proptest! {
        #[test]
        fn degree_sum_is_twice_the_edge_count(events in prop::collection::vec(arb_event(), 0..120)) {
            let mut engine = MedianEngine::new();
            for event in events {
                engine.process(event);
                let edges = engine.window().len() as u64;
                prop_assert_eq!(engine.registry().total_degree(), 2 * edges);
                prop_assert_eq!(engine.registry().len(), engine.registry().index().len());
            }
        }

        #[test]
        fn readmitting_an_active_edge_changes_nothing(events in prop::collection::vec(arb_event(), 1..60), pick in any::<prop::sample::Index>()) {
            let mut engine = MedianEngine::new();
            for event in events {
                engine.process(event);
            }
            let active: Vec<Event> = engine.window().iter().cloned().collect();
            prop_assume!(!active.is_empty());
            let again = pick.get(&active).clone();

            let before = engine.snapshot();
            engine.process(again);
            let after = engine.snapshot();
            prop_assert_eq!(after.edges, before.edges);
            prop_assert_eq!(after.degrees, before.degrees);
        }

        #[test]
        fn non_increasing_time_never_evicts(events in prop::collection::vec(arb_event(), 1..80)) {
            let mut engine = MedianEngine::new();
            for event in events {
                let high_water = engine.high_water_mark();
                let evicted_before = engine.stats().evicted;
                let time = event.time;
                engine.process(event);
                if high_water.map_or(true, |hw| time <= hw) {
                    prop_assert_eq!(engine.stats().evicted, evicted_before);
                }
            }
        }

        #[test]
        fn every_valid_event_yields_one_median(events in prop::collection::vec(arb_event(), 0..80)) {
            let mut engine = MedianEngine::new();
            let count = events.len();
            let emitted = events.into_iter().filter_map(|e| engine.process(e)).count();
            prop_assert_eq!(emitted, count);
        }
    }
}
