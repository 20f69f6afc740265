//! Per-participant degrees, kept in lockstep with the rank index.

use std::collections::HashMap;

use tracing::warn;

use crate::event::{Event, ParticipantId};
use crate::median::{Degree, Median};
use crate::rank_index::{DegreeRankIndex, RankedParticipant};
use crate::rank_tree::Iter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Up,
    Down,
}

/// Degree of every participant with at least one active edge.
///
/// A participant is present iff its degree is at least 1. Each change goes
/// through [`DegreeRegistry::step`], which takes the entry out of the rank
/// index, changes the degree, and puts it back (or drops it at zero).
#[derive(Debug, Default)]
pub struct DegreeRegistry {
    degrees: HashMap<ParticipantId, Degree>,
    index: DegreeRankIndex,
}

impl DegreeRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            degrees: HashMap::new(),
            index: DegreeRankIndex::new(),
        }
    }

    /// Add one to a participant's degree, registering it at 1 if absent.
    pub fn increment(&mut self, participant: &ParticipantId) {
        self.step(participant, Step::Up);
    }

    /// Subtract one from a participant's degree, dropping it at 0.
    pub fn decrement(&mut self, participant: &ParticipantId) {
        self.step(participant, Step::Down);
    }

    fn step(&mut self, participant: &ParticipantId, step: Step) {
        let current = self.degrees.get(participant).copied().unwrap_or(0);
        let next = match step {
            Step::Up => current + 1,
            Step::Down => {
                let Some(next) = current.checked_sub(1) else {
                    warn!(participant = %participant, "Decrement of unregistered participant ignored");
                    return;
                };
                next
            }
        };

        if current > 0 {
            self.index.remove(current, participant);
        }
        if next > 0 {
            self.index.insert(next, participant.clone());
            self.degrees.insert(participant.clone(), next);
        } else {
            self.degrees.remove(participant);
        }
    }

    /// Count a newly admitted edge: actor then target.
    ///
    /// A self-paired edge bumps the same participant twice.
    pub fn apply_admission(&mut self, event: &Event) {
        self.increment(&event.actor);
        self.increment(&event.target);
    }

    /// Uncount an evicted edge.
    pub fn apply_eviction(&mut self, event: &Event) {
        self.decrement(&event.actor);
        self.decrement(&event.target);
    }

    /// Median degree across registered participants.
    pub fn median_degree(&self) -> Median {
        self.index.median()
    }

    /// Current degree of a participant, `None` if unregistered.
    pub fn degree_of(&self, participant: &ParticipantId) -> Option<Degree> {
        self.degrees.get(participant).copied()
    }

    /// Sum of all degrees.
    pub fn total_degree(&self) -> u64 {
        self.degrees.values().map(|&d| u64::from(d)).sum()
    }

    /// The rank index.
    pub fn index(&self) -> &DegreeRankIndex {
        &self.index
    }

    /// Participants ascending by `(degree, identifier)`.
    pub fn ranked(&self) -> Iter<'_, RankedParticipant> {
        self.index.iter()
    }

    /// Number of registered participants.
    pub fn len(&self) -> usize {
        self.degrees.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.degrees.is_empty()
    }

    /// Forget every participant.
    pub fn clear(&mut self) {
        self.degrees.clear();
        self.index.clear();
    }
}
