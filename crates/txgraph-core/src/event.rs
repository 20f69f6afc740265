//! Transaction events and the value types they are built from.
//!
//! An [`Event`] is one edge of the transaction graph: an actor paid a target
//! at a point in event time. Events are totally ordered by
//! `(time, actor, target)`, which is also the identity the active window uses
//! to collapse exact duplicates.

use std::fmt;
use std::ops::Sub;
use std::sync::Arc;

/// A point in event time, in whole seconds since the Unix epoch.
///
/// `Timestamp::UNSET` (zero) marks a timestamp that was never decoded and is
/// never valid on an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Timestamp(pub i64);

impl Timestamp {
    /// The undefined instant.
    pub const UNSET: Self = Self(0);

    /// Create a timestamp from seconds since the epoch.
    pub const fn from_secs(secs: i64) -> Self {
        Self(secs)
    }

    /// Seconds since the epoch.
    pub const fn as_secs(&self) -> i64 {
        self.0
    }

    /// Whether this is a defined (non-zero) instant.
    pub const fn is_defined(&self) -> bool {
        self.0 != 0
    }
}

impl Sub for Timestamp {
    type Output = i64;

    /// Signed distance in seconds, `self - rhs`.
    fn sub(self, rhs: Self) -> i64 {
        self.0.saturating_sub(rhs.0)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a graph participant (a vertex).
///
/// Cheap to clone: the registry, the rank index and every windowed event
/// share the same allocation.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ParticipantId(Arc<str>);

impl ParticipantId {
    /// Create an identifier. Empty identifiers are representable but make
    /// any event carrying them invalid.
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the identifier is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", &*self.0)
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ParticipantId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for ParticipantId {
    fn from(name: String) -> Self {
        Self(Arc::from(name))
    }
}

impl AsRef<str> for ParticipantId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ParticipantId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ParticipantId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::from)
    }
}

/// One transaction: `actor` paid `target` at `time`.
///
/// Field order matters: the derived ordering is `(time, actor, target)`,
/// so the active window iterates oldest first.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Event {
    /// When the transaction happened.
    pub time: Timestamp,
    /// The paying participant.
    pub actor: ParticipantId,
    /// The receiving participant.
    pub target: ParticipantId,
}

impl Event {
    /// Create an event. Validity is not checked here; see [`Event::is_valid`].
    pub fn new(
        time: Timestamp,
        actor: impl Into<ParticipantId>,
        target: impl Into<ParticipantId>,
    ) -> Self {
        Self {
            time,
            actor: actor.into(),
            target: target.into(),
        }
    }

    /// An event is valid iff both identifiers are non-empty and the
    /// timestamp is defined.
    pub fn is_valid(&self) -> bool {
        !self.actor.is_empty() && !self.target.is_empty() && self.time.is_defined()
    }

    /// Whether the actor paid themselves.
    pub fn is_self_pair(&self) -> bool {
        self.actor == self.target
    }
}
