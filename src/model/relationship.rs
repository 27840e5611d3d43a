use serde::{Deserialize, Serialize};

use super::character::CharacterId;
use super::date::SimDate;

/// Maximum history entries retained per relationship record. Oldest entries
/// are dropped first.
pub const HISTORY_LIMIT: usize = 10;

/// Tag given to records created lazily by a first interaction.
pub const DEFAULT_KIND: &str = "acquaintance";

/// Discrete standing band derived from a relationship value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipStatus {
    Hostile,
    Unfriendly,
    Neutral,
    Friendly,
    Allied,
}

impl RelationshipStatus {
    /// Band for a relationship value (0–100).
    pub fn from_value(value: i32) -> Self {
        match value {
            v if v < 20 => RelationshipStatus::Hostile,
            v if v < 40 => RelationshipStatus::Unfriendly,
            v if v < 60 => RelationshipStatus::Neutral,
            v if v < 80 => RelationshipStatus::Friendly,
            _ => RelationshipStatus::Allied,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RelationshipStatus::Hostile => "Hostile",
            RelationshipStatus::Unfriendly => "Unfriendly",
            RelationshipStatus::Neutral => "Neutral",
            RelationshipStatus::Friendly => "Friendly",
            RelationshipStatus::Allied => "Allied",
        }
    }
}

/// One recorded change on a relationship.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub date: SimDate,
    pub event: String,
    pub delta: i32,
}

/// Directed record of how `source` regards `target`. Not symmetric: A's
/// opinion of B is a different record from B's opinion of A.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationshipRecord {
    pub source: CharacterId,
    pub target: CharacterId,
    /// Affinity, always within [0, 100].
    pub value: i32,
    /// Always consistent with `value`.
    pub status: RelationshipStatus,
    /// Free-form tag ("family", "acquaintance", "rival", ...).
    pub kind: String,
    /// Last recorded cause of change.
    pub reason: String,
    /// Coin owed: positive means `source` owes `target`. Independent of `value`.
    pub debt: i64,
    pub last_interaction: SimDate,
    /// Most recent changes, bounded to [`HISTORY_LIMIT`] entries.
    pub history: Vec<HistoryEntry>,
}

impl RelationshipRecord {
    /// Fresh record at the given affinity (clamped), with derived status and
    /// empty history.
    pub fn new(source: CharacterId, target: CharacterId, value: i32, date: SimDate) -> Self {
        let value = value.clamp(0, 100);
        Self {
            source,
            target,
            value,
            status: RelationshipStatus::from_value(value),
            kind: DEFAULT_KIND.to_string(),
            reason: String::new(),
            debt: 0,
            last_interaction: date,
            history: Vec::new(),
        }
    }

    /// Restore the record invariants after a blind write: clamp `value`,
    /// recompute `status`, trim `history`.
    pub fn normalize(&mut self) {
        self.value = self.value.clamp(0, 100);
        self.status = RelationshipStatus::from_value(self.value);
        if self.history.len() > HISTORY_LIMIT {
            let excess = self.history.len() - HISTORY_LIMIT;
            self.history.drain(..excess);
        }
    }

    /// Append a history entry, dropping the oldest past [`HISTORY_LIMIT`].
    pub fn record_event(&mut self, date: SimDate, event: &str, delta: i32) {
        self.history.push(HistoryEntry {
            date,
            event: event.to_string(),
            delta,
        });
        if self.history.len() > HISTORY_LIMIT {
            self.history.remove(0);
        }
    }
}
