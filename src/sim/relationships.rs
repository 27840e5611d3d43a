//! The directed per-character relationship ledger.
//!
//! One record per ordered (source, target) pair, created lazily on first
//! update. Read paths return `Option`/empty results rather than failing:
//! an absent relationship is a normal state, not an error.

use std::collections::BTreeMap;

use crate::model::{CharacterId, RelationshipRecord, RelationshipStatus, SimDate};

use super::directory::CharacterDirectory;

/// Affinity for a pair meeting for the first time, before the first delta.
const BASELINE_VALUE: i32 = 50;
/// Minimum value for the friends query.
const FRIEND_THRESHOLD: i32 = 60;
/// Record tag that marks kinship.
const FAMILY_KIND: &str = "family";

/// Filter options for [`RelationshipLedger::query`].
#[derive(Debug, Clone, Default)]
pub struct RelationshipQuery<'a> {
    pub kind: Option<&'a str>,
    pub status: Option<RelationshipStatus>,
    pub min_value: Option<i32>,
    /// Sort results by descending value.
    pub sort_by_value: bool,
}

/// Session-owned store of directed relationship records.
///
/// Owned by the session/turn context and threaded through calls, so tests
/// and parallel sessions get fresh, isolated instances.
#[derive(Debug, Default)]
pub struct RelationshipLedger {
    records: BTreeMap<(CharacterId, CharacterId), RelationshipRecord>,
}

impl RelationshipLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// How `from` currently regards `to`. Absent is a valid, expected result.
    pub fn get(&self, from: CharacterId, to: CharacterId) -> Option<&RelationshipRecord> {
        self.records.get(&(from, to))
    }

    /// Blind write: store a record wholesale, normalizing it first so the
    /// value/status/history invariants hold no matter what the caller built.
    pub fn set(&mut self, mut record: RelationshipRecord) {
        record.normalize();
        self.records.insert((record.source, record.target), record);
    }

    /// Apply a delta to the pair's record, creating it at
    /// `clamp(50 + delta)` when absent.
    ///
    /// Refreshes `last_interaction` always; a nonzero delta also updates
    /// `reason` and appends a bounded history entry. A zero delta touches
    /// nothing else.
    pub fn update(
        &mut self,
        from: CharacterId,
        to: CharacterId,
        delta: i32,
        reason: &str,
        date: SimDate,
    ) -> &RelationshipRecord {
        let record = self
            .records
            .entry((from, to))
            .or_insert_with(|| RelationshipRecord::new(from, to, BASELINE_VALUE, date));
        record.value = (record.value + delta).clamp(0, 100);
        record.status = RelationshipStatus::from_value(record.value);
        record.last_interaction = date;
        if delta != 0 {
            record.reason = reason.to_string();
            record.record_event(date, reason, delta);
        }
        record
    }

    /// Move coin on the pair's debt ledger (positive: `from` owes `to`),
    /// creating the record at baseline when absent. Debt is independent of
    /// affinity, so value/status/history stay untouched.
    pub fn adjust_debt(&mut self, from: CharacterId, to: CharacterId, amount: i64, date: SimDate) {
        let record = self
            .records
            .entry((from, to))
            .or_insert_with(|| RelationshipRecord::new(from, to, BASELINE_VALUE, date));
        record.debt += amount;
    }

    /// Filtered view of `entity`'s outgoing relationships.
    pub fn query(&self, entity: CharacterId, query: &RelationshipQuery) -> Vec<&RelationshipRecord> {
        let mut out: Vec<&RelationshipRecord> = self
            .records
            .range((entity, CharacterId::MIN)..=(entity, CharacterId::MAX))
            .map(|(_, record)| record)
            .filter(|r| query.kind.is_none_or(|k| r.kind == k))
            .filter(|r| query.status.is_none_or(|s| r.status == s))
            .filter(|r| query.min_value.is_none_or(|m| r.value >= m))
            .collect();
        if query.sort_by_value {
            out.sort_by(|a, b| b.value.cmp(&a.value));
        }
        out
    }

    pub fn allies_of(&self, entity: CharacterId) -> Vec<&RelationshipRecord> {
        self.query(
            entity,
            &RelationshipQuery {
                status: Some(RelationshipStatus::Allied),
                ..RelationshipQuery::default()
            },
        )
    }

    pub fn enemies_of(&self, entity: CharacterId) -> Vec<&RelationshipRecord> {
        self.query(
            entity,
            &RelationshipQuery {
                status: Some(RelationshipStatus::Hostile),
                ..RelationshipQuery::default()
            },
        )
    }

    /// Everyone `entity` regards at [`FRIEND_THRESHOLD`] or better, closest first.
    pub fn friends_of(&self, entity: CharacterId) -> Vec<&RelationshipRecord> {
        self.query(
            entity,
            &RelationshipQuery {
                min_value: Some(FRIEND_THRESHOLD),
                sort_by_value: true,
                ..RelationshipQuery::default()
            },
        )
    }

    pub fn family_of(&self, entity: CharacterId) -> Vec<&RelationshipRecord> {
        self.query(
            entity,
            &RelationshipQuery {
                kind: Some(FAMILY_KIND),
                ..RelationshipQuery::default()
            },
        )
    }

    /// One line of gossip about how `speaker` regards `target`, or `None`
    /// when there is no relationship or nothing worth repeating.
    ///
    /// Template priority: hostile > allied > family > debt owed > debt held.
    pub fn gossip(
        &self,
        directory: &CharacterDirectory,
        speaker: CharacterId,
        target: CharacterId,
    ) -> Option<String> {
        let record = self.get(speaker, target)?;
        let speaker_name = directory.get(speaker).map_or("someone", |p| p.name.as_str());
        let target_name = directory.get(target).map_or("someone", |p| p.name.as_str());
        match record {
            r if r.status == RelationshipStatus::Hostile => Some(format!(
                "{speaker_name} spits at any mention of {target_name}."
            )),
            r if r.status == RelationshipStatus::Allied => Some(format!(
                "{speaker_name} would stand with {target_name} against anyone."
            )),
            r if r.kind == FAMILY_KIND => {
                Some(format!("{speaker_name} and {target_name} are kin."))
            }
            r if r.debt > 0 => Some(format!(
                "{speaker_name} owes {target_name} {} coin.",
                r.debt
            )),
            r if r.debt < 0 => Some(format!(
                "{target_name} owes {speaker_name} {} coin.",
                -r.debt
            )),
            _ => None,
        }
    }

    /// Drop every record. Reset hook for tests; records are never deleted
    /// individually during a session.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SocialClass;
    use crate::model::relationship::HISTORY_LIMIT;

    fn day(d: u32) -> SimDate {
        SimDate::new(100, d)
    }

    #[test]
    fn first_update_creates_at_shifted_baseline() {
        let mut ledger = RelationshipLedger::new();
        let record = ledger.update(1, 2, 25, "saved from bandits", day(1));
        assert_eq!(record.value, 75);
        assert_eq!(record.status, RelationshipStatus::Friendly);
        assert_eq!(record.history.len(), 1);
        assert_eq!(record.history[0].delta, 25);
    }

    #[test]
    fn first_update_clamps_extreme_delta() {
        let mut ledger = RelationshipLedger::new();
        assert_eq!(ledger.update(1, 2, 300, "miracle", day(1)).value, 100);
        assert_eq!(ledger.update(1, 3, -300, "atrocity", day(1)).value, 0);
    }

    #[test]
    fn updates_accumulate_and_clamp() {
        let mut ledger = RelationshipLedger::new();
        ledger.update(1, 2, 30, "gift", day(1));
        ledger.update(1, 2, 30, "gift", day(2));
        let record = ledger.update(1, 2, 30, "gift", day(3));
        assert_eq!(record.value, 100);
        assert_eq!(record.status, RelationshipStatus::Allied);
    }

    #[test]
    fn zero_delta_refreshes_last_interaction_only() {
        let mut ledger = RelationshipLedger::new();
        ledger.update(1, 2, 10, "helped", day(1));
        let before = ledger.get(1, 2).unwrap().clone();
        let record = ledger.update(1, 2, 0, "small talk", day(5));
        assert_eq!(record.last_interaction, day(5));
        assert_eq!(record.value, before.value);
        assert_eq!(record.status, before.status);
        assert_eq!(record.reason, before.reason);
        assert_eq!(record.history, before.history);
    }

    #[test]
    fn history_keeps_most_recent_ten() {
        let mut ledger = RelationshipLedger::new();
        for i in 0..12 {
            ledger.update(1, 2, 1, &format!("favor {i}"), day(i + 1));
        }
        let record = ledger.get(1, 2).unwrap();
        assert_eq!(record.history.len(), HISTORY_LIMIT);
        assert_eq!(record.history[0].event, "favor 2");
        assert_eq!(record.history[9].event, "favor 11");
    }

    #[test]
    fn records_are_directed() {
        let mut ledger = RelationshipLedger::new();
        ledger.update(1, 2, 30, "rescued", day(1));
        assert!(ledger.get(1, 2).is_some());
        assert!(ledger.get(2, 1).is_none());
    }

    #[test]
    fn set_normalizes_blind_write() {
        let mut ledger = RelationshipLedger::new();
        let mut record = RelationshipRecord::new(1, 2, 50, day(1));
        record.value = 400;
        ledger.set(record);
        let stored = ledger.get(1, 2).unwrap();
        assert_eq!(stored.value, 100);
        assert_eq!(stored.status, RelationshipStatus::Allied);
    }

    #[test]
    fn query_filters_and_sorts() {
        let mut ledger = RelationshipLedger::new();
        ledger.update(1, 2, 40, "bonded", day(1)); // 90, allied
        ledger.update(1, 3, 15, "friendly", day(1)); // 65, friendly
        ledger.update(1, 4, -45, "feud", day(1)); // 5, hostile
        ledger.update(9, 5, 40, "other entity", day(1));

        let friends = ledger.friends_of(1);
        assert_eq!(friends.len(), 2);
        assert_eq!(friends[0].target, 2);
        assert_eq!(friends[1].target, 3);

        assert_eq!(ledger.allies_of(1).len(), 1);
        assert_eq!(ledger.enemies_of(1).len(), 1);
        assert_eq!(ledger.enemies_of(1)[0].target, 4);
    }

    #[test]
    fn family_query_uses_kind_tag() {
        let mut ledger = RelationshipLedger::new();
        let mut record = RelationshipRecord::new(1, 2, 70, day(1));
        record.kind = FAMILY_KIND.to_string();
        ledger.set(record);
        ledger.update(1, 3, 20, "friend", day(1));

        let family = ledger.family_of(1);
        assert_eq!(family.len(), 1);
        assert_eq!(family[0].target, 2);
    }

    #[test]
    fn gossip_priority_and_absence() {
        let mut directory = CharacterDirectory::new();
        let a = directory.import("Ana", "guild smith", SocialClass::Artisan);
        let b = directory.import("Bram", "peasant", SocialClass::Commoner);

        let mut ledger = RelationshipLedger::new();
        assert_eq!(ledger.gossip(&directory, a, b), None);

        // Hostile beats debt.
        let mut record = RelationshipRecord::new(a, b, 5, day(1));
        record.debt = 40;
        ledger.set(record);
        assert_eq!(
            ledger.gossip(&directory, a, b).unwrap(),
            "Ana spits at any mention of Bram."
        );

        // Neutral standing with debt falls through to the debt template.
        let mut record = RelationshipRecord::new(a, b, 50, day(1));
        record.debt = -40;
        ledger.set(record);
        assert_eq!(
            ledger.gossip(&directory, a, b).unwrap(),
            "Bram owes Ana 40 coin."
        );

        // Nothing notable: no line.
        ledger.set(RelationshipRecord::new(a, b, 50, day(1)));
        assert_eq!(ledger.gossip(&directory, a, b), None);
    }

    #[test]
    fn adjust_debt_leaves_affinity_alone() {
        let mut ledger = RelationshipLedger::new();
        ledger.adjust_debt(1, 2, 30, day(1));
        let record = ledger.get(1, 2).unwrap();
        assert_eq!(record.debt, 30);
        assert_eq!(record.value, 50);
        assert!(record.history.is_empty());
    }

    #[test]
    fn clear_empties_ledger() {
        let mut ledger = RelationshipLedger::new();
        ledger.update(1, 2, 5, "met", day(1));
        assert!(!ledger.is_empty());
        ledger.clear();
        assert!(ledger.is_empty());
    }
}
