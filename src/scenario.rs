//! Fluent builder for session state in tests.
//!
//! Bundles a character directory, a relationship ledger, and a reputation
//! state behind the handful of setup calls scenario tests actually need,
//! and commits coordinator results back so a test reads like a session
//! transcript.

use crate::model::{
    CharacterId, FactionEvent, InteractionContext, InteractionReport, RelationshipRecord,
    ReputationState, SimDate, SocialClass,
};
use crate::sim::{
    CharacterDirectory, InteractionResolution, RelationshipLedger, handle_faction_event,
    handle_interaction,
};

pub struct Scenario {
    pub directory: CharacterDirectory,
    pub ledger: RelationshipLedger,
    pub reputation: ReputationState,
    pub player: CharacterId,
    pub date: SimDate,
}

impl Default for Scenario {
    fn default() -> Self {
        Self::new()
    }
}

impl Scenario {
    /// Fresh session at year 1: a factionless player, an empty ledger, and
    /// every faction score at 50.
    pub fn new() -> Self {
        Self::at_date(SimDate::from_year(1))
    }

    pub fn at_date(date: SimDate) -> Self {
        let mut directory = CharacterDirectory::new();
        let player = directory.import("Wanderer", "unaligned newcomer", SocialClass::Commoner);
        Self {
            directory,
            ledger: RelationshipLedger::new(),
            reputation: ReputationState::uniform(50),
            player,
            date,
        }
    }

    /// Import a character into the roster.
    pub fn add_character(
        &mut self,
        name: &str,
        faction_label: &str,
        class: SocialClass,
    ) -> CharacterId {
        self.directory.import(name, faction_label, class)
    }

    /// Blind-write a relationship record at the given value and kind.
    pub fn relate(&mut self, from: CharacterId, to: CharacterId, value: i32, kind: &str) {
        let mut record = RelationshipRecord::new(from, to, value, self.date);
        record.kind = kind.to_string();
        self.ledger.set(record);
    }

    /// Advance the session calendar.
    pub fn pass_days(&mut self, days: u32) {
        self.date = self.date.plus_days(days);
    }

    /// Run one interaction through the coordinator and commit the resulting
    /// reputation state.
    pub fn interact(
        &mut self,
        character: CharacterId,
        relationship_delta: i32,
        reason: &str,
        apply_spillover: bool,
    ) -> InteractionResolution {
        self.interact_with_context(
            character,
            relationship_delta,
            reason,
            InteractionContext::default(),
            apply_spillover,
        )
    }

    pub fn interact_with_context(
        &mut self,
        character: CharacterId,
        relationship_delta: i32,
        reason: &str,
        context: InteractionContext,
        apply_spillover: bool,
    ) -> InteractionResolution {
        let report = InteractionReport {
            character,
            relationship_delta,
            reason: reason.to_string(),
            context,
        };
        let resolution = handle_interaction(
            &mut self.ledger,
            &self.directory,
            &self.reputation,
            self.player,
            &report,
            apply_spillover,
            self.date,
        );
        self.reputation = resolution.reputation.clone();
        resolution
    }

    /// Run one faction-level game event through the coordinator and commit
    /// the resulting reputation state.
    pub fn faction_event(&mut self, faction_id: &str, reputation_delta: i32, reason: &str) {
        let event = FactionEvent {
            faction_id: faction_id.to_string(),
            reputation_delta,
            reason: reason.to_string(),
        };
        self.reputation = handle_faction_event(
            &mut self.ledger,
            &self.directory,
            &self.reputation,
            self.player,
            &event,
            self.date,
        );
    }
}
