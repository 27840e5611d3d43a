//! Wire inputs from external collaborators.
//!
//! The narrative engine reports one [`InteractionReport`] per resolved
//! interaction; quest and story-beat logic reports [`FactionEvent`]s. Both
//! are consumed by the feedback coordinator in `sim::feedback`.

use serde::{Deserialize, Serialize};

use super::character::CharacterId;

/// Player profession, as tracked by the character sheet. Only professions
/// with a social ability matter to this subsystem; the rest pass through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Profession {
    Envoy,
    Scholar,
    Soldier,
    Mystic,
}

/// Player-side circumstances accompanying an interaction, used to mitigate
/// reputation losses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InteractionContext {
    #[serde(default)]
    pub profession: Option<Profession>,
    #[serde(default)]
    pub player_level: u32,
    #[serde(default)]
    pub item_used: Option<String>,
}

/// A resolved interaction between the player and one character, as reported
/// by the narrative engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionReport {
    pub character: CharacterId,
    /// How much the interaction moved the relationship, in [-100, 100].
    pub relationship_delta: i32,
    pub reason: String,
    #[serde(default)]
    pub context: InteractionContext,
}

/// A faction-level game event (quest outcome, major story beat).
///
/// Carries a raw faction id string: upstream content data may be malformed,
/// so the id is resolved at the boundary and unknown ids degrade to no-ops.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactionEvent {
    pub faction_id: String,
    pub reputation_delta: i32,
    pub reason: String,
}
