//! Bidirectional feedback between the relationship ledger and faction
//! reputation.
//!
//! One direction converts an individual relationship change into a capped,
//! importance-weighted faction delta; the other fans a faction-level event
//! out into bulk relationship nudges for every member of that faction.
//! Spillover passes a fraction of a faction's delta on to its allies.
//!
//! Fractional deltas round half away from zero throughout; the loss
//! mitigations are the one exception and truncate toward zero, so a
//! protection can shrink a penalty but never flip it into a bonus.

use crate::model::{
    CharacterId, Faction, FactionEvent, InteractionContext, InteractionReport, Profession,
    RelationshipRecord, ReputationState, SimDate,
};

use super::directory::CharacterDirectory;
use super::relationships::RelationshipLedger;
use super::reputation::update_faction;

// ---------------------------------------------------------------------------
// Conversion parameters
// ---------------------------------------------------------------------------
/// Smallest |relationship delta| with any faction-level effect.
const MIN_RELATIONSHIP_DELTA: i32 = 5;
/// Relationship-to-reputation conversion rate.
const BASE_CONVERSION_RATE: f64 = 0.2;
/// Hard cap on |reputation delta| from a single interaction.
const MAX_REPUTATION_DELTA: i32 = 5;
/// Smallest |reputation delta| that echoes back into relationships.
const MIN_REPUTATION_DELTA: i32 = 5;
/// Reputation-to-relationship conversion rate. Faction-level events are
/// socially louder than one relationship ticking, so the echo is coarser.
const REVERSE_CONVERSION_RATE: f64 = 0.5;
/// Fraction of a faction delta passed to each allied faction.
const SPILLOVER_FACTOR: f64 = 0.3;

// ---------------------------------------------------------------------------
// Loss mitigation
// ---------------------------------------------------------------------------
/// Level at which the envoy's silver-tongue ability unlocks.
const ENVOY_UNLOCK_LEVEL: u32 = 3;
/// Fraction of a reputation loss kept when the envoy ability is active.
const ENVOY_LOSS_FACTOR: f64 = 0.5;
/// Fraction of a reputation loss kept when a charm protects the hit faction.
const CHARM_LOSS_FACTOR: f64 = 0.5;
/// Items that shield one designated faction from reputation losses.
const FACTION_CHARMS: &[(&str, Faction)] = &[
    ("votive medallion", Faction::Church),
    ("guild signet", Faction::Guild),
    ("trade seal", Faction::Merchants),
    ("carved totem", Faction::Indigenous),
];

// ---------------------------------------------------------------------------
// Alliance adjacency
// ---------------------------------------------------------------------------
/// Directed alliance table: who benefits (or suffers) when a faction's
/// reputation moves. Not necessarily symmetric.
const ALLIED_FACTIONS: &[(Faction, &[Faction])] = &[
    (Faction::Elite, &[Faction::Church, Faction::Merchants]),
    (Faction::Church, &[Faction::Elite, Faction::CommonFolk]),
    (Faction::Merchants, &[Faction::Guild]),
    (Faction::Guild, &[Faction::Merchants, Faction::CommonFolk]),
    (Faction::CommonFolk, &[Faction::Guild]),
    (Faction::Indigenous, &[]),
];

/// Result of converting one relationship change into faction reputation.
#[derive(Debug, Clone, PartialEq)]
pub struct FactionShift {
    pub faction: Faction,
    /// Final applied delta, after cap and mitigation.
    pub delta: i32,
    /// The new reputation state; the caller commits it.
    pub state: ReputationState,
}

/// Everything one interaction changed, handed back for the caller to commit
/// to session state and surface in the UI.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionResolution {
    /// The (player, character) record after the update.
    pub record: RelationshipRecord,
    /// Final reputation state including any spillover.
    pub reputation: ReputationState,
    pub faction_shift: Option<(Faction, i32)>,
    /// Spillover deltas that were applied (zero-rounded ones are skipped).
    pub spillover: Vec<(Faction, i32)>,
}

/// Convert an individual relationship delta into a faction reputation delta
/// and apply it, returning `None` when the interaction has no faction-level
/// effect (trivial delta, unknown character, factionless character, or a
/// delta that caps/mitigates/rounds to zero).
///
/// Never mutates its inputs; the returned state is the caller's to commit.
pub fn apply_relationship_to_reputation(
    directory: &CharacterDirectory,
    character: CharacterId,
    relationship_delta: i32,
    reason: &str,
    state: &ReputationState,
    ctx: &InteractionContext,
) -> Option<FactionShift> {
    if relationship_delta.abs() < MIN_RELATIONSHIP_DELTA {
        return None;
    }
    let profile = directory.get(character)?;
    let faction = profile.faction?;

    let raw = relationship_delta as f64 * BASE_CONVERSION_RATE * profile.class.importance_weight();
    let capped = raw.clamp(-(MAX_REPUTATION_DELTA as f64), MAX_REPUTATION_DELTA as f64);
    let mut delta = capped.round() as i32;
    if delta < 0 {
        delta = mitigate_loss(delta, faction, ctx);
    }
    if delta == 0 {
        tracing::debug!(
            "interaction with '{}' rounds to no effect on {}",
            profile.name,
            faction.id()
        );
        return None;
    }

    Some(FactionShift {
        faction,
        delta,
        state: update_faction(state, faction, delta, reason),
    })
}

/// Apply active loss mitigations to a negative reputation delta. Each
/// multiplier truncates toward zero.
fn mitigate_loss(mut delta: i32, faction: Faction, ctx: &InteractionContext) -> i32 {
    if ctx.profession == Some(Profession::Envoy) && ctx.player_level >= ENVOY_UNLOCK_LEVEL {
        delta = (delta as f64 * ENVOY_LOSS_FACTOR).trunc() as i32;
    }
    if let Some(item) = &ctx.item_used
        && FACTION_CHARMS
            .iter()
            .any(|(charm, protected)| item.eq_ignore_ascii_case(charm) && *protected == faction)
    {
        delta = (delta as f64 * CHARM_LOSS_FACTOR).trunc() as i32;
    }
    delta
}

/// Fan a faction-level reputation delta out into relationship nudges for
/// every member of that faction, aimed at the player. Mutates the ledger
/// directly — bulk relationship updates are a ledger-owned operation.
///
/// Returns the number of records nudged.
pub fn apply_reputation_to_relationships(
    ledger: &mut RelationshipLedger,
    directory: &CharacterDirectory,
    player: CharacterId,
    faction: Faction,
    reputation_delta: i32,
    reason: &str,
    date: SimDate,
) -> usize {
    if reputation_delta.abs() < MIN_REPUTATION_DELTA {
        return 0;
    }
    let relationship_delta = (reputation_delta as f64 * REVERSE_CONVERSION_RATE).round() as i32;
    let mut nudged = 0;
    for &member in directory.members_of(faction) {
        if member == player {
            continue;
        }
        ledger.update(member, player, relationship_delta, reason, date);
        nudged += 1;
    }
    nudged
}

/// Spillover deltas for every faction allied to `primary`. Callers decide
/// whether and how to apply them.
pub fn spillover_effects(primary: Faction, delta: i32) -> Vec<(Faction, i32)> {
    allied_to(primary)
        .iter()
        .map(|&ally| (ally, (delta as f64 * SPILLOVER_FACTOR).round() as i32))
        .collect()
}

fn allied_to(faction: Faction) -> &'static [Faction] {
    ALLIED_FACTIONS
        .iter()
        .find(|(f, _)| *f == faction)
        .map(|&(_, allies)| allies)
        .unwrap_or_default()
}

/// Orchestration entry point for one resolved interaction: update the
/// (player, character) relationship, convert the delta into faction
/// reputation, optionally spill over to allied factions, and hand the
/// combined outcome back.
///
/// The ledger commits eagerly; the reputation side is returned as a fresh
/// state the caller swaps in, so it can never be half-applied.
pub fn handle_interaction(
    ledger: &mut RelationshipLedger,
    directory: &CharacterDirectory,
    state: &ReputationState,
    player: CharacterId,
    report: &InteractionReport,
    apply_spillover: bool,
    date: SimDate,
) -> InteractionResolution {
    let record = ledger
        .update(
            player,
            report.character,
            report.relationship_delta,
            &report.reason,
            date,
        )
        .clone();

    let shift = apply_relationship_to_reputation(
        directory,
        report.character,
        report.relationship_delta,
        &report.reason,
        state,
        &report.context,
    );
    let faction_shift = shift.as_ref().map(|s| (s.faction, s.delta));
    let mut reputation = match shift {
        Some(s) => s.state,
        None => state.clone(),
    };

    let mut spillover = Vec::new();
    if apply_spillover
        && let Some((faction, delta)) = faction_shift
    {
        for (ally, ally_delta) in spillover_effects(faction, delta) {
            if ally_delta == 0 {
                continue;
            }
            reputation = update_faction(&reputation, ally, ally_delta, &report.reason);
            spillover.push((ally, ally_delta));
        }
    }

    InteractionResolution {
        record,
        reputation,
        faction_shift,
        spillover,
    }
}

/// Consume one faction-level game event: move the faction's score and echo
/// the change into its members' relationships with the player. An unknown
/// faction id is logged and changes nothing.
pub fn handle_faction_event(
    ledger: &mut RelationshipLedger,
    directory: &CharacterDirectory,
    state: &ReputationState,
    player: CharacterId,
    event: &FactionEvent,
    date: SimDate,
) -> ReputationState {
    let Some(faction) = Faction::parse(&event.faction_id) else {
        tracing::warn!(
            "unknown faction id '{}' in event '{}'",
            event.faction_id,
            event.reason
        );
        return state.clone();
    };
    let next = update_faction(state, faction, event.reputation_delta, &event.reason);
    apply_reputation_to_relationships(
        ledger,
        directory,
        player,
        faction,
        event.reputation_delta,
        &event.reason,
        date,
    );
    next
}

/// Fold a batch of interaction reports into the reputation state, threading
/// the evolving state forward so later entries see the already-updated
/// scores. Latest information wins.
pub fn batch_process_relationship_changes(
    directory: &CharacterDirectory,
    reports: &[InteractionReport],
    state: ReputationState,
) -> ReputationState {
    reports.iter().fold(state, |acc, report| {
        match apply_relationship_to_reputation(
            directory,
            report.character,
            report.relationship_delta,
            &report.reason,
            &acc,
            &report.context,
        ) {
            Some(shift) => shift.state,
            None => acc,
        }
    })
}
