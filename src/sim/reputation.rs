//! Pure faction-reputation transformations.
//!
//! Every function here is total: it takes a [`ReputationState`] by reference
//! and returns a new one (or a plain value), never mutating its input. The
//! caller owns committing the result. Malformed faction ids from upstream
//! content degrade to logged no-ops, never errors — the feedback loop must
//! not be able to halt play.

use crate::model::{Faction, FactionEvent, ReputationState};

// ---------------------------------------------------------------------------
// Overall reputation tiers (coarse, 9 bands)
// ---------------------------------------------------------------------------
const TIER_LEGENDARY: i32 = 90;
const TIER_RENOWNED: i32 = 80;
const TIER_ESTEEMED: i32 = 70;
const TIER_RESPECTED: i32 = 60;
const TIER_FAVORED: i32 = 50;
const TIER_NEUTRAL: i32 = 40;
const TIER_DISLIKED: i32 = 30;
const TIER_SCORNED: i32 = 20;

// ---------------------------------------------------------------------------
// Per-faction standings (fine, 11 bands)
// ---------------------------------------------------------------------------
const STANDING_REVERED: i32 = 95;
const STANDING_EXALTED: i32 = 85;
const STANDING_HONORED: i32 = 75;
const STANDING_TRUSTED: i32 = 65;
const STANDING_FRIENDLY: i32 = 55;
const STANDING_NEUTRAL: i32 = 45;
const STANDING_WARY: i32 = 35;
const STANDING_SUSPICIOUS: i32 = 25;
const STANDING_DISLIKED: i32 = 15;
const STANDING_DESPISED: i32 = 5;

// ---------------------------------------------------------------------------
// Commerce
// ---------------------------------------------------------------------------
/// Price multiplier at score 0; falls linearly to half at score 100.
const PRICE_CEILING: f64 = 1.5;

/// Coarse band of the overall reputation score, for headline display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReputationTier {
    Legendary,
    Renowned,
    Esteemed,
    Respected,
    Favored,
    Neutral,
    Disliked,
    Scorned,
    Infamous,
}

impl ReputationTier {
    pub fn label(self) -> &'static str {
        match self {
            ReputationTier::Legendary => "Legendary",
            ReputationTier::Renowned => "Renowned",
            ReputationTier::Esteemed => "Esteemed",
            ReputationTier::Respected => "Respected",
            ReputationTier::Favored => "Favored",
            ReputationTier::Neutral => "Neutral",
            ReputationTier::Disliked => "Disliked",
            ReputationTier::Scorned => "Scorned",
            ReputationTier::Infamous => "Infamous",
        }
    }
}

/// Fine-grained band of a single faction's score, for per-faction display.
/// Deliberately a separate scale from [`ReputationTier`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactionStanding {
    Revered,
    Exalted,
    Honored,
    Trusted,
    Friendly,
    Neutral,
    Wary,
    Suspicious,
    Disliked,
    Despised,
    Hostile,
}

impl FactionStanding {
    pub fn label(self) -> &'static str {
        match self {
            FactionStanding::Revered => "Revered",
            FactionStanding::Exalted => "Exalted",
            FactionStanding::Honored => "Honored",
            FactionStanding::Trusted => "Trusted",
            FactionStanding::Friendly => "Friendly",
            FactionStanding::Neutral => "Neutral",
            FactionStanding::Wary => "Wary",
            FactionStanding::Suspicious => "Suspicious",
            FactionStanding::Disliked => "Disliked",
            FactionStanding::Despised => "Despised",
            FactionStanding::Hostile => "Hostile",
        }
    }
}

/// What a reputation gate checks against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReputationCheck {
    Overall,
    Faction(Faction),
}

/// New state with one faction's score moved by `delta` (clamped to [0, 100])
/// and `overall` re-derived.
pub fn update_faction(
    state: &ReputationState,
    faction: Faction,
    delta: i32,
    reason: &str,
) -> ReputationState {
    let new_score = (state.score(faction) + delta).clamp(0, 100);
    tracing::debug!("{} reputation {:+} -> {} ({reason})", faction.id(), delta, new_score);
    state.with_score(faction, new_score)
}

/// Consume a faction-level game event. An id that matches no canonical
/// faction is logged and leaves the state unchanged.
pub fn apply_faction_event(state: &ReputationState, event: &FactionEvent) -> ReputationState {
    match Faction::parse(&event.faction_id) {
        Some(faction) => update_faction(state, faction, event.reputation_delta, &event.reason),
        None => {
            tracing::warn!(
                "unknown faction id '{}' in event '{}'",
                event.faction_id,
                event.reason
            );
            state.clone()
        }
    }
}

/// Tier band for an overall score. Boundaries are inclusive on the upper band.
pub fn tier_of(score: i32) -> ReputationTier {
    match score {
        s if s >= TIER_LEGENDARY => ReputationTier::Legendary,
        s if s >= TIER_RENOWNED => ReputationTier::Renowned,
        s if s >= TIER_ESTEEMED => ReputationTier::Esteemed,
        s if s >= TIER_RESPECTED => ReputationTier::Respected,
        s if s >= TIER_FAVORED => ReputationTier::Favored,
        s if s >= TIER_NEUTRAL => ReputationTier::Neutral,
        s if s >= TIER_DISLIKED => ReputationTier::Disliked,
        s if s >= TIER_SCORNED => ReputationTier::Scorned,
        _ => ReputationTier::Infamous,
    }
}

/// Standing band for a single faction score.
pub fn standing_of(score: i32) -> FactionStanding {
    match score {
        s if s >= STANDING_REVERED => FactionStanding::Revered,
        s if s >= STANDING_EXALTED => FactionStanding::Exalted,
        s if s >= STANDING_HONORED => FactionStanding::Honored,
        s if s >= STANDING_TRUSTED => FactionStanding::Trusted,
        s if s >= STANDING_FRIENDLY => FactionStanding::Friendly,
        s if s >= STANDING_NEUTRAL => FactionStanding::Neutral,
        s if s >= STANDING_WARY => FactionStanding::Wary,
        s if s >= STANDING_SUSPICIOUS => FactionStanding::Suspicious,
        s if s >= STANDING_DISLIKED => FactionStanding::Disliked,
        s if s >= STANDING_DESPISED => FactionStanding::Despised,
        _ => FactionStanding::Hostile,
    }
}

/// Linear price multiplier for commerce: 1.5x at score 0, 1.0x at 50,
/// 0.5x at 100.
pub fn price_modifier(score: i32) -> f64 {
    PRICE_CEILING - score as f64 / 100.0
}

/// Reputation gate. With no reputation system present at all (`None` state)
/// the gate fails open so an uninitialized feature never blocks play; with a
/// state present, an unmet threshold fails closed.
pub fn meets_requirement(
    state: Option<&ReputationState>,
    check: ReputationCheck,
    threshold: i32,
) -> bool {
    let Some(state) = state else {
        return true;
    };
    let score = match check {
        ReputationCheck::Overall => state.overall(),
        ReputationCheck::Faction(faction) => state.score(faction),
    };
    score >= threshold
}
