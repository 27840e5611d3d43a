use serde::{Deserialize, Serialize};

use super::faction::Faction;

/// Identifier for a character in the session roster.
pub type CharacterId = u64;

// ---------------------------------------------------------------------------
// Importance weights
// ---------------------------------------------------------------------------
// Higher-status characters move faction opinion more per unit of personal
// relationship change.
const NOBILITY_WEIGHT: f64 = 3.0;
const CLERGY_WEIGHT: f64 = 2.0;
const MERCHANT_WEIGHT: f64 = 1.5;
const ARTISAN_WEIGHT: f64 = 1.2;
const COMMONER_WEIGHT: f64 = 1.0;
const OUTCAST_WEIGHT: f64 = 0.8;

/// Social class of a character, assigned once at roster import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SocialClass {
    Nobility,
    Clergy,
    Merchant,
    Artisan,
    Commoner,
    Outcast,
}

impl SocialClass {
    /// Multiplier applied when converting a relationship delta into a
    /// faction reputation delta.
    pub fn importance_weight(self) -> f64 {
        match self {
            SocialClass::Nobility => NOBILITY_WEIGHT,
            SocialClass::Clergy => CLERGY_WEIGHT,
            SocialClass::Merchant => MERCHANT_WEIGHT,
            SocialClass::Artisan => ARTISAN_WEIGHT,
            SocialClass::Commoner => COMMONER_WEIGHT,
            SocialClass::Outcast => OUTCAST_WEIGHT,
        }
    }
}

/// A character as known to this subsystem: identity, canonical faction,
/// and social standing. Everything else about a character (stats, location,
/// dialogue state) belongs to other parts of the game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterProfile {
    pub id: CharacterId,
    pub name: String,
    /// Raw caste/faction label as it appeared in the roster data.
    pub faction_label: String,
    /// Canonical faction resolved once at import; `None` when no keyword
    /// matched, meaning this character's relationships never touch faction
    /// reputation.
    pub faction: Option<Faction>,
    pub class: SocialClass,
}
