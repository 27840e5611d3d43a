use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::faction::Faction;

/// Score assumed for factions missing from an imported score map.
pub const DEFAULT_SCORE: i32 = 50;

/// Session-start distribution. Scores need not start equal: a newcomer is
/// slightly suspect to the aristocracy and slightly welcome among commoners.
const BASELINE: &[(Faction, i32)] = &[
    (Faction::Elite, 40),
    (Faction::CommonFolk, 55),
    (Faction::Church, 50),
    (Faction::Indigenous, 45),
    (Faction::Guild, 50),
    (Faction::Merchants, 50),
];

/// Aggregate reputation: one score per canonical faction plus the derived
/// overall score.
///
/// `overall` is never independently settable — every constructor and update
/// re-derives it as `round(mean(factions))`, and deserialization goes
/// through [`ReputationRepr`], so a loaded state can never hold a stale
/// overall.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "ReputationRepr", from = "ReputationRepr")]
pub struct ReputationState {
    factions: BTreeMap<Faction, i32>,
    overall: i32,
}

#[derive(Serialize, Deserialize)]
struct ReputationRepr {
    overall: i32,
    factions: BTreeMap<Faction, i32>,
}

impl From<ReputationState> for ReputationRepr {
    fn from(state: ReputationState) -> Self {
        ReputationRepr {
            overall: state.overall,
            factions: state.factions,
        }
    }
}

impl From<ReputationRepr> for ReputationState {
    fn from(repr: ReputationRepr) -> Self {
        // The stored overall is ignored and re-derived.
        ReputationState::with_scores(repr.factions)
    }
}

impl ReputationState {
    /// Session-start state from the fixed baseline distribution.
    pub fn starting() -> Self {
        Self::with_scores(BASELINE.iter().copied().collect())
    }

    /// Every faction at the same score. Mostly useful in tests.
    pub fn uniform(score: i32) -> Self {
        Self::with_scores(Faction::ALL.iter().map(|&f| (f, score)).collect())
    }

    /// Build a state from an arbitrary score map: clamps every score to
    /// [0, 100], fills factions missing from the map with [`DEFAULT_SCORE`],
    /// and derives `overall`.
    pub fn with_scores(scores: BTreeMap<Faction, i32>) -> Self {
        let factions: BTreeMap<Faction, i32> = Faction::ALL
            .iter()
            .map(|&f| (f, scores.get(&f).copied().unwrap_or(DEFAULT_SCORE).clamp(0, 100)))
            .collect();
        let overall = derived_overall(&factions);
        Self { factions, overall }
    }

    /// Copy of this state with one faction's score replaced (clamped) and
    /// `overall` re-derived.
    pub fn with_score(&self, faction: Faction, score: i32) -> Self {
        let mut scores = self.factions.clone();
        scores.insert(faction, score.clamp(0, 100));
        Self::with_scores(scores)
    }

    pub fn score(&self, faction: Faction) -> i32 {
        // Every constructor fills all six keys.
        self.factions[&faction]
    }

    pub fn overall(&self) -> i32 {
        self.overall
    }

    pub fn scores(&self) -> &BTreeMap<Faction, i32> {
        &self.factions
    }
}

impl Default for ReputationState {
    fn default() -> Self {
        Self::starting()
    }
}

fn derived_overall(factions: &BTreeMap<Faction, i32>) -> i32 {
    let sum: i32 = factions.values().sum();
    (sum as f64 / factions.len() as f64).round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_state_covers_all_factions() {
        let state = ReputationState::starting();
        for faction in Faction::ALL {
            let score = state.score(faction);
            assert!((0..=100).contains(&score));
        }
        assert_eq!(state.overall(), 48); // round(290 / 6)
    }

    #[test]
    fn uniform_overall_equals_score() {
        let state = ReputationState::uniform(50);
        assert_eq!(state.overall(), 50);
        for faction in Faction::ALL {
            assert_eq!(state.score(faction), 50);
        }
    }

    #[test]
    fn with_scores_fills_missing_and_clamps() {
        let state = ReputationState::with_scores(
            [(Faction::Elite, 250), (Faction::Guild, -10)].into_iter().collect(),
        );
        assert_eq!(state.score(Faction::Elite), 100);
        assert_eq!(state.score(Faction::Guild), 0);
        assert_eq!(state.score(Faction::Church), DEFAULT_SCORE);
    }

    #[test]
    fn with_score_rederives_overall() {
        let state = ReputationState::uniform(50).with_score(Faction::Elite, 62);
        assert_eq!(state.score(Faction::Elite), 62);
        // round((62 + 5 * 50) / 6) = round(52.0)
        assert_eq!(state.overall(), 52);
    }

    #[test]
    fn overall_rounds_half_away_from_zero() {
        // Sum 309 over 6 factions: mean 51.5 rounds up to 52.
        let state = ReputationState::with_scores(
            [
                (Faction::Elite, 55),
                (Faction::CommonFolk, 50),
                (Faction::Church, 52),
                (Faction::Indigenous, 50),
                (Faction::Guild, 50),
                (Faction::Merchants, 52),
            ]
            .into_iter()
            .collect(),
        );
        assert_eq!(state.overall(), 52);
    }

    #[test]
    fn serde_shape_matches_ui_contract() {
        let state = ReputationState::uniform(50).with_score(Faction::Elite, 55);
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["overall"], 51);
        assert_eq!(json["factions"]["elite"], 55);
        assert_eq!(json["factions"]["common_folk"], 50);
    }

    #[test]
    fn deserialization_rederives_overall() {
        // A tampered overall is corrected on load.
        let json = r#"{"overall": 99, "factions": {"elite": 50, "common_folk": 50,
            "church": 50, "indigenous": 50, "guild": 50, "merchants": 50}}"#;
        let state: ReputationState = serde_json::from_str(json).unwrap();
        assert_eq!(state.overall(), 50);
    }

    #[test]
    fn deserialization_fills_missing_factions() {
        let json = r#"{"overall": 0, "factions": {"elite": 80}}"#;
        let state: ReputationState = serde_json::from_str(json).unwrap();
        assert_eq!(state.score(Faction::Elite), 80);
        assert_eq!(state.score(Faction::Merchants), DEFAULT_SCORE);
    }
}
