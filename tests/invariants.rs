//! Randomized sweeps: whatever sequence of deltas arrives, every score stays
//! in its domain and every derived field stays consistent.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use social_sim::model::{Faction, RelationshipStatus, SocialClass};
use social_sim::scenario::Scenario;

/// Roster with one character per faction plus one factionless drifter.
fn populated_scenario() -> (Scenario, Vec<u64>) {
    let mut s = Scenario::new();
    let cast = vec![
        s.add_character("Lord Maren", "elite courtier", SocialClass::Nobility),
        s.add_character("Sister Ode", "temple priest", SocialClass::Clergy),
        s.add_character("Taen", "tribe elder", SocialClass::Clergy),
        s.add_character("Guildmaster Bo", "guild smith", SocialClass::Artisan),
        s.add_character("Vessa", "caravan trader", SocialClass::Merchant),
        s.add_character("Bram", "common farmer", SocialClass::Commoner),
        s.add_character("Drifter", "nameless wanderer", SocialClass::Outcast),
    ];
    (s, cast)
}

fn assert_state_invariants(s: &Scenario) {
    let scores = s.reputation.scores();
    let mut sum = 0;
    for faction in Faction::ALL {
        let score = scores[&faction];
        assert!(
            (0..=100).contains(&score),
            "{} score {score} out of bounds",
            faction.id()
        );
        sum += score;
    }
    let expected_overall = (sum as f64 / Faction::ALL.len() as f64).round() as i32;
    assert_eq!(
        s.reputation.overall(),
        expected_overall,
        "overall must equal round(mean(factions))"
    );
}

fn assert_ledger_invariants(s: &Scenario, cast: &[u64]) {
    for &character in cast {
        for &(from, to) in &[(s.player, character), (character, s.player)] {
            if let Some(record) = s.ledger.get(from, to) {
                assert!(
                    (0..=100).contains(&record.value),
                    "relationship value {} out of bounds",
                    record.value
                );
                assert_eq!(
                    record.status,
                    RelationshipStatus::from_value(record.value),
                    "status must track value"
                );
                assert!(record.history.len() <= 10, "history must stay bounded");
            }
        }
    }
}

#[test]
fn interaction_storm_preserves_invariants() {
    let mut rng = SmallRng::seed_from_u64(42);
    let (mut s, cast) = populated_scenario();

    for turn in 0..500 {
        let character = cast[rng.random_range(0..cast.len())];
        let delta = rng.random_range(-100..=100);
        let spillover = rng.random_bool(0.5);
        s.interact(character, delta, "storm", spillover);
        if turn % 7 == 0 {
            s.pass_days(1);
        }

        assert_state_invariants(&s);
        assert_ledger_invariants(&s, &cast);
    }
}

#[test]
fn faction_event_storm_preserves_invariants() {
    let mut rng = SmallRng::seed_from_u64(7);
    let (mut s, cast) = populated_scenario();

    // Valid ids mixed with garbage the upstream content might produce.
    let ids = [
        "elite",
        "common_folk",
        "church",
        "indigenous",
        "guild",
        "merchants",
        "sky pirates",
        "",
        "MERCHANTS",
    ];

    for _ in 0..300 {
        let faction_id = ids[rng.random_range(0..ids.len())];
        let delta = rng.random_range(-60..=60);
        s.faction_event(faction_id, delta, "storm event");

        assert_state_invariants(&s);
        assert_ledger_invariants(&s, &cast);
    }
}

#[test]
fn extreme_deltas_saturate_cleanly() {
    let (mut s, cast) = populated_scenario();

    for _ in 0..5 {
        for &character in &cast {
            s.interact(character, 100, "impossible heroics", true);
        }
    }
    assert_state_invariants(&s);
    for faction in [Faction::Elite, Faction::Church, Faction::Guild, Faction::Merchants] {
        assert!(s.reputation.score(faction) > 50, "{} should have risen", faction.id());
    }

    for _ in 0..20 {
        for &character in &cast {
            s.interact(character, -100, "unforgivable", true);
        }
    }
    assert_state_invariants(&s);
    assert_eq!(s.reputation.score(Faction::Elite), 0);
    assert_eq!(s.ledger.get(s.player, cast[0]).unwrap().value, 0);
}
