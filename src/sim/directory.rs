//! Session character roster with import-time faction resolution.
//!
//! Characters arrive from static content data carrying free-text caste
//! labels. Canonicalization happens exactly once, here, so no per-interaction
//! path ever re-runs keyword matching, and the faction→members index makes
//! faction-wide fan-out a lookup instead of a roster scan.

use std::collections::BTreeMap;

use crate::model::{CharacterId, CharacterProfile, Faction, SocialClass};

#[derive(Debug, Default)]
pub struct CharacterDirectory {
    characters: BTreeMap<CharacterId, CharacterProfile>,
    members: BTreeMap<Faction, Vec<CharacterId>>,
    /// Next id to hand out; ids are unique within a session.
    next_id: CharacterId,
}

impl CharacterDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a character, assigning its id and resolving its faction.
    ///
    /// An unmatched faction label is logged and leaves the character without
    /// a faction: their relationships still work, but never move faction
    /// reputation.
    pub fn import(&mut self, name: &str, faction_label: &str, class: SocialClass) -> CharacterId {
        self.next_id += 1;
        let id = self.next_id;
        let faction = Faction::canonicalize(faction_label);
        match faction {
            Some(faction) => self.members.entry(faction).or_default().push(id),
            None => tracing::warn!(
                "no canonical faction for label '{faction_label}' (character '{name}')"
            ),
        }
        self.characters.insert(
            id,
            CharacterProfile {
                id,
                name: name.to_string(),
                faction_label: faction_label.to_string(),
                faction,
                class,
            },
        );
        id
    }

    pub fn get(&self, id: CharacterId) -> Option<&CharacterProfile> {
        self.characters.get(&id)
    }

    pub fn faction_of(&self, id: CharacterId) -> Option<Faction> {
        self.characters.get(&id).and_then(|p| p.faction)
    }

    /// Ids of every character in a faction, in import order.
    pub fn members_of(&self, faction: Faction) -> &[CharacterId] {
        self.members.get(&faction).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }
}
