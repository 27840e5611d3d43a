pub mod directory;
pub mod feedback;
pub mod relationships;
pub mod reputation;

pub use directory::CharacterDirectory;
pub use feedback::{
    FactionShift, InteractionResolution, apply_relationship_to_reputation,
    apply_reputation_to_relationships, batch_process_relationship_changes, handle_faction_event,
    handle_interaction, spillover_effects,
};
pub use relationships::{RelationshipLedger, RelationshipQuery};
pub use reputation::{
    FactionStanding, ReputationCheck, ReputationTier, apply_faction_event, meets_requirement,
    price_modifier, standing_of, tier_of, update_faction,
};
