pub mod character;
pub mod date;
pub mod faction;
pub mod relationship;
pub mod report;
pub mod reputation;

pub use character::{CharacterId, CharacterProfile, SocialClass};
pub use date::SimDate;
pub use faction::{Faction, FactionInfo};
pub use relationship::{HistoryEntry, RelationshipRecord, RelationshipStatus};
pub use report::{FactionEvent, InteractionContext, InteractionReport, Profession};
pub use reputation::ReputationState;
