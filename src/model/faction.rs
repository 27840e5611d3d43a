use serde::{Deserialize, Serialize};

/// Canonical social factions tracked by the aggregate reputation score.
///
/// The set is fixed: content data refers to factions through free-text
/// caste/faction labels, and [`Faction::canonicalize`] maps those labels
/// onto this enum once, at roster import time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Faction {
    Elite,
    CommonFolk,
    Church,
    Indigenous,
    Guild,
    Merchants,
}

/// Display metadata for a faction. Static configuration, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FactionInfo {
    pub name: &'static str,
    pub icon: &'static str,
    pub blurb: &'static str,
}

// ---------------------------------------------------------------------------
// Free-text label canonicalization
// ---------------------------------------------------------------------------

/// Ordered keyword table for canonicalizing free-text faction labels.
/// Matching is case-insensitive substring search; the first hit wins.
const FACTION_KEYWORDS: &[(&str, Faction)] = &[
    ("noble", Faction::Elite),
    ("aristocrat", Faction::Elite),
    ("elite", Faction::Elite),
    ("royal", Faction::Elite),
    ("court", Faction::Elite),
    ("clergy", Faction::Church),
    ("priest", Faction::Church),
    ("church", Faction::Church),
    ("temple", Faction::Church),
    ("monk", Faction::Church),
    ("indigenous", Faction::Indigenous),
    ("native", Faction::Indigenous),
    ("tribe", Faction::Indigenous),
    ("guild", Faction::Guild),
    ("artisan", Faction::Guild),
    ("craft", Faction::Guild),
    ("smith", Faction::Guild),
    ("merchant", Faction::Merchants),
    ("trader", Faction::Merchants),
    ("trade", Faction::Merchants),
    ("peddler", Faction::Merchants),
    ("common", Faction::CommonFolk),
    ("peasant", Faction::CommonFolk),
    ("folk", Faction::CommonFolk),
    ("farmer", Faction::CommonFolk),
    ("laborer", Faction::CommonFolk),
];

impl Faction {
    /// All canonical factions in display order.
    pub const ALL: [Faction; 6] = [
        Faction::Elite,
        Faction::CommonFolk,
        Faction::Church,
        Faction::Indigenous,
        Faction::Guild,
        Faction::Merchants,
    ];

    /// Canonical id string, matching the serde representation.
    pub fn id(self) -> &'static str {
        match self {
            Faction::Elite => "elite",
            Faction::CommonFolk => "common_folk",
            Faction::Church => "church",
            Faction::Indigenous => "indigenous",
            Faction::Guild => "guild",
            Faction::Merchants => "merchants",
        }
    }

    pub fn info(self) -> FactionInfo {
        match self {
            Faction::Elite => FactionInfo {
                name: "The Elite",
                icon: "crown",
                blurb: "Old families and officeholders who decide who is received at court.",
            },
            Faction::CommonFolk => FactionInfo {
                name: "Common Folk",
                icon: "sheaf",
                blurb: "Farmers, laborers, and market crowds. Slow to trust, slower to forget.",
            },
            Faction::Church => FactionInfo {
                name: "The Church",
                icon: "censer",
                blurb: "Clergy and temple orders with a long memory for favors and slights.",
            },
            Faction::Indigenous => FactionInfo {
                name: "Indigenous Bands",
                icon: "totem",
                blurb: "The first peoples of the valley, wary of the city's politics.",
            },
            Faction::Guild => FactionInfo {
                name: "The Guilds",
                icon: "hammer",
                blurb: "Chartered artisans who control workshops, wages, and apprenticeships.",
            },
            Faction::Merchants => FactionInfo {
                name: "Merchant Houses",
                icon: "scales",
                blurb: "Caravan financiers and shopkeepers. Reputation is credit.",
            },
        }
    }

    /// Parse a canonical faction id (case-insensitive exact match).
    ///
    /// This is the strict boundary for wire inputs that claim to carry a
    /// faction id. For free-text content labels use [`Faction::canonicalize`].
    pub fn parse(label: &str) -> Option<Faction> {
        Faction::ALL
            .into_iter()
            .find(|f| label.eq_ignore_ascii_case(f.id()))
    }

    /// Map a free-text caste/faction label onto a canonical faction via
    /// ordered keyword matching. Returns `None` when no keyword matches;
    /// callers must treat that as "no faction effect", never as an error.
    pub fn canonicalize(label: &str) -> Option<Faction> {
        let label = label.to_lowercase();
        FACTION_KEYWORDS
            .iter()
            .find(|(keyword, _)| label.contains(keyword))
            .map(|&(_, faction)| faction)
    }
}
