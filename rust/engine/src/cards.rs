use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Name given to a card whose source supplied no usable name.
pub const UNKNOWN_NAME: &str = "Unknown Card";

/// Category given to a card whose source supplied no classification.
pub const UNKNOWN_CATEGORY: &str = "Unknown Type";

/// Classification fragments that disqualify a card from play even when the
/// category also mentions "monster".
const EXCLUDED_CATEGORIES: [&str; 5] = ["spell", "trap", "token", "skill", "magic"];

/// Placeholder names some catalogs emit instead of leaving the field empty.
const PLACEHOLDER_VALUES: [&str; 2] = ["null", "undefined"];

/// The stance a side takes for one round.
/// Decides which stat of the revealed card is used as that side's power.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stance {
    /// Offense value is exposed
    Offense,
    /// Defense value is exposed
    Defense,
}

impl Stance {
    pub fn from_offense(is_offense: bool) -> Self {
        if is_offense {
            Stance::Offense
        } else {
            Stance::Defense
        }
    }

    pub fn is_offense(self) -> bool {
        matches!(self, Stance::Offense)
    }

    /// Short label used in round reports ("OFF" / "DEF").
    pub fn label(self) -> &'static str {
        match self {
            Stance::Offense => "OFF",
            Stance::Defense => "DEF",
        }
    }
}

impl fmt::Display for Stance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stance::Offense => write!(f, "offense"),
            Stance::Defense => write!(f, "defense"),
        }
    }
}

/// Coarse strength bracket derived from a card's offense.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum PowerTier {
    /// offense < 1000
    VeryLow,
    /// 1000..1500
    Low,
    /// 1500..2000
    Medium,
    /// 2000..2500
    High,
    /// offense >= 2500
    VeryHigh,
}

/// Play-style label derived from both stats.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Archetype {
    Boss,
    StrongOffense,
    StrongDefense,
    Balanced,
    Offensive,
    Defensive,
}

/// A creature card as supplied by the catalog.
///
/// Stats are clamped to zero and missing text fields are replaced with
/// sentinels at construction, so every `Card` is well-formed. Equality and
/// hashing consider name, offense, defense and category; the artwork
/// reference is presentation data and does not take part.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "CardRepr")]
pub struct Card {
    name: String,
    offense: u32,
    defense: u32,
    artwork: String,
    category: String,
}

#[derive(Deserialize)]
struct CardRepr {
    #[serde(default)]
    name: String,
    #[serde(default)]
    offense: i64,
    #[serde(default)]
    defense: i64,
    #[serde(default)]
    artwork: String,
    #[serde(default)]
    category: String,
}

impl From<CardRepr> for Card {
    fn from(r: CardRepr) -> Self {
        Card::new(
            r.name,
            clamp_stat(r.offense),
            clamp_stat(r.defense),
            r.artwork,
            r.category,
        )
    }
}

fn clamp_stat(v: i64) -> i32 {
    v.clamp(0, i32::MAX as i64) as i32
}

impl Card {
    pub fn new(
        name: impl Into<String>,
        offense: i32,
        defense: i32,
        artwork: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        let name = name.into();
        let category = category.into();
        Self {
            name: if name.trim().is_empty() {
                UNKNOWN_NAME.to_string()
            } else {
                name
            },
            offense: offense.max(0) as u32,
            defense: defense.max(0) as u32,
            artwork: artwork.into(),
            category: if category.trim().is_empty() {
                UNKNOWN_CATEGORY.to_string()
            } else {
                category
            },
        }
    }

    /// Shorthand for a plain "Normal Monster" without artwork.
    pub fn monster(name: impl Into<String>, offense: i32, defense: i32) -> Self {
        Self::new(name, offense, defense, "", "Normal Monster")
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn offense(&self) -> u32 {
        self.offense
    }
    pub fn defense(&self) -> u32 {
        self.defense
    }
    pub fn artwork(&self) -> &str {
        &self.artwork
    }
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Stat exposed under the given stance.
    pub fn power(&self, stance: Stance) -> u32 {
        match stance {
            Stance::Offense => self.offense,
            Stance::Defense => self.defense,
        }
    }

    /// True when the artwork reference is an absolute http(s) URL.
    pub fn has_artwork(&self) -> bool {
        let a = self.artwork.trim();
        !PLACEHOLDER_VALUES.contains(&a) && is_absolute_http_url(a)
    }

    /// Category names a creature and none of the non-creature classifications.
    pub fn is_monster(&self) -> bool {
        is_monster_category(&self.category)
    }

    /// Whether this card may be assigned to a side.
    pub fn is_valid_monster(&self) -> bool {
        self.is_monster()
            && !self.name.is_empty()
            && self.name != UNKNOWN_NAME
            && !PLACEHOLDER_VALUES.contains(&self.name.as_str())
    }

    /// "OFF/DEF"
    pub fn stats_short(&self) -> String {
        format!("{}/{}", self.offense, self.defense)
    }

    /// "Name [OFF/DEF]"
    pub fn compact(&self) -> String {
        format!("{} [{}]", self.name, self.stats_short())
    }

    pub fn total_power(&self) -> u32 {
        self.offense.saturating_add(self.defense)
    }

    pub fn is_stronger_than(&self, other: &Card) -> bool {
        self.offense > other.offense
    }

    pub fn is_more_defensive_than(&self, other: &Card) -> bool {
        self.defense > other.defense
    }

    pub fn power_tier(&self) -> PowerTier {
        match self.offense {
            o if o >= 2500 => PowerTier::VeryHigh,
            o if o >= 2000 => PowerTier::High,
            o if o >= 1500 => PowerTier::Medium,
            o if o >= 1000 => PowerTier::Low,
            _ => PowerTier::VeryLow,
        }
    }

    pub fn archetype(&self) -> Archetype {
        let (o, d) = (self.offense, self.defense);
        if o >= 2500 && d >= 2000 {
            Archetype::Boss
        } else if o >= 2000 {
            Archetype::StrongOffense
        } else if d >= 2000 {
            Archetype::StrongDefense
        } else if o >= 1500 && d >= 1500 {
            Archetype::Balanced
        } else if o >= d {
            Archetype::Offensive
        } else {
            Archetype::Defensive
        }
    }
}

/// `http://` or `https://` (any case) followed by at least one character.
pub fn is_absolute_http_url(reference: &str) -> bool {
    ["http://", "https://"].iter().any(|scheme| {
        reference.len() > scheme.len()
            && reference
                .get(..scheme.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(scheme))
    })
}

/// Case-insensitive creature classification check shared with the catalog,
/// which uses it to discard payloads before building a card.
pub fn is_monster_category(category: &str) -> bool {
    let lower = category.to_lowercase();
    lower.contains("monster") && !EXCLUDED_CATEGORIES.iter().any(|x| lower.contains(x))
}

impl PartialEq for Card {
    fn eq(&self, other: &Self) -> bool {
        self.offense == other.offense
            && self.defense == other.defense
            && self.name == other.name
            && self.category == other.category
    }
}

impl Eq for Card {}

impl Hash for Card {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.offense.hash(state);
        self.defense.hash(state);
        self.category.hash(state);
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (OFF: {}, DEF: {}, Type: {})",
            self.name, self.offense, self.defense, self.category
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_stats_are_clamped() {
        let c = Card::new("Glitch", -100, -1, "", "Effect Monster");
        assert_eq!(c.offense(), 0);
        assert_eq!(c.defense(), 0);
    }

    #[test]
    fn empty_text_fields_get_sentinels() {
        let c = Card::new("", 100, 100, "", "  ");
        assert_eq!(c.name(), UNKNOWN_NAME);
        assert_eq!(c.category(), UNKNOWN_CATEGORY);
        assert!(!c.is_valid_monster());
    }

    #[test]
    fn non_creature_categories_are_rejected() {
        for cat in ["Spell Card", "Trap Card", "Token", "Skill Card", "Magic Monster"] {
            assert!(!Card::new("X", 1, 1, "", cat).is_valid_monster(), "{cat}");
        }
        assert!(Card::new("X", 1, 1, "", "Effect Monster").is_valid_monster());
        assert!(Card::new("X", 1, 1, "", "FUSION MONSTER").is_valid_monster());
    }

    #[test]
    fn placeholder_names_are_invalid() {
        assert!(!Card::monster("null", 1, 1).is_valid_monster());
        assert!(!Card::monster("undefined", 1, 1).is_valid_monster());
    }

    #[test]
    fn artwork_must_be_absolute() {
        assert!(Card::new("X", 1, 1, "https://img/x.jpg", "Normal Monster").has_artwork());
        assert!(!Card::new("X", 1, 1, "x.jpg", "Normal Monster").has_artwork());
        assert!(!Card::new("X", 1, 1, "null", "Normal Monster").has_artwork());
        assert!(!Card::monster("X", 1, 1).has_artwork());
        assert!(Card::new("X", 1, 1, "HTTP://img/x.jpg", "Normal Monster").has_artwork());
        for loose in ["httpfoo", "http:relative", "https:/x.jpg", "https://", "  http  "] {
            assert!(!Card::new("X", 1, 1, loose, "Normal Monster").has_artwork(), "{loose}");
        }
    }

    #[test]
    fn equality_ignores_artwork() {
        let a = Card::new("Kuriboh", 300, 200, "https://a", "Effect Monster");
        let b = Card::new("Kuriboh", 300, 200, "https://b", "Effect Monster");
        assert_eq!(a, b);
        assert_ne!(a, Card::new("Kuriboh", 300, 200, "https://a", "Normal Monster"));
    }

    #[test]
    fn power_follows_stance() {
        let c = Card::monster("Dragon", 3000, 2500);
        assert_eq!(c.power(Stance::Offense), 3000);
        assert_eq!(c.power(Stance::Defense), 2500);
    }

    #[test]
    fn stat_comparisons() {
        let dragon = Card::monster("Dragon", 3000, 2500);
        let elf = Card::monster("Elf", 800, 2000);
        assert_eq!(dragon.total_power(), 5500);
        assert_eq!(Card::monster("Glitch", -5, 100).total_power(), 100);
        assert!(dragon.is_stronger_than(&elf));
        assert!(!elf.is_stronger_than(&dragon));
        assert!(!dragon.is_stronger_than(&dragon.clone()));
        assert!(dragon.is_more_defensive_than(&elf));
        assert!(!Card::monster("Wall", 0, 2000).is_more_defensive_than(&elf));
    }

    #[test]
    fn tiers_and_archetypes() {
        assert_eq!(Card::monster("a", 3000, 2500).archetype(), Archetype::Boss);
        assert_eq!(Card::monster("a", 2100, 100).archetype(), Archetype::StrongOffense);
        assert_eq!(Card::monster("a", 800, 2000).archetype(), Archetype::StrongDefense);
        assert_eq!(Card::monster("a", 1800, 1600).archetype(), Archetype::Balanced);
        assert_eq!(Card::monster("a", 1200, 700).archetype(), Archetype::Offensive);
        assert_eq!(Card::monster("a", 450, 600).archetype(), Archetype::Defensive);
        assert_eq!(Card::monster("a", 999, 0).power_tier(), PowerTier::VeryLow);
        assert_eq!(Card::monster("a", 1500, 0).power_tier(), PowerTier::Medium);
        assert_eq!(Card::monster("a", 2500, 0).power_tier(), PowerTier::VeryHigh);
    }

    #[test]
    fn deserialize_normalizes() {
        let c: Card =
            serde_json::from_str(r#"{"name":"","offense":-5,"defense":10,"category":""}"#)
                .unwrap();
        assert_eq!(c.name(), UNKNOWN_NAME);
        assert_eq!(c.offense(), 0);
        assert_eq!(c.defense(), 10);
    }
}
