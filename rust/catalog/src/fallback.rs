//! Curated monsters substituted when the remote catalog cannot supply one.
//!
//! Every entry is a plain creature with a known catalog id, so the artwork
//! reference can always be built on the image host.

use duelist_engine::cards::Card;
use duelist_engine::rng::DuelRng;

use crate::source::IMAGE_HOST;

/// Bumped whenever an entry is added, removed or re-statted.
pub const FALLBACK_TABLE_VERSION: u32 = 1;

const FALLBACK_CATEGORY: &str = "Normal Monster";

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FallbackEntry {
    pub name: &'static str,
    pub id: &'static str,
    pub offense: i32,
    pub defense: i32,
}

const fn entry(name: &'static str, id: &'static str, offense: i32, defense: i32) -> FallbackEntry {
    FallbackEntry {
        name,
        id,
        offense,
        defense,
    }
}

pub const FALLBACK_MONSTERS: [FallbackEntry; 20] = [
    entry("Dark Magician", "46986414", 2500, 2100),
    entry("Blue-Eyes White Dragon", "89631139", 3000, 2500),
    entry("Summoned Skull", "70781052", 2500, 1200),
    entry("Gaia The Fierce Knight", "06368038", 2300, 2100),
    entry("Celtic Guardian", "91152256", 1400, 1200),
    entry("Mystical Elf", "15025844", 800, 2000),
    entry("Battle Ox", "05053103", 1700, 1000),
    entry("Kuriboh", "40640057", 300, 200),
    entry("Time Wizard", "71625222", 500, 400),
    entry("Red-Eyes B. Dragon", "74677422", 2400, 2000),
    entry("Baby Dragon", "88819587", 1200, 700),
    entry("Hitotsu-Me Giant", "76184692", 1200, 1000),
    entry("Flame Swordsman", "45231177", 1800, 1600),
    entry("Buster Blader", "78193831", 2600, 2300),
    entry("La Jinn the Mystical Genie of the Lamp", "97590747", 1800, 1000),
    entry("Man-Eater Bug", "54652250", 450, 600),
    entry("Hane-Hane", "07089711", 450, 500),
    entry("Mammoth Graveyard", "40374923", 1200, 800),
    entry("Kojikocy", "01184620", 1500, 1200),
    entry("Ryu-Kishin", "24611934", 1000, 500),
];

/// Artwork reference for a catalog id on the image host.
pub fn artwork_for_id(id: &str) -> String {
    format!("{}{}.jpg", IMAGE_HOST, id)
}

impl FallbackEntry {
    pub fn to_card(&self) -> Card {
        Card::new(
            self.name,
            self.offense,
            self.defense,
            artwork_for_id(self.id),
            FALLBACK_CATEGORY,
        )
    }
}

/// Uniform draw from the table. Draws are independent, so repeats happen.
pub fn random_fallback(rng: &mut dyn DuelRng) -> Card {
    FALLBACK_MONSTERS[rng.pick(FALLBACK_MONSTERS.len())].to_card()
}

pub fn fallback_cards() -> Vec<Card> {
    FALLBACK_MONSTERS.iter().map(FallbackEntry::to_card).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use duelist_engine::rng::ScriptedRng;
    use std::collections::HashSet;

    #[test]
    fn every_entry_is_playable_with_artwork() {
        for card in fallback_cards() {
            assert!(card.is_valid_monster(), "{} should be valid", card.name());
            assert!(card.has_artwork(), "{} should have artwork", card.name());
        }
    }

    #[test]
    fn ids_and_names_are_unique() {
        let ids: HashSet<_> = FALLBACK_MONSTERS.iter().map(|e| e.id).collect();
        let names: HashSet<_> = FALLBACK_MONSTERS.iter().map(|e| e.name).collect();
        assert_eq!(ids.len(), FALLBACK_MONSTERS.len());
        assert_eq!(names.len(), FALLBACK_MONSTERS.len());
    }

    #[test]
    fn artwork_is_built_from_id() {
        let card = FALLBACK_MONSTERS[1].to_card();
        assert_eq!(card.name(), "Blue-Eyes White Dragon");
        assert_eq!(
            card.artwork(),
            "https://images.ygoprodeck.com/images/cards/89631139.jpg"
        );
        assert_eq!(card.category(), "Normal Monster");
    }

    #[test]
    fn random_fallback_uses_injected_rng() {
        let mut rng = ScriptedRng::new().picks([7]);
        assert_eq!(random_fallback(&mut rng).name(), "Kuriboh");
    }
}
