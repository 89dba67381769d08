//! Fixed card catalog shared by both seats. Read-only for the process lifetime.

use crate::game::types::CardId;

/// One immutable catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardDefinition {
    pub id: CardId,
    pub name: &'static str,
    pub cost: u32,
    pub max_hp: i32,
    pub attack: i32,
}

const fn def(id: CardId, name: &'static str, cost: u32, max_hp: i32, attack: i32) -> CardDefinition {
    CardDefinition {
        id,
        name,
        cost,
        max_hp,
        attack,
    }
}

/// Indexed by card id.
pub static CATALOG: [CardDefinition; 8] = [
    def(0, "Assassin", 2, 100, 60),
    def(1, "Raider", 2, 225, 25),
    def(2, "Kamikaze", 3, 20, 300),
    def(3, "Champion", 4, 350, 60),
    def(4, "Prince", 5, 600, 85),
    def(5, "Destroyer", 4, 180, 110),
    def(6, "Guardian", 6, 700, 60),
    def(7, "Titan", 7, 750, 120),
];

/// Look up a card by id.
pub fn card(id: CardId) -> Option<&'static CardDefinition> {
    CATALOG.get(usize::from(id))
}
