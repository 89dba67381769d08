//! Full-state snapshot broadcast to both clients after every tick.

use crate::game::types::{CardId, Seat, Unit};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitView {
    pub owner: Seat,
    pub card_id: CardId,
    pub row: i32,
    pub col: i32,
    pub hp: i32,
}

impl From<&Unit> for UnitView {
    fn from(u: &Unit) -> Self {
        UnitView {
            owner: u.owner,
            card_id: u.card_id,
            row: u.cell.row,
            col: u.cell.col,
            hp: u.hp,
        }
    }
}

/// Wire form: `elixir0|elixir1|towerDmg0|towerDmg1|owner,card,row,col,hp;...;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub elixir: [u32; 2],
    pub tower_damage: [i32; 2],
    pub units: Vec<UnitView>, // arena (id) order
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}|{}|{}|{}|",
            self.elixir[0], self.elixir[1], self.tower_damage[0], self.tower_damage[1]
        )?;
        for u in &self.units {
            write!(f, "{},{},{},{},{};", u.owner, u.card_id, u.row, u.col, u.hp)?;
        }
        Ok(())
    }
}
