//! Authoritative match state and the command handlers that mutate it.
//!
//! A handler that returns `Err` has left the state untouched.

use crate::{
    game::{
        catalog,
        logic::{self, TickReport},
        snapshot::{Snapshot, UnitView},
        types::{Cell, CardId, DeployOrder, PlayerSlot, Seat, Unit, UnitId, COLS, HALF_ROWS, MAX_SELECTED, START_ELIXIR},
    },
    results::FinalScores,
};
use std::{collections::BTreeMap, fmt};
use uuid::Uuid;

/// Clock settings for one match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchRules {
    /// Seconds added to the match clock per tick.
    pub tick_secs: u32,
    pub match_secs: u32,
}

impl Default for MatchRules {
    fn default() -> Self {
        MatchRules {
            tick_secs: 3,
            match_secs: 120,
        }
    }
}

/// Why a game action was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    NoActiveMatch,
    UnknownCard(CardId),
    OutOfRange { local_row: u8, col: u8 },
    InsufficientElixir { have: u32, need: u32 },
    Occupied(Cell),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::NoActiveMatch => write!(f, "no match in progress"),
            Rejection::UnknownCard(id) => write!(f, "unknown card {id}"),
            Rejection::OutOfRange { local_row, col } => write!(f, "cell ({local_row},{col}) outside own half"),
            Rejection::InsufficientElixir { have, need } => write!(f, "needs {need} elixir, has {have}"),
            Rejection::Occupied(cell) => write!(f, "cell {},{} occupied", cell.row, cell.col),
        }
    }
}

impl std::error::Error for Rejection {}

#[derive(Debug)]
pub struct MatchState {
    pub players: [PlayerSlot; 2],
    units: BTreeMap<UnitId, Unit>,
    next_unit_id: u32,
    elapsed_secs: u32,
    in_match: bool,
    match_id: Uuid,
    rules: MatchRules,
}

impl MatchState {
    pub fn new(rules: MatchRules) -> Self {
        MatchState {
            players: [PlayerSlot::new(0), PlayerSlot::new(1)],
            units: BTreeMap::new(),
            next_unit_id: 0,
            elapsed_secs: 0,
            in_match: false,
            match_id: Uuid::nil(),
            rules,
        }
    }

    pub fn in_match(&self) -> bool {
        self.in_match
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    /// Id of the running (or last finished) match; nil before the first one.
    pub fn match_id(&self) -> Uuid {
        self.match_id
    }

    /// Live units in id order.
    pub fn units(&self) -> impl Iterator<Item = &Unit> {
        self.units.values()
    }

    pub fn unit_at(&self, cell: Cell) -> Option<&Unit> {
        self.units.values().find(|u| u.cell == cell)
    }

    /// Replace the seat's deck choice.
    pub fn select(&mut self, seat: Seat, cards: &[CardId]) {
        let slot = &mut self.players[seat];
        slot.selected.clear();
        slot.selected.extend(cards.iter().copied().take(MAX_SELECTED));
    }

    pub fn set_ready(&mut self, seat: Seat, ready: bool) {
        self.players[seat].ready = ready;
    }

    pub fn both_ready(&self) -> bool {
        self.players.iter().all(|p| p.ready)
    }

    /// Fresh battlefield: no units, 5 elixir each, zero tower damage.
    pub fn start_match(&mut self) {
        self.units.clear();
        self.elapsed_secs = 0;
        self.in_match = true;
        self.match_id = Uuid::new_v4();
        for p in &mut self.players {
            p.elixir = START_ELIXIR;
            p.tower_damage = 0;
        }
    }

    /// Back to the lobby: ready flags and units cleared.
    pub fn reset_to_menu(&mut self) {
        self.in_match = false;
        self.units.clear();
        for p in &mut self.players {
            p.ready = false;
        }
    }

    /// Place a unit on the seat's own half and charge its cost.
    pub fn deploy(&mut self, seat: Seat, order: DeployOrder) -> Result<UnitId, Rejection> {
        if !self.in_match {
            return Err(Rejection::NoActiveMatch);
        }
        if i32::from(order.local_row) >= HALF_ROWS || i32::from(order.col) >= COLS {
            return Err(Rejection::OutOfRange {
                local_row: order.local_row,
                col: order.col,
            });
        }
        let card = catalog::card(order.card_id).ok_or(Rejection::UnknownCard(order.card_id))?;
        let slot = &self.players[seat];
        if slot.elixir < card.cost {
            return Err(Rejection::InsufficientElixir {
                have: slot.elixir,
                need: card.cost,
            });
        }
        let cell = order.global_cell(seat);
        if self.unit_at(cell).is_some() {
            return Err(Rejection::Occupied(cell));
        }

        let id = UnitId(self.next_unit_id);
        self.next_unit_id += 1;
        self.units.insert(
            id,
            Unit {
                id,
                card_id: card.id,
                owner: seat,
                hp: card.max_hp,
                cell,
            },
        );
        self.players[seat].elixir -= card.cost;
        log::debug!("seat {seat} deployed {} as {id:?} at {},{}", card.name, cell.row, cell.col);
        Ok(id)
    }

    /// One simulation step: clock and elixir, then combat and movement.
    /// Does nothing outside a match.
    pub fn advance_tick(&mut self) -> TickReport {
        if !self.in_match {
            return TickReport::default();
        }
        self.elapsed_secs += self.rules.tick_secs;
        for p in &mut self.players {
            p.regen();
        }
        let report = logic::resolve_tick(&mut self.units, &mut self.players);
        log::debug!(
            "tick at {}s: {} destroyed, {} moved, elixir {}/{}, tower damage {}/{}",
            self.elapsed_secs,
            report.destroyed.len(),
            report.moved.len(),
            self.players[0].elixir,
            self.players[1].elixir,
            self.players[0].tower_damage,
            self.players[1].tower_damage,
        );
        report
    }

    pub fn is_match_over(&self) -> bool {
        self.in_match && self.elapsed_secs >= self.rules.match_secs
    }

    pub fn final_scores(&self) -> FinalScores {
        FinalScores {
            match_id: self.match_id,
            tower_damage: [self.players[0].tower_damage, self.players[1].tower_damage],
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            elixir: [self.players[0].elixir, self.players[1].elixir],
            tower_damage: [self.players[0].tower_damage, self.players[1].tower_damage],
            units: self.units.values().map(UnitView::from).collect(),
        }
    }
}
