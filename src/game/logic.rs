//! Deterministic per-tick combat and movement resolution.
//!
//! Every phase reads the board as it stood at the start of the tick; damage
//! is accumulated and applied at once, and moves are arbitrated per
//! destination after dead units are purged.

use crate::game::{
    catalog,
    types::{opponent, Cell, PlayerSlot, Unit, UnitId},
};
use std::collections::{BTreeMap, HashMap};

/// What a unit does this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plan {
    Idle,
    AttackUnit(UnitId),
    Move(Cell),
    AttackTower,
}

/// Per-tick outcome, mostly for logging and tests.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TickReport {
    pub plans: BTreeMap<UnitId, Plan>,
    pub destroyed: Vec<UnitId>,
    pub moved: Vec<(UnitId, Cell)>,
    /// (attacker, damage) for every tower hit.
    pub tower_hits: Vec<(UnitId, i32)>,
}

/// Read-only occupancy view over the unit arena.
struct Board<'a> {
    units: &'a BTreeMap<UnitId, Unit>,
    by_cell: HashMap<Cell, UnitId>,
}

impl<'a> Board<'a> {
    fn new(units: &'a BTreeMap<UnitId, Unit>) -> Self {
        let by_cell = units.values().map(|u| (u.cell, u.id)).collect();
        Board { units, by_cell }
    }

    fn at(&self, cell: Cell) -> Option<&'a Unit> {
        self.by_cell.get(&cell).and_then(|id| self.units.get(id))
    }

    fn is_free(&self, cell: Cell) -> bool {
        cell.in_bounds() && !self.by_cell.contains_key(&cell)
    }
}

/// Behind, left, ahead: the order in which a unit looks for enemies.
fn watch_cells(u: &Unit) -> [Cell; 3] {
    let fwd = u.forward();
    [u.cell.offset(-fwd, 0), u.cell.offset(0, -1), u.cell.offset(fwd, 0)]
}

fn attack_of(u: &Unit) -> i32 {
    catalog::card(u.card_id).map_or(0, |c| c.attack)
}

fn plan_for(u: &Unit, board: &Board) -> Plan {
    for cell in watch_cells(u) {
        if let Some(enemy) = board.at(cell).filter(|o| o.owner != u.owner) {
            return Plan::AttackUnit(enemy.id);
        }
    }

    let ahead = u.cell.offset(u.forward(), 0);
    // Enemies ahead were handled above, so an occupant here is friendly.
    if board.at(ahead).is_some() {
        for side in [u.cell.offset(0, -1), u.cell.offset(0, 1)] {
            if board.is_free(side) {
                return Plan::Move(side);
            }
        }
    }

    if board.is_free(ahead) {
        return Plan::Move(ahead);
    }
    if u.cell.row == u.tower_row() {
        return Plan::AttackTower;
    }
    Plan::Idle
}

/// Picks the attacker a forced defender strikes back at: first match among
/// behind/left/ahead, else the lowest unit id.
fn retaliation_target(defender: &Unit, attackers: &[UnitId], board: &Board) -> Option<UnitId> {
    watch_cells(defender)
        .into_iter()
        .filter_map(|cell| board.at(cell))
        .find(|o| o.owner != defender.owner && attackers.contains(&o.id))
        .map(|o| o.id)
        .or_else(|| attackers.iter().min().copied())
}

/// Runs planning, retaliation, damage, death, movement and tower phases.
///
/// Elixir regen and the clock are the caller's concern.
pub fn resolve_tick(units: &mut BTreeMap<UnitId, Unit>, players: &mut [PlayerSlot; 2]) -> TickReport {
    let mut report = TickReport::default();

    // 1. Planning against the pre-tick board.
    let mut plans: BTreeMap<UnitId, Plan> = {
        let board = Board::new(units);
        units
            .values()
            .filter(|u| u.hp > 0)
            .map(|u| (u.id, plan_for(u, &board)))
            .collect()
    };

    // 2. Forced retaliation. Only first-phase attacks force a response.
    let mut attackers_by_target: BTreeMap<UnitId, Vec<UnitId>> = BTreeMap::new();
    for (&who, plan) in &plans {
        if let Plan::AttackUnit(target) = *plan {
            attackers_by_target.entry(target).or_default().push(who);
        }
    }
    let forced: Vec<(UnitId, UnitId)> = {
        let board = Board::new(units);
        attackers_by_target
            .iter()
            .filter(|(defender, _)| !matches!(plans.get(*defender), Some(Plan::AttackUnit(_)) | None))
            .filter_map(|(defender, attackers)| {
                let d = units.get(defender)?;
                retaliation_target(d, attackers, &board).map(|t| (*defender, t))
            })
            .collect()
    };
    for (defender, target) in forced {
        log::debug!("unit {defender:?} forced to retaliate against {target:?}");
        plans.insert(defender, Plan::AttackUnit(target));
    }

    // 3. Damage, accumulated from the pre-tick snapshot and applied at once.
    let mut incoming: BTreeMap<UnitId, i32> = BTreeMap::new();
    for (who, plan) in &plans {
        if let (Plan::AttackUnit(target), Some(attacker)) = (plan, units.get(who)) {
            let dmg = attack_of(attacker);
            log::debug!("unit {who:?} (seat {}) hits {target:?} for {dmg}", attacker.owner);
            *incoming.entry(*target).or_default() += dmg;
        }
    }
    for (target, dmg) in incoming {
        if let Some(u) = units.get_mut(&target) {
            u.hp -= dmg;
        }
    }

    // 4. Deaths.
    report.destroyed = units.values().filter(|u| u.hp <= 0).map(|u| u.id).collect();
    units.retain(|_, u| u.hp > 0);

    // 5. Movement. A destination wanted by more than one survivor is cancelled.
    let mut requests: BTreeMap<Cell, Vec<UnitId>> = BTreeMap::new();
    for (who, plan) in &plans {
        if let Plan::Move(dest) = *plan {
            if units.contains_key(who) && dest.in_bounds() {
                requests.entry(dest).or_default().push(*who);
            }
        }
    }
    let approved: Vec<(UnitId, Cell)> = {
        let board = Board::new(units);
        requests
            .into_iter()
            .filter_map(|(dest, movers)| match movers.as_slice() {
                [only] if board.is_free(dest) => Some((*only, dest)),
                [_] => None,
                _ => {
                    log::debug!("move into {dest:?} contested by {movers:?}; cancelled");
                    None
                }
            })
            .collect()
    };
    for (who, dest) in approved {
        if let Some(u) = units.get_mut(&who) {
            u.cell = dest;
            report.moved.push((who, dest));
        }
    }

    // 6. Tower hits by surviving units.
    for (who, plan) in &plans {
        if *plan != Plan::AttackTower {
            continue;
        }
        if let Some(u) = units.get(who).filter(|u| u.cell.row == u.tower_row()) {
            let dmg = attack_of(u);
            players[opponent(u.owner)].tower_damage += dmg;
            report.tower_hits.push((*who, dmg));
        }
    }

    report.plans = plans;
    report
}
