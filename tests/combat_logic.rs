//! Unit tests for deterministic tick resolution.
//!
//! Run with `cargo test --tests`.

use lane_duel_server::game::{
    catalog,
    logic::{resolve_tick, Plan},
    types::{CardId, Cell, PlayerSlot, Seat, Unit, UnitId},
};
use std::collections::BTreeMap;

const ASSASSIN: CardId = 0; // hp 100, atk 60
const RAIDER: CardId = 1; // hp 225, atk 25
const KAMIKAZE: CardId = 2; // hp 20, atk 300

fn unit(id: u32, card_id: CardId, owner: Seat, row: i32, col: i32) -> Unit {
    Unit {
        id: UnitId(id),
        card_id,
        owner,
        hp: catalog::card(card_id).unwrap().max_hp,
        cell: Cell::new(row, col),
    }
}

fn arena(units: Vec<Unit>) -> BTreeMap<UnitId, Unit> {
    units.into_iter().map(|u| (u.id, u)).collect()
}

fn fresh_players() -> [PlayerSlot; 2] {
    [PlayerSlot::new(0), PlayerSlot::new(1)]
}

#[test]
fn facing_units_trade_blows_simultaneously() {
    let mut units = arena(vec![unit(0, ASSASSIN, 0, 5, 1), unit(1, RAIDER, 1, 4, 1)]);
    let mut players = fresh_players();

    let report = resolve_tick(&mut units, &mut players);

    assert_eq!(report.plans[&UnitId(0)], Plan::AttackUnit(UnitId(1)));
    assert_eq!(report.plans[&UnitId(1)], Plan::AttackUnit(UnitId(0)));
    assert_eq!(units[&UnitId(0)].hp, 100 - 25);
    assert_eq!(units[&UnitId(1)].hp, 225 - 60);
    // Nobody moved into an occupied cell.
    assert_eq!(units[&UnitId(0)].cell, Cell::new(5, 1));
    assert_eq!(units[&UnitId(1)].cell, Cell::new(4, 1));
}

#[test]
fn lethal_exchange_kills_both_sides() {
    let mut units = arena(vec![unit(0, KAMIKAZE, 0, 5, 0), unit(1, KAMIKAZE, 1, 4, 0)]);
    let mut players = fresh_players();

    let report = resolve_tick(&mut units, &mut players);

    assert!(units.is_empty(), "both kamikazes should be purged");
    assert_eq!(report.destroyed, vec![UnitId(0), UnitId(1)]);
}

#[test]
fn lone_unit_marches_forward() {
    let mut units = arena(vec![unit(0, RAIDER, 0, 7, 2), unit(1, RAIDER, 1, 1, 0)]);
    let mut players = fresh_players();

    resolve_tick(&mut units, &mut players);

    assert_eq!(units[&UnitId(0)].cell, Cell::new(6, 2));
    assert_eq!(units[&UnitId(1)].cell, Cell::new(2, 0));
}

#[test]
fn contested_destination_cancels_every_mover() {
    // Both want (5,1).
    let mut units = arena(vec![unit(0, RAIDER, 0, 6, 1), unit(1, RAIDER, 1, 4, 1)]);
    let mut players = fresh_players();

    let report = resolve_tick(&mut units, &mut players);

    assert_eq!(report.plans[&UnitId(0)], Plan::Move(Cell::new(5, 1)));
    assert_eq!(report.plans[&UnitId(1)], Plan::Move(Cell::new(5, 1)));
    assert!(report.moved.is_empty());
    assert_eq!(units[&UnitId(0)].cell, Cell::new(6, 1));
    assert_eq!(units[&UnitId(1)].cell, Cell::new(4, 1));
}

#[test]
fn blocked_unit_sidesteps_left_first() {
    let mut units = arena(vec![unit(0, RAIDER, 0, 6, 1), unit(1, RAIDER, 0, 5, 1)]);
    let mut players = fresh_players();

    resolve_tick(&mut units, &mut players);

    assert_eq!(units[&UnitId(0)].cell, Cell::new(6, 0));
    assert_eq!(units[&UnitId(1)].cell, Cell::new(4, 1));
}

#[test]
fn blocked_unit_sidesteps_right_at_left_edge() {
    let mut units = arena(vec![unit(0, RAIDER, 1, 3, 0), unit(1, RAIDER, 1, 4, 0)]);
    let mut players = fresh_players();

    resolve_tick(&mut units, &mut players);

    assert_eq!(units[&UnitId(0)].cell, Cell::new(3, 1));
    assert_eq!(units[&UnitId(1)].cell, Cell::new(5, 0));
}

#[test]
fn boxed_in_unit_waits() {
    let mut units = arena(vec![
        unit(0, RAIDER, 0, 6, 1),
        unit(1, RAIDER, 0, 5, 1),
        unit(2, RAIDER, 0, 6, 0),
        unit(3, RAIDER, 0, 6, 2),
    ]);
    let mut players = fresh_players();

    let report = resolve_tick(&mut units, &mut players);

    assert_eq!(report.plans[&UnitId(0)], Plan::Idle);
    assert_eq!(units[&UnitId(0)].cell, Cell::new(6, 1));
}

#[test]
fn defender_is_forced_to_strike_back() {
    // The owner-1 raider sits on the assassin's left; from its own point of
    // view the assassin is on its right, which it never looks at.
    let mut units = arena(vec![unit(0, ASSASSIN, 0, 5, 1), unit(1, RAIDER, 1, 5, 0)]);
    let mut players = fresh_players();

    let report = resolve_tick(&mut units, &mut players);

    assert_eq!(report.plans[&UnitId(0)], Plan::AttackUnit(UnitId(1)));
    assert_eq!(report.plans[&UnitId(1)], Plan::AttackUnit(UnitId(0)));
    assert_eq!(units[&UnitId(0)].hp, 100 - 25);
    assert_eq!(units[&UnitId(1)].hp, 225 - 60);
    assert_eq!(units[&UnitId(1)].cell, Cell::new(5, 0), "forced defender does not move");
}

#[test]
fn enemy_behind_takes_priority_over_enemy_ahead() {
    // Owner-0 unit at (5,1): enemy behind at (6,1), enemy ahead at (4,1).
    let mut units = arena(vec![
        unit(0, RAIDER, 0, 5, 1),
        unit(1, RAIDER, 1, 6, 1),
        unit(2, RAIDER, 1, 4, 1),
    ]);
    let mut players = fresh_players();

    let report = resolve_tick(&mut units, &mut players);

    assert_eq!(report.plans[&UnitId(0)], Plan::AttackUnit(UnitId(1)));
}

#[test]
fn unit_at_enemy_row_hits_the_tower() {
    let mut units = arena(vec![unit(0, ASSASSIN, 0, 0, 1), unit(1, RAIDER, 1, 9, 2)]);
    let mut players = fresh_players();

    let report = resolve_tick(&mut units, &mut players);

    assert_eq!(report.plans[&UnitId(0)], Plan::AttackTower);
    assert_eq!(players[1].tower_damage, 60);
    assert_eq!(players[0].tower_damage, 25);
    assert_eq!(report.tower_hits.len(), 2);
}

#[test]
fn forced_retaliation_replaces_tower_attack() {
    // Raider at (0,2) sees the assassin on its left.
    let mut units = arena(vec![unit(0, ASSASSIN, 0, 0, 1), unit(1, RAIDER, 1, 0, 2)]);
    let mut players = fresh_players();

    let report = resolve_tick(&mut units, &mut players);

    assert_eq!(report.plans[&UnitId(0)], Plan::AttackUnit(UnitId(1)));
    assert_eq!(players[1].tower_damage, 0);
}
