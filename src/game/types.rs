/// Battlefield height; rows 0-4 are seat 1's half, rows 5-9 seat 0's.
pub const ROWS: i32 = 10;
pub const COLS: i32 = 3;
/// Rows each seat may deploy into.
pub const HALF_ROWS: i32 = 5;

pub const SEATS: usize = 2;
pub const MAX_ELIXIR: u32 = 10;
pub const START_ELIXIR: u32 = 5;
pub const MAX_SELECTED: usize = 4;

/// Connection slot index, 0 or 1.
pub type Seat = usize;
pub type CardId = u8;

/// Arena key of a live unit. Ids are never reused within a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UnitId(pub u32);

/// Global grid coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    pub const fn new(row: i32, col: i32) -> Self {
        Cell { row, col }
    }

    pub fn in_bounds(self) -> bool {
        (0..ROWS).contains(&self.row) && (0..COLS).contains(&self.col)
    }

    pub fn offset(self, d_row: i32, d_col: i32) -> Self {
        Cell::new(self.row + d_row, self.col + d_col)
    }
}

/// One unit on the battlefield.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit {
    pub id: UnitId,
    pub card_id: CardId,
    pub owner: Seat,
    pub hp: i32, // current hit-points, purged at <= 0
    pub cell: Cell,
}

impl Unit {
    /// Row delta towards the enemy tower.
    pub fn forward(&self) -> i32 {
        if self.owner == 0 {
            -1
        } else {
            1
        }
    }

    /// Row from which this unit can hit the enemy tower.
    pub fn tower_row(&self) -> i32 {
        if self.owner == 0 {
            0
        } else {
            ROWS - 1
        }
    }
}

/// Per-connection player state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerSlot {
    pub index: Seat,
    pub ready: bool,
    pub selected: Vec<CardId>,
    pub elixir: u32,
    /// Damage received by this seat's tower in the current match.
    pub tower_damage: i32,
}

impl PlayerSlot {
    pub fn new(index: Seat) -> Self {
        PlayerSlot {
            index,
            ready: false,
            selected: Vec::new(),
            elixir: START_ELIXIR,
            tower_damage: 0,
        }
    }

    /// Adds one elixir, saturating at [`MAX_ELIXIR`].
    pub fn regen(&mut self) {
        self.elixir = (self.elixir + 1).min(MAX_ELIXIR);
    }
}

/// The other seat.
pub fn opponent(seat: Seat) -> Seat {
    1 - seat
}

/// Placement request in the deploying seat's own coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeployOrder {
    pub card_id: CardId,
    /// 0 is the row next to the midline.
    pub local_row: u8,
    pub col: u8,
}

impl DeployOrder {
    /// Maps the seat-relative row onto the global grid: seat 0 owns rows
    /// 5..=9, seat 1 owns rows 4..=0.
    pub fn global_cell(&self, seat: Seat) -> Cell {
        let local = i32::from(self.local_row);
        let row = if seat == 0 { HALF_ROWS + local } else { HALF_ROWS - 1 - local };
        Cell::new(row, i32::from(self.col))
    }
}
