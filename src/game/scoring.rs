//! Match outcome from final tower damage.

/// Seat whose tower took less damage wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Seat0,
    Seat1,
    Draw,
}

impl Outcome {
    /// Label stored with the persisted result.
    pub fn label(self) -> &'static str {
        match self {
            Outcome::Seat0 => "P1",
            Outcome::Seat1 => "P2",
            Outcome::Draw => "DRAW",
        }
    }
}

/// `d0`/`d1` = damage received by seat 0's / seat 1's tower.
pub fn outcome(d0: i32, d1: i32) -> Outcome {
    match d0.cmp(&d1) {
        std::cmp::Ordering::Less => Outcome::Seat0,
        std::cmp::Ordering::Greater => Outcome::Seat1,
        std::cmp::Ordering::Equal => Outcome::Draw,
    }
}
