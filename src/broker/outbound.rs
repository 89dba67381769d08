//! Per-seat outbound queues. Sends never block the caller.

use crate::{
    game::types::{Seat, SEATS},
    protocol::ServerMsg,
};
use tokio::sync::mpsc::{self, error::TrySendError};

/// Lines buffered per seat before new messages are dropped.
pub const OUTBOUND_CAPACITY: usize = 256;

#[derive(Debug, Default)]
pub struct Outbound {
    seats: [Option<mpsc::Sender<String>>; SEATS],
}

impl Outbound {
    pub fn attach(&mut self, seat: Seat, tx: mpsc::Sender<String>) {
        self.seats[seat] = Some(tx);
    }

    /// Dropping the sender ends that seat's writer task.
    pub fn detach(&mut self, seat: Seat) {
        self.seats[seat] = None;
    }

    pub fn is_attached(&self, seat: Seat) -> bool {
        self.seats[seat].is_some()
    }

    pub fn send_to(&self, seat: Seat, msg: &ServerMsg) {
        self.push(seat, msg.to_line());
    }

    /// Independent send to every attached seat.
    pub fn broadcast(&self, msg: &ServerMsg) {
        let line = msg.to_line();
        for seat in 0..SEATS {
            self.push(seat, line.clone());
        }
    }

    fn push(&self, seat: Seat, line: String) {
        let Some(tx) = &self.seats[seat] else {
            return;
        };
        match tx.try_send(line) {
            Ok(()) => {}
            Err(TrySendError::Full(line)) => {
                log::warn!("seat {seat} outbound queue full; dropped {}", line.trim_end());
            }
            Err(TrySendError::Closed(_)) => log::debug!("seat {seat} writer gone; message dropped"),
        }
    }
}
