//! Session broker: seats exactly two TCP connections and routes their lines
//! into the match actor.

pub mod connection;
pub mod outbound;

use crate::game::{session::Event, types::SEATS};
use anyhow::Context;
use std::time::Duration;
use tokio::{net::TcpListener, sync::mpsc};

/// Accept until both seats are taken, then stop listening.
/// The n-th accepted connection becomes seat n.
pub async fn serve(listener: TcpListener, events: mpsc::Sender<Event>, idle: Option<Duration>) -> anyhow::Result<()> {
    for seat in 0..SEATS {
        let (stream, peer) = listener.accept().await?;
        log::info!("seat {seat} connected from {peer}");
        connection::attach(seat, stream, events.clone(), idle)
            .await
            .with_context(|| format!("seating player {seat}"))?;
    }
    log::info!("both seats filled; no longer accepting connections");
    Ok(())
}
