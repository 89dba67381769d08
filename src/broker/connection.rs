//! One reader task and one writer task per TCP connection.

use crate::{
    broker::outbound::OUTBOUND_CAPACITY,
    game::{session::Event, types::Seat},
};
use std::{fmt, time::Duration};
use tokio::{
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader},
    net::{
        tcp::{OwnedReadHalf, OwnedWriteHalf},
        TcpStream,
    },
    sync::mpsc,
    time::timeout,
};

/// The match actor's inbox is closed, so the seat cannot be registered.
#[derive(Debug)]
pub enum AttachErr {
    ActorGone,
}

impl fmt::Display for AttachErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttachErr::ActorGone => write!(f, "match actor stopped"),
        }
    }
}

impl std::error::Error for AttachErr {}

/// Registers the seat with the match actor (which greets it with `ASSIGN`)
/// and starts its reader and writer.
pub async fn attach(
    seat: Seat,
    stream: TcpStream,
    events: mpsc::Sender<Event>,
    idle: Option<Duration>,
) -> Result<(), AttachErr> {
    if let Err(e) = stream.set_nodelay(true) {
        log::debug!("seat {seat}: set_nodelay failed: {e}");
    }
    let (read_half, write_half) = stream.into_split();
    let (tx, rx) = mpsc::channel::<String>(OUTBOUND_CAPACITY);
    tokio::spawn(write_loop(seat, write_half, rx));

    // Registered before the reader starts so no line can overtake it.
    events
        .send(Event::Connected { seat, outbound: tx })
        .await
        .map_err(|_| AttachErr::ActorGone)?;
    tokio::spawn(read_loop(seat, read_half, events, idle));
    Ok(())
}

async fn write_loop(seat: Seat, mut writer: OwnedWriteHalf, mut rx: mpsc::Receiver<String>) {
    while let Some(line) = rx.recv().await {
        if let Err(e) = writer.write_all(line.as_bytes()).await {
            log::warn!("send to seat {seat} failed: {e}");
            break;
        }
    }
    let _ = writer.shutdown().await;
    log::debug!("writer for seat {seat} finished");
}

async fn read_loop(seat: Seat, reader: OwnedReadHalf, events: mpsc::Sender<Event>, idle: Option<Duration>) {
    let mut lines = BufReader::new(reader).lines();
    loop {
        let next = match idle {
            Some(limit) => match timeout(limit, lines.next_line()).await {
                Ok(res) => res,
                Err(_) => {
                    log::info!("seat {seat} silent for {limit:?}; dropping connection");
                    break;
                }
            },
            None => lines.next_line().await,
        };
        match next {
            Ok(Some(line)) => {
                if events.send(Event::Line { seat, line }).await.is_err() {
                    return;
                }
            }
            Ok(None) => {
                log::info!("seat {seat} closed the connection");
                break;
            }
            Err(e) => {
                log::warn!("read from seat {seat} failed: {e}");
                break;
            }
        }
    }
    let _ = events.send(Event::Disconnected { seat }).await;
}
