//! Line-based wire protocol shared by clients, the broker and the match actor.
//!
//! Every message is one UTF-8 line `"<TYPE>:<payload>\n"`.

use crate::game::{
    snapshot::Snapshot,
    types::{CardId, DeployOrder, Seat, MAX_SELECTED},
};
use std::fmt;

/// Frame one message. An empty payload still carries the colon.
pub fn encode(kind: &str, payload: &str) -> String {
    format!("{kind}:{payload}\n")
}

/// Split a line on its first colon; both halves are trimmed.
/// A line without a colon is all type and no payload. Never fails.
pub fn decode(line: &str) -> (&str, &str) {
    match line.split_once(':') {
        Some((kind, payload)) => (kind.trim(), payload.trim()),
        None => (line.trim(), ""),
    }
}

// ---------- client → server ----------
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientMsg {
    /// Deck choice; non-numeric tokens are dropped, at most four kept.
    Select(Vec<CardId>),
    Ready,
    NotReady,
    Deploy(DeployOrder),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandErr {
    Unknown(String),
    Malformed { kind: &'static str, payload: String },
}

impl fmt::Display for CommandErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandErr::Unknown(kind) => write!(f, "unknown message type {kind:?}"),
            CommandErr::Malformed { kind, payload } => write!(f, "malformed {kind} payload {payload:?}"),
        }
    }
}

impl std::error::Error for CommandErr {}

impl ClientMsg {
    /// Interpret a decoded `(type, payload)` pair.
    pub fn parse(kind: &str, payload: &str) -> Result<Self, CommandErr> {
        match kind {
            "SELECT" => Ok(ClientMsg::Select(parse_selection(payload))),
            "READY" => Ok(ClientMsg::Ready),
            "NOTREADY" => Ok(ClientMsg::NotReady),
            "DEPLOY" => parse_deploy(payload).map(ClientMsg::Deploy).ok_or_else(|| CommandErr::Malformed {
                kind: "DEPLOY",
                payload: payload.to_string(),
            }),
            other => Err(CommandErr::Unknown(other.to_string())),
        }
    }
}

fn parse_selection(payload: &str) -> Vec<CardId> {
    payload
        .split(',')
        .filter_map(|tok| tok.trim().parse::<CardId>().ok())
        .take(MAX_SELECTED)
        .collect()
}

/// `cardId,localRow,col`, exactly three integers.
fn parse_deploy(payload: &str) -> Option<DeployOrder> {
    let mut fields = payload.split(',').map(|tok| tok.trim().parse::<u8>());
    let card_id = fields.next()?.ok()?;
    let local_row = fields.next()?.ok()?;
    let col = fields.next()?.ok()?;
    if fields.next().is_some() {
        return None;
    }
    Some(DeployOrder {
        card_id,
        local_row,
        col,
    })
}

// ---------- server → client ----------
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerMsg {
    Assign(Seat),
    Ready(Seat),
    NotReady(Seat),
    Select { seat: Seat, cards: Vec<CardId> },
    StartGame,
    Deploy { seat: Seat, order: DeployOrder },
    Update(Snapshot),
    End { tower_damage: [i32; 2] },
    Info(String),
}

impl ServerMsg {
    pub fn kind(&self) -> &'static str {
        match self {
            ServerMsg::Assign(_) => "ASSIGN",
            ServerMsg::Ready(_) => "READY",
            ServerMsg::NotReady(_) => "NOTREADY",
            ServerMsg::Select { .. } => "SELECT",
            ServerMsg::StartGame => "START_GAME",
            ServerMsg::Deploy { .. } => "DEPLOY",
            ServerMsg::Update(_) => "UPDATE",
            ServerMsg::End { .. } => "END",
            ServerMsg::Info(_) => "INFO",
        }
    }

    pub fn payload(&self) -> String {
        match self {
            ServerMsg::Assign(seat) | ServerMsg::Ready(seat) | ServerMsg::NotReady(seat) => seat.to_string(),
            ServerMsg::Select { seat, cards } => {
                let csv: Vec<String> = cards.iter().map(ToString::to_string).collect();
                format!("{seat}:{}", csv.join(","))
            }
            ServerMsg::StartGame => String::new(),
            ServerMsg::Deploy { seat, order } => {
                format!("{seat}:{},{},{}", order.card_id, order.local_row, order.col)
            }
            ServerMsg::Update(snap) => snap.to_string(),
            ServerMsg::End { tower_damage } => format!("{}/{}", tower_damage[0], tower_damage[1]),
            ServerMsg::Info(text) => text.clone(),
        }
    }

    /// Newline-terminated wire line.
    pub fn to_line(&self) -> String {
        encode(self.kind(), &self.payload())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_splits_on_first_colon_only() {
        assert_eq!(decode("SELECT:0:1,2\n"), ("SELECT", "0:1,2"));
    }

    #[test]
    fn decode_without_colon_is_all_type() {
        assert_eq!(decode("  READY \r\n"), ("READY", ""));
        assert_eq!(decode(""), ("", ""));
    }

    #[test]
    fn empty_payload_keeps_colon() {
        assert_eq!(encode("START_GAME", ""), "START_GAME:\n");
    }
}
