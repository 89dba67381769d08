//! Result sink: where finished matches go.
//!
//! The match actor only sees the [`ResultSink`] trait; the Postgres
//! implementation lives in [`crate::db::match_repo`].

use crate::game::scoring;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Final tower damage of a finished match, indexed by seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinalScores {
    pub match_id: Uuid,
    pub tower_damage: [i32; 2],
}

/// Row written for every finished match.
#[derive(Debug, Clone, Serialize)]
pub struct MatchRecord {
    pub match_id: Uuid,
    pub player1_damage: i32,
    pub player2_damage: i32,
    pub result: &'static str,
    pub recorded_at: DateTime<Utc>,
}

impl From<FinalScores> for MatchRecord {
    fn from(s: FinalScores) -> Self {
        let [d0, d1] = s.tower_damage;
        MatchRecord {
            match_id: s.match_id,
            player1_damage: d0,
            player2_damage: d1,
            result: scoring::outcome(d0, d1).label(),
            recorded_at: Utc::now(),
        }
    }
}

/// Durable storage for finished matches. Errors are logged by the caller
/// and never keep the match from returning to the lobby.
pub trait ResultSink: Send + Sync {
    fn record_result(&self, scores: FinalScores) -> anyhow::Result<()>;
}

/// Fallback sink used when no database is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl ResultSink for LogSink {
    fn record_result(&self, scores: FinalScores) -> anyhow::Result<()> {
        let record = MatchRecord::from(scores);
        log::info!("match result {}", serde_json::to_string(&record)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_serializes_as_a_flat_row() {
        let record = MatchRecord::from(FinalScores {
            match_id: Uuid::nil(),
            tower_damage: [60, 240],
        });

        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["match_id"], "00000000-0000-0000-0000-000000000000");
        assert_eq!(json["player1_damage"], 60);
        assert_eq!(json["player2_damage"], 240);
        assert_eq!(json["result"], "P1");
        assert!(json["recorded_at"].is_string());
    }
}
