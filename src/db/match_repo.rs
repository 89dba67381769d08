//! Postgres-backed result sink.
//
//  Table
//  -----
//  matches – one row per finished match, written once, never updated

use crate::results::{FinalScores, MatchRecord, ResultSink};
use anyhow::{Context, Result};
use sqlx::PgPool;
use std::time::Duration;
use tokio_retry::{
    strategy::{jitter, ExponentialBackoff},
    Retry,
};

const INSERT_ATTEMPTS: usize = 3;

/// Delays between insert attempts: 100 ms, then 200 ms. One delay fewer
/// than attempts, since the first try runs immediately.
fn insert_backoff() -> impl Iterator<Item = Duration> {
    ExponentialBackoff::from_millis(2)
        .factor(50)
        .max_delay(Duration::from_secs(5))
        .take(INSERT_ATTEMPTS - 1)
}

/// Create the `matches` table if this is a fresh database.
pub async fn ensure_schema(db: &PgPool) -> Result<()> {
    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS matches (
               id             SERIAL PRIMARY KEY,
               match_id       UUID        NOT NULL,
               player1_damage INTEGER     NOT NULL,
               player2_damage INTEGER     NOT NULL,
               result         VARCHAR(16) NOT NULL,
               recorded_at    TIMESTAMPTZ NOT NULL DEFAULT now()
           )"#,
    )
    .execute(db)
    .await
    .context("creating matches table")?;
    Ok(())
}

/// Insert one finished match.
pub async fn insert(db: &PgPool, record: &MatchRecord) -> Result<()> {
    sqlx::query(
        "INSERT INTO matches (match_id, player1_damage, player2_damage, result, recorded_at)
         VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(record.match_id)
    .bind(record.player1_damage)
    .bind(record.player2_damage)
    .bind(record.result)
    .bind(record.recorded_at)
    .execute(db)
    .await
    .context("inserting match result")?;
    Ok(())
}

/// Writes results on a background task so a slow database never stalls play.
#[derive(Clone)]
pub struct PgResultSink {
    pool: PgPool,
}

impl PgResultSink {
    pub async fn new(pool: PgPool) -> Result<Self> {
        ensure_schema(&pool).await?;
        Ok(PgResultSink { pool })
    }
}

impl ResultSink for PgResultSink {
    fn record_result(&self, scores: FinalScores) -> Result<()> {
        let runtime = tokio::runtime::Handle::try_current().context("no tokio runtime for result insert")?;
        let pool = self.pool.clone();
        let record = MatchRecord::from(scores);
        runtime.spawn(async move {
            let strategy = insert_backoff().map(jitter);
            match Retry::spawn(strategy, || insert(&pool, &record)).await {
                Ok(()) => log::info!("stored result of match {} ({})", record.match_id, record.result),
                Err(e) => log::error!("giving up on result of match {}: {e:?}", record.match_id),
            }
        });
        Ok(())
    }
}
