use lane_duel_server::{
    broker,
    config::settings,
    db::match_repo::PgResultSink,
    game::session,
    results::{LogSink, ResultSink},
    scheduler,
};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    // Configuration
    let cfg = settings();

    // Result sink
    let sink: Arc<dyn ResultSink> = match &cfg.database_url {
        Some(url) => {
            let pool = PgPoolOptions::new().max_connections(5).connect(url).await?;
            Arc::new(PgResultSink::new(pool).await?)
        }
        None => {
            log::warn!("DATABASE_URL not set; match results will only be logged");
            Arc::new(LogSink)
        }
    };

    // Match actor + tick loop
    let events = session::start(cfg.rules(), sink);
    scheduler::start(cfg.tick_period(), events.clone());

    // Seat the two players
    let listener = TcpListener::bind((cfg.bind_addr.as_str(), cfg.port)).await?;
    log::info!("listening on {}; waiting for 2 players", listener.local_addr()?);
    broker::serve(listener, events, cfg.idle_timeout()).await?;

    // Matches keep running until the process is stopped.
    tokio::signal::ctrl_c().await?;
    log::info!("shutting down");
    Ok(())
}
