//! Fixed-period tick source for the match actor.

use crate::game::session::Event;
use tokio::{
    sync::mpsc,
    task::JoinHandle,
    time::{interval_at, Duration, Instant, MissedTickBehavior},
};

/// Send `Event::Tick` every `period`, first one a full period from now.
/// Stops once the actor's inbox is closed.
pub async fn run(period: Duration, events: mpsc::Sender<Event>) {
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        ticker.tick().await;
        if events.send(Event::Tick).await.is_err() {
            log::debug!("tick scheduler stopping: match actor gone");
            break;
        }
    }
}

/// Spawn the tick loop as a Tokio task.
pub fn start(period: Duration, events: mpsc::Sender<Event>) -> JoinHandle<()> {
    tokio::spawn(run(period, events))
}
