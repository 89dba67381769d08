//! The match actor: one task owns the [`MatchState`] and handles every
//! command, connection change and tick in arrival order.
//! ✔ single writer, no locks
//! ✔ disconnect notification from reader tasks
//! ✔ result sink injected at construction

use crate::{
    broker::outbound::Outbound,
    game::{
        state::{MatchRules, MatchState},
        types::{Seat, SEATS},
    },
    protocol::{decode, ClientMsg, CommandErr, ServerMsg},
    results::ResultSink,
};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Inbox capacity of the match actor.
pub const EVENT_CAPACITY: usize = 64;

/// Everything the actor reacts to.
#[derive(Debug)]
pub enum Event {
    Connected { seat: Seat, outbound: mpsc::Sender<String> },
    Line { seat: Seat, line: String },
    /// Emitted by a reader task on EOF, I/O error or idle timeout.
    Disconnected { seat: Seat },
    Tick,
}

pub struct Session {
    state: MatchState,
    seats: Outbound,
    sink: Arc<dyn ResultSink>,
}

impl Session {
    pub fn new(rules: MatchRules, sink: Arc<dyn ResultSink>) -> Self {
        Session {
            state: MatchState::new(rules),
            seats: Outbound::default(),
            sink,
        }
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn handle(&mut self, event: Event) {
        match event {
            Event::Connected { seat, outbound } => {
                self.seats.attach(seat, outbound);
                self.seats.send_to(seat, &ServerMsg::Assign(seat));
                if (0..SEATS).all(|s| self.seats.is_attached(s)) {
                    self.seats.broadcast(&ServerMsg::Info("MATCH_START".into()));
                }
            }
            Event::Line { seat, line } => self.on_line(seat, &line),
            Event::Disconnected { seat } => {
                log::info!("seat {seat} disconnected; its slot stays frozen");
                self.seats.detach(seat);
                self.seats.broadcast(&ServerMsg::Info(format!("DISCONNECTED:{seat}")));
            }
            Event::Tick => self.on_tick(),
        }
    }

    /// Drain the inbox until every sender is gone.
    pub async fn run(mut self, mut rx: mpsc::Receiver<Event>) {
        while let Some(event) = rx.recv().await {
            self.handle(event);
        }
        log::info!("match actor stopped");
    }

    fn on_line(&mut self, seat: Seat, line: &str) {
        let (kind, payload) = decode(line);
        match ClientMsg::parse(kind, payload) {
            Ok(msg) => self.on_command(seat, msg),
            Err(CommandErr::Unknown(kind)) => log::warn!("seat {seat} sent unknown message type {kind:?}"),
            Err(e) => log::debug!("seat {seat}: {e}; ignored"),
        }
    }

    fn on_command(&mut self, seat: Seat, msg: ClientMsg) {
        match msg {
            ClientMsg::Select(cards) => {
                self.state.select(seat, &cards);
                let cards = self.state.players[seat].selected.clone();
                self.seats.broadcast(&ServerMsg::Select { seat, cards });
            }
            ClientMsg::Ready => {
                self.state.set_ready(seat, true);
                self.seats.broadcast(&ServerMsg::Ready(seat));
                if self.state.both_ready() && !self.state.in_match() {
                    self.state.start_match();
                    log::info!("match {} started", self.state.match_id());
                    self.seats.broadcast(&ServerMsg::StartGame);
                }
            }
            ClientMsg::NotReady => {
                self.state.set_ready(seat, false);
                self.seats.broadcast(&ServerMsg::NotReady(seat));
            }
            ClientMsg::Deploy(order) => match self.state.deploy(seat, order) {
                Ok(_) => self.seats.broadcast(&ServerMsg::Deploy { seat, order }),
                Err(why) => log::debug!("seat {seat} deploy {order:?} rejected: {why}"),
            },
        }
    }

    fn on_tick(&mut self) {
        if !self.state.in_match() {
            return;
        }
        self.state.advance_tick();
        self.seats.broadcast(&ServerMsg::Update(self.state.snapshot()));

        if self.state.is_match_over() {
            let scores = self.state.final_scores();
            log::info!(
                "match {} over: tower damage {}/{}",
                scores.match_id,
                scores.tower_damage[0],
                scores.tower_damage[1]
            );
            self.seats.broadcast(&ServerMsg::End {
                tower_damage: scores.tower_damage,
            });
            if let Err(e) = self.sink.record_result(scores) {
                log::error!("could not record result of match {}: {e:?}", scores.match_id);
            }
            self.state.reset_to_menu();
        }
    }
}

/// Spawn the actor and return its inbox.
pub fn start(rules: MatchRules, sink: Arc<dyn ResultSink>) -> mpsc::Sender<Event> {
    let (tx, rx) = mpsc::channel::<Event>(EVENT_CAPACITY);
    tokio::spawn(Session::new(rules, sink).run(rx));
    tx
}
