//! Runtime configuration for the duel server.

use crate::game::state::MatchRules;
use once_cell::sync::Lazy;
use std::{env, str::FromStr, time::Duration};

/// Idle clients are kept by default: the protocol has no heartbeat and the
/// listener closes once both seats are taken.
pub const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 0;

#[derive(Debug)]
pub struct Settings {
    pub bind_addr: String,
    pub port: u16,
    /// Simulation period in seconds.
    pub tick_secs: u32,
    /// Match length before auto-finish.
    pub match_secs: u32,
    /// Seconds without a line from a client before it is dropped; 0 disables.
    pub idle_timeout_secs: u64,
    /// Postgres URL for storing results; results are only logged when unset.
    pub database_url: Option<String>,
}

fn parse_or<T: FromStr>(raw: Option<String>, default: T) -> T {
    raw.and_then(|v| v.trim().parse::<T>().ok()).unwrap_or(default)
}

fn var_or<T: FromStr>(key: &str, default: T) -> T {
    parse_or(env::var(key).ok(), default)
}

impl Settings {
    fn from_env() -> Self {
        let defaults = MatchRules::default();
        Settings {
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0".into()),
            port: var_or("PORT", 23456),
            tick_secs: var_or("TICK_SECS", defaults.tick_secs).max(1),
            match_secs: var_or("MATCH_SECS", defaults.match_secs),
            idle_timeout_secs: var_or("IDLE_TIMEOUT_SECS", DEFAULT_IDLE_TIMEOUT_SECS),
            database_url: env::var("DATABASE_URL").ok().filter(|s| !s.is_empty()),
        }
    }

    pub fn rules(&self) -> MatchRules {
        MatchRules {
            tick_secs: self.tick_secs,
            match_secs: self.match_secs,
        }
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_secs(u64::from(self.tick_secs))
    }

    pub fn idle_timeout(&self) -> Option<Duration> {
        (self.idle_timeout_secs > 0).then(|| Duration::from_secs(self.idle_timeout_secs))
    }
}

static SETTINGS: Lazy<Settings> = Lazy::new(Settings::from_env);

pub fn settings() -> &'static Settings {
    &SETTINGS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_on_missing_or_garbage() {
        assert_eq!(parse_or::<u16>(None, 23456), 23456);
        assert_eq!(parse_or::<u16>(Some("nope".into()), 7), 7);
        assert_eq!(parse_or::<u32>(Some(" 5 ".into()), 3), 5);
    }

    #[test]
    fn idle_timeout_is_off_unless_configured() {
        let mut cfg = Settings {
            bind_addr: "127.0.0.1".into(),
            port: 0,
            tick_secs: 3,
            match_secs: 120,
            idle_timeout_secs: DEFAULT_IDLE_TIMEOUT_SECS,
            database_url: None,
        };
        assert_eq!(cfg.idle_timeout(), None);

        cfg.idle_timeout_secs = 600;
        assert_eq!(cfg.idle_timeout(), Some(Duration::from_secs(600)));
    }
}
