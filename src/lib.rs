pub mod broker;
pub mod config;
pub mod db;
pub mod game;
pub mod protocol;
pub mod results;
pub mod scheduler;
