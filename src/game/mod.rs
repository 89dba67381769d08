pub mod catalog;
pub mod logic;
pub mod scoring;
pub mod session;
pub mod snapshot;
pub mod state;
pub mod types;
