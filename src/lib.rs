pub mod config;
pub mod db;
pub mod logging;
pub mod orchestrator;
pub mod pending;
pub mod session;
pub mod store;
pub mod telegram;
pub mod texts;
pub mod transport;
