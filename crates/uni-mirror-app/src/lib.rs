//! Application layer for uni-mirror.
//!
//! Wires the sync orchestrator, environment configuration, and the owned
//! cache store together for the HTTP binary.

pub mod cache;
pub mod config;
pub mod sync;

pub use cache::CacheStore;
pub use config::AppConfig;
pub use sync::SyncService;
