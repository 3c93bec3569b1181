//! Query layer for the API handlers
//!
//! Functions here take a borrowed `SqliteConnection` (or a transaction
//! dereferenced to one) and return raw `sqlx` results; handlers classify
//! errors.

pub mod albums;
pub mod artists;
pub mod producers;
pub mod songs;
pub mod stats;
pub mod update;
