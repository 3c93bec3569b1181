//! # hitlabel common library
//!
//! Shared code for the label API service and the data generator:
//! - Storage handle and schema initialization
//! - Row models and status enumerations
//! - Integrity rule suspension and full reset
//! - Configuration loading
//! - Error types

pub mod config;
pub mod db;
pub mod error;

pub use db::Database;
pub use error::{Error, Result};
