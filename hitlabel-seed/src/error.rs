//! Errors that abort a generation run
//!
//! Per-row insert failures never surface here; they only lower the inserted
//! counts in the report.

use hitlabel_common::db::IntegrityRule;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Failed to prepare database: {0}")]
    Prepare(#[source] hitlabel_common::Error),

    #[error("Failed to connect to database: {0}")]
    Connect(#[source] hitlabel_common::Error),

    #[error("Failed to reset database: {0}")]
    Reset(#[source] hitlabel_common::Error),

    #[error("Failed to {action} integrity rule {}: {source}", .rule.name())]
    Rule {
        action: &'static str,
        rule: IntegrityRule,
        #[source]
        source: hitlabel_common::Error,
    },
}

pub type Result<T> = std::result::Result<T, SeedError>;
