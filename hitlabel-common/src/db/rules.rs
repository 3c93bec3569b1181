//! Integrity rules enforced by triggers, and their scoped suspension
//!
//! A rule is suspended by dropping its triggers and restored by recreating
//! them from the canonical DDL below. [`suspend`] hands back a
//! [`SuspendedRule`] guard; callers restore it after their batch whether the
//! batch succeeded or not:
//!
//! ```rust,ignore
//! let suspended = rules::suspend(&mut conn, IntegrityRule::HitRequiresDistribution).await?;
//! let outcome = insert_batch(&mut conn).await;
//! suspended.restore(&mut conn).await?;
//! outcome?;
//! ```

use crate::Result;
use sqlx::sqlite::SqliteConnection;
use tracing::{error, info};

/// A rule the database enforces through one or more triggers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegrityRule {
    /// A song flagged `is_hit` must have at least one song_distribution row
    HitRequiresDistribution,
}

struct Trigger {
    name: &'static str,
    ddl: &'static str,
}

const HIT_REQUIRES_DISTRIBUTION: [Trigger; 2] = [
    Trigger {
        name: "trg_check_hit_distributions",
        ddl: r#"
        CREATE TRIGGER IF NOT EXISTS trg_check_hit_distributions
        BEFORE INSERT ON song
        WHEN NEW.is_hit = 1 AND NOT EXISTS (
            SELECT 1 FROM song_distribution sd
            WHERE sd.album_id = NEW.album_id AND sd.song_id = NEW.song_id
        )
        BEGIN
            SELECT RAISE(ABORT, 'hit song requires at least one distribution');
        END
        "#,
    },
    Trigger {
        name: "trg_check_hit_distributions_update",
        ddl: r#"
        CREATE TRIGGER IF NOT EXISTS trg_check_hit_distributions_update
        BEFORE UPDATE OF is_hit ON song
        WHEN NEW.is_hit = 1 AND NOT EXISTS (
            SELECT 1 FROM song_distribution sd
            WHERE sd.album_id = NEW.album_id AND sd.song_id = NEW.song_id
        )
        BEGIN
            SELECT RAISE(ABORT, 'hit song requires at least one distribution');
        END
        "#,
    },
];

impl IntegrityRule {
    /// Human-readable rule name for logs
    pub fn name(self) -> &'static str {
        match self {
            IntegrityRule::HitRequiresDistribution => "hit-requires-distribution",
        }
    }

    fn triggers(self) -> &'static [Trigger] {
        match self {
            IntegrityRule::HitRequiresDistribution => &HIT_REQUIRES_DISTRIBUTION,
        }
    }
}

/// Create the rule's triggers if missing
pub async fn install(conn: &mut SqliteConnection, rule: IntegrityRule) -> Result<()> {
    for trigger in rule.triggers() {
        sqlx::query(trigger.ddl).execute(&mut *conn).await?;
    }
    Ok(())
}

/// True when every trigger of the rule exists
pub async fn is_active(conn: &mut SqliteConnection, rule: IntegrityRule) -> Result<bool> {
    for trigger in rule.triggers() {
        let present: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'trigger' AND name = ?",
        )
        .bind(trigger.name)
        .fetch_one(&mut *conn)
        .await?;
        if present == 0 {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Drop the rule's triggers until the returned guard is restored
pub async fn suspend(conn: &mut SqliteConnection, rule: IntegrityRule) -> Result<SuspendedRule> {
    for trigger in rule.triggers() {
        sqlx::query(&format!("DROP TRIGGER IF EXISTS {}", trigger.name))
            .execute(&mut *conn)
            .await?;
    }
    info!("Integrity rule {} suspended", rule.name());

    Ok(SuspendedRule {
        rule,
        restored: false,
    })
}

/// Proof that a rule is currently suspended
#[must_use = "a suspended integrity rule must be restored"]
#[derive(Debug)]
pub struct SuspendedRule {
    rule: IntegrityRule,
    restored: bool,
}

impl SuspendedRule {
    /// Which rule this guard holds
    pub fn rule(&self) -> IntegrityRule {
        self.rule
    }

    /// Recreate the rule's triggers
    pub async fn restore(mut self, conn: &mut SqliteConnection) -> Result<()> {
        install(conn, self.rule).await?;
        self.restored = true;
        info!("Integrity rule {} restored", self.rule.name());
        Ok(())
    }
}

impl Drop for SuspendedRule {
    fn drop(&mut self) {
        if !self.restored {
            error!(
                "Integrity rule {} was left suspended; it is not enforced until the schema is re-initialized",
                self.rule.name()
            );
        }
    }
}
