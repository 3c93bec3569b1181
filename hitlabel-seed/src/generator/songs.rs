//! Songs, inserted while the hit/distribution rule is suspended
//!
//! Songs necessarily exist before their distributions, so a hit song could
//! never be inserted with the rule in force.

use fake::faker::lorem::en::Word;
use fake::faker::name::en::Name;
use fake::Fake;
use hitlabel_common::db::{is_hit, rules, IntegrityRule};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info};

use super::{capitalize, DataGenerator};
use crate::error::{Result, SeedError};

/// Song ids are drawn per album from `1..=MAX_SONG_ID`; repeats are ignored
const MAX_SONG_ID: i64 = 20;

impl DataGenerator {
    pub(super) async fn generate_songs(&mut self) -> Result<()> {
        let count = self.plan.counts.songs;
        info!("Generating {} songs...", count);
        if self.ids.albums.is_empty() {
            self.skip("songs", count, "albums");
            return Ok(());
        }

        let rule = IntegrityRule::HitRequiresDistribution;
        let suspended = rules::suspend(&mut self.conn, rule)
            .await
            .map_err(|source| SeedError::Rule {
                action: "suspend",
                rule,
                source,
            })?;

        let inserted = self.insert_songs(count).await;

        suspended
            .restore(&mut self.conn)
            .await
            .map_err(|source| SeedError::Rule {
                action: "restore",
                rule,
                source,
            })?;

        self.report.record("songs", count, inserted);
        Ok(())
    }

    /// Never fails; collisions and rejected rows just lower the count
    async fn insert_songs(&mut self, count: usize) -> usize {
        let mut inserted = 0;

        for _ in 0..count {
            let Some(&album_id) = self.ids.albums.choose(&mut self.rng) else {
                break;
            };
            let song_id: i64 = self.rng.gen_range(1..=MAX_SONG_ID);
            let first: String = Word().fake_with_rng(&mut self.rng);
            let second: String = Word().fake_with_rng(&mut self.rng);
            let title = format!("{} {}", capitalize(&first), capitalize(&second));
            let duration: i64 = self.rng.gen_range(120..=420);
            let composer: String = Name().fake_with_rng(&mut self.rng);
            let streams_count: i64 = self.rng.gen_range(0..=10_000_000);

            let result = sqlx::query(
                r#"
                INSERT OR IGNORE INTO song
                    (album_id, song_id, title, duration, composer, streams_count, is_hit)
                VALUES (?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(album_id)
            .bind(song_id)
            .bind(&title)
            .bind(duration)
            .bind(&composer)
            .bind(streams_count)
            .bind(is_hit(streams_count))
            .execute(&mut self.conn)
            .await;

            match result {
                Ok(done) => inserted += done.rows_affected() as usize,
                Err(e) => debug!("song {}/{} insert failed: {}", album_id, song_id, e),
            }
        }

        inserted
    }
}
