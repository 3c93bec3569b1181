//! Junction rows and contracts
//!
//! All three steps insert with `INSERT OR IGNORE`: a repeated natural key is
//! skipped and simply not counted.

use chrono::Days;
use fake::faker::lorem::en::Paragraph;
use fake::Fake;
use hitlabel_common::db::{ContractStatus, SongKey};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info, warn};

use super::{date_within, pick, round2, DataGenerator, YEAR};
use crate::vocab::{AGREEMENT_STATUSES, ARTIST_ALBUM_ROLES};

impl DataGenerator {
    /// Distributes songs chosen from the keys actually inserted
    pub(super) async fn generate_song_distributions(&mut self) {
        let count = self.plan.counts.song_distributions;
        info!("Generating {} song distributions...", count);
        if self.ids.distributions.is_empty() {
            return self.skip("song distributions", count, "distributions");
        }

        let songs = match sqlx::query_as::<_, SongKey>(
            "SELECT album_id, song_id FROM song ORDER BY album_id, song_id",
        )
        .fetch_all(&mut self.conn)
        .await
        {
            Ok(songs) => songs,
            Err(e) => {
                warn!("Could not read back song keys: {}", e);
                Vec::new()
            }
        };
        if songs.is_empty() {
            return self.skip("song distributions", count, "songs");
        }

        let mut inserted = 0;
        for _ in 0..count {
            let (Some(&song), Some(&distribution_id)) = (
                songs.choose(&mut self.rng),
                self.ids.distributions.choose(&mut self.rng),
            ) else {
                break;
            };
            let publish_date = date_within(&mut self.rng, self.plan.today, 2 * YEAR);
            let status = pick(&mut self.rng, &AGREEMENT_STATUSES);

            let result = sqlx::query(
                r#"
                INSERT OR IGNORE INTO song_distribution
                    (album_id, song_id, distribution_id, publish_date, status)
                VALUES (?, ?, ?, ?, ?)
                "#,
            )
            .bind(song.album_id)
            .bind(song.song_id)
            .bind(distribution_id)
            .bind(publish_date)
            .bind(status)
            .execute(&mut self.conn)
            .await;

            match result {
                Ok(done) => inserted += done.rows_affected() as usize,
                Err(e) => debug!("song distribution insert failed: {}", e),
            }
        }

        self.report.record("song distributions", count, inserted);
    }

    /// One contract for each of the first `contracts` artists
    pub(super) async fn generate_contracts(&mut self) {
        let count = self.plan.counts.contracts;
        info!("Generating {} contracts...", count);
        if self.ids.artists.is_empty() {
            return self.skip("contracts", count, "artists");
        }

        let today = self.plan.today;
        let mut inserted = 0;
        for i in 0..count.min(self.ids.artists.len()) {
            let artist_id = self.ids.artists[i];
            let start_date = date_within(&mut self.rng, today, 5 * YEAR);
            let length = Days::new(self.rng.gen_range(YEAR..=5 * YEAR));
            let Some(end_date) = start_date.checked_add_days(length) else {
                continue;
            };
            let royalty = round2(self.rng.gen_range(5.0..=25.0));
            let terms: String = Paragraph(3..4).fake_with_rng(&mut self.rng);
            let status = ContractStatus::for_end_date(end_date, today);

            let result = sqlx::query(
                r#"
                INSERT OR IGNORE INTO contract
                    (artist_id, start_date, end_date, royalty_percentage, contract_terms, status)
                VALUES (?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(artist_id)
            .bind(start_date)
            .bind(end_date)
            .bind(royalty)
            .bind(&terms)
            .bind(status)
            .execute(&mut self.conn)
            .await;

            match result {
                Ok(done) => inserted += done.rows_affected() as usize,
                Err(e) => debug!("contract for artist {} failed: {}", artist_id, e),
            }
        }

        self.report.record("contracts", count, inserted);
    }

    pub(super) async fn generate_artist_albums(&mut self) {
        let count = self.plan.counts.artist_albums;
        info!("Generating {} artist-album credits...", count);
        if self.ids.artists.is_empty() {
            return self.skip("artist-album credits", count, "artists");
        }
        if self.ids.albums.is_empty() {
            return self.skip("artist-album credits", count, "albums");
        }

        let mut inserted = 0;
        for _ in 0..count {
            let (Some(&artist_id), Some(&album_id)) = (
                self.ids.artists.choose(&mut self.rng),
                self.ids.albums.choose(&mut self.rng),
            ) else {
                break;
            };
            let role = pick(&mut self.rng, &ARTIST_ALBUM_ROLES);

            let result = sqlx::query(
                "INSERT OR IGNORE INTO artist_album (artist_id, album_id, role) VALUES (?, ?, ?)",
            )
            .bind(artist_id)
            .bind(album_id)
            .bind(role)
            .execute(&mut self.conn)
            .await;

            match result {
                Ok(done) => inserted += done.rows_affected() as usize,
                Err(e) => debug!("artist-album credit insert failed: {}", e),
            }
        }

        self.report.record("artist-album credits", count, inserted);
    }
}
