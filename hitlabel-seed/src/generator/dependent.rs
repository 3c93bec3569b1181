//! Albums, the staff specializations and recording sessions

use fake::faker::company::en::CompanyName;
use fake::faker::lorem::en::{Paragraph, Word};
use fake::Fake;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info};

use super::{capitalize, date_within, pick, round2, DataGenerator, YEAR};
use crate::vocab::{ALBUM_STATUSES, CERTIFICATIONS, GENRES};

impl DataGenerator {
    pub(super) async fn generate_albums(&mut self) {
        let count = self.plan.counts.albums;
        info!("Generating {} albums...", count);
        if self.ids.producers.is_empty() {
            return self.skip("albums", count, "producers");
        }

        for _ in 0..count {
            let first: String = Word().fake_with_rng(&mut self.rng);
            let second: String = Word().fake_with_rng(&mut self.rng);
            let title = format!("{} {}", capitalize(&first), capitalize(&second));
            let release_date = date_within(&mut self.rng, self.plan.today, 3 * YEAR);
            let Some(&producer_id) = self.ids.producers.choose(&mut self.rng) else {
                break;
            };
            let status = pick(&mut self.rng, &ALBUM_STATUSES);
            let genre = pick(&mut self.rng, &GENRES);
            let label_name: String = CompanyName().fake_with_rng(&mut self.rng);

            let result = sqlx::query_scalar::<_, i64>(
                r#"
                INSERT INTO album (title, release_date, producer_id, status, genre, label_name)
                VALUES (?, ?, ?, ?, ?, ?)
                RETURNING album_id
                "#,
            )
            .bind(&title)
            .bind(release_date)
            .bind(producer_id)
            .bind(status)
            .bind(genre)
            .bind(&label_name)
            .fetch_one(&mut self.conn)
            .await;

            match result {
                Ok(id) => self.ids.albums.push(id),
                Err(e) => debug!("album insert failed: {}", e),
            }
        }

        self.report.record("albums", count, self.ids.albums.len());
    }

    /// Engineers take the first staff ids
    pub(super) async fn generate_engineers(&mut self) {
        let count = self.plan.counts.engineers;
        info!("Generating {} engineers...", count);
        if self.ids.staff.is_empty() {
            return self.skip("engineers", count, "staff");
        }

        let mut inserted = 0;
        for i in 0..self.engineer_slots() {
            let engineer_id = self.ids.staff[i];
            let certification = pick(&mut self.rng, &CERTIFICATIONS);
            let technical_skills: String = Paragraph(2..3).fake_with_rng(&mut self.rng);
            let studio_id = self.ids.studios.choose(&mut self.rng).copied();

            let result = sqlx::query(
                r#"
                INSERT INTO engineer (engineer_id, certification, technical_skills, studio_id)
                VALUES (?, ?, ?, ?)
                "#,
            )
            .bind(engineer_id)
            .bind(certification)
            .bind(&technical_skills)
            .bind(studio_id)
            .execute(&mut self.conn)
            .await;

            match result {
                Ok(done) => inserted += done.rows_affected() as usize,
                Err(e) => debug!("engineer {} insert failed: {}", engineer_id, e),
            }
        }

        self.report.record("engineers", count, inserted);
    }

    /// Managers take the staff ids right after the engineers'
    pub(super) async fn generate_managers(&mut self) {
        let count = self.plan.counts.managers;
        info!("Generating {} managers...", count);

        let start = self.engineer_slots();
        let end = (start + count).min(self.ids.staff.len());
        if start >= end {
            return self.skip("managers", count, "unassigned staff");
        }

        let mut inserted = 0;
        for i in start..end {
            let manager_id = self.ids.staff[i];
            let commission = round2(self.rng.gen_range(5.0..=25.0));
            let artists_managed: i64 = self.rng.gen_range(1..=10);

            let result = sqlx::query(
                r#"
                INSERT INTO manager (manager_id, commission_percentage, artists_managed)
                VALUES (?, ?, ?)
                "#,
            )
            .bind(manager_id)
            .bind(commission)
            .bind(artists_managed)
            .execute(&mut self.conn)
            .await;

            match result {
                Ok(done) => inserted += done.rows_affected() as usize,
                Err(e) => debug!("manager {} insert failed: {}", manager_id, e),
            }
        }

        self.report.record("managers", count, inserted);
    }

    /// Ternary artist/producer/studio rows; cost is filled in by the database
    pub(super) async fn generate_recording_sessions(&mut self) {
        let count = self.plan.counts.recording_sessions;
        info!("Generating {} recording sessions...", count);
        if self.ids.artists.is_empty() {
            return self.skip("recording sessions", count, "artists");
        }
        if self.ids.producers.is_empty() {
            return self.skip("recording sessions", count, "producers");
        }
        if self.ids.studios.is_empty() {
            return self.skip("recording sessions", count, "studios");
        }

        let mut inserted = 0;
        for _ in 0..count {
            let (Some(&artist_id), Some(&producer_id), Some(&studio_id)) = (
                self.ids.artists.choose(&mut self.rng),
                self.ids.producers.choose(&mut self.rng),
                self.ids.studios.choose(&mut self.rng),
            ) else {
                break;
            };
            let session_date = date_within(&mut self.rng, self.plan.today, 2 * YEAR);
            let hour: u32 = self.rng.gen_range(9..=18);
            let minute: u32 = self.rng.gen_range(0..=59);
            let start_time = format!("{:02}:{:02}:00", hour, minute);
            let duration_hours = round2(self.rng.gen_range(1.0..=8.0));

            let result = sqlx::query(
                r#"
                INSERT INTO recording_session
                    (artist_id, producer_id, studio_id, session_date, start_time, duration_hours, cost)
                VALUES (?, ?, ?, ?, ?, ?, 0)
                "#,
            )
            .bind(artist_id)
            .bind(producer_id)
            .bind(studio_id)
            .bind(session_date)
            .bind(&start_time)
            .bind(duration_hours)
            .execute(&mut self.conn)
            .await;

            match result {
                Ok(done) => inserted += done.rows_affected() as usize,
                Err(e) => debug!("recording session insert failed: {}", e),
            }
        }

        self.report.record("recording sessions", count, inserted);
    }

    /// Number of staff ids reserved for engineers
    fn engineer_slots(&self) -> usize {
        self.plan.counts.engineers.min(self.ids.staff.len())
    }
}
