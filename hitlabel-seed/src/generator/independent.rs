//! Entities with no foreign keys

use fake::faker::internet::en::SafeEmail;
use fake::faker::lorem::en::{Paragraph, Word};
use fake::faker::name::en::Name;
use fake::faker::phone_number::en::PhoneNumber;
use fake::Fake;
use rand::Rng;
use tracing::{debug, info};

use super::{capitalize, date_within, pick, round2, DataGenerator, YEAR};
use crate::vocab::{
    AGREEMENT_STATUSES, ARTIST_STATUSES, DEPARTMENTS, GENRES, NATIONALITIES, PLATFORMS,
    PRODUCER_SPECIALTIES, STUDIO_EQUIPMENT, STUDIO_LOCATIONS,
};

impl DataGenerator {
    pub(super) async fn generate_artists(&mut self) {
        let count = self.plan.counts.artists;
        info!("Generating {} artists...", count);

        for _ in 0..count {
            let name: String = Name().fake_with_rng(&mut self.rng);
            let genre = pick(&mut self.rng, &GENRES);
            let contract_date = date_within(&mut self.rng, self.plan.today, 5 * YEAR);
            let status = pick(&mut self.rng, &ARTIST_STATUSES);
            let biography: String = Paragraph(3..4).fake_with_rng(&mut self.rng);
            let nationality = pick(&mut self.rng, &NATIONALITIES);

            let result = sqlx::query_scalar::<_, i64>(
                r#"
                INSERT INTO artist (name, genre, contract_date, contract_status, biography, nationality)
                VALUES (?, ?, ?, ?, ?, ?)
                RETURNING artist_id
                "#,
            )
            .bind(&name)
            .bind(genre)
            .bind(contract_date)
            .bind(status)
            .bind(&biography)
            .bind(nationality)
            .fetch_one(&mut self.conn)
            .await;

            match result {
                Ok(id) => self.ids.artists.push(id),
                Err(e) => debug!("artist insert failed: {}", e),
            }
        }

        self.report.record("artists", count, self.ids.artists.len());
    }

    pub(super) async fn generate_producers(&mut self) {
        let count = self.plan.counts.producers;
        info!("Generating {} producers...", count);

        for _ in 0..count {
            let name: String = Name().fake_with_rng(&mut self.rng);
            let specialty = pick(&mut self.rng, &PRODUCER_SPECIALTIES);
            let years_experience: i64 = self.rng.gen_range(1..=40);
            let email: String = SafeEmail().fake_with_rng(&mut self.rng);
            let phone: String = PhoneNumber().fake_with_rng(&mut self.rng);

            let result = sqlx::query_scalar::<_, i64>(
                r#"
                INSERT INTO producer (name, specialty, years_experience, email, phone)
                VALUES (?, ?, ?, ?, ?)
                RETURNING producer_id
                "#,
            )
            .bind(&name)
            .bind(specialty)
            .bind(years_experience)
            .bind(&email)
            .bind(&phone)
            .fetch_one(&mut self.conn)
            .await;

            match result {
                Ok(id) => self.ids.producers.push(id),
                Err(e) => debug!("producer insert failed: {}", e),
            }
        }

        self.report.record("producers", count, self.ids.producers.len());
    }

    pub(super) async fn generate_studios(&mut self) {
        let count = self.plan.counts.studios;
        info!("Generating {} studios...", count);

        for i in 0..count {
            let word: String = Word().fake_with_rng(&mut self.rng);
            let name = format!("Studio {} {}", capitalize(&word), i + 1);
            let location = pick(&mut self.rng, &STUDIO_LOCATIONS);
            let capacity: i64 = self.rng.gen_range(4..=30);
            let equipment = pick(&mut self.rng, &STUDIO_EQUIPMENT);
            let hourly_rate = round2(self.rng.gen_range(50.0..=300.0));

            let result = sqlx::query_scalar::<_, i64>(
                r#"
                INSERT INTO studio (name, location, capacity, equipment, hourly_rate)
                VALUES (?, ?, ?, ?, ?)
                RETURNING studio_id
                "#,
            )
            .bind(&name)
            .bind(location)
            .bind(capacity)
            .bind(equipment)
            .bind(hourly_rate)
            .fetch_one(&mut self.conn)
            .await;

            match result {
                Ok(id) => self.ids.studios.push(id),
                Err(e) => debug!("studio insert failed: {}", e),
            }
        }

        self.report.record("studios", count, self.ids.studios.len());
    }

    /// One row per platform name, so at most `PLATFORMS.len()` rows
    pub(super) async fn generate_distributions(&mut self) {
        let count = self.plan.counts.distributions.min(PLATFORMS.len());
        info!("Generating {} distributions...", count);

        for platform in PLATFORMS.iter().take(count) {
            let commission = round2(self.rng.gen_range(15.0..=50.0));
            let agreement_status = pick(&mut self.rng, &AGREEMENT_STATUSES);

            let result = sqlx::query_scalar::<_, i64>(
                r#"
                INSERT INTO distribution (platform_name, commission_percentage, agreement_status)
                VALUES (?, ?, ?)
                RETURNING distribution_id
                "#,
            )
            .bind(*platform)
            .bind(commission)
            .bind(agreement_status)
            .fetch_one(&mut self.conn)
            .await;

            match result {
                Ok(id) => self.ids.distributions.push(id),
                Err(e) => debug!("distribution {} insert failed: {}", platform, e),
            }
        }

        self.report
            .record("distributions", count, self.ids.distributions.len());
    }

    pub(super) async fn generate_staff(&mut self) {
        let count = self.plan.counts.staff;
        info!("Generating {} staff...", count);

        for _ in 0..count {
            let name: String = Name().fake_with_rng(&mut self.rng);
            let salary = round2(self.rng.gen_range(20_000.0..=80_000.0));
            let department = pick(&mut self.rng, &DEPARTMENTS);
            let hire_date = date_within(&mut self.rng, self.plan.today, 10 * YEAR);

            let result = sqlx::query_scalar::<_, i64>(
                r#"
                INSERT INTO staff (name, salary, department, hire_date)
                VALUES (?, ?, ?, ?)
                RETURNING staff_id
                "#,
            )
            .bind(&name)
            .bind(salary)
            .bind(department)
            .bind(hire_date)
            .fetch_one(&mut self.conn)
            .await;

            match result {
                Ok(id) => self.ids.staff.push(id),
                Err(e) => debug!("staff insert failed: {}", e),
            }
        }

        self.report.record("staff", count, self.ids.staff.len());
    }
}
