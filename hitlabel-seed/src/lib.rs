//! hitlabel-seed library - deterministic synthetic data for the label database
//!
//! A run wipes every table and refills it. The same [`GenerationPlan`] (seed,
//! reference date, counts) always yields identical rows.

use hitlabel_common::Database;

pub mod error;
pub mod generator;
pub mod plan;
pub mod report;
pub mod vocab;

pub use error::{Result, SeedError};
pub use generator::DataGenerator;
pub use plan::{EntityCounts, GenerationPlan};
pub use report::{GenerationReport, StepReport};

/// Prepare the schema, then reset and regenerate everything
pub async fn generate(db: &Database, plan: GenerationPlan) -> Result<GenerationReport> {
    db.initialize().await.map_err(SeedError::Prepare)?;
    let conn = db.connect().await.map_err(SeedError::Connect)?;
    DataGenerator::new(conn, plan).run().await
}
