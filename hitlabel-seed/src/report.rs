//! Attempted vs. inserted counts of a run

use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepReport {
    pub entity: &'static str,
    pub attempted: usize,
    pub inserted: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    steps: Vec<StepReport>,
}

impl GenerationReport {
    pub fn record(&mut self, entity: &'static str, attempted: usize, inserted: usize) {
        info!("✓ {} {} generated (attempted: {})", inserted, entity, attempted);
        self.steps.push(StepReport {
            entity,
            attempted,
            inserted,
        });
    }

    /// Steps in the order they ran
    pub fn steps(&self) -> &[StepReport] {
        &self.steps
    }

    pub fn step(&self, entity: &str) -> Option<&StepReport> {
        self.steps.iter().find(|s| s.entity == entity)
    }

    pub fn inserted(&self, entity: &str) -> usize {
        self.step(entity).map(|s| s.inserted).unwrap_or(0)
    }

    pub fn total_inserted(&self) -> usize {
        self.steps.iter().map(|s| s.inserted).sum()
    }

    pub fn log_summary(&self) {
        info!("{:<20} {:>10} {:>10}", "entity", "attempted", "inserted");
        for step in &self.steps {
            info!("{:<20} {:>10} {:>10}", step.entity, step.attempted, step.inserted);
        }
        info!("{:<20} {:>10} {:>10}", "total", "", self.total_inserted());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_and_totals() {
        let mut report = GenerationReport::default();
        report.record("artists", 5, 5);
        report.record("songs", 10, 8);

        assert_eq!(report.steps().len(), 2);
        assert_eq!(report.inserted("songs"), 8);
        assert_eq!(report.step("songs").map(|s| s.attempted), Some(10));
        assert_eq!(report.inserted("contracts"), 0);
        assert_eq!(report.total_inserted(), 13);
    }
}
