//! What a generation run produces

use chrono::{Local, NaiveDate};
use hitlabel_common::config::GeneratorSection;

/// Target row counts per entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityCounts {
    pub artists: usize,
    pub producers: usize,
    pub studios: usize,
    pub distributions: usize,
    pub staff: usize,
    pub albums: usize,
    pub engineers: usize,
    pub managers: usize,
    pub recording_sessions: usize,
    pub songs: usize,
    pub song_distributions: usize,
    pub contracts: usize,
    pub artist_albums: usize,
}

impl From<&GeneratorSection> for EntityCounts {
    fn from(section: &GeneratorSection) -> Self {
        Self {
            artists: section.artists,
            producers: section.producers,
            studios: section.studios,
            distributions: section.distributions,
            staff: section.staff,
            albums: section.albums,
            engineers: section.engineers,
            managers: section.managers,
            recording_sessions: section.recording_sessions,
            songs: section.songs,
            song_distributions: section.song_distributions,
            contracts: section.contracts,
            artist_albums: section.artist_albums,
        }
    }
}

impl Default for EntityCounts {
    fn default() -> Self {
        Self::from(&GeneratorSection::default())
    }
}

/// Counts, seed and reference date of one run
///
/// The same plan always produces the same rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationPlan {
    pub seed: u64,
    /// Date windows and contract statuses are computed relative to this
    pub today: NaiveDate,
    pub counts: EntityCounts,
}

impl GenerationPlan {
    pub fn new(seed: u64, today: NaiveDate, counts: EntityCounts) -> Self {
        Self { seed, today, counts }
    }

    /// Plan from the `[generator]` section, dated today
    pub fn from_config(section: &GeneratorSection, seed: u64) -> Self {
        Self::new(seed, Local::now().date_naive(), EntityCounts::from(section))
    }
}
