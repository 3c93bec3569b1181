//! Database models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Streams at or above this count make a song a hit
pub const HIT_STREAMS_THRESHOLD: i64 = 1_000_000;

/// artist.contract_status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum ArtistStatus {
    #[default]
    Active,
    Inactive,
    Suspended,
}

/// album.status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum AlbumStatus {
    #[default]
    Draft,
    Released,
    Archived,
}

/// contract.status, derived from the end date when the contract is written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum ContractStatus {
    Active,
    Expired,
}

impl ContractStatus {
    /// Active while `end_date` has not passed `today`
    pub fn for_end_date(end_date: NaiveDate, today: NaiveDate) -> Self {
        if end_date >= today {
            ContractStatus::Active
        } else {
            ContractStatus::Expired
        }
    }
}

/// distribution.agreement_status and song_distribution.status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum AgreementStatus {
    Active,
    Inactive,
    Pending,
}

/// True when a stream count qualifies as a hit
pub fn is_hit(streams_count: i64) -> bool {
    streams_count >= HIT_STREAMS_THRESHOLD
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Artist {
    pub artist_id: i64,
    pub name: String,
    pub genre: String,
    pub contract_date: NaiveDate,
    pub contract_status: ArtistStatus,
    pub biography: String,
    pub nationality: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Producer {
    pub producer_id: i64,
    pub name: String,
    pub specialty: String,
    pub years_experience: i64,
    pub email: String,
    pub phone: String,
}

/// Composite key of a song (weak entity under its album)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::FromRow)]
pub struct SongKey {
    pub album_id: i64,
    pub song_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_threshold_boundary() {
        assert!(!is_hit(999_999));
        assert!(is_hit(1_000_000));
        assert!(is_hit(10_000_000));
    }

    #[test]
    fn test_contract_status_for_end_date() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        assert_eq!(ContractStatus::for_end_date(today, today), ContractStatus::Active);
        assert_eq!(
            ContractStatus::for_end_date(today.pred_opt().unwrap(), today),
            ContractStatus::Expired
        );
    }

    #[test]
    fn test_status_serde_lowercase() {
        assert_eq!(serde_json::to_string(&ArtistStatus::Suspended).unwrap(), "\"suspended\"");
        let status: AlbumStatus = serde_json::from_str("\"released\"").unwrap();
        assert_eq!(status, AlbumStatus::Released);
        assert!(serde_json::from_str::<AlbumStatus>("\"published\"").is_err());
    }

    #[test]
    fn test_defaults() {
        assert_eq!(ArtistStatus::default(), ArtistStatus::Active);
        assert_eq!(AlbumStatus::default(), AlbumStatus::Draft);
    }
}
