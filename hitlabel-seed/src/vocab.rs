//! Fixed vocabularies the generator draws from

use hitlabel_common::db::{AgreementStatus, AlbumStatus, ArtistStatus};

pub const GENRES: [&str; 10] = [
    "pop",
    "rock",
    "hip-hop",
    "jazz",
    "classical",
    "electronic",
    "reggae",
    "country",
    "folk",
    "other",
];

pub const NATIONALITIES: [&str; 10] = [
    "Spain",
    "United States",
    "United Kingdom",
    "France",
    "Germany",
    "Italy",
    "Japan",
    "Brazil",
    "Canada",
    "Australia",
];

pub const PRODUCER_SPECIALTIES: [&str; 8] = [
    "Pop",
    "Rock",
    "Hip-Hop",
    "Jazz",
    "Electronic",
    "Classical",
    "Reggae",
    "Country",
];

pub const STUDIO_LOCATIONS: [&str; 10] = [
    "Madrid",
    "Barcelona",
    "Valencia",
    "Sevilla",
    "Bilbao",
    "Málaga",
    "Murcia",
    "Palma",
    "Las Palmas",
    "Alicante",
];

pub const STUDIO_EQUIPMENT: [&str; 5] = [
    "SSL 4000E, Neve 1073, Telefunken U47",
    "Neve 8088, API 2500, Manley ELOP",
    "Studer A800, Ampex ATR102, Otari MX80",
    "ProTools HDX, Avid S6, Euphonix MC Mix",
    "Yamaha CL5, Allen & Heath dLive, DiGiCo SD7",
];

pub const DEPARTMENTS: [&str; 6] = [
    "Engineering",
    "Production",
    "Administration",
    "Marketing",
    "Distribution",
    "Legal",
];

pub const CERTIFICATIONS: [&str; 5] = [
    "Certified Audio Engineer",
    "Pro Tools Certified",
    "Neve Certified",
    "SSL Certified",
    "Dolby Certified",
];

/// Platform names in insertion order; the distribution count takes a prefix
pub const PLATFORMS: [&str; 10] = [
    "Spotify",
    "Apple Music",
    "YouTube Music",
    "Amazon Music",
    "Tidal",
    "Deezer",
    "SoundCloud",
    "Bandcamp",
    "Beatport",
    "iTunes",
];

pub const ARTIST_ALBUM_ROLES: [&str; 4] = ["featured", "collaborator", "featured artist", "guest"];

pub const ARTIST_STATUSES: [ArtistStatus; 3] = [
    ArtistStatus::Active,
    ArtistStatus::Inactive,
    ArtistStatus::Suspended,
];

pub const ALBUM_STATUSES: [AlbumStatus; 3] = [
    AlbumStatus::Draft,
    AlbumStatus::Released,
    AlbumStatus::Archived,
];

pub const AGREEMENT_STATUSES: [AgreementStatus; 3] = [
    AgreementStatus::Active,
    AgreementStatus::Inactive,
    AgreementStatus::Pending,
];
