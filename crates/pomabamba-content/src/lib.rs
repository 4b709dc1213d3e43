//! Tours and festivities for the María Parado de Bellido district.
//!
//! Provides the content API client, its in-memory cache, fallback seed data
//! and the map marker records built from them.

pub mod cache;
pub mod client;
pub mod datetime;
pub mod error;
pub mod markers;
pub mod seed;
pub mod types;

pub use cache::{CacheSlot, ContentCache};
pub use client::ContentClient;
pub use error::ContentError;
pub use markers::{collect_markers, MapMarker, MarkerKind};
pub use seed::SeedData;
pub use types::{
    Cargonte, ContentRecord, Difficulty, Festivity, Guide, Location, PlaceCategory, ScheduleItem,
    Tour, TouristPlace,
};
