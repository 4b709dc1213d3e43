use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::cache::{CacheSlot, ContentCache};
use crate::seed::SeedData;

/// A named point on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}

/// Local guide assigned to a tour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guide {
    pub id: String,
    pub name: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Physical difficulty tier of a tour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Moderate,
    Hard,
}

impl Difficulty {
    /// Spanish label shown on tour cards.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Easy => "Fácil",
            Self::Moderate => "Moderado",
            Self::Hard => "Exigente",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tour {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub summary: String,
    pub description: String,
    pub duration_hours: f64,
    pub price: f64,
    pub currency: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dates: Vec<String>,
    #[serde(default)]
    pub locations: Vec<Location>,
    pub guide: Guide,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_participants: Option<u32>,
}

impl Tour {
    /// Price formatted for display, e.g. `PEN 50.00`.
    pub fn price_label(&self) -> String {
        format!("{} {:.2}", self.currency, self.price)
    }
}

/// Community member or family holding a ceremonial role in a festivity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cargonte {
    pub name: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// One dated activity in a festivity programme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleItem {
    #[serde(deserialize_with = "crate::datetime::deserialize_timestamp")]
    pub date: DateTime<Utc>,
    pub activity: String,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Festivity {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub description: String,
    #[serde(deserialize_with = "crate::datetime::deserialize_date")]
    pub start_date: NaiveDate,
    #[serde(deserialize_with = "crate::datetime::deserialize_date")]
    pub end_date: NaiveDate,
    pub place: Location,
    #[serde(default)]
    pub cargontes: Vec<Cargonte>,
    #[serde(default)]
    pub images: Vec<String>,
    /// Kept in the order the API sent it.
    #[serde(default)]
    pub schedule: Vec<ScheduleItem>,
}

impl Festivity {
    /// Number of calendar days covered, both ends inclusive.
    pub fn duration_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }

    pub fn is_active_on(&self, day: NaiveDate) -> bool {
        self.start_date <= day && day <= self.end_date
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceCategory {
    Natural,
    Cultural,
    Historical,
    Archaeological,
}

/// A point of interest that is neither a tour nor a festivity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TouristPlace {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub category: PlaceCategory,
    pub location: Location,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub how_to_get_there: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_time_to_visit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_fee: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

/// A record served by the content API as a JSON array.
///
/// Ties each record type to its resource path, its cache slot and its seed
/// collection so the client can treat tours and festivities uniformly.
pub trait ContentRecord: Clone + Send + Sync + serde::de::DeserializeOwned + 'static {
    /// Path segment under `/api/`.
    const RESOURCE: &'static str;

    fn id(&self) -> &str;

    fn slug(&self) -> &str;

    /// Record-level invariants beyond what serde enforces.
    fn check(&self) -> Result<(), String> {
        Ok(())
    }

    fn slot(cache: &ContentCache) -> &CacheSlot<Self>;

    fn seed(seed: &SeedData) -> &std::sync::Arc<[Self]>;
}

impl ContentRecord for Tour {
    const RESOURCE: &'static str = "tours";

    fn id(&self) -> &str {
        &self.id
    }

    fn slug(&self) -> &str {
        &self.slug
    }

    fn slot(cache: &ContentCache) -> &CacheSlot<Self> {
        cache.tours()
    }

    fn seed(seed: &SeedData) -> &std::sync::Arc<[Self]> {
        seed.tours()
    }
}

impl ContentRecord for Festivity {
    const RESOURCE: &'static str = "festivities";

    fn id(&self) -> &str {
        &self.id
    }

    fn slug(&self) -> &str {
        &self.slug
    }

    fn check(&self) -> Result<(), String> {
        if self.end_date < self.start_date {
            return Err(format!(
                "festivity '{}' ends ({}) before it starts ({})",
                self.id, self.end_date, self.start_date
            ));
        }
        Ok(())
    }

    fn slot(cache: &ContentCache) -> &CacheSlot<Self> {
        cache.festivities()
    }

    fn seed(seed: &SeedData) -> &std::sync::Arc<[Self]> {
        seed.festivities()
    }
}

/// Check a whole collection: per-record invariants plus non-empty, unique slugs.
pub fn validate_collection<T: ContentRecord>(records: &[T]) -> Result<(), String> {
    let mut seen = std::collections::HashSet::new();
    for record in records {
        record.check()?;
        if record.slug().trim().is_empty() {
            return Err(format!("{} record '{}' has an empty slug", T::RESOURCE, record.id()));
        }
        if !seen.insert(record.slug()) {
            return Err(format!("duplicate {} slug '{}'", T::RESOURCE, record.slug()));
        }
    }
    Ok(())
}

/// First record whose `id` matches.
pub fn find_by_id<'a, T: ContentRecord>(records: &'a [T], id: &str) -> Option<&'a T> {
    records.iter().find(|r| r.id() == id)
}

/// First record whose `slug` matches.
pub fn find_by_slug<'a, T: ContentRecord>(records: &'a [T], slug: &str) -> Option<&'a T> {
    records.iter().find(|r| r.slug() == slug)
}
