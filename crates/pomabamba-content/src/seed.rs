//! Fallback records served when the content API can't be used.

use std::sync::Arc;

use crate::error::ContentError;
use crate::types::{validate_collection, ContentRecord, Festivity, Tour};

const BUILTIN_TOURS: &str = include_str!("../seed/tours.json");
const BUILTIN_FESTIVITIES: &str = include_str!("../seed/festivities.json");

/// Seed collections handed out on fetch failure.
///
/// Seeds are never written to the cache.
#[derive(Debug, Clone)]
pub struct SeedData {
    tours: Arc<[Tour]>,
    festivities: Arc<[Festivity]>,
}

impl SeedData {
    /// Seed from already-built records, checked like a fetched payload.
    pub fn new(tours: Vec<Tour>, festivities: Vec<Festivity>) -> Result<Self, ContentError> {
        validate_collection(&tours).map_err(ContentError::InvalidPayload)?;
        validate_collection(&festivities).map_err(ContentError::InvalidPayload)?;
        Ok(Self {
            tours: tours.into(),
            festivities: festivities.into(),
        })
    }

    /// Seed parsed from JSON arrays shaped like the API responses.
    pub fn from_json(tours: &str, festivities: &str) -> Result<Self, ContentError> {
        Self::new(parse(tours)?, parse(festivities)?)
    }

    /// The district's own three tours and three festivities.
    pub fn builtin() -> Result<Self, ContentError> {
        Self::from_json(BUILTIN_TOURS, BUILTIN_FESTIVITIES)
    }

    /// No fallback records at all.
    pub fn empty() -> Self {
        Self {
            tours: Arc::from(Vec::<Tour>::new()),
            festivities: Arc::from(Vec::<Festivity>::new()),
        }
    }

    pub fn tours(&self) -> &Arc<[Tour]> {
        &self.tours
    }

    pub fn festivities(&self) -> &Arc<[Festivity]> {
        &self.festivities
    }
}

fn parse<T: ContentRecord>(json: &str) -> Result<Vec<T>, ContentError> {
    Ok(serde_json::from_str(json)?)
}
