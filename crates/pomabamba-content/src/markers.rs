//! Marker records for the interactive map.
//!
//! The map library draws the pins; this module only decides what goes on the
//! map, which icon category each pin uses and what its popup says.

use serde::{Deserialize, Serialize};

use crate::types::{Festivity, Tour, TouristPlace};

/// Plaza de Pomabamba.
pub const DEFAULT_CENTER: (f64, f64) = (-13.604606929004502, -74.23605195432597);
pub const DEFAULT_ZOOM: u8 = 13;

/// Icon category of a pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerKind {
    Tour,
    Festivity,
    Place,
}

impl MarkerKind {
    /// Site section the detail page lives under.
    pub fn route(&self) -> &'static str {
        match self {
            Self::Tour => "tours",
            Self::Festivity => "festivities",
            Self::Place => "places",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapMarker {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: MarkerKind,
    pub lat: f64,
    pub lng: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl MapMarker {
    /// One marker per tour location. Tours without locations get none.
    pub fn from_tour(tour: &Tour) -> Vec<Self> {
        tour.locations
            .iter()
            .enumerate()
            .map(|(i, loc)| Self {
                id: if i == 0 {
                    tour.id.clone()
                } else {
                    format!("{}-{}", tour.id, i)
                },
                title: tour.title.clone(),
                kind: MarkerKind::Tour,
                lat: loc.lat,
                lng: loc.lng,
                slug: Some(tour.slug.clone()),
                image: tour.images.first().cloned(),
            })
            .collect()
    }

    pub fn from_festivity(festivity: &Festivity) -> Self {
        Self {
            id: festivity.id.clone(),
            title: festivity.name.clone(),
            kind: MarkerKind::Festivity,
            lat: festivity.place.lat,
            lng: festivity.place.lng,
            slug: Some(festivity.slug.clone()),
            image: festivity.images.first().cloned(),
        }
    }

    pub fn from_place(place: &TouristPlace) -> Self {
        Self {
            id: place.id.clone(),
            title: place.name.clone(),
            kind: MarkerKind::Place,
            lat: place.location.lat,
            lng: place.location.lng,
            slug: Some(place.slug.clone()),
            image: place.images.first().cloned(),
        }
    }

    /// `/{route}/{slug}`, or `None` for markers without a detail page.
    pub fn detail_href(&self) -> Option<String> {
        self.slug
            .as_deref()
            .map(|slug| format!("/{}/{}", self.kind.route(), slug))
    }

    /// Popup markup bound to the pin.
    pub fn popup_html(&self) -> String {
        let title = escape_html(&self.title);
        let mut html = String::from("<div class=\"p-2 min-w-[200px]\">");

        if let Some(image) = &self.image {
            html.push_str(&format!(
                "<img src=\"{}\" alt=\"{}\" class=\"w-full h-32 object-cover rounded mb-2\" />",
                escape_html(image),
                title
            ));
        }

        html.push_str(&format!(
            "<h3 class=\"font-semibold text-sm mb-1\">{}</h3>",
            title
        ));

        if let Some(href) = self.detail_href() {
            html.push_str(&format!(
                "<a href=\"{}\" class=\"text-xs text-indigo hover:underline\">Ver detalles →</a>",
                escape_html(&href)
            ));
        }

        html.push_str("</div>");
        html
    }
}

/// Markers for everything that has a position, tours first.
pub fn collect_markers(
    tours: &[Tour],
    festivities: &[Festivity],
    places: &[TouristPlace],
) -> Vec<MapMarker> {
    tours
        .iter()
        .flat_map(MapMarker::from_tour)
        .chain(festivities.iter().map(MapMarker::from_festivity))
        .chain(places.iter().map(MapMarker::from_place))
        .collect()
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
