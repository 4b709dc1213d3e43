//! Current weather for Pomabamba
//!
//! Fetches conditions from Open-Meteo and keeps widget readings fresh on a
//! timer tied to the widget's lifetime.

pub mod provider;
pub mod types;
pub mod widget;

pub use provider::WeatherProvider;
pub use types::*;
pub use widget::{
    FailurePolicy, RefreshOutcome, WeatherProfile, WeatherWidget, WidgetHandle, REFRESH_INTERVAL,
};
