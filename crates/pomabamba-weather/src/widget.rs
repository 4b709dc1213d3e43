//! Self-refreshing weather readings.
//!
//! A [`WeatherWidget`] owns the displayed [`WeatherState`] and knows how to
//! refresh it. [`WeatherWidget::mount`] starts the periodic timer; dropping
//! the returned [`WidgetHandle`] stops it. A fetch already in flight at that
//! point is allowed to finish, but its result is thrown away.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::provider::WeatherProvider;
use crate::types::{Coordinates, WeatherCondition, WeatherReading, WeatherState};

pub const REFRESH_INTERVAL: Duration = Duration::from_secs(30 * 60);

/// What a widget shows after a failed fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Leave the current reading on screen.
    KeepLast,
    /// Replace the reading with `reading` and raise `message` as the error indicator.
    ResetToDefault {
        reading: WeatherReading,
        message: String,
    },
}

#[derive(Debug, Clone)]
pub struct WeatherProfile {
    pub name: String,
    pub coordinates: Coordinates,
    pub altitude_m: Option<u32>,
    pub include_humidity: bool,
    /// Shown before the first fetch settles. `None` starts in the loading state.
    pub initial: Option<WeatherReading>,
    pub on_failure: FailurePolicy,
}

impl WeatherProfile {
    /// Compact stat for the header: no humidity, keeps the last reading on failure.
    pub fn stat() -> Self {
        Self {
            name: "stat".to_string(),
            coordinates: Coordinates {
                latitude: -13.6047074,
                longitude: -74.2364904,
            },
            altitude_m: None,
            include_humidity: false,
            initial: Some(WeatherReading {
                temperature: 12,
                description: "Clima andino".to_string(),
                pictogram: "⛅".to_string(),
                humidity: None,
            }),
            on_failure: FailurePolicy::KeepLast,
        }
    }

    /// Full widget with humidity and altitude; shows an offline default on failure.
    pub fn widget() -> Self {
        Self {
            name: "widget".to_string(),
            coordinates: Coordinates {
                latitude: -13.6014,
                longitude: -74.2342,
            },
            altitude_m: Some(3236),
            include_humidity: true,
            initial: None,
            on_failure: FailurePolicy::ResetToDefault {
                reading: WeatherReading::new(
                    12,
                    WeatherCondition::from_wmo_code(2),
                    Some(65),
                ),
                message: "Sin conexión".to_string(),
            },
        }
    }

    fn initial_state(&self) -> WeatherState {
        WeatherState {
            loading: self.initial.is_none(),
            reading: self.initial.clone(),
            error: None,
            last_success: None,
        }
    }
}

/// Result of one refresh, mostly for logs and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Updated,
    KeptLast,
    ResetToDefault,
    /// The widget was unmounted while the request was in flight.
    Discarded,
}

pub struct WeatherWidget {
    profile: WeatherProfile,
    provider: Arc<WeatherProvider>,
    state: watch::Sender<WeatherState>,
    alive: CancellationToken,
}

impl WeatherWidget {
    pub fn new(profile: WeatherProfile, provider: Arc<WeatherProvider>) -> Self {
        let (state, _) = watch::channel(profile.initial_state());
        Self {
            profile,
            provider,
            state,
            alive: CancellationToken::new(),
        }
    }

    pub fn profile(&self) -> &WeatherProfile {
        &self.profile
    }

    pub fn state(&self) -> WeatherState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state replacement.
    pub fn subscribe(&self) -> watch::Receiver<WeatherState> {
        self.state.subscribe()
    }

    pub fn is_mounted(&self) -> bool {
        !self.alive.is_cancelled()
    }

    /// Fetch once and apply the result according to the failure policy.
    pub async fn refresh(&self) -> RefreshOutcome {
        let result = self
            .provider
            .fetch_current(self.profile.coordinates, self.profile.include_humidity)
            .await;

        if self.alive.is_cancelled() {
            tracing::debug!("Discarding weather result for unmounted {}", self.profile.name);
            return RefreshOutcome::Discarded;
        }

        let previous = self.state();
        match result {
            Ok(reading) => {
                tracing::info!("Weather {} updated: {}", self.profile.name, reading.summary());
                self.state.send_replace(WeatherState {
                    reading: Some(reading),
                    loading: false,
                    error: None,
                    last_success: Some(Utc::now()),
                });
                RefreshOutcome::Updated
            }
            Err(e) => {
                tracing::error!("Error fetching weather for {}: {}", self.profile.name, e);
                match &self.profile.on_failure {
                    FailurePolicy::KeepLast => {
                        self.state.send_if_modified(|state| {
                            let was_loading = state.loading;
                            state.loading = false;
                            was_loading
                        });
                        RefreshOutcome::KeptLast
                    }
                    FailurePolicy::ResetToDefault { reading, message } => {
                        self.state.send_replace(WeatherState {
                            reading: Some(reading.clone()),
                            loading: false,
                            error: Some(message.clone()),
                            last_success: previous.last_success,
                        });
                        RefreshOutcome::ResetToDefault
                    }
                }
            }
        }
    }

    /// Fetch now, then every `interval`, until the handle is dropped.
    /// Must be called from within a tokio runtime.
    pub fn mount(self, interval: Duration) -> WidgetHandle {
        let period = if interval.is_zero() {
            tracing::warn!("Zero weather refresh interval, using {:?}", REFRESH_INTERVAL);
            REFRESH_INTERVAL
        } else {
            interval
        };

        let widget = Arc::new(self);
        let task = tokio::spawn(Arc::clone(&widget).run(period));
        WidgetHandle {
            widget,
            task: Some(task),
        }
    }

    async fn run(self: Arc<Self>, period: Duration) {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = self.alive.cancelled() => break,
                _ = ticker.tick() => {}
            }
            // Not raced against cancellation: refresh discards late results itself.
            self.refresh().await;
        }

        tracing::debug!("Weather timer for {} stopped", self.profile.name);
    }
}

/// A mounted widget. Dropping it stops the refresh timer.
pub struct WidgetHandle {
    widget: Arc<WeatherWidget>,
    task: Option<JoinHandle<()>>,
}

impl WidgetHandle {
    pub fn widget(&self) -> &WeatherWidget {
        &self.widget
    }

    pub fn state(&self) -> WeatherState {
        self.widget.state()
    }

    pub fn subscribe(&self) -> watch::Receiver<WeatherState> {
        self.widget.subscribe()
    }

    /// Stop the timer and wait for the background task to exit, including
    /// any fetch that was already in flight.
    pub async fn unmount(mut self) {
        self.widget.alive.cancel();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                tracing::warn!(
                    "Weather task for {} ended abnormally: {}",
                    self.widget.profile.name,
                    e
                );
            }
        }
    }
}

impl Drop for WidgetHandle {
    fn drop(&mut self) {
        self.widget.alive.cancel();
    }
}
