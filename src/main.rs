use std::sync::Arc;

use anyhow::{Context, Result};
use pomabamba_content::{collect_markers, ContentCache, ContentClient, SeedData};
use pomabamba_core::Config;
use pomabamba_weather::{WeatherProfile, WeatherProvider, WeatherState, WeatherWidget};

const USAGE: &str = "Usage: pomabamba [--watch]

Prints tours, festivities, map markers and the current weather.

Options:
  --watch    Keep the weather widgets refreshing until Ctrl-C
  -h, --help Show this message";

#[tokio::main]
async fn main() -> Result<()> {
    let mut watch = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--watch" => watch = true,
            "-h" | "--help" => {
                println!("{}", USAGE);
                return Ok(());
            }
            other => anyhow::bail!("Unknown argument: {}\n\n{}", other, USAGE),
        }
    }

    pomabamba_core::init()?;

    let (config, _) = Config::load_validated().context("Failed to load configuration")?;
    tracing::info!("Content API at {}", config.content.api_base_url);

    // Content
    let seed = Arc::new(SeedData::builtin().context("Built-in seed data is invalid")?);
    let content = ContentClient::from_config(&config.content, Arc::new(ContentCache::new()), seed)?;

    let tours = content.fetch_tours().await;
    let festivities = content.fetch_festivities().await;

    println!("Tours ({})", tours.len());
    for tour in tours.iter() {
        let difficulty = tour.difficulty.map(|d| d.label()).unwrap_or("-");
        println!(
            "  {:<45} {:>5}h  {:<9} {}",
            tour.title,
            tour.duration_hours,
            difficulty,
            tour.price_label()
        );
    }

    println!("\nFestividades ({})", festivities.len());
    for festivity in festivities.iter() {
        println!(
            "  {:<45} {} → {}  ({} cargontes)",
            festivity.name,
            festivity.start_date,
            festivity.end_date,
            festivity.cargontes.len()
        );
    }

    let markers = collect_markers(&tours, &festivities, &[]);
    println!("\nMapa: {} marcadores", markers.len());
    for marker in &markers {
        println!(
            "  [{:?}] {} ({:.4}, {:.4}) {}",
            marker.kind,
            marker.title,
            marker.lat,
            marker.lng,
            marker.detail_href().unwrap_or_default()
        );
    }

    // Weather
    let provider = Arc::new(WeatherProvider::from_config(&config.weather)?);
    let stat = WeatherWidget::new(WeatherProfile::stat(), Arc::clone(&provider));
    let widget = WeatherWidget::new(WeatherProfile::widget(), provider);

    if !watch {
        stat.refresh().await;
        widget.refresh().await;
        println!("\nClima");
        print_weather(stat.profile(), &stat.state());
        print_weather(widget.profile(), &widget.state());
        return Ok(());
    }

    let interval = config.weather.refresh_interval();
    let stat = stat.mount(interval);
    let widget = widget.mount(interval);
    let mut stat_rx = stat.subscribe();
    let mut widget_rx = widget.subscribe();

    println!("\nClima (cada {} min, Ctrl-C para salir)", config.weather.refresh_minutes);
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            Ok(()) = stat_rx.changed() => {
                print_weather(stat.widget().profile(), &stat_rx.borrow_and_update());
            }
            Ok(()) = widget_rx.changed() => {
                print_weather(widget.widget().profile(), &widget_rx.borrow_and_update());
            }
        }
    }

    tracing::info!("Shutting down");
    stat.unmount().await;
    widget.unmount().await;
    Ok(())
}

fn print_weather(profile: &WeatherProfile, state: &WeatherState) {
    let Some(reading) = &state.reading else {
        println!("  {:<7} cargando…", profile.name);
        return;
    };

    let mut line = format!("  {:<7} {}", profile.name, reading.summary());
    if let Some(humidity) = reading.humidity {
        line.push_str(&format!("  humedad {}%", humidity));
    }
    if let Some(altitude) = profile.altitude_m {
        line.push_str(&format!("  {} msnm", altitude));
    }
    if let Some(error) = &state.error {
        line.push_str(&format!("  ({})", error));
    }
    println!("{}", line);
}
