use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use chrono::Local;
use clap::{Parser, Subcommand};
use foreca_core::{
    Config, CurrentConditions, DailyForecast, ForecaClient, HourlyForecast, load_overview,
    spawn_hourly_refresh,
    timefmt::hour_label_opt,
};

/// How long `show` waits for the background hourly fetch before settling
/// for the synthetic series.
const HOURLY_WAIT: Duration = Duration::from_secs(5);

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "foreca", version, about = "Foreca weather CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the Foreca API token in the config file.
    Configure,

    /// Search for locations by name.
    Search {
        /// Location name or fragment, e.g. "helsinki".
        query: String,

        /// Maximum number of results.
        #[arg(long, default_value_t = 10)]
        limit: u32,
    },

    /// Show current conditions and forecasts for a location id.
    Show {
        /// Numeric location id from `search`.
        location_id: String,

        /// Number of forecast days.
        #[arg(long, default_value_t = 7)]
        days: u32,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Search { query, limit } => search(&query, limit).await,
            Command::Show { location_id, days } => show(&location_id, days).await,
        }
    }
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let token = inquire::Text::new("Foreca API token:")
        .prompt()
        .context("Failed to read token")?;

    let token = token.trim().to_string();
    if token.is_empty() {
        return Err(anyhow!("Token must not be empty"));
    }

    config.set_api_token(token);
    config.save()?;

    println!("Token saved to {}", Config::config_file_path()?.display());
    Ok(())
}

fn client_from_config() -> Result<ForecaClient> {
    let config = Config::load()?;
    let token = config.resolve_token().ok_or_else(|| {
        anyhow!(
            "No API token configured.\n\
             Hint: run `foreca configure` or set the FORECA_API_TOKEN environment variable."
        )
    })?;

    Ok(ForecaClient::new(token))
}

async fn search(query: &str, limit: u32) -> Result<()> {
    let client = client_from_config()?;
    let locations = client.search_locations(query, Some(limit)).await?;

    if locations.is_empty() {
        println!("No locations found for '{query}'.");
        return Ok(());
    }

    for location in &locations {
        let name = location.name.as_deref().unwrap_or("(unnamed)");
        let country = location.country.as_deref().unwrap_or("-");
        let coords = match (location.latitude(), location.longitude()) {
            (Some(lat), Some(lon)) => format!("{lat:.2}, {lon:.2}"),
            _ => "-".to_string(),
        };

        println!("{:>8}  {name}, {country}  [{coords}]", location.identifier());
    }

    Ok(())
}

async fn show(location_id: &str, days: u32) -> Result<()> {
    let client = client_from_config()?;

    let overview = load_overview(&client, location_id, Some(days)).await?;

    println!(
        "Weather for location {location_id} at {}",
        Local::now().format("%Y-%m-%d %H:%M")
    );
    print_current(&overview.current);
    print_daily(&overview.daily);
    print_hourly(&overview.hourly, true);

    // Primary data is on screen; now try for real hourly data in the
    // background and reprint if it arrives in time.
    let mut updates = spawn_hourly_refresh(client, location_id.to_string());
    if let Ok(Some(hours)) = tokio::time::timeout(HOURLY_WAIT, updates.recv()).await {
        print_hourly(&hours, false);
    }

    Ok(())
}

fn print_current(current: &CurrentConditions) {
    println!("\nCurrent conditions ({})", hour_label_opt(current.time.as_deref()));

    if let Some(phrase) = &current.symbol_phrase {
        println!("  {phrase}");
    }
    if let Some(temp) = current.temperature {
        let feels = current
            .feels_like
            .map(|f| format!(" (feels like {f:.1}°C)"))
            .unwrap_or_default();
        println!("  Temperature: {temp:.1}°C{feels}");
    }
    if let Some(wind) = current.wind_speed {
        println!("  Wind: {wind:.1} m/s");
    }
    if let Some(humidity) = current.humidity {
        println!("  Humidity: {humidity}%");
    }
    if let Some(uv) = current.uv_index {
        println!("  UV index: {uv:.1}");
    }
}

fn print_daily(days: &[DailyForecast]) {
    if days.is_empty() {
        return;
    }

    println!("\nDaily forecast:");
    for (index, day) in days.iter().enumerate() {
        let max = day.max_temp.map_or_else(|| "-".to_string(), |t| format!("{t:.0}°"));
        let min = day.min_temp.map_or_else(|| "-".to_string(), |t| format!("{t:.0}°"));
        let precip = day
            .precipitation_probability
            .map(|p| format!("{p}%"))
            .unwrap_or_default();

        println!(
            "  {:<12} {max:>5}/{min:<5} {:<16} rain {precip:<4} sunrise {} sunset {}",
            day.entry_id(index),
            day.symbol_phrase.as_deref().unwrap_or(""),
            hour_label_opt(day.sunrise.as_deref()),
            hour_label_opt(day.sunset.as_deref()),
        );
    }
}

fn print_hourly(hours: &[HourlyForecast], synthetic: bool) {
    if hours.is_empty() {
        return;
    }

    let source = if synthetic { "estimated" } else { "live" };
    println!("\nHourly forecast ({source}):");

    for hour in hours {
        let temp = hour
            .temperature
            .map_or_else(|| "-".to_string(), |t| format!("{t:.1}°C"));
        let wind = hour
            .wind_speed
            .map_or_else(|| "-".to_string(), |w| format!("{w:.1} m/s"));
        let prob = hour
            .precip_probability
            .map(|p| format!("{p:.0}%"))
            .unwrap_or_default();

        println!(
            "  {:<6} {temp:>8}  {wind:>9}  rain {prob}",
            hour_label_opt(hour.time.as_deref()),
        );
    }
}
