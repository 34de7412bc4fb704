//! Core library for the `foreca` weather CLI.
//!
//! This crate defines:
//! - Configuration & token handling
//! - A schema-tolerant client for the Foreca weather API
//! - Canonical domain models, timestamp helpers and the synthetic
//!   hourly-forecast fallback
//!
//! It is used by `foreca-cli`, but can also be reused by other binaries or services.

pub mod client;
pub mod config;
pub mod model;
pub mod overview;
pub mod synthetic;
pub mod timefmt;

pub use client::{ForecaClient, HttpResponse, HttpTransport, WeatherApiError};
pub use config::Config;
pub use model::{CurrentConditions, DailyForecast, HourlyForecast, Location, Warning};
pub use overview::{WeatherOverview, load_overview, spawn_hourly_refresh};
