//! Combined fetch for one location and the best-effort hourly refinement.
//!
//! Current conditions and the daily forecast are loaded concurrently and
//! joined fail-fast: a failure of either fails the whole load, no partial
//! result leaks out as success. Real hourly data is fetched afterwards by a
//! detached task that delivers through a channel and never fails the
//! primary path.

use chrono::Local;
use tokio::sync::mpsc;

use crate::{
    client::{ForecaClient, WeatherApiError},
    model::{CurrentConditions, DailyForecast, HourlyForecast},
    synthetic,
};

/// Everything the detail screen needs in one value. `hourly` starts out as
/// the synthetic series; a later channel delivery may replace it.
#[derive(Debug, Clone)]
pub struct WeatherOverview {
    pub current: CurrentConditions,
    pub daily: Vec<DailyForecast>,
    pub hourly: Vec<HourlyForecast>,
}

/// Load current conditions and the daily forecast concurrently, then seed
/// the hourly series from the synthetic generator.
pub async fn load_overview(
    client: &ForecaClient,
    location_id: &str,
    days: Option<u32>,
) -> Result<WeatherOverview, WeatherApiError> {
    let (current, daily) = tokio::try_join!(
        client.current_conditions(location_id),
        client.daily_forecast(location_id, days),
    )?;

    let hourly = synthetic::synthetic_hourly(&current, Local::now().naive_local());

    Ok(WeatherOverview {
        current,
        daily,
        hourly,
    })
}

/// Spawn the background hourly fetch.
///
/// At most one message is ever sent: a non-empty real hourly series. Empty
/// results and failures are logged and dropped, closing the channel without
/// a delivery. Call this after the primary data is already on screen.
pub fn spawn_hourly_refresh(
    client: ForecaClient,
    location_id: String,
) -> mpsc::Receiver<Vec<HourlyForecast>> {
    let (tx, rx) = mpsc::channel(1);

    tokio::spawn(async move {
        match client.hourly_forecast(&location_id, Some(24)).await {
            Ok(hours) if !hours.is_empty() => {
                log::debug!("real hourly data received: {} hours", hours.len());
                let _ = tx.send(hours).await;
            }
            Ok(_) => {
                log::debug!("hourly endpoint answered with an empty series");
            }
            Err(err) => {
                log::warn!("hourly forecast not available: {err}");
            }
        }
    });

    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::test_support::{RouteTransport, client_with};
    use std::sync::Arc;

    const CURRENT_BODY: &str = r#"{ "current": { "temperature": 12.5, "symbol": "clear" } }"#;
    const DAILY_BODY: &str = r#"{ "forecast": [ { "date": "2025-09-09", "maxTemp": 18.0 } ] }"#;

    #[tokio::test]
    async fn overview_joins_current_and_daily() {
        let transport = Arc::new(
            RouteTransport::new()
                .route("/v1/current/5", 200, CURRENT_BODY)
                .route("/v1/forecast/daily/5", 200, DAILY_BODY),
        );
        let client = client_with(transport);

        let overview = load_overview(&client, "5", Some(7)).await.unwrap();

        assert_eq!(overview.current.temperature, Some(12.5));
        assert_eq!(overview.daily.len(), 1);
        // Hourly is seeded synthetically from the snapshot.
        assert_eq!(overview.hourly.len(), 24);
        assert!(
            overview
                .hourly
                .iter()
                .all(|h| h.symbol.as_deref() == Some("clear"))
        );
    }

    #[tokio::test]
    async fn overview_fails_when_daily_fails() {
        // Current succeeds, daily answers 500: no partial success.
        let transport = Arc::new(
            RouteTransport::new()
                .route("/v1/current/5", 200, CURRENT_BODY)
                .route("/v1/forecast/daily/5", 500, "boom"),
        );
        let client = client_with(transport);

        let err = load_overview(&client, "5", Some(7)).await.unwrap_err();
        assert!(matches!(err, WeatherApiError::Http { status: 500, .. }));
    }

    #[tokio::test]
    async fn overview_fails_when_current_fails() {
        let transport = Arc::new(
            RouteTransport::new()
                .route("/v1/current/5", 401, "bad token")
                .route("/v1/forecast/daily/5", 200, DAILY_BODY),
        );
        let client = client_with(transport);

        let err = load_overview(&client, "5", Some(7)).await.unwrap_err();
        assert!(matches!(err, WeatherApiError::Http { status: 401, .. }));
    }

    #[tokio::test]
    async fn refresh_delivers_real_hourly_data() {
        let transport = Arc::new(RouteTransport::new().route(
            "/v1/forecast/hourly/5",
            200,
            r#"{ "forecast": [ { "time": "2025-09-09T10:00:00" }, { "time": "2025-09-09T11:00:00" } ] }"#,
        ));
        let client = client_with(transport);

        let mut rx = spawn_hourly_refresh(client, "5".to_string());
        let hours = rx.recv().await.expect("refresh should deliver");
        assert_eq!(hours.len(), 2);
    }

    #[tokio::test]
    async fn refresh_swallows_total_failure() {
        // No routes: every probe candidate 404s. The channel must close
        // without a delivery instead of surfacing an error.
        let transport = Arc::new(RouteTransport::new());
        let client = client_with(transport);

        let mut rx = spawn_hourly_refresh(client, "5".to_string());
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn refresh_drops_empty_series() {
        let transport = Arc::new(RouteTransport::new().route(
            "/v1/forecast/hourly/5",
            200,
            r#"{ "forecast": [] }"#,
        ));
        let client = client_with(transport);

        let mut rx = spawn_hourly_refresh(client, "5".to_string());
        assert!(rx.recv().await.is_none());
    }
}
