//! Authenticated Foreca API client.
//!
//! Every operation is a GET with the API token appended as the `token`
//! query parameter. The hourly resource is not at a single stable path, so
//! the client probes a declared list of candidate paths sequentially and
//! returns the first one that answers 2xx with a decodable body.

use std::{fmt::Debug, sync::Arc};

use async_trait::async_trait;
use reqwest::{Client, Url, header::ACCEPT};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::model::{
    CurrentConditions, CurrentConditionsResponse, DailyForecast, DailyForecastResponse,
    HourlyForecast, HourlyForecastResponse, Location, LocationSearchResponse,
};

/// Production API root.
pub const DEFAULT_BASE_URL: &str = "https://pfa.foreca.com/api/v1";

/// Failure taxonomy for all client operations.
#[derive(Debug, Error)]
pub enum WeatherApiError {
    #[error("API token is missing. Please check your configuration.")]
    MissingToken,

    #[error("Invalid URL format.")]
    InvalidUrl,

    #[error("Hourly forecast endpoint not found.")]
    EndpointNotFound,

    #[error("HTTP error {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Status and raw body of one GET, as seen by the client.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Minimal transport seam: perform a GET, hand back status and body.
#[async_trait]
pub trait HttpTransport: Send + Sync + Debug {
    async fn get(&self, url: Url) -> Result<HttpResponse, WeatherApiError>;
}

/// Default transport backed by a shared reqwest client.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    http: Client,
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: Url) -> Result<HttpResponse, WeatherApiError> {
        let res = self
            .http
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = res.status().as_u16();
        let body = res.text().await?;

        Ok(HttpResponse { status, body })
    }
}

/// Stateless client; the token and transport are the only long-lived state.
#[derive(Debug, Clone)]
pub struct ForecaClient {
    token: String,
    base_url: String,
    transport: Arc<dyn HttpTransport>,
}

impl ForecaClient {
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_transport(token, DEFAULT_BASE_URL, Arc::new(ReqwestTransport::default()))
    }

    /// Inject a base URL and transport; used by tests and alternate stacks.
    pub fn with_transport(
        token: impl Into<String>,
        base_url: impl Into<String>,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        Self {
            token: token.into(),
            base_url: base_url.into(),
            transport,
        }
    }

    /// `GET {base}/location/search/{query}?limit&token`
    pub async fn search_locations(
        &self,
        query: &str,
        limit: Option<u32>,
    ) -> Result<Vec<Location>, WeatherApiError> {
        let mut params = Vec::new();
        if let Some(limit) = limit {
            params.push(("limit", limit.to_string()));
        }

        let url = self.endpoint_url(&["location", "search", query], &params)?;
        let parsed: LocationSearchResponse = self.get_json(url).await?;

        Ok(parsed.into_list())
    }

    /// `GET {base}/current/{locationId}?token`
    pub async fn current_conditions(
        &self,
        location_id: &str,
    ) -> Result<CurrentConditions, WeatherApiError> {
        let url = self.endpoint_url(&["current", location_id], &[])?;
        let parsed: CurrentConditionsResponse = self.get_json(url).await?;

        // A missing `current` object is a valid empty snapshot.
        Ok(parsed.current.unwrap_or_default())
    }

    /// `GET {base}/forecast/daily/{locationId}?days&token`
    pub async fn daily_forecast(
        &self,
        location_id: &str,
        days: Option<u32>,
    ) -> Result<Vec<DailyForecast>, WeatherApiError> {
        let mut params = Vec::new();
        if let Some(days) = days {
            params.push(("days", days.to_string()));
        }

        let url = self.endpoint_url(&["forecast", "daily", location_id], &params)?;
        let parsed: DailyForecastResponse = self.get_json(url).await?;

        Ok(parsed.forecast.unwrap_or_default())
    }

    /// Hourly forecast via the endpoint-fallback probe.
    ///
    /// Candidates are tried strictly in order; a non-2xx status or an
    /// undecodable body moves on to the next one, the first candidate that
    /// decodes wins. When every candidate fails the aggregate result is
    /// [`WeatherApiError::EndpointNotFound`], not any intermediate error.
    pub async fn hourly_forecast(
        &self,
        location_id: &str,
        hours: Option<u32>,
    ) -> Result<Vec<HourlyForecast>, WeatherApiError> {
        let mut params = Vec::new();
        if let Some(hours) = hours {
            params.push(("hours", hours.to_string()));
        }

        for segments in hourly_candidates(location_id) {
            let url = self.endpoint_url(&segments, &params)?;
            let path = segments.join("/");

            match self.get_json::<HourlyForecastResponse>(url).await {
                Ok(parsed) => {
                    log::debug!("hourly forecast served from {path}");
                    return Ok(parsed.into_list());
                }
                Err(err) => {
                    log::debug!("hourly candidate {path} failed: {err}");
                }
            }
        }

        Err(WeatherApiError::EndpointNotFound)
    }

    /// Build the request URL: token precondition, path segments, query
    /// params. Segments are appended one by one so reserved characters in
    /// caller-supplied values (`#`, `?`, `/`) get percent-encoded instead
    /// of rewriting the URL structure. The token travels as a query
    /// parameter, never as a header.
    fn endpoint_url(
        &self,
        segments: &[&str],
        params: &[(&str, String)],
    ) -> Result<Url, WeatherApiError> {
        if self.token.is_empty() {
            return Err(WeatherApiError::MissingToken);
        }

        let mut url = Url::parse(&self.base_url).map_err(|_| WeatherApiError::InvalidUrl)?;

        {
            let mut path = url
                .path_segments_mut()
                .map_err(|()| WeatherApiError::InvalidUrl)?;
            path.pop_if_empty();
            path.extend(segments);
        }

        {
            let mut query = url.query_pairs_mut();
            for (name, value) in params {
                query.append_pair(name, value);
            }
            query.append_pair("token", &self.token);
        }

        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, WeatherApiError> {
        let res = self.transport.get(url).await?;

        if !res.is_success() {
            return Err(WeatherApiError::Http {
                status: res.status,
                body: res.body,
            });
        }

        Ok(serde_json::from_str(&res.body)?)
    }
}

/// Candidate paths for the hourly resource, in probe order, as segment
/// lists. Declarative on purpose: extend the list, not the control flow.
fn hourly_candidates(location_id: &str) -> [Vec<&str>; 4] {
    [
        vec!["forecast", "hourly", location_id],
        vec!["forecast", "hourly", location_id, "hourly"],
        vec!["forecast", location_id, "hourly"],
        vec!["hourly", location_id],
    ]
}


#[cfg(test)]
mod tests {
    use super::test_support::{RouteTransport, client_with};
    use super::*;

    #[tokio::test]
    async fn missing_token_fails_before_any_network_call() {
        let transport = Arc::new(RouteTransport::new());
        let client = ForecaClient::with_transport("", "https://api.test/v1", transport.clone());

        let err = client.search_locations("helsinki", None).await.unwrap_err();
        assert!(matches!(err, WeatherApiError::MissingToken));

        let err = client.hourly_forecast("1", Some(24)).await.unwrap_err();
        assert!(matches!(err, WeatherApiError::MissingToken));

        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn token_and_limit_travel_as_query_parameters() {
        let transport = Arc::new(
            RouteTransport::new().route(
                "/v1/location/search/oslo",
                200,
                r#"{ "locations": [ { "id": 1 } ] }"#,
            ),
        );
        let client = client_with(transport.clone());

        let list = client.search_locations("oslo", Some(5)).await.unwrap();
        assert_eq!(list.len(), 1);

        assert_eq!(transport.calls(), vec!["/v1/location/search/oslo"]);
        assert_eq!(transport.queries(), vec!["limit=5&token=test-token"]);
    }

    #[tokio::test]
    async fn non_2xx_surfaces_status_and_body() {
        let transport =
            Arc::new(RouteTransport::new().route("/v1/current/9", 503, "try later"));
        let client = client_with(transport);

        let err = client.current_conditions("9").await.unwrap_err();
        match err {
            WeatherApiError::Http { status, body } => {
                assert_eq!(status, 503);
                assert_eq!(body, "try later");
            }
            other => panic!("expected Http error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn undecodable_body_surfaces_decode_error() {
        let transport =
            Arc::new(RouteTransport::new().route("/v1/forecast/daily/9", 200, "<html>"));
        let client = client_with(transport);

        let err = client.daily_forecast("9", Some(7)).await.unwrap_err();
        assert!(matches!(err, WeatherApiError::Decode(_)));
    }

    #[tokio::test]
    async fn missing_current_object_is_an_empty_snapshot() {
        let transport = Arc::new(RouteTransport::new().route("/v1/current/9", 200, "{}"));
        let client = client_with(transport);

        let current = client.current_conditions("9").await.unwrap();
        assert_eq!(current, CurrentConditions::default());
    }

    #[tokio::test]
    async fn hourly_probe_stops_at_first_working_candidate() {
        // Candidates 1-2 answer 404 (unrouted), candidate 3 succeeds.
        let transport = Arc::new(RouteTransport::new().route(
            "/v1/forecast/123/hourly",
            200,
            r#"{ "data": [ { "time": "2025-09-09T10:00:00", "temperature": 17.5 } ] }"#,
        ));
        let client = client_with(transport.clone());

        let hours = client.hourly_forecast("123", Some(24)).await.unwrap();
        assert_eq!(hours.len(), 1);
        assert_eq!(hours[0].temperature, Some(17.5));

        let calls = transport.calls();
        assert_eq!(
            calls,
            vec![
                "/v1/forecast/hourly/123",
                "/v1/forecast/hourly/123/hourly",
                "/v1/forecast/123/hourly",
            ]
        );
    }

    #[tokio::test]
    async fn hourly_probe_treats_undecodable_body_as_failure() {
        let transport = Arc::new(
            RouteTransport::new()
                .route("/v1/forecast/hourly/123", 200, "not json at all")
                .route(
                    "/v1/forecast/hourly/123/hourly",
                    200,
                    r#"{ "hours": [ { "time": "t" } ] }"#,
                ),
        );
        let client = client_with(transport.clone());

        let hours = client.hourly_forecast("123", None).await.unwrap();
        assert_eq!(hours.len(), 1);
        assert_eq!(transport.call_count(), 2);
    }

    #[tokio::test]
    async fn hourly_probe_all_candidates_failing_is_endpoint_not_found() {
        let transport = Arc::new(RouteTransport::new());
        let client = client_with(transport.clone());

        let err = client.hourly_forecast("123", Some(24)).await.unwrap_err();
        assert!(matches!(err, WeatherApiError::EndpointNotFound));
        assert_eq!(transport.call_count(), 4);
    }

    #[tokio::test]
    async fn reserved_characters_in_query_are_percent_encoded() {
        // A raw `#` would truncate the path into a fragment and a raw `?`
        // would leak into the query string; both must reach the server as
        // percent-encoded path characters.
        let transport = Arc::new(RouteTransport::new().route(
            "/v1/location/search/a%23b%3Fc",
            200,
            r#"{ "locations": [ { "id": 1 } ] }"#,
        ));
        let client = client_with(transport.clone());

        let list = client.search_locations("a#b?c", None).await.unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(transport.calls(), vec!["/v1/location/search/a%23b%3Fc"]);
        assert_eq!(transport.queries(), vec!["token=test-token"]);
    }

    #[tokio::test]
    async fn reserved_characters_in_location_id_stay_in_the_path() {
        let transport = Arc::new(RouteTransport::new().route("/v1/current/9%2F..%2F8", 200, "{}"));
        let client = client_with(transport.clone());

        let current = client.current_conditions("9/../8").await.unwrap();
        assert_eq!(current, CurrentConditions::default());
        assert_eq!(transport.calls(), vec!["/v1/current/9%2F..%2F8"]);
    }

    #[test]
    fn hourly_candidates_are_in_declared_priority_order() {
        let paths: Vec<String> = hourly_candidates("42")
            .iter()
            .map(|segments| segments.join("/"))
            .collect();
        assert_eq!(
            paths,
            vec![
                "forecast/hourly/42",
                "forecast/hourly/42/hourly",
                "forecast/42/hourly",
                "hourly/42",
            ]
        );
    }

    #[test]
    fn invalid_base_url_maps_to_invalid_url_error() {
        let client = ForecaClient::with_transport(
            "token",
            "not a url",
            Arc::new(ReqwestTransport::default()),
        );

        let err = client.endpoint_url(&["current", "1"], &[]).unwrap_err();
        assert!(matches!(err, WeatherApiError::InvalidUrl));
    }
}
