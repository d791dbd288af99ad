use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::core::error::UpstreamError;
use crate::domain::{AlertCollection, ForecastResponse, PointsResponse};
use crate::infra::config::{UpstreamConfig, DEFAULT_USER_AGENT};
use crate::infra::http::headers::add_standard_headers;
use crate::infra::http::request::fetch_json;

const GEO_JSON: &str = "application/geo+json";

/// National Weather Service API client.
#[derive(Clone)]
pub struct NwsClient {
    base: String,
    user_agent: String,
    http: Client,
}

impl NwsClient {
    pub fn new(base: impl Into<String>, http: Client) -> Self {
        Self {
            base: base.into(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            http,
        }
    }

    pub fn from_config(cfg: &UpstreamConfig, http: Client) -> Self {
        Self {
            base: cfg.weather_base_url.clone(),
            user_agent: cfg.user_agent.clone(),
            http,
        }
    }

    /// GET `url` with the NWS identification and GeoJSON accept headers.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        tool: &str,
        url: &str,
    ) -> Result<T, UpstreamError> {
        tracing::debug!(tool, endpoint = %url, "nws request");
        let (builder, _rid) = add_standard_headers(self.http.get(url), &self.user_agent, None);
        fetch_json(tool, builder.header(reqwest::header::ACCEPT, GEO_JSON)).await
    }

    pub async fn active_alerts(&self, state: &str) -> Result<AlertCollection, UpstreamError> {
        let url = format!("{}/alerts/active/area/{}", self.base.trim_end_matches('/'), state);
        self.get_json("get_alerts", &url).await
    }

    pub async fn points(&self, latitude: f64, longitude: f64) -> Result<PointsResponse, UpstreamError> {
        let url = format!("{}/points/{},{}", self.base.trim_end_matches('/'), latitude, longitude);
        self.get_json("get_forecast", &url).await
    }

    /// `forecast_url` is the absolute URL handed out by [`NwsClient::points`].
    pub async fn forecast(&self, forecast_url: &str) -> Result<ForecastResponse, UpstreamError> {
        self.get_json("get_forecast", forecast_url).await
    }
}
