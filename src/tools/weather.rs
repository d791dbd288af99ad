use crate::clients::NwsClient;
use crate::domain::weather::AlertFeature;
use crate::domain::{scalar_text, ForecastPeriod};

pub const ALERTS_UNAVAILABLE: &str = "Unable to fetch alerts or no alerts found.";
pub const NO_ACTIVE_ALERTS: &str = "No active alerts for this state.";
pub const POINTS_UNAVAILABLE: &str = "Unable to fetch forecast data for this location.";
pub const FORECAST_UNAVAILABLE: &str = "Unable to fetch detailed forecast.";

/// Number of forecast periods rendered, counted from the first.
pub const FORECAST_PERIODS: usize = 5;

const SEPARATOR: &str = "\n---\n";

/// Format an alert feature into a readable block.
pub fn format_alert(feature: &AlertFeature) -> String {
    let props = &feature.properties;
    format!(
        "\nEvent: {}\nArea: {}\nSeverity: {}\nDescription: {}\nInstructions: {}\n",
        props.event.as_deref().unwrap_or("Unknown"),
        props.area_desc.as_deref().unwrap_or("Unknown"),
        props.severity.as_deref().unwrap_or("Unknown"),
        props.description.as_deref().unwrap_or("No description available"),
        props
            .instruction
            .as_deref()
            .unwrap_or("No specific instructions provided"),
    )
}

pub fn format_period(period: &ForecastPeriod) -> String {
    format!(
        "\n{}:\nTemperature: {}°{}\nWind: {} {}\nForecast: {}\n",
        period.name,
        scalar_text(&period.temperature),
        period.temperature_unit,
        period.wind_speed,
        period.wind_direction,
        period.detailed_forecast,
    )
}

/// Handlers for the weather tools. Failures are logged with their cause and
/// rendered as fixed messages.
#[derive(Clone)]
pub struct WeatherTools {
    nws: NwsClient,
}

impl WeatherTools {
    pub fn new(nws: NwsClient) -> Self {
        Self { nws }
    }

    pub async fn get_alerts(&self, state: &str) -> String {
        let alerts = match self.nws.active_alerts(state).await {
            Ok(collection) => collection.features,
            Err(e) => {
                tracing::info!(state, kind = e.kind(), error = %e, "alerts unavailable");
                return ALERTS_UNAVAILABLE.to_string();
            }
        };
        if alerts.is_empty() {
            return NO_ACTIVE_ALERTS.to_string();
        }
        alerts
            .iter()
            .map(format_alert)
            .collect::<Vec<_>>()
            .join(SEPARATOR)
    }

    pub async fn get_forecast(&self, latitude: f64, longitude: f64) -> String {
        let points = match self.nws.points(latitude, longitude).await {
            Ok(points) => points,
            Err(e) => {
                tracing::info!(latitude, longitude, kind = e.kind(), error = %e, "points lookup failed");
                return POINTS_UNAVAILABLE.to_string();
            }
        };
        let forecast = match self.nws.forecast(&points.properties.forecast).await {
            Ok(forecast) => forecast,
            Err(e) => {
                tracing::info!(url = %points.properties.forecast, kind = e.kind(), error = %e, "forecast fetch failed");
                return FORECAST_UNAVAILABLE.to_string();
            }
        };
        forecast
            .properties
            .periods
            .iter()
            .take(FORECAST_PERIODS)
            .map(format_period)
            .collect::<Vec<_>>()
            .join(SEPARATOR)
    }
}
