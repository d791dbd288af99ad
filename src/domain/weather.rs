use serde::Deserialize;

/// Body of `/alerts/active/area/{state}`. A body without `features` fails to parse.
#[derive(Debug, Clone, Deserialize)]
pub struct AlertCollection {
    pub features: Vec<AlertFeature>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AlertFeature {
    #[serde(default)]
    pub properties: AlertProperties,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertProperties {
    pub event: Option<String>,
    pub area_desc: Option<String>,
    pub severity: Option<String>,
    pub description: Option<String>,
    pub instruction: Option<String>,
}

/// Body of `/points/{lat},{lon}`; only the forecast URL is consumed.
#[derive(Debug, Clone, Deserialize)]
pub struct PointsResponse {
    pub properties: PointsProperties,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PointsProperties {
    pub forecast: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastResponse {
    pub properties: ForecastProperties,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastProperties {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub periods: Vec<ForecastPeriod>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPeriod {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub name: String,
    #[serde(default)]
    pub temperature: serde_json::Value,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub temperature_unit: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub wind_speed: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub wind_direction: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub detailed_forecast: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn alert_properties_tolerate_missing_and_null_fields() {
        let c: AlertCollection = serde_json::from_value(json!({
            "features": [
                { "properties": { "event": "Flood Watch", "areaDesc": "Kern", "description": null } },
                {}
            ]
        }))
        .unwrap();
        assert_eq!(c.features.len(), 2);
        assert_eq!(c.features[0].properties.area_desc.as_deref(), Some("Kern"));
        assert!(c.features[0].properties.description.is_none());
        assert!(c.features[1].properties.event.is_none());
    }

    #[test]
    fn collection_without_features_is_rejected() {
        let res = serde_json::from_value::<AlertCollection>(json!({ "title": "x" }));
        assert!(res.is_err());
    }

    #[test]
    fn forecast_period_reads_camel_case_keys() {
        let p: ForecastPeriod = serde_json::from_value(json!({
            "name": "Tonight",
            "temperature": 48,
            "temperatureUnit": "F",
            "windSpeed": "5 mph",
            "windDirection": "NW",
            "detailedForecast": "Clear."
        }))
        .unwrap();
        assert_eq!(p.temperature_unit, "F");
        assert_eq!(p.wind_direction, "NW");
        assert_eq!(p.temperature, json!(48));
    }
}
