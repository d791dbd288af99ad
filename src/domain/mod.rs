//! Transient entities exchanged with the upstream APIs, and tool parameters.

pub mod hospital;
pub mod params;
pub mod weather;

use serde::Deserialize;

pub use hospital::{Appointment, AvailabilitySlots, BookingConfirmation, BookingRequest, Doctor};
pub use weather::{AlertCollection, AlertFeature, ForecastPeriod, ForecastResponse, PointsResponse};

/// Deserialize an explicit `null` the same way as a missing key.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + serde::Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Render a loosely-typed JSON scalar the way it reads in plain text:
/// strings without quotes, numbers as written, null as "Unknown".
pub fn scalar_text(v: &serde_json::Value) -> String {
    match v {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => "Unknown".to_string(),
        other => other.to_string(),
    }
}
