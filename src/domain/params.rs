//! Typed tool parameters. The same structs back the MCP tool router and the
//! registry, so both surfaces publish identical input schemas.

use rmcp::schemars::{self, JsonSchema};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AlertsParams {
    /// Two-letter US state code (e.g. CA, NY)
    pub state: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ForecastParams {
    /// Latitude of the location (recommended: up to 4 decimal places)
    pub latitude: f64,
    /// Longitude of the location (recommended: up to 4 decimal places)
    pub longitude: f64,
}

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct NoParams {}

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct AppointmentsParams {
    /// Optional phone number to filter appointments (format: 1-555-0101)
    #[serde(default)]
    pub patient_phone: Option<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AvailabilityParams {
    /// Name of the doctor (e.g. 'Dr. Smith', 'Smith', 'Dr. Jones')
    pub doctor_name: String,
    /// Date to check in YYYY-MM-DD format (e.g. 2025-12-11)
    pub date: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct BookingParams {
    /// Name of the doctor (e.g. 'Dr. Smith', 'Smith')
    pub doctor_name: String,
    /// Patient's phone number (format: 1-555-0101)
    pub patient_phone: String,
    /// Patient's full name
    pub patient_name: String,
    /// Appointment datetime in YYYY-MM-DD HH:MM:SS format (e.g. 2025-12-11 14:00:00)
    pub appointment_datetime: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct RescheduleParams {
    /// ID of the appointment to reschedule
    pub appointment_id: i64,
    /// New datetime in YYYY-MM-DD HH:MM:SS format (e.g. 2025-12-11 15:00:00)
    pub new_datetime: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CancelParams {
    /// ID of the appointment to cancel
    pub appointment_id: i64,
}
