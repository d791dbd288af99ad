//! Tool handlers, the registry that names them, and the MCP router.

use std::sync::Arc;

use crate::clients::{HospitalClient, NwsClient};
use crate::core::error::GatewayError;
use crate::infra::config::UpstreamConfig;
use crate::infra::runtime::limits::make_http_client;

pub mod hospital;
pub mod mcp_router;
pub mod registry;
pub mod resolver;
pub mod weather;

pub use hospital::HospitalTools;
pub use weather::WeatherTools;

pub const GET_ALERTS: &str = "get_alerts";
pub const GET_FORECAST: &str = "get_forecast";
pub const GET_DOCTORS: &str = "get_doctors";
pub const GET_APPOINTMENTS: &str = "get_appointments";
pub const CHECK_AVAILABILITY: &str = "check_availability";
pub const BOOK_APPOINTMENT: &str = "book_appointment";
pub const RESCHEDULE_APPOINTMENT: &str = "reschedule_appointment";
pub const CANCEL_APPOINTMENT: &str = "cancel_appointment";

pub const GET_ALERTS_DESC: &str = "Get weather alerts for a US state.";
pub const GET_FORECAST_DESC: &str = "Get weather forecast for a location.";
pub const GET_DOCTORS_DESC: &str =
    "Get list of available doctors at the hospital, with their specialties.";
pub const GET_APPOINTMENTS_DESC: &str =
    "Get appointments, optionally filtered by patient phone number.";
pub const CHECK_AVAILABILITY_DESC: &str =
    "Check available appointment slots for a doctor on a specific date.";
pub const BOOK_APPOINTMENT_DESC: &str = "Book a new appointment for a patient.";
pub const RESCHEDULE_APPOINTMENT_DESC: &str = "Reschedule an existing appointment to a new time.";
pub const CANCEL_APPOINTMENT_DESC: &str = "Cancel an existing appointment.";

/// Description shown to clients for a tool name, shared by every surface.
pub fn description_for(name: &str) -> Option<&'static str> {
    let desc = match name {
        GET_ALERTS => GET_ALERTS_DESC,
        GET_FORECAST => GET_FORECAST_DESC,
        GET_DOCTORS => GET_DOCTORS_DESC,
        GET_APPOINTMENTS => GET_APPOINTMENTS_DESC,
        CHECK_AVAILABILITY => CHECK_AVAILABILITY_DESC,
        BOOK_APPOINTMENT => BOOK_APPOINTMENT_DESC,
        RESCHEDULE_APPOINTMENT => RESCHEDULE_APPOINTMENT_DESC,
        CANCEL_APPOINTMENT => CANCEL_APPOINTMENT_DESC,
        _ => return None,
    };
    Some(desc)
}

/// Every handler, wired to its upstream. Built once at startup and shared
/// read-only by the MCP router and the registry.
#[derive(Clone)]
pub struct Toolset {
    pub weather: Arc<WeatherTools>,
    pub hospital: Arc<HospitalTools>,
}

impl Toolset {
    pub fn new(weather: WeatherTools, hospital: HospitalTools) -> Self {
        Self { weather: Arc::new(weather), hospital: Arc::new(hospital) }
    }

    pub fn from_config(cfg: &UpstreamConfig) -> Result<Self, GatewayError> {
        let http = make_http_client(cfg)?;
        Ok(Self::new(
            WeatherTools::new(NwsClient::from_config(cfg, http.clone())),
            HospitalTools::new(HospitalClient::from_config(cfg, http)),
        ))
    }
}
