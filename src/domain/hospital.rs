use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Doctor {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub specialty: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Appointment {
    pub id: serde_json::Value,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub datetime: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub status: String,
    /// Present only when the upstream joined doctor data into the row.
    #[serde(default)]
    pub doctor_name: Option<String>,
}

/// Body of `/appointments/available`. A missing or null `available_slots` means no slots.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AvailabilitySlots {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub available_slots: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BookingRequest<'a> {
    pub doctor_id: i64,
    pub patient_phone: &'a str,
    pub patient_name: &'a str,
    pub datetime: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BookingConfirmation {
    pub appointment_id: serde_json::Value,
}

/// Partial update sent to `PUT /appointments/{id}`.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum AppointmentUpdate<'a> {
    Reschedule { datetime: &'a str },
    Status { status: &'a str },
}

pub const CANCELLED: &str = "cancelled";
