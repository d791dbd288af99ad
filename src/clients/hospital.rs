use reqwest::{Client, RequestBuilder};

use crate::core::error::UpstreamError;
use crate::domain::hospital::{AppointmentUpdate, CANCELLED};
use crate::domain::{Appointment, AvailabilitySlots, BookingConfirmation, BookingRequest, Doctor};
use crate::infra::config::UpstreamConfig;
use crate::infra::http::headers::{add_standard_headers, default_user_agent};
use crate::infra::http::request::{expect_success, fetch_json};

/// Hospital scheduling API client (`/doctors`, `/appointments`).
#[derive(Clone)]
pub struct HospitalClient {
    base: String,
    http: Client,
}

impl HospitalClient {
    pub fn new(base: impl Into<String>, http: Client) -> Self {
        Self { base: base.into(), http }
    }

    pub fn from_config(cfg: &UpstreamConfig, http: Client) -> Self {
        Self::new(cfg.hospital_base_url.clone(), http)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base.trim_end_matches('/'), path)
    }

    fn with_headers(&self, builder: RequestBuilder) -> RequestBuilder {
        let (builder, rid) = add_standard_headers(builder, &default_user_agent(), None);
        tracing::debug!(request_id = %rid, "hospital request");
        builder
    }

    pub async fn list_doctors(&self, tool: &str) -> Result<Vec<Doctor>, UpstreamError> {
        let builder = self.with_headers(self.http.get(self.url("/doctors")));
        fetch_json(tool, builder).await
    }

    pub async fn list_appointments(
        &self,
        patient_phone: Option<&str>,
    ) -> Result<Vec<Appointment>, UpstreamError> {
        let mut builder = self.http.get(self.url("/appointments"));
        if let Some(phone) = patient_phone {
            builder = builder.query(&[("patient_phone", phone)]);
        }
        fetch_json("get_appointments", self.with_headers(builder)).await
    }

    pub async fn availability(
        &self,
        doctor_id: i64,
        date: &str,
    ) -> Result<AvailabilitySlots, UpstreamError> {
        let builder = self
            .http
            .get(self.url("/appointments/available"))
            .query(&[("doctor_id", doctor_id.to_string().as_str()), ("date", date)]);
        fetch_json("check_availability", self.with_headers(builder)).await
    }

    pub async fn create_appointment(
        &self,
        request: &BookingRequest<'_>,
    ) -> Result<BookingConfirmation, UpstreamError> {
        let builder = self.http.post(self.url("/appointments")).json(request);
        fetch_json("book_appointment", self.with_headers(builder)).await
    }

    pub async fn reschedule_appointment(
        &self,
        appointment_id: i64,
        new_datetime: &str,
    ) -> Result<(), UpstreamError> {
        let patch = AppointmentUpdate::Reschedule { datetime: new_datetime };
        self.update_appointment("reschedule_appointment", appointment_id, &patch)
            .await
    }

    pub async fn cancel_appointment(&self, appointment_id: i64) -> Result<(), UpstreamError> {
        let patch = AppointmentUpdate::Status { status: CANCELLED };
        self.update_appointment("cancel_appointment", appointment_id, &patch)
            .await
    }

    async fn update_appointment(
        &self,
        tool: &str,
        appointment_id: i64,
        patch: &AppointmentUpdate<'_>,
    ) -> Result<(), UpstreamError> {
        let url = self.url(&format!("/appointments/{appointment_id}"));
        let builder = self.http.put(url).json(patch);
        expect_success(tool, self.with_headers(builder)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn it_lists_doctors_in_upstream_order() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/doctors").header_exists("x-request-id");
                then.status(200).json_body(json!([
                    {"id": 2, "name": "Dr. Jones", "specialty": "Pediatrics"},
                    {"id": 1, "name": "Dr. Smith", "specialty": "Cardiology"}
                ]));
            })
            .await;
        let cli = HospitalClient::new(server.base_url(), Client::new());
        let doctors = cli.list_doctors("get_doctors").await.unwrap();
        assert_eq!(doctors.len(), 2);
        assert_eq!(doctors[0].name, "Dr. Jones");
        assert_eq!(doctors[1].id, 1);
    }

    #[tokio::test]
    async fn it_passes_phone_filter_as_query_param() {
        let server = MockServer::start_async().await;
        let m = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/appointments")
                    .query_param("patient_phone", "1-555-0101");
                then.status(200).json_body(json!([]));
            })
            .await;
        let cli = HospitalClient::new(server.base_url(), Client::new());
        let out = cli.list_appointments(Some("1-555-0101")).await.unwrap();
        m.assert_async().await;
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn it_posts_booking_payload() {
        let server = MockServer::start_async().await;
        let m = server
            .mock_async(|when, then| {
                when.method(POST).path("/appointments").json_body(json!({
                    "doctor_id": 1,
                    "patient_phone": "1-555-0101",
                    "patient_name": "Jane Doe",
                    "datetime": "2025-12-11 14:00:00"
                }));
                then.status(201).json_body(json!({"appointment_id": 42}));
            })
            .await;
        let cli = HospitalClient::new(server.base_url(), Client::new());
        let confirmation = cli
            .create_appointment(&BookingRequest {
                doctor_id: 1,
                patient_phone: "1-555-0101",
                patient_name: "Jane Doe",
                datetime: "2025-12-11 14:00:00",
            })
            .await
            .unwrap();
        m.assert_async().await;
        assert_eq!(confirmation.appointment_id, json!(42));
    }

    #[tokio::test]
    async fn cancel_puts_status_patch() {
        let server = MockServer::start_async().await;
        let m = server
            .mock_async(|when, then| {
                when.method(PUT)
                    .path("/appointments/7")
                    .json_body(json!({"status": "cancelled"}));
                then.status(200).json_body(json!({"ok": true}));
            })
            .await;
        let cli = HospitalClient::new(server.base_url(), Client::new());
        cli.cancel_appointment(7).await.unwrap();
        m.assert_hits_async(1).await;
    }
}
