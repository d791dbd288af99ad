use crate::clients::HospitalClient;
use crate::core::error::UpstreamError;
use crate::domain::{scalar_text, Appointment, BookingRequest, Doctor};
use crate::tools::resolver::{DoctorResolver, ResolveError};

pub fn format_doctor(doctor: &Doctor) -> String {
    let specialty = doctor.specialty.as_deref().unwrap_or("Unknown");
    format!("Dr. {} - Specialty: {specialty}", doctor.name)
}

pub fn format_appointment(appt: &Appointment) -> String {
    let id = scalar_text(&appt.id);
    match &appt.doctor_name {
        Some(doctor) => format!(
            "Appointment ID {id}: {doctor} on {} - Status: {}",
            appt.datetime, appt.status
        ),
        None => format!(
            "Appointment ID {id} on {} - Status: {}",
            appt.datetime, appt.status
        ),
    }
}

/// Handlers for the hospital scheduling tools.
#[derive(Clone)]
pub struct HospitalTools {
    client: HospitalClient,
    resolver: DoctorResolver,
}

impl HospitalTools {
    pub fn new(client: HospitalClient) -> Self {
        let resolver = DoctorResolver::new(client.clone());
        Self { client, resolver }
    }

    pub async fn get_doctors(&self) -> String {
        match self.client.list_doctors("get_doctors").await {
            Ok(doctors) if doctors.is_empty() => "No doctors found in the system.".to_string(),
            Ok(doctors) => {
                let lines: Vec<String> = doctors.iter().map(format_doctor).collect();
                format!("Available doctors:\n{}", lines.join("\n"))
            }
            Err(e) => format!("Unable to fetch doctor information: {e}"),
        }
    }

    pub async fn get_appointments(&self, patient_phone: Option<&str>) -> String {
        let phone = patient_phone.filter(|p| !p.is_empty());
        match self.client.list_appointments(phone).await {
            Ok(appts) if appts.is_empty() => "No appointments found.".to_string(),
            Ok(appts) => {
                let lines: Vec<String> = appts.iter().map(format_appointment).collect();
                format!("Appointments:\n{}", lines.join("\n"))
            }
            Err(e) => format!("Unable to fetch appointments: {e}"),
        }
    }

    pub async fn check_availability(&self, doctor_name: &str, date: &str) -> String {
        let doctor = match self.resolve("check_availability", doctor_name).await {
            Ok(doctor) => doctor,
            Err(message) => return message,
        };
        match self.client.availability(doctor.id, date).await {
            Ok(slots) if slots.available_slots.is_empty() => {
                format!("No available slots for {doctor_name} on {date}.")
            }
            Ok(slots) => {
                let lines: Vec<String> = slots.available_slots.iter().map(scalar_text).collect();
                format!("Available slots for {doctor_name} on {date}:\n{}", lines.join("\n"))
            }
            Err(e) => format!("Unable to check availability: {e}"),
        }
    }

    pub async fn book_appointment(
        &self,
        doctor_name: &str,
        patient_phone: &str,
        patient_name: &str,
        appointment_datetime: &str,
    ) -> String {
        let doctor = match self.resolve("book_appointment", doctor_name).await {
            Ok(doctor) => doctor,
            Err(message) => return message,
        };
        let request = BookingRequest {
            doctor_id: doctor.id,
            patient_phone,
            patient_name,
            datetime: appointment_datetime,
        };
        match self.client.create_appointment(&request).await {
            Ok(confirmation) => format!(
                "Appointment booked successfully! Appointment ID: {} - {patient_name} with {doctor_name} on {appointment_datetime}",
                scalar_text(&confirmation.appointment_id)
            ),
            Err(UpstreamError::Status { body, .. }) => {
                format!("Failed to book appointment: {body}")
            }
            Err(e) => format!("Unable to book appointment: {e}"),
        }
    }

    pub async fn reschedule_appointment(&self, appointment_id: i64, new_datetime: &str) -> String {
        match self
            .client
            .reschedule_appointment(appointment_id, new_datetime)
            .await
        {
            Ok(()) => format!("Appointment {appointment_id} successfully rescheduled to {new_datetime}"),
            Err(e) => format!("Unable to reschedule appointment: {e}"),
        }
    }

    pub async fn cancel_appointment(&self, appointment_id: i64) -> String {
        match self.client.cancel_appointment(appointment_id).await {
            Ok(()) => format!("Appointment {appointment_id} cancelled successfully"),
            Err(e) => format!("Unable to cancel appointment: {e}"),
        }
    }

    /// Resolve a doctor or render the miss / directory failure as the tool's reply.
    async fn resolve(&self, tool: &str, doctor_name: &str) -> Result<Doctor, String> {
        self.resolver
            .resolve(tool, doctor_name)
            .await
            .map_err(|e| match e {
                ResolveError::NotFound { .. } => e.to_string(),
                ResolveError::Upstream(e) => format!("Unable to fetch doctor information: {e}"),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn doctor_line_prefixes_title() {
        let d = Doctor { id: 1, name: "Alice Smith".into(), specialty: Some("Cardiology".into()) };
        assert_eq!(format_doctor(&d), "Dr. Alice Smith - Specialty: Cardiology");
    }

    #[test]
    fn appointment_template_depends_on_doctor_name() {
        let joined: Appointment = serde_json::from_value(json!({
            "id": 7, "datetime": "2025-12-11 14:00:00", "status": "booked", "doctor_name": "Dr. Smith"
        }))
        .unwrap();
        assert_eq!(
            format_appointment(&joined),
            "Appointment ID 7: Dr. Smith on 2025-12-11 14:00:00 - Status: booked"
        );

        let bare: Appointment = serde_json::from_value(json!({
            "id": 8, "datetime": "2025-12-12 09:00:00", "status": "cancelled"
        }))
        .unwrap();
        assert_eq!(
            format_appointment(&bare),
            "Appointment ID 8 on 2025-12-12 09:00:00 - Status: cancelled"
        );
    }
}
