use std::collections::HashMap;
use std::sync::Arc;

use crate::core::error::ToolError;
use crate::core::tool::{FnTool, Tool};
use crate::domain::params::{
    AlertsParams, AppointmentsParams, AvailabilityParams, BookingParams, CancelParams,
    ForecastParams, NoParams, RescheduleParams,
};
use crate::tools::{
    Toolset, BOOK_APPOINTMENT, BOOK_APPOINTMENT_DESC, CANCEL_APPOINTMENT, CANCEL_APPOINTMENT_DESC,
    CHECK_AVAILABILITY, CHECK_AVAILABILITY_DESC, GET_ALERTS, GET_ALERTS_DESC, GET_APPOINTMENTS,
    GET_APPOINTMENTS_DESC, GET_DOCTORS, GET_DOCTORS_DESC, GET_FORECAST, GET_FORECAST_DESC,
    RESCHEDULE_APPOINTMENT, RESCHEDULE_APPOINTMENT_DESC,
};

/// Name -> tool map, frozen once built. Listing keeps registration order.
#[derive(Clone)]
pub struct ToolRegistry {
    by_name: Arc<HashMap<&'static str, Arc<dyn Tool>>>,
    order: Arc<Vec<&'static str>>,
}

impl ToolRegistry {
    pub fn with_tools<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn Tool>>,
    {
        let mut map: HashMap<&'static str, Arc<dyn Tool>> = HashMap::new();
        let mut order = Vec::new();
        for t in iter {
            if map.insert(t.name(), t.clone()).is_none() {
                order.push(t.name());
            }
        }
        Self { by_name: Arc::new(map), order: Arc::new(order) }
    }

    pub fn list(&self) -> Vec<ToolMeta> {
        self.order
            .iter()
            .filter_map(|name| self.by_name.get(name))
            .map(|t| ToolMeta {
                name: t.name(),
                description: t.description(),
                input_schema: t.input_schema(),
            })
            .collect()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.order.to_vec()
    }

    pub async fn call(&self, name: &str, args: &serde_json::Value) -> Result<String, ToolError> {
        let t = self
            .by_name
            .get(name)
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;
        tracing::debug!(tool = name, "registry call");
        t.call(args).await
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolMeta {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: serde_json::Value,
}

/// Build the registry over a shared toolset.
pub fn build_registry(tools: &Toolset) -> ToolRegistry {
    let w = tools.weather.clone();
    let alerts = FnTool::typed::<AlertsParams, _, _>(
        GET_ALERTS,
        GET_ALERTS_DESC,
        move |p| {
            let w = w.clone();
            async move { w.get_alerts(&p.state).await }
        },
    );

    let w = tools.weather.clone();
    let forecast = FnTool::typed::<ForecastParams, _, _>(
        GET_FORECAST,
        GET_FORECAST_DESC,
        move |p| {
            let w = w.clone();
            async move { w.get_forecast(p.latitude, p.longitude).await }
        },
    );

    let h = tools.hospital.clone();
    let doctors = FnTool::typed::<NoParams, _, _>(
        GET_DOCTORS,
        GET_DOCTORS_DESC,
        move |_| {
            let h = h.clone();
            async move { h.get_doctors().await }
        },
    );

    let h = tools.hospital.clone();
    let appointments = FnTool::typed::<AppointmentsParams, _, _>(
        GET_APPOINTMENTS,
        GET_APPOINTMENTS_DESC,
        move |p| {
            let h = h.clone();
            async move { h.get_appointments(p.patient_phone.as_deref()).await }
        },
    );

    let h = tools.hospital.clone();
    let availability = FnTool::typed::<AvailabilityParams, _, _>(
        CHECK_AVAILABILITY,
        CHECK_AVAILABILITY_DESC,
        move |p| {
            let h = h.clone();
            async move { h.check_availability(&p.doctor_name, &p.date).await }
        },
    );

    let h = tools.hospital.clone();
    let book = FnTool::typed::<BookingParams, _, _>(
        BOOK_APPOINTMENT,
        BOOK_APPOINTMENT_DESC,
        move |p| {
            let h = h.clone();
            async move {
                h.book_appointment(
                    &p.doctor_name,
                    &p.patient_phone,
                    &p.patient_name,
                    &p.appointment_datetime,
                )
                .await
            }
        },
    );

    let h = tools.hospital.clone();
    let reschedule = FnTool::typed::<RescheduleParams, _, _>(
        RESCHEDULE_APPOINTMENT,
        RESCHEDULE_APPOINTMENT_DESC,
        move |p| {
            let h = h.clone();
            async move { h.reschedule_appointment(p.appointment_id, &p.new_datetime).await }
        },
    );

    let h = tools.hospital.clone();
    let cancel = FnTool::typed::<CancelParams, _, _>(
        CANCEL_APPOINTMENT,
        CANCEL_APPOINTMENT_DESC,
        move |p| {
            let h = h.clone();
            async move { h.cancel_appointment(p.appointment_id).await }
        },
    );

    let all: [Arc<dyn Tool>; 8] = [
        Arc::new(alerts),
        Arc::new(forecast),
        Arc::new(doctors),
        Arc::new(appointments),
        Arc::new(availability),
        Arc::new(book),
        Arc::new(reschedule),
        Arc::new(cancel),
    ];
    ToolRegistry::with_tools(all)
}
