use std::future::Future;

use rmcp::handler::server::tool::{Parameters, ToolRouter};
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::ErrorData as McpError;

use crate::domain::params::{
    AlertsParams, AppointmentsParams, AvailabilityParams, BookingParams, CancelParams,
    ForecastParams, RescheduleParams,
};
use crate::infra::runtime::mcp_transport::ServerHandler;
use crate::tools::{description_for, Toolset};

/// MCP service exposing the weather and hospital tools as plain text.
#[derive(Clone)]
pub struct GatewaySvc {
    tools: Toolset,
}

impl GatewaySvc {
    pub fn new(tools: Toolset) -> Self {
        Self { tools }
    }
}

impl ServerHandler for GatewaySvc {
    fn get_info(&self) -> ServerInfo {
        let mut server_info = Implementation::from_build_env();
        server_info.name = env!("CARGO_PKG_NAME").into();
        server_info.version = env!("CARGO_PKG_VERSION").into();
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info,
            instructions: Some(
                "Weather alerts and forecasts from the National Weather Service, \
                 and hospital doctor/appointment scheduling."
                    .into(),
            ),
            ..Default::default()
        }
    }
}

fn text(body: String) -> Result<CallToolResult, McpError> {
    Ok(CallToolResult::success(vec![Content::text(body)]))
}

#[rmcp::tool_router]
impl GatewaySvc {
    #[rmcp::tool(name = "get_alerts")]
    async fn get_alerts(
        &self,
        params: Parameters<AlertsParams>,
    ) -> Result<CallToolResult, McpError> {
        text(self.tools.weather.get_alerts(&params.0.state).await)
    }

    #[rmcp::tool(name = "get_forecast")]
    async fn get_forecast(
        &self,
        params: Parameters<ForecastParams>,
    ) -> Result<CallToolResult, McpError> {
        let ForecastParams { latitude, longitude } = params.0;
        text(self.tools.weather.get_forecast(latitude, longitude).await)
    }

    #[rmcp::tool(name = "get_doctors")]
    async fn get_doctors(&self) -> Result<CallToolResult, McpError> {
        text(self.tools.hospital.get_doctors().await)
    }

    #[rmcp::tool(name = "get_appointments")]
    async fn get_appointments(
        &self,
        params: Parameters<AppointmentsParams>,
    ) -> Result<CallToolResult, McpError> {
        let phone = params.0.patient_phone;
        text(self.tools.hospital.get_appointments(phone.as_deref()).await)
    }

    #[rmcp::tool(name = "check_availability")]
    async fn check_availability(
        &self,
        params: Parameters<AvailabilityParams>,
    ) -> Result<CallToolResult, McpError> {
        let p = params.0;
        text(self.tools.hospital.check_availability(&p.doctor_name, &p.date).await)
    }

    #[rmcp::tool(name = "book_appointment")]
    async fn book_appointment(
        &self,
        params: Parameters<BookingParams>,
    ) -> Result<CallToolResult, McpError> {
        let p = params.0;
        text(
            self.tools
                .hospital
                .book_appointment(
                    &p.doctor_name,
                    &p.patient_phone,
                    &p.patient_name,
                    &p.appointment_datetime,
                )
                .await,
        )
    }

    #[rmcp::tool(name = "reschedule_appointment")]
    async fn reschedule_appointment(
        &self,
        params: Parameters<RescheduleParams>,
    ) -> Result<CallToolResult, McpError> {
        let p = params.0;
        text(
            self.tools
                .hospital
                .reschedule_appointment(p.appointment_id, &p.new_datetime)
                .await,
        )
    }

    #[rmcp::tool(name = "cancel_appointment")]
    async fn cancel_appointment(
        &self,
        params: Parameters<CancelParams>,
    ) -> Result<CallToolResult, McpError> {
        text(self.tools.hospital.cancel_appointment(params.0.appointment_id).await)
    }
}

pub type GatewayRouter = ToolRouter<GatewaySvc>;

impl GatewaySvc {
    pub fn router() -> GatewayRouter {
        // Wrapper to expose the macro-generated private tool_router, with the
        // descriptions the registry also uses.
        let mut router = Self::tool_router();
        for (name, route) in router.map.iter_mut() {
            route.attr.description = description_for(name).map(Into::into);
        }
        router
    }
}

/// Factory handed to the stdio and Streamable HTTP transports. The router is
/// built once here and cloned per session.
pub fn make_factory(
    tools: Toolset,
) -> impl Fn() -> (GatewaySvc, GatewayRouter) + Clone + Send + Sync + 'static {
    let router = GatewaySvc::router();
    move || (GatewaySvc::new(tools.clone()), router.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::config::UpstreamConfig;
    use crate::tools::registry::build_registry;

    fn offline_toolset() -> Toolset {
        let cfg = UpstreamConfig {
            weather_base_url: "http://127.0.0.1:9".into(),
            hospital_base_url: "http://127.0.0.1:9".into(),
            ..UpstreamConfig::default()
        };
        Toolset::from_config(&cfg).unwrap()
    }

    fn first_text(result: &CallToolResult) -> String {
        result
            .content
            .as_ref()
            .and_then(|c| c.first())
            .and_then(|c| c.as_text())
            .map(|t| t.text.clone())
            .expect("text content")
    }

    #[test]
    fn tool_router_matches_registry() {
        let router = GatewaySvc::router();
        let mut router_names: Vec<String> =
            router.list_all().into_iter().map(|t| t.name.to_string()).collect();
        let mut registry_names: Vec<String> = build_registry(&offline_toolset())
            .names()
            .into_iter()
            .map(String::from)
            .collect();
        router_names.sort();
        registry_names.sort();
        assert_eq!(router_names, registry_names);
    }

    #[test]
    fn tool_router_descriptions_match_registry() {
        let router = GatewaySvc::router();
        for meta in build_registry(&offline_toolset()).list() {
            let route = router.map.get(meta.name).expect("tool routed");
            assert_eq!(route.attr.description.as_deref(), Some(meta.description));
        }
    }

    #[test]
    fn server_info_advertises_tools() {
        let svc = GatewaySvc::new(offline_toolset());
        let info = svc.get_info();
        assert!(info.capabilities.tools.is_some());
    }

    #[tokio::test]
    async fn unreachable_weather_upstream_is_still_a_successful_call() {
        let svc = GatewaySvc::new(offline_toolset());
        let res = svc
            .get_forecast(Parameters(ForecastParams { latitude: 1.0, longitude: 2.0 }))
            .await
            .expect("tool should not error");
        assert_eq!(first_text(&res), "Unable to fetch forecast data for this location.");
        assert_ne!(res.is_error, Some(true));
    }

    #[tokio::test]
    async fn unreachable_hospital_upstream_surfaces_reason() {
        let svc = GatewaySvc::new(offline_toolset());
        let res = svc.get_doctors().await.expect("tool should not error");
        assert!(first_text(&res).starts_with("Unable to fetch doctor information: network error"));
    }

    #[test]
    fn factory_reuses_one_router() {
        let factory = make_factory(offline_toolset());
        let (_, a) = factory();
        let (_, b) = factory();
        assert_eq!(a.list_all().len(), 8);
        assert_eq!(b.list_all().len(), 8);
    }
}
