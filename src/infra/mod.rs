pub mod config;
pub mod http_app;
pub mod logging;
pub mod http {
    pub mod json;
    pub mod request;
    pub mod headers;
}
pub mod boot;
pub mod runtime {
    pub mod limits;
    pub mod mcp_transport;
}
