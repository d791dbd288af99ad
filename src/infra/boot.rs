use crate::infra::config::Config;
use crate::tools::Toolset;

pub async fn run_server() -> anyhow::Result<()> {
    let cfg = Config::from_env_and_toml()?;
    cfg.validate()?;
    tracing::info!(
        mode = %cfg.mode,
        host = %cfg.host,
        port = cfg.port,
        deprecate_rest = cfg.deprecate_rest,
        weather = %cfg.upstreams.weather_base_url,
        hospital = %cfg.upstreams.hospital_base_url,
        "BOOT weather-hospital-gateway"
    );

    let tools = Toolset::from_config(&cfg.upstreams)?;

    // Stdio mode: run MCP over stdio ONLY (no HTTP).
    if cfg.mode == "stdio" {
        let factory = crate::tools::mcp_router::make_factory(tools);
        crate::infra::runtime::mcp_transport::serve_stdio(factory)
            .await
            .map_err(|e| anyhow::anyhow!(e))?;
        return Ok(());
    }

    let app = crate::infra::http_app::build_app(tools, cfg.deprecate_rest);
    let addr = cfg.bind_addr()?;
    tracing::info!(%addr, "listening");
    axum::serve(tokio::net::TcpListener::bind(addr).await?, app).await?;
    Ok(())
}
