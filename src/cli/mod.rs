use clap::{Parser, Subcommand};
use std::process::ExitCode;

use crate::infra::config::Config;
use crate::tools::registry::build_registry;
use crate::tools::Toolset;

#[derive(Parser)]
#[command(name = "weather-hospital-gateway")]
#[command(about = "Weather & Hospital MCP Gateway - server and admin CLI")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the gateway (default when no subcommand is given)
    Serve,
    /// Health check the service
    Health {
        /// Service URL to check
        #[arg(short, long, default_value = "http://localhost:8000")]
        url: String,
    },
    /// Validate configuration
    Config {
        /// Validate config without starting service
        #[arg(long)]
        validate: bool,
    },
    /// Show service status
    Status {
        /// Service URL to check
        #[arg(short, long, default_value = "http://localhost:8000")]
        url: String,
    },
    /// List the registered tools and their input schemas
    Tools,
    /// Invoke one tool locally against the configured upstreams
    Call {
        /// Tool name, e.g. get_forecast
        name: String,
        /// Tool arguments as a JSON object
        #[arg(short, long, default_value = "{}")]
        args: String,
    },
}

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

pub async fn run_commands(command: Commands) -> ExitCode {
    match command {
        Commands::Serve => match crate::infra::boot::run_server().await {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                tracing::error!(error = %e, "server exited");
                ExitCode::FAILURE
            }
        },
        Commands::Health { url } => match health_check(&url).await {
            Ok(_) => {
                println!("✅ Service is healthy");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("❌ Health check failed: {}", e);
                ExitCode::FAILURE
            }
        },
        Commands::Config { validate: _ } => match validate_config() {
            Ok(cfg) => {
                println!("✅ Configuration is valid");
                print_config(&cfg);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("❌ Configuration validation failed: {}", e);
                ExitCode::FAILURE
            }
        },
        Commands::Status { url } => match show_status(&url).await {
            Ok(_) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("❌ Status check failed: {}", e);
                ExitCode::FAILURE
            }
        },
        Commands::Tools => match list_tools() {
            Ok(out) => {
                println!("{out}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("❌ Could not build tool registry: {}", e);
                ExitCode::FAILURE
            }
        },
        Commands::Call { name, args } => match call_tool(&name, &args).await {
            Ok(text) => {
                println!("{text}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("❌ Tool call failed: {}", e);
                ExitCode::FAILURE
            }
        },
    }
}

async fn health_check(url: &str) -> CliResult<()> {
    let client = reqwest::Client::new();
    let response = client
        .get(format!("{}/healthz", url))
        .timeout(std::time::Duration::from_millis(500))
        .send()
        .await?;

    if response.status().is_success() {
        Ok(())
    } else {
        Err(format!("HTTP {}", response.status()).into())
    }
}

fn validate_config() -> CliResult<Config> {
    let cfg = Config::from_env_and_toml()?;
    cfg.validate()?;
    Ok(cfg)
}

fn print_config(cfg: &Config) {
    println!("\n📋 Configuration:");
    println!("  Mode: {}", cfg.mode);
    println!("  Listen: {}:{}", cfg.host, cfg.port);
    println!("  Legacy /v1/rpc: {}", if cfg.deprecate_rest { "disabled" } else { "enabled" });
    println!("  Weather API: {}", cfg.upstreams.weather_base_url);
    println!("  Hospital API: {}", cfg.upstreams.hospital_base_url);
    println!("  Upstream timeout: {}s", cfg.upstreams.timeout_secs);
}

async fn show_status(url: &str) -> CliResult<()> {
    let client = reqwest::Client::new();

    let health_response = client
        .get(format!("{}/healthz", url))
        .timeout(std::time::Duration::from_secs(5))
        .send()
        .await?;

    println!(
        "🏥 Health Status: {}",
        if health_response.status().is_success() {
            "✅ Healthy"
        } else {
            "❌ Unhealthy"
        }
    );

    let tools_response = client
        .post(format!("{}/v1/rpc", url))
        .header("content-type", "application/json")
        .json(&serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "tools/list",
            "params": {}
        }))
        .timeout(std::time::Duration::from_millis(500))
        .send()
        .await;

    match tools_response {
        Ok(resp) if resp.status().is_success() => {
            let count = resp
                .json::<serde_json::Value>()
                .await
                .ok()
                .and_then(|v| v["result"]["tools"].as_array().map(Vec::len));
            match count {
                Some(n) => println!("🔧 Tools: ✅ {n} available"),
                None => println!("🔧 Tools: ✅ Available"),
            }
        }
        Ok(resp) => {
            println!("🔧 Tools: ❌ HTTP {}", resp.status());
        }
        Err(_) => {
            println!("🔧 Tools: ❌ Unavailable (legacy /v1/rpc may be disabled)");
        }
    }

    print_config(&Config::from_env());
    println!(
        "  Log Level: {}",
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into())
    );

    Ok(())
}

fn local_registry() -> CliResult<crate::tools::registry::ToolRegistry> {
    let cfg = Config::from_env_and_toml()?;
    let tools = Toolset::from_config(&cfg.upstreams)?;
    Ok(build_registry(&tools))
}

fn list_tools() -> CliResult<String> {
    let reg = local_registry()?;
    let lines: Vec<String> = reg
        .list()
        .into_iter()
        .map(|t| format!("{}\t{}\n  schema: {}", t.name, t.description, t.input_schema))
        .collect();
    Ok(lines.join("\n"))
}

async fn call_tool(name: &str, args: &str) -> CliResult<String> {
    let args: serde_json::Value =
        serde_json::from_str(args).map_err(|e| format!("--args is not valid JSON: {e}"))?;
    let reg = local_registry()?;
    Ok(reg.call(name, &args).await?)
}
