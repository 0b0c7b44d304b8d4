use ai_creative_studio::models::Config;
use ai_creative_studio::server;
use anyhow::Result;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "ai-creative-studio")]
#[command(about = "Serve the AI Creative Studio backend")]
struct CliArgs {
    /// Interface to bind; overrides HOST.
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on; overrides PORT.
    #[arg(long, value_parser = parse_port_arg)]
    port: Option<u16>,
}

fn parse_port_arg(input: &str) -> std::result::Result<u16, String> {
    input
        .parse::<u16>()
        .map_err(|_| format!("Invalid port '{}'. Expected a number between 0 and 65535", input))
}

#[actix_web::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ai_creative_studio=info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = CliArgs::parse();

    let mut config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }

    info!("Starting ai-creative-studio (model: {})", config.gemini_model);

    if let Err(e) = server::run(config).await {
        error!("Server failed: {}", e);
        std::process::exit(1);
    }

    info!("Server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_port_arg_valid() {
        assert_eq!(parse_port_arg("8080").unwrap(), 8080);
    }

    #[test]
    fn test_parse_port_arg_invalid() {
        let err = parse_port_arg("http").unwrap_err();
        assert!(err.contains("65535"));
    }

    #[test]
    fn test_cli_overrides() {
        let args = CliArgs::parse_from(["ai-creative-studio", "--host", "0.0.0.0", "--port", "9000"]);
        assert_eq!(args.host.as_deref(), Some("0.0.0.0"));
        assert_eq!(args.port, Some(9000));
    }
}
