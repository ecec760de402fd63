use mcp_tw_parking::config::ServerConfig;
use mcp_tw_parking::server::McpServer;
use mcp_tw_parking::state::AppState;
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // stdout carries JSON-RPC frames; diagnostics go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mcp_tw_parking=info".into()),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    let config = match ServerConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("configuration error: {e}");
            std::process::exit(1);
        }
    };

    let state = match AppState::from_config(config) {
        Ok(s) => s,
        Err(e) => {
            error!("startup error: {e}");
            std::process::exit(1);
        }
    };

    info!(
        descriptions = %state.config.descriptions_url,
        availability = %state.config.availability_url,
        "mcp-tw-parking serving on stdio"
    );

    let mut server = McpServer::new(state);
    if let Err(e) = server.run().await {
        error!("fatal error: {e}");
        std::process::exit(1);
    }
}
