use anyhow::Context;
use concave::{McpServer, ServerConfig};
use tokio::io::{self, BufReader};

/// Stdio tool server for the concave Earth and Arduino workspace widgets
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stderr only: stdout carries the protocol
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let config = ServerConfig::from_env();
    log::info!("starting {} at {}", config.title, config.base_url);

    let server = McpServer::with_builtin_tools(config);
    let stdin = BufReader::new(io::stdin());
    let stdout = io::stdout();

    tokio::select! {
        result = server.serve(stdin, stdout) => {
            result.context("tool server stopped with an error")?;
        }
        signal = tokio::signal::ctrl_c() => {
            signal.context("failed to listen for ctrl-c")?;
            log::info!("interrupted, shutting down");
        }
    }

    Ok(())
}
