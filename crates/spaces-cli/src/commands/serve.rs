//! Start the gateway.

use clap::Args;

use spaces_core::error::AppError;

/// Arguments for the serve command
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Override the server port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Override the server host
    #[arg(long)]
    pub host: Option<String>,

    /// Override the backend origin
    #[arg(long)]
    pub backend: Option<String>,
}

/// Execute the serve command
pub async fn execute(args: &ServeArgs, env: &str) -> Result<(), AppError> {
    let mut config = super::load_config(env)?;

    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(ref host) = args.host {
        config.server.host = host.clone();
    }
    if let Some(ref backend) = args.backend {
        config.backend.url = backend.clone();
    }

    println!("Starting Spaces gateway...");
    println!("  Address: {}", config.server.bind_address());
    println!("  Backend: {}", config.backend.origin());

    spaces_api::run_server(config).await
}
