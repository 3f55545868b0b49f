use clap::Parser;
use filemeta::config::{ServiceConfig, DEFAULT_FIELD_NAME};
use filemeta::server;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tokio::net::TcpListener;

#[derive(Parser, Debug)]
#[command(name = "filemeta")]
#[command(about = "Reports name, type and size of files uploaded to /api/fileanalyse", long_about = None)]
struct Cli {
    /// Address to bind to.
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: IpAddr,

    /// Port to listen on.
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    port: u16,

    /// Form field carrying the file.
    #[arg(long, env = "FIELD_NAME", default_value = DEFAULT_FIELD_NAME)]
    field_name: String,

    /// Largest accepted request body, in bytes.
    #[arg(long, env = "MAX_BODY_SIZE")]
    max_body_size: Option<u64>,

    /// Largest accepted file, in bytes.
    #[arg(long, env = "MAX_FILE_SIZE")]
    max_file_size: Option<u64>,
}

impl Cli {
    fn service_config(&self) -> ServiceConfig {
        let mut config = ServiceConfig::new().field_name(self.field_name.as_str());

        if let Some(limit) = self.max_body_size {
            config = config.max_body_size(limit);
        }

        if let Some(limit) = self.max_file_size {
            config = config.max_file_size(limit);
        }

        config
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = Arc::new(cli.service_config());

    let listener = TcpListener::bind(SocketAddr::new(cli.host, cli.port)).await?;
    log::info!("Your app is listening on port {}", listener.local_addr()?.port());

    server::serve(listener, config, shutdown_signal()).await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        log::error!("failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
}
