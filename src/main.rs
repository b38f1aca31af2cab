use std::net::{Ipv4Addr, SocketAddr};

use api::serve;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

const PORT: u16 = 7860;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    util::load_dotenv();
    let token = util::require_env("HF_TOKEN")?;

    let config = std::env::var("CONFIG").unwrap_or_default();
    let config_name = format!("Config{}.toml", config);

    let router = serve(token, &config_name).await?;

    let address = SocketAddr::from((Ipv4Addr::UNSPECIFIED, PORT));
    let listener = TcpListener::bind(&address).await?;
    info!(%address, "listening");

    Ok(axum::serve(listener, router).await?)
}
