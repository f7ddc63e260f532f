use std::env;
use std::sync::Arc;

use anyhow::Context;
use chat_store::{FileDocumentStorage, TreeStore};
use gemini_client::{GeminiClient, GenerationGateway};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use web_service::{AppState, JwtVerifier};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_line_number(true)
                .with_file(false),
        )
        .init();

    let port = env::var("APP_PORT")
        .ok()
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(8080);
    let data_dir = env::var("CHAT_DATA_DIR").unwrap_or_else(|_| "data/chats".to_string());
    let key_path = env::var("JWT_PUBLIC_KEY_PATH").unwrap_or_else(|_| "public_key.pem".to_string());

    let pem = std::fs::read(&key_path)
        .with_context(|| format!("reading JWT public key from {key_path}"))?;
    let verifier = JwtVerifier::from_rsa_pem(&pem).context("parsing JWT public key")?;

    let gateway: Arc<dyn GenerationGateway> =
        Arc::new(GeminiClient::from_env().context("configuring Gemini gateway")?);

    tracing::info!("Opening tree store at {data_dir}");
    let store = TreeStore::open(FileDocumentStorage::new(&data_dir))
        .await
        .context("opening tree store")?;

    let state = AppState::new(Arc::new(store), gateway, verifier);
    web_service::run(state, port).await?;
    Ok(())
}
