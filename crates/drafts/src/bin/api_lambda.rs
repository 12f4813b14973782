//! The HTTP API behind API Gateway.

use lambda_http::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use drafts_assistant::{create_app, AppState, Config};

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "drafts_assistant=info,tower_http=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .without_time()
                .with_current_span(false),
        )
        .init();

    let state = AppState::new(Config::from_env()).await?;

    lambda_http::run(create_app(state)).await
}
