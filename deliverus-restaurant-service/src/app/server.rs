use std::net::SocketAddr;

use clap::Args;
use deliverus_restaurant_service::handlers::{router, AppState};
use deliverus_restaurant_service::run_migrations;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

#[derive(Args)]
pub struct ServeArgs {
    /// HS256 secret shared with the token issuer
    #[arg(long, env = "SECRET_KEY", hide_env_values = true)]
    pub secret_key: String,

    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:8101")]
    pub bind_addr: SocketAddr,
}

pub async fn main(
    database_url: &str,
    args: ServeArgs,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    run_migrations(database_url).await?;

    let state = AppState::new(database_url, &args.secret_key);
    let app = router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(args.bind_addr).await?;
    info!("Restaurant service listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
