use diesel::result::ConnectionResult;
use diesel_async::{
    async_connection_wrapper::AsyncConnectionWrapper, AsyncConnection, AsyncPgConnection,
};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use tracing::info;

pub mod auth;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod models;
pub mod payloads;
pub mod schema;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

pub async fn establish_connection(database_url: &str) -> ConnectionResult<AsyncPgConnection> {
    AsyncPgConnection::establish(database_url).await
}

pub async fn run_migrations(
    database_url: &str,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let conn = establish_connection(database_url).await?;
    let mut async_wrapper: AsyncConnectionWrapper<AsyncPgConnection> =
        AsyncConnectionWrapper::from(conn);
    let applied = tokio::task::spawn_blocking(move || {
        async_wrapper
            .run_pending_migrations(MIGRATIONS)
            .map(|versions| versions.len())
    })
    .await??;

    info!(applied, "migrations up to date");
    Ok(())
}
