use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use tracing_subscriber::EnvFilter;

pub mod app;

#[derive(Parser)]
#[command(version)]
struct Cli {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending migrations, then serve the HTTP API
    Serve(app::server::ServeArgs),
    /// Apply pending migrations and exit
    Migrate,
}

#[tokio::main]
pub async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Serve(args) => app::server::main(&cli.database_url, args).await,
        Commands::Migrate => deliverus_restaurant_service::run_migrations(&cli.database_url).await,
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_serve_defaults_bind_addr() {
        let cli = Cli::try_parse_from([
            "deliverus-restaurant-service",
            "--database-url",
            "postgres://localhost/deliverus",
            "serve",
            "--secret-key",
            "secret",
        ])
        .unwrap();

        match cli.command {
            Commands::Serve(args) => {
                assert_eq!(args.bind_addr, "0.0.0.0:8101".parse().unwrap());
            }
            Commands::Migrate => panic!("expected serve"),
        }
    }
}
