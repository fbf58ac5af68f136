use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use reelview::app::AppContext;
use reelview::cli::{commands, Cli, Commands};
use reelview::config::Config;
use reelview::store::SqliteStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    // Profile commands work offline and without an API key
    if let Commands::Profile { action } = cli.command {
        let db_path = match cli.db {
            Some(p) => p,
            None => AppContext::default_db_path()?,
        };
        let store = SqliteStore::new(&db_path)?;
        commands::profile(&store, action)?;
        return Ok(());
    }

    let ctx = AppContext::new(config, cli.db)?;

    match cli.command {
        Commands::Popular => {
            commands::popular(&ctx).await?;
        }
        Commands::Search { terms } => {
            if terms.is_empty() {
                commands::interactive_search(&ctx).await?;
            } else {
                commands::search(&ctx, &terms.join(" ")).await?;
            }
        }
        Commands::Show { id } => {
            commands::show_movie(&ctx, &id).await?;
        }
        Commands::Imdb { id } => {
            commands::open_imdb(&ctx, &id).await?;
        }
        Commands::Profile { .. } => {}
    }

    Ok(())
}
