pub mod commands;
pub mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "reelview")]
#[command(about = "Browse and search a movie catalog from the terminal", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/reelview/config.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Profile database to use instead of the default data directory
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List popular movies
    Popular,
    /// Search movies by title (interactive prompt when no terms are given)
    Search {
        /// Words of the title to search for
        terms: Vec<String>,
    },
    /// Show a movie's detail page
    Show {
        /// Movie id as listed by `popular` or `search`
        id: String,
    },
    /// Open a movie's IMDb page in the browser
    Imdb {
        /// Movie id as listed by `popular` or `search`
        id: String,
    },
    /// View or edit the local profile
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
}

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Print the saved profile
    Show,
    /// Change one or more profile fields
    Set {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        bio: Option<String>,
        #[arg(long)]
        email: Option<String>,
        /// Path or URI of the profile picture
        #[arg(long)]
        picture: Option<String>,
    },
}
