//! # reelview
//!
//! A terminal movie-catalog browser: list popular titles, search, open
//! detail pages, and keep a small local profile.
//!
//! ## Architecture
//!
//! ```text
//! CLI → FetchController → CatalogClient → content API
//!  └──→ KeyValueStore (profile)
//! ```
//!
//! The heart of the crate is [`controller::FetchController`], which wraps one
//! repeatable async operation and exposes its lifecycle (`Idle`, `Loading`,
//! `Success`, `Failure`). Overlapping triggers resolve last-write-wins: an
//! operation that settles after a newer trigger never becomes visible.
//!
//! ## Quick Start
//!
//! ```bash
//! export API_ACCESS_KEY=<bearer token>
//!
//! reelview popular
//! reelview search the matrix
//! reelview show 603
//! reelview search            # interactive prompt
//! reelview profile set --name "Ada" --email ada@example.com
//! ```

/// Application context and error types.
///
/// [`AppContext`](app::AppContext) wires the client, store and config
/// together; [`ReelError`](app::ReelError) is the crate-wide error.
pub mod app;

/// Command-line interface using clap.
///
/// - `popular` - List popular movies
/// - `search [terms..]` - Search, or start an interactive prompt
/// - `show <id>` - Detail page
/// - `imdb <id>` - Open the IMDb page
/// - `profile show|set` - Local profile
pub mod cli;

/// Content API access.
///
/// - [`CatalogClient`](client::CatalogClient): async trait for catalog queries
/// - [`HttpCatalogClient`](client::HttpCatalogClient): reqwest-based implementation
/// - [`ClientConfig`](client::ClientConfig): immutable settings and credential
pub mod client;

/// Configuration management.
///
/// Loads from `~/.config/reelview/config.toml`.
pub mod config;

/// Async request lifecycle: [`FetchController`](controller::FetchController)
/// and [`FetchState`](controller::FetchState).
pub mod controller;

/// Core domain models.
///
/// - [`Movie`](domain::Movie) and [`MovieSummary`](domain::MovieSummary): API records
/// - [`Profile`](domain::Profile): the locally stored user profile
pub mod domain;

/// Key-value persistence.
///
/// - [`KeyValueStore`](store::KeyValueStore): get/set trait
/// - [`SqliteStore`](store::SqliteStore): SQLite implementation
pub mod store;
