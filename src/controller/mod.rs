//! Request lifecycle orchestration.
//!
//! A [`FetchController`] wraps a zero-argument async operation (usually a
//! [`CatalogClient`](crate::client::CatalogClient) call) and exposes its
//! lifecycle as a [`FetchState`]: `Idle`, `Loading`, `Success` or `Failure`.

pub mod fetch;
pub mod state;

pub use fetch::{FetchController, Operation};
pub use state::{FetchSnapshot, FetchState};
