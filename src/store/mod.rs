pub mod profile;
pub mod sqlite;

use crate::app::Result;

pub use profile::{load_profile, save_profile, PROFILE_KEY};
pub use sqlite::SqliteStore;

/// Durable string key-value storage, synchronous from the caller's side.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}
