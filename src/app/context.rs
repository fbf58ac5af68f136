use std::path::PathBuf;
use std::sync::Arc;

use crate::app::error::{ReelError, Result};
use crate::client::{CatalogClient, ClientConfig, HttpCatalogClient};
use crate::config::Config;
use crate::store::SqliteStore;

pub struct AppContext {
    pub config: Config,
    pub client: Arc<dyn CatalogClient + Send + Sync>,
    pub store: Arc<SqliteStore>,
}

impl AppContext {
    /// Wire the HTTP client and on-disk store. The API credential is read
    /// from the environment here, once.
    pub fn new(config: Config, db_path: Option<PathBuf>) -> Result<Self> {
        let db_path = match db_path {
            Some(p) => p,
            None => Self::default_db_path()?,
        };

        let client_config = ClientConfig::from_env(&config.api)?;
        let client: Arc<dyn CatalogClient + Send + Sync> =
            Arc::new(HttpCatalogClient::new(client_config)?);
        let store = Arc::new(SqliteStore::new(&db_path)?);

        Ok(Self::with_parts(config, client, store))
    }

    pub fn with_parts(
        config: Config,
        client: Arc<dyn CatalogClient + Send + Sync>,
        store: Arc<SqliteStore>,
    ) -> Self {
        Self {
            config,
            client,
            store,
        }
    }

    pub fn default_db_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| ReelError::Config("Could not find data directory".into()))?;
        let reelview_dir = data_dir.join("reelview");
        std::fs::create_dir_all(&reelview_dir)?;
        Ok(reelview_dir.join("reelview.db"))
    }
}
