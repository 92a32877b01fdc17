//! User settings: configured city and display name.
//!
//! Both values live in the key-value store under the `city` and `userName`
//! keys. A missing key falls back to its default independently of the other.

use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::HashMap;

use popdash_storage::{KvClient, StorageResult};

/// Default city shown before the user configures one.
pub const DEFAULT_CITY: &str = "Mumbai";

/// Default display name shown before the user configures one.
pub const DEFAULT_USER_NAME: &str = "Scroll Down to Set";

const CITY_KEY: &str = "city";
const USER_NAME_KEY: &str = "userName";

/// The pair of configurable display values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub city: String,
    pub user_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            city: DEFAULT_CITY.to_string(),
            user_name: DEFAULT_USER_NAME.to_string(),
        }
    }
}

/// Reads and writes `Settings` through the key-value store.
#[derive(Debug, Clone)]
pub struct SettingsManager {
    store: KvClient,
}

impl SettingsManager {
    pub fn new(store: KvClient) -> Self {
        Self { store }
    }

    /// Load settings, substituting the default for each missing key
    /// independently. Absence is never an error; only a genuine backend
    /// failure propagates.
    pub async fn load(&self) -> StorageResult<Settings> {
        let result = self.store.get(&[CITY_KEY, USER_NAME_KEY]).await?;

        let city = result
            .get(CITY_KEY)
            .and_then(|v| v.as_str())
            .unwrap_or(DEFAULT_CITY)
            .to_string();
        let user_name = result
            .get(USER_NAME_KEY)
            .and_then(|v| v.as_str())
            .unwrap_or(DEFAULT_USER_NAME)
            .to_string();

        Ok(Settings { city, user_name })
    }

    /// Save both settings in one batched write.
    pub async fn save(&self, settings: &Settings) -> StorageResult<()> {
        let mut entries = HashMap::new();
        entries.insert(CITY_KEY.to_string(), json!(settings.city));
        entries.insert(USER_NAME_KEY.to_string(), json!(settings.user_name));
        self.store.set(entries).await?;

        tracing::debug!(
            "Settings saved - city: {}, name: {}",
            settings.city,
            settings.user_name
        );
        Ok(())
    }
}
