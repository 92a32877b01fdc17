//! Popup controller: initial load sequencing and the four user actions.
//!
//! The controller owns a `PopupState` and delegates to the settings, task and
//! weather components. Input validation happens here, before any manager
//! call; storage and weather failures are logged and surfaced as a status
//! message without touching the rest of the state.

use thiserror::Error;

use popdash_services::{Settings, SettingsManager, TaskListManager};
use popdash_storage::StorageError;
use popdash_weather::WeatherClient;

use crate::greeting;
use crate::state::{Phase, PopupState};

/// Errors surfaced by popup event handlers.
#[derive(Debug, Error)]
pub enum PopupError {
    /// Empty required input; rejected before any state mutation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Handler invoked before `init()` completed.
    #[error("Popup not initialized")]
    NotReady,

    /// Underlying store failure.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl PopupError {
    /// User-friendly message for UI display.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(msg) => msg.clone(),
            Self::NotReady => "The popup is still loading. Please wait.".to_string(),
            Self::Storage(e) => e.user_message().to_string(),
        }
    }
}

/// Wires user actions to the settings, task-list and weather components.
pub struct PopupController {
    settings: SettingsManager,
    tasks: TaskListManager,
    weather: WeatherClient,
    state: PopupState,
    phase: Phase,
}

impl PopupController {
    pub fn new(
        settings: SettingsManager,
        tasks: TaskListManager,
        weather: WeatherClient,
    ) -> Self {
        Self {
            settings,
            tasks,
            weather,
            state: PopupState::default(),
            phase: Phase::Uninitialized,
        }
    }

    pub fn state(&self) -> &PopupState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Initial load: settings, then tasks, then a weather fetch for the
    /// loaded city.
    ///
    /// `Ready` is entered once both loads complete. A weather failure
    /// degrades to a status message and never fails initialization.
    pub async fn init(&mut self) -> Result<(), PopupError> {
        self.state.greeting = greeting::current_greeting().to_string();

        let settings = self.settings.load().await?;
        self.state.city = settings.city;
        self.state.user_name = settings.user_name;

        self.state.tasks = self.tasks.load_all().await?;
        self.phase = Phase::Ready;

        let city = self.state.city.clone();
        self.refresh_weather(&city).await;

        tracing::info!("Popup ready with {} tasks", self.state.tasks.len());
        Ok(())
    }

    /// Save a new city and refresh weather for it.
    pub async fn update_city(&mut self, input: &str) -> Result<(), PopupError> {
        self.ensure_ready()?;

        let city = input.trim();
        if city.is_empty() {
            return Err(self.reject("Please enter a city name"));
        }

        self.save_settings(Settings {
            city: city.to_string(),
            user_name: self.state.user_name.clone(),
        })
        .await?;

        self.state.city = city.to_string();
        self.state.status_message = None;
        let city = city.to_string();
        self.refresh_weather(&city).await;
        Ok(())
    }

    /// Save a new display name.
    pub async fn update_name(&mut self, input: &str) -> Result<(), PopupError> {
        self.ensure_ready()?;

        let name = input.trim();
        if name.is_empty() {
            return Err(self.reject("Please enter a name"));
        }

        self.save_settings(Settings {
            city: self.state.city.clone(),
            user_name: name.to_string(),
        })
        .await?;

        self.state.user_name = name.to_string();
        self.state.status_message = None;
        Ok(())
    }

    /// Append a task to the list.
    pub async fn add_task(&mut self, input: &str) -> Result<(), PopupError> {
        self.ensure_ready()?;

        let task = input.trim();
        if task.is_empty() {
            return Err(self.reject("Field cannot be empty"));
        }

        match self.tasks.append(task).await {
            Ok(updated) => {
                self.state.tasks = updated;
                self.state.status_message = None;
                Ok(())
            }
            Err(e) => {
                tracing::error!("Error saving task: {}", e);
                self.state.status_message = Some(e.user_message().to_string());
                Err(e.into())
            }
        }
    }

    /// Remove every copy of `task` from the list.
    ///
    /// Task strings are the sole identity, so deleting one of two identical
    /// tasks deletes both.
    pub async fn delete_task(&mut self, task: &str) -> Result<(), PopupError> {
        self.ensure_ready()?;

        match self.tasks.remove(task).await {
            Ok(updated) => {
                self.state.tasks = updated;
                self.state.status_message = None;
                Ok(())
            }
            Err(e) => {
                tracing::error!("Error deleting task: {}", e);
                self.state.status_message = Some(e.user_message().to_string());
                Err(e.into())
            }
        }
    }

    fn ensure_ready(&self) -> Result<(), PopupError> {
        match self.phase {
            Phase::Ready => Ok(()),
            Phase::Uninitialized => Err(PopupError::NotReady),
        }
    }

    fn reject(&mut self, message: &str) -> PopupError {
        self.state.status_message = Some(message.to_string());
        PopupError::Validation(message.to_string())
    }

    async fn save_settings(&mut self, settings: Settings) -> Result<(), PopupError> {
        if let Err(e) = self.settings.save(&settings).await {
            tracing::error!("Error saving settings: {}", e);
            self.state.status_message = Some(e.user_message().to_string());
            return Err(e.into());
        }
        Ok(())
    }

    /// Fetch weather for `city`; on failure keep the previous snapshot and
    /// surface the error as a status message.
    async fn refresh_weather(&mut self, city: &str) {
        match self.weather.fetch(city).await {
            Ok(snapshot) => {
                self.state.weather = Some(snapshot);
            }
            Err(e) => {
                tracing::error!("Error fetching weather data: {}", e);
                self.state.status_message = Some(e.user_message());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;
    use popdash_services::{DEFAULT_CITY, DEFAULT_USER_NAME};
    use popdash_storage::{KvBackend, KvClient, MemoryBackend, StorageResult};
    use serde_json::json;
    use std::collections::HashMap;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Backend whose reads work but whose writes always fail.
    struct ReadOnlyBackend(MemoryBackend);

    impl KvBackend for ReadOnlyBackend {
        fn get(&self, keys: &[&str]) -> StorageResult<HashMap<String, serde_json::Value>> {
            self.0.get(keys)
        }

        fn set(&mut self, _entries: HashMap<String, serde_json::Value>) -> StorageResult<()> {
            Err(StorageError::backend("quota exceeded"))
        }
    }

    async fn mount_weather(server: &MockServer, city: &str, description: &str) {
        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .and(query_param("q", city))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "cod": 200,
                "weather": [{"description": description, "icon": "01d"}],
                "main": {"temp": 20.0}
            })))
            .mount(server)
            .await;
    }

    async fn mount_weather_failure(server: &MockServer, city: &str) {
        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .and(query_param("q", city))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "cod": "404",
                "message": "city not found"
            })))
            .mount(server)
            .await;
    }

    fn controller_with(
        server: &MockServer,
        seeded: HashMap<String, serde_json::Value>,
    ) -> PopupController {
        let store = KvClient::new(MemoryBackend::with_entries(seeded));
        PopupController::new(
            SettingsManager::new(store.clone()),
            TaskListManager::new(store),
            WeatherClient::with_base_url("test_key", &server.uri()).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_init_populates_state_from_seeded_store() {
        let server = MockServer::start().await;
        mount_weather(&server, "Paris", "clear sky").await;

        let mut seeded = HashMap::new();
        seeded.insert("city".to_string(), json!("Paris"));
        seeded.insert("userName".to_string(), json!("Alex"));
        seeded.insert("tasks".to_string(), json!(["a", "b"]));

        let mut controller = controller_with(&server, seeded);
        controller.init().await.unwrap();

        assert_eq!(controller.phase(), Phase::Ready);
        assert_eq!(controller.state().city, "Paris");
        assert_eq!(controller.state().user_name, "Alex");
        assert_eq!(controller.state().tasks, vec!["a", "b"]);
        assert!(!controller.state().greeting.is_empty());
        let weather = controller.state().weather.as_ref().unwrap();
        assert_eq!(weather.description, "clear sky");
    }

    #[tokio::test]
    async fn test_init_with_empty_store_uses_defaults() {
        let server = MockServer::start().await;
        mount_weather(&server, DEFAULT_CITY, "haze").await;

        let mut controller = controller_with(&server, HashMap::new());
        controller.init().await.unwrap();

        assert_eq!(controller.state().city, DEFAULT_CITY);
        assert_eq!(controller.state().user_name, DEFAULT_USER_NAME);
        assert!(controller.state().tasks.is_empty());
    }

    #[tokio::test]
    async fn test_init_weather_failure_still_reaches_ready() {
        let server = MockServer::start().await;
        mount_weather_failure(&server, DEFAULT_CITY).await;

        let mut controller = controller_with(&server, HashMap::new());
        controller.init().await.unwrap();

        assert_eq!(controller.phase(), Phase::Ready);
        assert!(controller.state().weather.is_none());
        assert!(controller.state().status_message.is_some());
    }

    #[tokio::test]
    async fn test_handlers_reject_before_init() {
        let server = MockServer::start().await;
        let mut controller = controller_with(&server, HashMap::new());

        let result = controller.add_task("x").await;
        assert!(matches!(result, Err(PopupError::NotReady)));
    }

    #[tokio::test]
    async fn test_empty_task_rejected_without_mutation() {
        let server = MockServer::start().await;
        mount_weather(&server, DEFAULT_CITY, "haze").await;

        let mut controller = controller_with(&server, HashMap::new());
        controller.init().await.unwrap();

        let result = controller.add_task("   ").await;
        assert!(matches!(result, Err(PopupError::Validation(_))));
        assert_eq!(
            controller.state().status_message.as_deref(),
            Some("Field cannot be empty")
        );
        assert!(controller.state().tasks.is_empty());
    }

    #[tokio::test]
    async fn test_empty_city_rejected_without_mutation() {
        let server = MockServer::start().await;
        mount_weather(&server, DEFAULT_CITY, "haze").await;

        let mut controller = controller_with(&server, HashMap::new());
        controller.init().await.unwrap();

        let result = controller.update_city("").await;
        assert!(matches!(result, Err(PopupError::Validation(_))));
        assert_eq!(controller.state().city, DEFAULT_CITY);
        assert_eq!(
            controller.state().status_message.as_deref(),
            Some("Please enter a city name")
        );
    }

    #[tokio::test]
    async fn test_empty_name_rejected() {
        let server = MockServer::start().await;
        mount_weather(&server, DEFAULT_CITY, "haze").await;

        let mut controller = controller_with(&server, HashMap::new());
        controller.init().await.unwrap();

        let result = controller.update_name("  ").await;
        assert!(matches!(result, Err(PopupError::Validation(_))));
        assert_eq!(controller.state().user_name, DEFAULT_USER_NAME);
    }

    #[tokio::test]
    async fn test_add_and_delete_task() {
        let server = MockServer::start().await;
        mount_weather(&server, DEFAULT_CITY, "haze").await;

        let mut controller = controller_with(&server, HashMap::new());
        controller.init().await.unwrap();

        controller.add_task("buy milk").await.unwrap();
        controller.add_task("water plants").await.unwrap();
        assert_eq!(controller.state().tasks, vec!["buy milk", "water plants"]);

        controller.delete_task("buy milk").await.unwrap();
        assert_eq!(controller.state().tasks, vec!["water plants"]);
    }

    #[tokio::test]
    async fn test_update_city_saves_and_refreshes_weather() {
        let server = MockServer::start().await;
        mount_weather(&server, DEFAULT_CITY, "haze").await;
        mount_weather(&server, "Berlin", "light rain").await;

        let mut controller = controller_with(&server, HashMap::new());
        controller.init().await.unwrap();

        controller.update_city("Berlin").await.unwrap();

        assert_eq!(controller.state().city, "Berlin");
        let weather = controller.state().weather.as_ref().unwrap();
        assert_eq!(weather.description, "light rain");

        // The save went through the store, not just the state
        let reloaded = controller.settings.load().await.unwrap();
        assert_eq!(reloaded.city, "Berlin");
    }

    #[tokio::test]
    async fn test_update_name_persists_city_too() {
        let server = MockServer::start().await;
        mount_weather(&server, DEFAULT_CITY, "haze").await;

        let mut controller = controller_with(&server, HashMap::new());
        controller.init().await.unwrap();

        controller.update_name("Alex").await.unwrap();

        let reloaded = controller.settings.load().await.unwrap();
        assert_eq!(reloaded.user_name, "Alex");
        assert_eq!(reloaded.city, DEFAULT_CITY);
    }

    #[tokio::test]
    async fn test_add_task_storage_failure_surfaces_message() {
        let server = MockServer::start().await;
        mount_weather(&server, DEFAULT_CITY, "haze").await;

        let mut seeded = HashMap::new();
        seeded.insert("tasks".to_string(), json!(["existing"]));
        let store = KvClient::new(ReadOnlyBackend(MemoryBackend::with_entries(seeded)));
        let mut controller = PopupController::new(
            SettingsManager::new(store.clone()),
            TaskListManager::new(store),
            WeatherClient::with_base_url("test_key", &server.uri()).unwrap(),
        );
        controller.init().await.unwrap();

        let result = controller.add_task("buy milk").await;

        assert!(matches!(result, Err(PopupError::Storage(_))));
        assert!(controller.state().status_message.is_some());
        assert_eq!(controller.state().tasks, vec!["existing"]);
    }

    #[tokio::test]
    async fn test_delete_task_storage_failure_surfaces_message() {
        let server = MockServer::start().await;
        mount_weather(&server, DEFAULT_CITY, "haze").await;

        let mut seeded = HashMap::new();
        seeded.insert("tasks".to_string(), json!(["existing"]));
        let store = KvClient::new(ReadOnlyBackend(MemoryBackend::with_entries(seeded)));
        let mut controller = PopupController::new(
            SettingsManager::new(store.clone()),
            TaskListManager::new(store),
            WeatherClient::with_base_url("test_key", &server.uri()).unwrap(),
        );
        controller.init().await.unwrap();

        let result = controller.delete_task("existing").await;

        assert!(matches!(result, Err(PopupError::Storage(_))));
        assert!(controller.state().status_message.is_some());
        assert_eq!(controller.state().tasks, vec!["existing"]);
    }

    #[tokio::test]
    async fn test_weather_failure_keeps_previous_snapshot() {
        let server = MockServer::start().await;
        mount_weather(&server, DEFAULT_CITY, "haze").await;
        mount_weather_failure(&server, "Nowhereville").await;

        let mut controller = controller_with(&server, HashMap::new());
        controller.init().await.unwrap();
        assert!(controller.state().weather.is_some());

        controller.update_city("Nowhereville").await.unwrap();

        // City saved, but the old snapshot survives the failed fetch
        assert_eq!(controller.state().city, "Nowhereville");
        let weather = controller.state().weather.as_ref().unwrap();
        assert_eq!(weather.description, "haze");
        assert!(controller
            .state()
            .status_message
            .as_deref()
            .unwrap()
            .contains("city not found"));
    }
}
