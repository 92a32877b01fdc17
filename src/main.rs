use anyhow::Result;

use popdash_core::AppError;
use popdash_popup::PopupController;
use popdash_services::{SettingsManager, TaskListManager};
use popdash_storage::{FileBackend, KvClient};
use popdash_weather::WeatherClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    popdash_core::init()?;

    if let Err(e) = run().await {
        tracing::error!("Popdash failed: {}", e);
        eprintln!("{}", e.user_message());
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> Result<(), AppError> {
    let (config, _validation) = popdash_core::Config::load_validated()?;
    tracing::info!("Popdash started");

    let store = KvClient::new(FileBackend::new(config.storage.data_path()));
    let weather =
        WeatherClient::with_base_url(config.weather.api_key(), &config.weather.base_url)?;

    let mut popup = PopupController::new(
        SettingsManager::new(store.clone()),
        TaskListManager::new(store),
        weather,
    );
    popup
        .init()
        .await
        .map_err(|e| AppError::Popup(e.user_message()))?;

    println!("{}", popup.state().render());
    Ok(())
}
