//! Persistence services for Popdash: user settings and the task list.

pub mod settings;
pub mod tasks;

pub use settings::{Settings, SettingsManager, DEFAULT_CITY, DEFAULT_USER_NAME};
pub use tasks::TaskListManager;
