//! Display state for the popup.
//!
//! All mutable UI state lives in this explicit struct, passed to handlers,
//! rather than in ambient globals.

use popdash_weather::WeatherSnapshot;

/// Controller lifecycle phase.
///
/// `Ready` is entered only after the initial settings load and task-list load
/// both complete; the popup stays `Ready` until closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Uninitialized,
    Ready,
}

/// Everything the popup renders.
#[derive(Debug, Clone, Default)]
pub struct PopupState {
    /// Time-of-day greeting text.
    pub greeting: String,
    /// Display name from settings.
    pub user_name: String,
    /// Configured city from settings.
    pub city: String,
    /// Last successfully fetched weather; kept across failed refreshes.
    pub weather: Option<WeatherSnapshot>,
    /// Task list in storage order (render order).
    pub tasks: Vec<String>,
    /// Transient user-visible message (validation, weather or storage error).
    pub status_message: Option<String>,
}

impl PopupState {
    /// Render the state as display lines for a text surface.
    pub fn render(&self) -> String {
        let mut lines = vec![
            format!("{}, {}", self.greeting, self.user_name),
            format!("City: {}", self.city),
        ];

        match &self.weather {
            Some(w) => {
                lines.push(format!("{}: {}", self.city, w.description));
                lines.push(format!("{}°C", w.temperature_celsius));
                lines.push(format!("Icon: {}", w.icon_url));
            }
            None => lines.push("Weather unavailable".to_string()),
        }

        if self.tasks.is_empty() {
            lines.push("No tasks".to_string());
        } else {
            for task in &self.tasks {
                lines.push(format!("- {}", task));
            }
        }

        if let Some(message) = &self.status_message {
            lines.push(format!("! {}", message));
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;

    #[test]
    fn test_default_phase_is_uninitialized() {
        assert_eq!(Phase::default(), Phase::Uninitialized);
    }

    #[test]
    fn test_render_includes_tasks_in_order() {
        let state = PopupState {
            greeting: "Good morning".to_string(),
            user_name: "Alex".to_string(),
            city: "Paris".to_string(),
            tasks: vec!["first".to_string(), "second".to_string()],
            ..Default::default()
        };

        let rendered = state.render();
        let first = rendered.find("- first").unwrap();
        let second = rendered.find("- second").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_render_without_weather() {
        let state = PopupState::default();
        assert!(state.render().contains("Weather unavailable"));
    }
}
