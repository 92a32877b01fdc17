//! Time-of-day greeting selection.

use chrono::{Local, Timelike};

/// Greeting for a given hour of day (0-23).
pub fn greeting_for_hour(hour: u32) -> &'static str {
    match hour {
        5..=11 => "Good morning",
        12..=17 => "Good afternoon",
        18..=20 => "Good evening",
        _ => "Good night",
    }
}

/// Greeting for the current local time.
pub fn current_greeting() -> &'static str {
    greeting_for_hour(Local::now().hour())
}
