//! Popup controller for Popdash
//!
//! Wires user actions to the settings, task-list and weather components and
//! owns the initial load sequencing.

pub mod controller;
pub mod greeting;
pub mod state;

pub use controller::{PopupController, PopupError};
pub use greeting::{current_greeting, greeting_for_hour};
pub use state::{Phase, PopupState};
