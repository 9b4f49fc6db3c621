//! Admin management views
//!
//! Each manager holds the list shown on its page and keeps it in step with
//! the backend. All of them need an admin token.

mod menu;
mod settings;
mod tables;

pub use menu::{AvailabilityFilter, MenuManager};
pub use settings::SettingsForm;
pub use tables::TableManager;
