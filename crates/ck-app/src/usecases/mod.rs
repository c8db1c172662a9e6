mod clear_history;
mod settings_toggle;
mod write_back;

pub use clear_history::ClearHistory;
pub use settings_toggle::SettingsToggle;
pub use write_back::WriteBackPipeline;
