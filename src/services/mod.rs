pub mod settings;

pub use settings::{MemorySettings, SettingsError, SettingsProvider, SettingsService};
