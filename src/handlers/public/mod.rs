// Tier 1: no authentication required.
pub mod auth;
pub mod frontend;
pub mod pages;
pub mod settings;
