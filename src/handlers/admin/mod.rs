// Tier 3: ADMIN role required.
pub mod creators;
pub mod frontend;
pub mod pages;
pub mod settings;
pub mod users;
