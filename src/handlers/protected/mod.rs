// Tier 2: any authenticated role.
pub mod auth;
pub mod briefs;
pub mod dashboard;
