// Three-tier handler layout:
// public (no auth) -> protected (any session) -> admin (ADMIN session)
pub mod admin;
pub mod protected;
pub mod public;
