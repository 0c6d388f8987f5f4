pub mod auth;
pub mod gate;

pub use auth::{require_admin_middleware, require_auth_middleware, AuthUser};
pub use gate::{access_gate_middleware, GateState};
