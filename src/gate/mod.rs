//! Request-time access control: route classification plus the pure
//! decision function. The HTTP wiring lives in `crate::middleware::gate`.

pub mod decision;
pub mod routes;

pub use decision::{evaluate, Decision, Session};
pub use routes::{classify, RouteClass, Tier, DASHBOARD_HOME, LOGIN_PAGE, MAINTENANCE_PAGE};
