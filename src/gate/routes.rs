//! Declarative route classification for the access gate.
//!
//! Every policy the gate enforces is expressed as a table of
//! (pattern, meaning) entries below, so the whole route policy can be
//! audited in one place and tested without the HTTP layer.

/// Redirect target for unauthenticated callers.
pub const LOGIN_PAGE: &str = "/login";
/// Redirect target for authenticated non-admin callers hitting admin routes.
pub const DASHBOARD_HOME: &str = "/dashboard";
/// Redirect target while the site is in maintenance mode.
pub const MAINTENANCE_PAGE: &str = "/maintenance";

const ADMIN_PREFIX: &str = "/admin";
const ADMIN_API_PREFIX: &str = "/api/admin";
const DASHBOARD_PREFIX: &str = "/dashboard";
const AUTH_EXEMPT_PREFIX: &str = "/api/auth";
const STATIC_ASSET_PREFIX: &str = "/_next";
const SETTINGS_ENDPOINT: &str = "/api/settings";
const HEALTH_ENDPOINT: &str = "/health";

/// A single path rule. Matching is case-sensitive; prefixes are literal,
/// no wildcards.
#[derive(Debug, Clone, Copy)]
pub enum Pattern {
    Exact(&'static str),
    Prefix(&'static str),
    /// Asset-style paths: anything containing a literal dot.
    ContainsDot,
}

impl Pattern {
    pub fn matches(&self, path: &str) -> bool {
        match self {
            Pattern::Exact(p) => path == *p,
            Pattern::Prefix(p) => path.starts_with(p),
            Pattern::ContainsDot => path.contains('.'),
        }
    }
}

/// Paths that stay reachable while the site is in maintenance mode:
/// the maintenance page itself, the admin page and API trees, auth
/// endpoints, framework assets, dotted asset paths, the settings read
/// used by the gate's own collaborators, and the liveness probe.
///
/// The admin API tree must stay open or maintenance mode could only ever
/// be switched off with direct database access.
pub const MAINTENANCE_EXEMPT: &[Pattern] = &[
    Pattern::Exact(MAINTENANCE_PAGE),
    Pattern::Prefix(ADMIN_PREFIX),
    Pattern::Prefix(ADMIN_API_PREFIX),
    Pattern::Prefix(AUTH_EXEMPT_PREFIX),
    Pattern::Prefix(STATIC_ASSET_PREFIX),
    Pattern::ContainsDot,
    Pattern::Exact(SETTINGS_ENDPOINT),
    Pattern::Exact(HEALTH_ENDPOINT),
];

/// Paths anyone may load, authenticated or not.
pub const PUBLIC: &[Pattern] = &[
    Pattern::Exact(LOGIN_PAGE),
    Pattern::Exact("/admin/login"),
    Pattern::Exact("/"),
    Pattern::Exact(MAINTENANCE_PAGE),
    Pattern::Prefix(AUTH_EXEMPT_PREFIX),
    Pattern::Prefix(STATIC_ASSET_PREFIX),
    Pattern::ContainsDot,
];

/// Which access tier a non-public path falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// Admin tree: requires an ADMIN session.
    Admin,
    /// Dashboard tree: requires any session.
    Dashboard,
    /// Everything else passes through.
    Open,
}

/// The gate's view of one request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteClass {
    pub maintenance_exempt: bool,
    pub public: bool,
    pub tier: Tier,
}

fn matches_any(table: &[Pattern], path: &str) -> bool {
    table.iter().any(|p| p.matches(path))
}

pub fn classify(path: &str) -> RouteClass {
    let tier = if path.starts_with(ADMIN_PREFIX) {
        Tier::Admin
    } else if path.starts_with(DASHBOARD_PREFIX) {
        Tier::Dashboard
    } else {
        Tier::Open
    };

    RouteClass {
        maintenance_exempt: matches_any(MAINTENANCE_EXEMPT, path),
        public: matches_any(PUBLIC, path),
        tier,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_public_paths() {
        for path in ["/", "/login", "/admin/login", "/maintenance"] {
            assert!(classify(path).public, "{path} should be public");
        }
        assert!(!classify("/pricing").public);
        assert!(!classify("/login/extra").public, "exact means exact");
    }

    #[test]
    fn prefix_matching_is_case_sensitive_and_literal() {
        assert_eq!(classify("/admin/users").tier, Tier::Admin);
        assert_eq!(classify("/Admin/users").tier, Tier::Open);
        assert_eq!(classify("/dashboard/profile").tier, Tier::Dashboard);
        assert_eq!(classify("/dash").tier, Tier::Open);
    }

    #[test]
    fn dotted_paths_count_as_assets() {
        let class = classify("/favicon.ico");
        assert!(class.public);
        assert!(class.maintenance_exempt);
        // A dot anywhere in the path counts, not only in the last segment.
        assert!(classify("/files/v1.2/readme").public);
    }

    #[test]
    fn maintenance_exemptions() {
        for path in [
            "/maintenance",
            "/admin",
            "/admin/settings",
            "/api/auth/login",
            "/_next/static/chunk.js",
            "/api/settings",
            "/api/admin/settings",
            "/api/admin/users",
            "/health",
        ] {
            assert!(classify(path).maintenance_exempt, "{path} should be exempt");
        }
        for path in ["/", "/login", "/pricing", "/dashboard"] {
            assert!(!classify(path).maintenance_exempt, "{path} should not be exempt");
        }
    }
}
