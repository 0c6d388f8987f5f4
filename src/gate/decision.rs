use uuid::Uuid;

use crate::auth::Role;
use crate::gate::routes::{classify, Tier, DASHBOARD_HOME, LOGIN_PAGE, MAINTENANCE_PAGE};

/// Resolved session state for one request. Anonymous callers have no
/// `Session` at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    pub subject_id: Uuid,
    pub role: Role,
}

/// The gate's verdict for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    RedirectTo(&'static str),
}

/// Decide what to do with a request, given a snapshot of its inputs.
///
/// Rules are applied in strict order, first match wins:
/// 1. maintenance mode blocks everything except the exempt set;
/// 2. public paths pass without a session;
/// 3. the admin tree requires an ADMIN session;
/// 4. the dashboard tree requires any session;
/// 5. everything else passes.
///
/// Pure function of its arguments: no I/O, same snapshot in, same
/// decision out.
pub fn evaluate(path: &str, maintenance: bool, session: Option<&Session>) -> Decision {
    let class = classify(path);

    if maintenance {
        return if class.maintenance_exempt {
            Decision::Allow
        } else {
            Decision::RedirectTo(MAINTENANCE_PAGE)
        };
    }

    if class.public {
        return Decision::Allow;
    }

    match class.tier {
        Tier::Admin => match session {
            None => Decision::RedirectTo(LOGIN_PAGE),
            Some(session) => match session.role {
                Role::Admin => Decision::Allow,
                Role::Brand | Role::Creator | Role::Coach => {
                    Decision::RedirectTo(DASHBOARD_HOME)
                }
            },
        },
        Tier::Dashboard => match session {
            None => Decision::RedirectTo(LOGIN_PAGE),
            Some(_) => Decision::Allow,
        },
        Tier::Open => Decision::Allow,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(role: Role) -> Session {
        Session {
            subject_id: Uuid::new_v4(),
            role,
        }
    }

    #[test]
    fn maintenance_allows_exempt_paths() {
        for path in [
            "/maintenance",
            "/admin",
            "/admin/users",
            "/api/auth/session",
            "/_next/static/app.js",
            "/logo.png",
            "/api/settings",
            "/api/admin/settings",
            "/health",
        ] {
            assert_eq!(evaluate(path, true, None), Decision::Allow, "path: {path}");
        }
    }

    #[test]
    fn maintenance_redirects_everything_else() {
        for path in ["/", "/login", "/pricing", "/dashboard", "/hire-creators"] {
            assert_eq!(
                evaluate(path, true, None),
                Decision::RedirectTo("/maintenance"),
                "path: {path}"
            );
        }
        // Even an authenticated creator gets the maintenance page.
        assert_eq!(
            evaluate("/pricing", true, Some(&session(Role::Creator))),
            Decision::RedirectTo("/maintenance")
        );
    }

    #[test]
    fn public_paths_ignore_session_state() {
        for path in ["/login", "/admin/login", "/", "/maintenance", "/api/auth/login", "/_next/x", "/favicon.ico"] {
            assert_eq!(evaluate(path, false, None), Decision::Allow, "path: {path}");
            assert_eq!(
                evaluate(path, false, Some(&session(Role::Brand))),
                Decision::Allow,
                "path: {path}"
            );
        }
    }

    #[test]
    fn admin_tree_without_session_goes_to_login() {
        assert_eq!(
            evaluate("/admin/users", false, None),
            Decision::RedirectTo("/login")
        );
        assert_eq!(evaluate("/admin", false, None), Decision::RedirectTo("/login"));
    }

    #[test]
    fn admin_tree_with_non_admin_goes_to_dashboard() {
        for role in [Role::Brand, Role::Creator, Role::Coach] {
            assert_eq!(
                evaluate("/admin/users", false, Some(&session(role))),
                Decision::RedirectTo("/dashboard"),
                "role: {role}"
            );
        }
    }

    #[test]
    fn admin_tree_with_admin_passes() {
        assert_eq!(
            evaluate("/admin/users", false, Some(&session(Role::Admin))),
            Decision::Allow
        );
    }

    #[test]
    fn dashboard_tree_requires_any_session() {
        assert_eq!(
            evaluate("/dashboard/profile", false, None),
            Decision::RedirectTo("/login")
        );
        for role in [Role::Admin, Role::Brand, Role::Creator, Role::Coach] {
            assert_eq!(
                evaluate("/dashboard/profile", false, Some(&session(role))),
                Decision::Allow,
                "role: {role}"
            );
        }
    }

    #[test]
    fn unclassified_paths_pass_through() {
        assert_eq!(evaluate("/pricing", false, None), Decision::Allow);
        assert_eq!(evaluate("/hire-creators", false, None), Decision::Allow);
    }

    #[test]
    fn evaluation_is_idempotent() {
        let creator = session(Role::Creator);
        let snapshots: &[(&str, bool, Option<&Session>)] = &[
            ("/admin/users", false, None),
            ("/admin/users", false, Some(&creator)),
            ("/pricing", true, None),
            ("/dashboard/profile", false, Some(&creator)),
        ];
        for (path, maintenance, session) in snapshots {
            let first = evaluate(path, *maintenance, *session);
            let second = evaluate(path, *maintenance, *session);
            assert_eq!(first, second, "path: {path}");
        }
    }

    // The scenario table from the access-policy review.
    #[test]
    fn review_scenarios() {
        let creator = session(Role::Creator);
        let admin = session(Role::Admin);

        assert_eq!(evaluate("/admin/users", false, None), Decision::RedirectTo("/login"));
        assert_eq!(
            evaluate("/admin/users", false, Some(&creator)),
            Decision::RedirectTo("/dashboard")
        );
        assert_eq!(evaluate("/dashboard/profile", false, Some(&creator)), Decision::Allow);
        assert_eq!(evaluate("/pricing", true, None), Decision::RedirectTo("/maintenance"));
        assert_eq!(evaluate("/maintenance", true, None), Decision::Allow);
        assert_eq!(evaluate("/admin", true, Some(&admin)), Decision::Allow);
    }
}
