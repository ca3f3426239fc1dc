//! Application route table.
//!
//! Patterns use `:name` segments for parameters. Matching is segment by
//! segment and ignores query strings, fragments and a trailing slash.

pub const HOME: &str = "/";
pub const LOGIN: &str = "/login";
pub const REGISTER: &str = "/register";
pub const FORGOT_PASSWORD: &str = "/forgot-password";
pub const RESET_PASSWORD: &str = "/reset-password";
pub const VERIFY_EMAIL: &str = "/verify-email";

pub const DASHBOARD: &str = "/dashboard";

pub mod portfolio {
    pub const ROOT: &str = "/portfolio";
    pub const DETAILS: &str = "/portfolio/:id";
    pub const CREATE: &str = "/portfolio/create";
    pub const EDIT: &str = "/portfolio/:id/edit";
    pub const ANALYSIS: &str = "/portfolio/:id/analysis";
}

pub mod market {
    pub const ROOT: &str = "/market";
    pub const OVERVIEW: &str = "/market/overview";
    pub const ASSETS: &str = "/market/assets";
    pub const ASSET_DETAILS: &str = "/market/assets/:id";
    pub const WATCHLIST: &str = "/market/watchlist";
}

pub mod risk {
    pub const ROOT: &str = "/risk";
    pub const ASSESSMENT: &str = "/risk/assessment";
    pub const ANALYSIS: &str = "/risk/analysis";
    pub const REPORTS: &str = "/risk/reports";
}

pub mod strategy {
    pub const ROOT: &str = "/strategy";
    pub const LIST: &str = "/strategy/list";
    pub const DETAILS: &str = "/strategy/:id";
    pub const CREATE: &str = "/strategy/create";
    pub const EDIT: &str = "/strategy/:id/edit";
    pub const COMPARE: &str = "/strategy/compare";
}

pub mod profile {
    pub const ROOT: &str = "/profile";
    pub const SETTINGS: &str = "/profile/settings";
    pub const SECURITY: &str = "/profile/security";
    pub const NOTIFICATIONS: &str = "/profile/notifications";
    pub const PAYMENT: &str = "/profile/payment";
}

pub mod help {
    pub const ROOT: &str = "/help";
    pub const SUPPORT: &str = "/help/support";
    pub const DOCUMENTATION: &str = "/help/documentation";
    pub const FAQ: &str = "/help/faq";
    pub const CONTACT: &str = "/help/contact";
}

/// Routes reachable without a session.
pub const PUBLIC_ROUTES: &[&str] = &[
    HOME,
    LOGIN,
    REGISTER,
    FORGOT_PASSWORD,
    RESET_PASSWORD,
    VERIFY_EMAIL,
];

/// Routes rendered behind the auth gate.
pub const PROTECTED_ROUTES: &[&str] = &[
    DASHBOARD,
    portfolio::ROOT,
    portfolio::DETAILS,
    portfolio::CREATE,
    portfolio::EDIT,
    portfolio::ANALYSIS,
    market::ROOT,
    market::OVERVIEW,
    market::ASSETS,
    market::ASSET_DETAILS,
    market::WATCHLIST,
    risk::ROOT,
    risk::ASSESSMENT,
    risk::ANALYSIS,
    risk::REPORTS,
    strategy::ROOT,
    strategy::LIST,
    strategy::DETAILS,
    strategy::CREATE,
    strategy::EDIT,
    strategy::COMPARE,
    profile::ROOT,
    profile::SETTINGS,
    profile::SECURITY,
    profile::NOTIFICATIONS,
    profile::PAYMENT,
    help::ROOT,
    help::SUPPORT,
    help::DOCUMENTATION,
    help::FAQ,
    help::CONTACT,
];

fn segments(path: &str) -> Vec<&str> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Check whether a concrete path matches a route pattern.
pub fn matches(pattern: &str, path: &str) -> bool {
    let pattern = segments(pattern);
    let path = segments(path);

    pattern.len() == path.len()
        && pattern
            .iter()
            .zip(&path)
            .all(|(p, s)| p.starts_with(':') || p == s)
}

/// True when the path is one of the protected dashboard routes.
pub fn is_protected(path: &str) -> bool {
    PROTECTED_ROUTES.iter().any(|pattern| matches(pattern, path))
}

/// True when the path is one of the public routes.
pub fn is_public(path: &str) -> bool {
    PUBLIC_ROUTES.iter().any(|pattern| matches(pattern, path))
}

/// Fill `:name` segments of a pattern. Unknown parameters are left in place.
pub fn route_with_params(pattern: &str, params: &[(&str, &str)]) -> String {
    pattern
        .split('/')
        .map(|segment| {
            segment
                .strip_prefix(':')
                .and_then(|name| params.iter().find(|(key, _)| *key == name))
                .map(|(_, value)| *value)
                .unwrap_or(segment)
        })
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_static_and_param_routes() {
        assert!(matches(DASHBOARD, "/dashboard"));
        assert!(matches(DASHBOARD, "/dashboard/"));
        assert!(matches(DASHBOARD, "/dashboard?tab=risk"));
        assert!(matches(portfolio::DETAILS, "/portfolio/42"));
        assert!(matches(portfolio::EDIT, "/portfolio/42/edit"));
        assert!(!matches(portfolio::EDIT, "/portfolio/42"));
        assert!(!matches(DASHBOARD, "/dashboards"));
        assert!(matches(HOME, "/"));
        assert!(!matches(HOME, "/login"));
    }

    #[test]
    fn test_is_protected() {
        assert!(is_protected("/dashboard"));
        assert!(is_protected("/market/assets/eth"));
        assert!(is_protected("/strategy/compare"));
        assert!(!is_protected("/login"));
        assert!(!is_protected("/"));
        assert!(!is_protected("/unknown"));
    }

    #[test]
    fn test_is_public() {
        assert!(is_public("/"));
        assert!(is_public("/login"));
        assert!(is_public("/verify-email#token"));
        assert!(!is_public("/dashboard"));
    }

    #[test]
    fn test_public_and_protected_disjoint() {
        for route in PUBLIC_ROUTES {
            assert!(!is_protected(route), "{} is both", route);
        }
    }

    #[test]
    fn test_route_with_params() {
        assert_eq!(
            route_with_params(portfolio::ANALYSIS, &[("id", "p-7")]),
            "/portfolio/p-7/analysis"
        );
        assert_eq!(route_with_params(strategy::EDIT, &[]), "/strategy/:id/edit");
        assert_eq!(route_with_params(DASHBOARD, &[("id", "1")]), "/dashboard");
    }
}
