use crate::cookies::encode_component;

pub const LOGIN_PATH: &str = "/login";
pub const DASHBOARD_PATH: &str = "/dashboard";

/// Reason codes carried to the login page as `?message=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoutReason {
    SessionExpired,
    Unauthorized,
}

impl LogoutReason {
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::SessionExpired => "session-expired",
            Self::Unauthorized => "unauthorized",
        }
    }

    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "session-expired" => Some(Self::SessionExpired),
            "unauthorized" => Some(Self::Unauthorized),
            _ => None,
        }
    }

    /// Text shown on the login page.
    #[must_use]
    pub const fn notice(self) -> &'static str {
        match self {
            Self::SessionExpired => "Your session expired due to inactivity. Please sign in again.",
            Self::Unauthorized => "Your session is no longer valid. Please sign in again.",
        }
    }
}

/// `/login`, optionally tagged with a logout reason.
#[must_use]
pub fn logout_destination(reason: Option<LogoutReason>) -> String {
    reason.map_or_else(
        || LOGIN_PATH.to_string(),
        |reason| format!("{LOGIN_PATH}?message={}", reason.code()),
    )
}

/// `/login?redirect=<path>` for a denied navigation. The login page itself is
/// never used as a return target.
#[must_use]
pub fn login_redirect(current_path: &str) -> String {
    let target = if current_path.is_empty() || is_login_path(current_path) {
        DASHBOARD_PATH
    } else {
        current_path
    };
    format!("{LOGIN_PATH}?redirect={}", encode_component(target))
}

#[must_use]
pub fn is_login_path(path: &str) -> bool {
    path == LOGIN_PATH || path.starts_with("/login/") || path.starts_with("/login?")
}

/// Sanitize a post-login return target. Only local absolute paths are
/// accepted; anything else lands on the dashboard.
#[must_use]
pub fn safe_return_path(candidate: Option<&str>) -> String {
    candidate
        .map(str::trim)
        .filter(|path| {
            path.starts_with('/')
                && !path.starts_with("//")
                && !path.starts_with("/\\")
                && !path.contains("://")
                && !is_login_path(path)
        })
        .map_or_else(|| DASHBOARD_PATH.to_string(), str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redirect_encodes_path() {
        assert_eq!(login_redirect("/dashboard"), "/login?redirect=%2Fdashboard");
        assert_eq!(
            login_redirect("/dashboard/users"),
            "/login?redirect=%2Fdashboard%2Fusers"
        );
        assert_eq!(login_redirect("/login"), "/login?redirect=%2Fdashboard");
    }

    #[test]
    fn logout_destinations() {
        assert_eq!(logout_destination(None), "/login");
        assert_eq!(
            logout_destination(Some(LogoutReason::SessionExpired)),
            "/login?message=session-expired"
        );
        assert_eq!(
            LogoutReason::from_code("unauthorized"),
            Some(LogoutReason::Unauthorized)
        );
        assert_eq!(LogoutReason::from_code("other"), None);
    }

    #[test]
    fn return_path_is_local_only() {
        assert_eq!(safe_return_path(Some("/dashboard/bonds")), "/dashboard/bonds");
        assert_eq!(safe_return_path(Some("//evil.example")), "/dashboard");
        assert_eq!(safe_return_path(Some("https://evil.example")), "/dashboard");
        assert_eq!(safe_return_path(Some("/\\evil.example")), "/dashboard");
        assert_eq!(safe_return_path(Some("/login")), "/dashboard");
        assert_eq!(safe_return_path(None), "/dashboard");
    }
}
