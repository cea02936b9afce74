use crate::edge::{revalidate::Verdict, EdgeState};
use admin_session::{
    cookies::{find_cookie, TOKEN_KEY, USER_KEY},
    gate::{self, GateDecision},
    redirect::login_redirect,
    AdminUser,
};
use axum::{
    body::Body,
    extract::State,
    http::{header::COOKIE, HeaderMap, HeaderName, HeaderValue, Request},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Every `Cookie` header joined, browsers may split them.
fn cookie_header(headers: &HeaderMap) -> String {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .collect::<Vec<_>>()
        .join("; ")
}

fn identity(user: &AdminUser) -> Vec<(HeaderName, HeaderValue)> {
    gate::identity_headers(user)
        .into_iter()
        .filter_map(|(name, value)| match HeaderValue::from_str(&value) {
            Ok(value) => Some((HeaderName::from_static(name), value)),
            Err(_) => {
                warn!(header = name, "Identity value is not a valid header, dropping it");
                None
            }
        })
        .collect()
}

/// Session gate for page requests.
///
/// Protected paths without a well-formed session are redirected to the login
/// page with the original path preserved. Allowed requests carry the caller's
/// identity to the inner service and back out on the response.
pub async fn session_gate(
    State(state): State<Arc<EdgeState>>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();
    let cookies = cookie_header(request.headers());
    let token = find_cookie(&cookies, TOKEN_KEY);

    let user = match gate::evaluate(&path, token, find_cookie(&cookies, USER_KEY)) {
        GateDecision::PassThrough => return next.run(request).await,
        GateDecision::Redirect { location, reason } => {
            info!(path = %path, %reason, "Redirecting to login");
            return Redirect::temporary(&location).into_response();
        }
        GateDecision::Allow(user) => user,
    };

    if let (Some(revalidator), Some(token)) = (&state.revalidator, token) {
        match revalidator.check(token).await {
            Verdict::Valid => {}
            Verdict::Rejected => {
                info!(path = %path, user_id = %user.id, "Backend rejected session, redirecting to login");
                return Redirect::temporary(&login_redirect(&path)).into_response();
            }
            Verdict::Unreachable => {
                warn!(path = %path, "Backend unreachable, falling back to the cookie check");
            }
        }
    }

    debug!(path = %path, user_id = %user.id, role = %user.role, "Session allowed");

    let identity = identity(&user);
    for (name, value) in &identity {
        request.headers_mut().insert(name.clone(), value.clone());
    }

    let mut response = next.run(request).await;
    for (name, value) in identity {
        response.headers_mut().insert(name, value);
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_headers_are_joined() {
        let mut headers = HeaderMap::new();
        headers.append(COOKIE, HeaderValue::from_static("adminToken=a.b.c"));
        headers.append(COOKIE, HeaderValue::from_static("theme=dark; adminUser=x"));
        let joined = cookie_header(&headers);
        assert_eq!(find_cookie(&joined, TOKEN_KEY), Some("a.b.c"));
        assert_eq!(find_cookie(&joined, USER_KEY), Some("x"));
    }

    #[test]
    fn test_identity_headers_skip_invalid_values() {
        let user = AdminUser {
            id: "7".to_string(),
            email: "line\nbreak@borabond.com".to_string(),
            role: admin_session::Role::User,
        };
        let headers = identity(&user);
        assert_eq!(headers.len(), 2);
        assert!(headers.iter().all(|(name, _)| name.as_str() != gate::HEADER_USER_EMAIL));
    }
}
