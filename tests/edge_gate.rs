use admin_session::{
    cookies::{encode_user, TOKEN_KEY, USER_KEY},
    AdminUser, Role,
};
use anyhow::{ensure, Context, Result};
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use borabond_admin::edge::{router, EdgeState};
use std::{fs, sync::Arc};
use tempfile::TempDir;
use tower::ServiceExt;

const INDEX: &str = "<!doctype html><html><body>borabond</body></html>";

struct Bundle {
    _dir: TempDir,
    app: Router,
}

fn bundle() -> Result<Bundle> {
    let dir = tempfile::tempdir().context("Failed to create assets dir")?;
    fs::write(dir.path().join("index.html"), INDEX)?;
    fs::create_dir_all(dir.path().join("pkg"))?;
    fs::write(dir.path().join("pkg/web.js"), "export default 1;")?;
    let app = router(Arc::new(EdgeState::default()), dir.path());
    Ok(Bundle { _dir: dir, app })
}

fn session_cookie(role: Role) -> Result<String> {
    let user = encode_user(&AdminUser {
        id: "17".to_string(),
        email: "ops@borabond.com".to_string(),
        role,
    })?;
    Ok(format!("{TOKEN_KEY}=header.payload.sig; {USER_KEY}={user}"))
}

async fn get(app: &Router, uri: &str, cookie: Option<&str>) -> Result<axum::response::Response> {
    let mut request = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        request = request.header(header::COOKIE, cookie);
    }
    Ok(app.clone().oneshot(request.body(Body::empty())?).await?)
}

fn location(response: &axum::response::Response) -> Option<&str> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
}

#[tokio::test]
async fn dashboard_without_cookies_redirects_to_login() -> Result<()> {
    let bundle = bundle()?;
    let response = get(&bundle.app, "/dashboard", None).await?;
    ensure!(response.status() == StatusCode::TEMPORARY_REDIRECT);
    ensure!(location(&response) == Some("/login?redirect=%2Fdashboard"));

    let response = get(&bundle.app, "/dashboard/cybrid", None).await?;
    ensure!(location(&response) == Some("/login?redirect=%2Fdashboard%2Fcybrid"));
    Ok(())
}

#[tokio::test]
async fn malformed_token_redirects() -> Result<()> {
    let bundle = bundle()?;
    let user = encode_user(&AdminUser {
        id: "17".to_string(),
        email: "ops@borabond.com".to_string(),
        role: Role::Admin,
    })?;
    let cookie = format!("{TOKEN_KEY}=not-a-jwt; {USER_KEY}={user}");
    let response = get(&bundle.app, "/dashboard/bonds", Some(&cookie)).await?;
    ensure!(response.status() == StatusCode::TEMPORARY_REDIRECT);

    let cookie = format!("{TOKEN_KEY}=a.b.c; {USER_KEY}=%7Bbroken");
    let response = get(&bundle.app, "/dashboard/bonds", Some(&cookie)).await?;
    ensure!(response.status() == StatusCode::TEMPORARY_REDIRECT);
    Ok(())
}

#[tokio::test]
async fn well_formed_session_serves_the_app_with_identity_headers() -> Result<()> {
    let bundle = bundle()?;
    let cookie = session_cookie(Role::SuperAdmin)?;
    let response = get(&bundle.app, "/dashboard/settings", Some(&cookie)).await?;

    ensure!(response.status() == StatusCode::OK);
    let headers = response.headers();
    ensure!(headers.get("x-user-id").and_then(|v| v.to_str().ok()) == Some("17"));
    ensure!(headers.get("x-user-email").and_then(|v| v.to_str().ok()) == Some("ops@borabond.com"));
    ensure!(headers.get("x-user-role").and_then(|v| v.to_str().ok()) == Some("SUPER_ADMIN"));
    ensure!(headers.get("x-request-id").is_some());

    let body = to_bytes(response.into_body(), usize::MAX).await?;
    ensure!(body.as_ref() == INDEX.as_bytes());
    Ok(())
}

#[tokio::test]
async fn public_pages_and_assets_are_not_gated() -> Result<()> {
    let bundle = bundle()?;

    let response = get(&bundle.app, "/login", None).await?;
    ensure!(response.status() == StatusCode::OK);
    ensure!(response.headers().get("x-user-id").is_none());

    let response = get(&bundle.app, "/", None).await?;
    ensure!(response.status() == StatusCode::OK);

    let response = get(&bundle.app, "/pkg/web.js", None).await?;
    ensure!(response.status() == StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await?;
    ensure!(body.as_ref() == b"export default 1;");

    let response = get(&bundle.app, "/health", None).await?;
    ensure!(response.status() == StatusCode::OK);
    ensure!(response.headers().get("X-App").is_some());
    Ok(())
}

#[tokio::test]
async fn request_id_is_propagated() -> Result<()> {
    let bundle = bundle()?;
    let request = Request::builder()
        .uri("/health")
        .header("x-request-id", "01HZXJ0000000000000000TEST")
        .body(Body::empty())?;
    let response = bundle.app.clone().oneshot(request).await?;
    ensure!(
        response.headers().get("x-request-id").and_then(|v| v.to_str().ok())
            == Some("01HZXJ0000000000000000TEST")
    );
    Ok(())
}
