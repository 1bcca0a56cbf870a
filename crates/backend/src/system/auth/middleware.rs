use axum::{body::Body, extract::Request, http::StatusCode, middleware::Next, response::Response};

use contracts::system::auth::TokenClaims;

async fn authenticate(req: &Request<Body>) -> Result<TokenClaims, StatusCode> {
    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(StatusCode::UNAUTHORIZED)?;

    super::jwt::validate_token(token)
        .await
        .map_err(|_| StatusCode::UNAUTHORIZED)
}

/// Middleware that requires a valid access token
pub async fn require_auth(mut req: Request<Body>, next: Next) -> Result<Response, StatusCode> {
    let claims = authenticate(&req).await?;

    // Claims travel to handlers through request extensions
    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

/// Middleware that additionally requires the admin flag
pub async fn require_admin(mut req: Request<Body>, next: Next) -> Result<Response, StatusCode> {
    let claims = authenticate(&req).await?;

    if !claims.is_admin {
        return Err(StatusCode::FORBIDDEN);
    }

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}
