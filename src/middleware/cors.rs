use axum::http::{
    header::{AUTHORIZATION, CONTENT_TYPE},
    HeaderValue, Method,
};
use tower_http::cors::{Any, CorsLayer};

use crate::error::{Error, Result};

/// The SPA talks to the API from its own origin with credentials; without a
/// configured origin (local tooling) everything is allowed.
pub fn frontend_cors(origin: Option<&str>) -> Result<CorsLayer> {
    let Some(origin) = origin else {
        return Ok(CorsLayer::new()
            .allow_methods(Any)
            .allow_headers(Any)
            .allow_origin(Any));
    };
    let origin = HeaderValue::from_str(origin)
        .map_err(|_| Error::Config(format!("Invalid FRONTEND_ORIGIN: {}", origin)))?;
    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ]))
}
