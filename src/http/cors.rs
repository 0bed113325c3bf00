//! Cross-origin policy, applied once as middleware over the whole router.
//!
//! The decision (`OriginPolicy`) is separate from the header handling
//! (`apply_cors`), so the allow-list can be swapped without touching routes.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    ACCESS_CONTROL_REQUEST_HEADERS, ORIGIN, VARY,
};
use axum::http::{HeaderValue, Method, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

/// Methods advertised to allowed origins on preflight.
pub const ALLOWED_METHODS: &str = "GET, POST, PUT, PATCH, DELETE";

/// Decides whether a request's `Origin` may read the response.
///
/// `None` means the request carried no `Origin` header (same-origin or
/// non-browser clients).
pub trait OriginPolicy: Send + Sync {
    fn allows(&self, origin: Option<&str>) -> bool;
}

/// Exact-match allow-list. Requests without an `Origin` are always allowed.
#[derive(Debug, Clone, Default)]
pub struct AllowList {
    origins: Vec<String>,
}

impl AllowList {
    pub fn new<I, T>(origins: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            origins: origins.into_iter().map(Into::into).collect(),
        }
    }
}

impl OriginPolicy for AllowList {
    fn allows(&self, origin: Option<&str>) -> bool {
        match origin {
            None => true,
            Some(origin) => self.origins.iter().any(|allowed| allowed == origin),
        }
    }
}

/// Middleware: answers `OPTIONS` preflights directly, and echoes allowed
/// origins on every other response. Rejected origins get no CORS headers,
/// but any response to a request with an `Origin` carries `Vary: Origin`.
pub async fn apply_cors(
    State(policy): State<Arc<dyn OriginPolicy>>,
    request: Request,
    next: Next,
) -> Response {
    let origin = request
        .headers()
        .get(ORIGIN)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned());
    let allowed = policy.allows(origin.as_deref());
    if !allowed {
        tracing::debug!(origin = ?origin, path = %request.uri().path(), "origin rejected");
    }

    if request.method() == Method::OPTIONS {
        let requested_headers = request.headers().get(ACCESS_CONTROL_REQUEST_HEADERS).cloned();
        let mut response = StatusCode::OK.into_response();
        if allowed {
            allow_origin(&mut response, origin.as_deref());
            let headers = response.headers_mut();
            headers.insert(
                ACCESS_CONTROL_ALLOW_METHODS,
                HeaderValue::from_static(ALLOWED_METHODS),
            );
            if let Some(requested) = requested_headers {
                headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, requested);
            }
        }
        vary_on_origin(&mut response, origin.as_deref());
        return response;
    }

    let mut response = next.run(request).await;
    if allowed {
        allow_origin(&mut response, origin.as_deref());
    }
    vary_on_origin(&mut response, origin.as_deref());
    response
}

/// Echo the origin back. Without an `Origin` there is nothing to echo.
fn allow_origin(response: &mut Response, origin: Option<&str>) {
    let Some(origin) = origin else {
        return;
    };
    if let Ok(value) = HeaderValue::from_str(origin) {
        response.headers_mut().insert(ACCESS_CONTROL_ALLOW_ORIGIN, value);
    }
}

/// The response depends on `Origin` whenever one was sent, allowed or not.
fn vary_on_origin(response: &mut Response, origin: Option<&str>) {
    if origin.is_some() {
        response.headers_mut().append(VARY, HeaderValue::from_static("Origin"));
    }
}
