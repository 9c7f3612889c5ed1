use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};

/// The API only ever returns JSON, so nothing may be loaded or framed from it.
const CONTENT_SECURITY_POLICY: &str = "default-src 'none'; frame-ancestors 'none'";

/// Security headers middleware
///
/// Adds to every response:
/// - X-Content-Type-Options: nosniff
/// - X-Frame-Options: DENY
/// - Content-Security-Policy
/// - Strict-Transport-Security, when enabled in [`SecurityHeadersConfig`]
pub async fn security_headers_middleware(request: Request, next: Next) -> Response {
    let security_config = request.extensions().get::<SecurityHeadersConfig>().cloned();

    let response = next.run(request).await;
    let (mut parts, body) = response.into_parts();

    parts
        .headers
        .insert("X-Content-Type-Options", HeaderValue::from_static("nosniff"));
    parts
        .headers
        .insert("X-Frame-Options", HeaderValue::from_static("DENY"));
    parts.headers.insert(
        "Content-Security-Policy",
        HeaderValue::from_static(CONTENT_SECURITY_POLICY),
    );

    if let Some(config) = security_config.filter(|c| c.enable_hsts) {
        let hsts_value = format!("max-age={}; includeSubDomains", config.hsts_max_age);
        if let Ok(value) = HeaderValue::from_str(&hsts_value) {
            parts.headers.insert("Strict-Transport-Security", value);
        }
    }

    Response::from_parts(parts, body)
}

/// Configuration for security headers
#[derive(Clone, Debug)]
pub struct SecurityHeadersConfig {
    pub enable_hsts: bool,
    /// HSTS max-age in seconds
    pub hsts_max_age: u64,
}

impl SecurityHeadersConfig {
    pub fn new(enable_hsts: bool, hsts_max_age: u64) -> Self {
        Self {
            enable_hsts,
            hsts_max_age,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, middleware, routing::get, Router};
    use tower::util::ServiceExt;

    fn app(config: Option<SecurityHeadersConfig>) -> Router {
        Router::new()
            .route("/test", get(|| async { "OK" }))
            .layer(middleware::from_fn(move |mut req: Request<Body>, next: Next| {
                let config = config.clone();
                async move {
                    if let Some(config) = config {
                        req.extensions_mut().insert(config);
                    }
                    security_headers_middleware(req, next).await
                }
            }))
    }

    async fn get_test(app: Router) -> Response {
        let request = Request::builder().uri("/test").body(Body::empty()).unwrap();
        app.oneshot(request).await.unwrap()
    }

    #[tokio::test]
    async fn test_basic_headers_present() {
        let response = get_test(app(None)).await;

        assert_eq!(response.headers().get("X-Content-Type-Options").unwrap(), "nosniff");
        assert_eq!(response.headers().get("X-Frame-Options").unwrap(), "DENY");
        assert_eq!(
            response.headers().get("Content-Security-Policy").unwrap(),
            CONTENT_SECURITY_POLICY
        );
        assert!(!response.headers().contains_key("Strict-Transport-Security"));
    }

    #[tokio::test]
    async fn test_hsts_disabled() {
        let response = get_test(app(Some(SecurityHeadersConfig::new(false, 31536000)))).await;
        assert!(!response.headers().contains_key("Strict-Transport-Security"));
    }

    #[tokio::test]
    async fn test_hsts_enabled_uses_max_age() {
        let response = get_test(app(Some(SecurityHeadersConfig::new(true, 86400)))).await;

        let hsts = response
            .headers()
            .get("Strict-Transport-Security")
            .unwrap()
            .to_str()
            .unwrap();
        assert_eq!(hsts, "max-age=86400; includeSubDomains");
    }
}
