//! Embedded assets of the SentryPeer Web GUI
//!
//! The GUI is compiled to a static bundle by trunk (see
//! `crates/sentrypeer-web-gui/Trunk.toml`). This crate pins where that
//! bundle lands and what its entry document is called, so the daemon side
//! can serve it without knowing anything about the build:
//!
//! - every asset lives under [`OUTPUT_DIR`], relative to this crate
//! - the entry document is [`ENTRY_DOCUMENT`] and is served for `/` and for
//!   every client-side route (any path whose last segment has no extension)
//! - asset URLs are rooted at [`PUBLIC_URL`]
//!
//! With the `axum` feature, [`router`] serves the bundle with the same
//! security headers the daemon's HTTP API uses.
//!
//! ## Security Considerations
//!
//! - Static assets are compiled into the binary (no external dependencies)
//! - Content Security Policy prevents XSS attacks
//! - X-Content-Type-Options prevents MIME sniffing
//! - X-Frame-Options prevents clickjacking

use std::borrow::Cow;

use rust_embed::RustEmbed;

/// Directory (relative to this crate) the bundle is written to
pub const OUTPUT_DIR: &str = "http_static";

/// File name of the bundle's entry document
pub const ENTRY_DOCUMENT: &str = "http_index_route.html";

/// URL prefix the bundle's asset references are rooted at
pub const PUBLIC_URL: &str = "/";

/// Cache policy for the entry document
pub const CACHE_NO_STORE: &str = "no-cache, no-store, must-revalidate";

/// Cache policy for fingerprinted assets
pub const CACHE_IMMUTABLE: &str = "public, max-age=31536000, immutable";

#[derive(RustEmbed)]
#[folder = "http_static/"]
#[allow_missing = true]
struct BundleAssets;

/// A bundle file ready to be served
#[derive(Debug, Clone)]
pub struct Asset {
    /// Path inside the bundle
    pub path: String,
    pub data: Cow<'static, [u8]>,
    pub content_type: String,
    pub cache_control: &'static str,
}

/// Map a request path to a file inside the bundle.
///
/// The root and every extension-less path resolve to the entry document so
/// client-side routes survive a reload.
pub fn resolve_path(request_path: &str) -> &str {
    let path = request_path.trim_start_matches('/');
    let last_segment = path.rsplit('/').next().unwrap_or_default();
    if path.is_empty() || !last_segment.contains('.') {
        ENTRY_DOCUMENT
    } else {
        path
    }
}

/// HTML is never cached; everything else carries a content hash
pub fn cache_control(path: &str) -> &'static str {
    if path.ends_with(".html") {
        CACHE_NO_STORE
    } else {
        CACHE_IMMUTABLE
    }
}

/// Look up the asset for a request path
pub fn get(request_path: &str) -> Option<Asset> {
    let path = resolve_path(request_path);
    match BundleAssets::get(path) {
        Some(content) => Some(Asset {
            path: path.to_string(),
            data: content.data,
            content_type: mime_guess::from_path(path)
                .first_or_octet_stream()
                .to_string(),
            cache_control: cache_control(path),
        }),
        None => {
            tracing::debug!(request_path, resolved = path, "asset not in bundle");
            None
        }
    }
}

/// Whether a built bundle was embedded
pub fn has_entry_document() -> bool {
    BundleAssets::get(ENTRY_DOCUMENT).is_some()
}

/// Paths of every embedded file
pub fn files() -> impl Iterator<Item = Cow<'static, str>> {
    BundleAssets::iter()
}

#[cfg(feature = "axum")]
pub use server::router;

#[cfg(feature = "axum")]
mod server {
    use axum::{
        body::Body,
        http::{header, HeaderValue, Request, Response, StatusCode, Uri},
        middleware::{self, Next},
        Router,
    };

    /// Router serving the bundle as a catch-all, with security headers
    pub fn router() -> Router {
        Router::new()
            .fallback(static_handler)
            .layer(middleware::from_fn(security_headers_middleware))
    }

    async fn security_headers_middleware(request: Request<Body>, next: Next) -> Response<Body> {
        let mut response = next.run(request).await;
        let headers = response.headers_mut();

        headers.insert(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        );
        headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));

        // WASM instantiation needs 'wasm-unsafe-eval'; the API may live on
        // another origin when api-url is injected
        headers.insert(
            header::CONTENT_SECURITY_POLICY,
            HeaderValue::from_static(
                "default-src 'self'; \
                 script-src 'self' 'wasm-unsafe-eval'; \
                 style-src 'self' 'unsafe-inline'; \
                 img-src 'self' data:; \
                 connect-src *; \
                 font-src 'self'; \
                 frame-ancestors 'none'",
            ),
        );
        headers.insert(
            header::REFERRER_POLICY,
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        );
        headers.insert(
            "Permissions-Policy",
            HeaderValue::from_static("geolocation=(), microphone=(), camera=()"),
        );

        response
    }

    async fn static_handler(uri: Uri) -> Response<Body> {
        match super::get(uri.path()) {
            Some(asset) => Response::builder()
                .status(StatusCode::OK)
                .header(header::CONTENT_TYPE, asset.content_type)
                .header(header::CACHE_CONTROL, asset.cache_control)
                .body(Body::from(asset.data.into_owned()))
                .unwrap_or_else(|_| {
                    let mut resp = Response::new(Body::from("Internal Server Error"));
                    *resp.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
                    resp
                }),
            None => {
                let mut resp = Response::new(Body::from("Not Found"));
                *resp.status_mut() = StatusCode::NOT_FOUND;
                resp.headers_mut().insert(
                    header::CONTENT_TYPE,
                    HeaderValue::from_static("text/plain"),
                );
                resp
            }
        }
    }
}
