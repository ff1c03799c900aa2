//! Session credential extraction for axum.
//!
//! This module provides:
//! - `SessionCookie` - The configured cookie name, read from router state
//! - `SessionCredential` - Extractor for the raw session token, if any
//!
//! The extractor never rejects. Whether a token is valid, expired, or unknown
//! is decided by the dispatcher, which treats all three as anonymous.
//!
//! # Token Sources
//!
//! Checked in order, the first non-empty value wins:
//! ```text
//! Authorization: Bearer <token>
//! Cookie: <session_cookie>=<token>
//! ```
//!
//! A `sessionToken` field in the RPC body takes precedence over both; the
//! handler applies that rule.

use std::sync::Arc;

use axum::extract::FromRef;
use axum::http::{header, HeaderMap};

/// Name of the cookie that may carry the session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCookie(Arc<str>);

impl SessionCookie {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

/// Extractor for the session token carried by request headers.
///
/// # Example
///
/// ```ignore
/// async fn my_handler(SessionCredential(token): SessionCredential) -> impl IntoResponse {
///     match token {
///         Some(_) => "Token presented",
///         None => "Anonymous",
///     }
/// }
/// ```
#[derive(Clone, Default)]
pub struct SessionCredential(pub Option<String>);

impl std::fmt::Debug for SessionCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let shown = self.0.as_ref().map(|_| "[REDACTED]");
        f.debug_tuple("SessionCredential").field(&shown).finish()
    }
}

impl<S> axum::extract::FromRequestParts<S> for SessionCredential
where
    S: Send + Sync,
    SessionCookie: FromRef<S>,
{
    type Rejection = std::convert::Infallible;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        let cookie = SessionCookie::from_ref(state);
        Box::pin(async move {
            let token = bearer_token(&parts.headers)
                .or_else(|| cookie_value(&parts.headers, cookie.name()));
            Ok(SessionCredential(token))
        })
    }
}

/// Token from `Authorization: Bearer <token>`, if present and non-empty.
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

/// Value of cookie `name` across all `Cookie` headers, if present and non-empty.
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .flat_map(|h| h.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim().trim_matches('"'))
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
