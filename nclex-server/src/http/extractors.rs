//! Custom Axum extractors

use std::convert::Infallible;
use std::net::SocketAddr;

use axum::extract::{ConnectInfo, FromRequestParts, Path};
use axum::http::request::Parts;
use axum::http::HeaderMap;

use crate::models::ValidationError;
use super::error::ApiError;

/// Header consulted first when resolving the client address
pub const FORWARDED_FOR: &str = "x-forwarded-for";

/// Fallback when no address can be determined
pub const UNKNOWN_IP: &str = "unknown";

/// Longest address we accept (an IPv6 string with embedded IPv4)
const MAX_IP_LEN: usize = 45;

/// Extract and validate a review id from path
pub struct ReviewId(pub i64);

impl<S> FromRequestParts<S> for ReviewId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::Validation(ValidationError::Empty { field: "id" }))?;

        let id = id.parse::<i64>().map_err(|_| {
            ApiError::Validation(ValidationError::InvalidFormat {
                field: "id",
                reason: "must be an integer",
            })
        })?;

        Ok(Self(id))
    }
}

/// Client address used for view dedup.
///
/// First entry of `X-Forwarded-For`, else the peer address, else `"unknown"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIp(pub String);

impl ClientIp {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn resolve(headers: &HeaderMap, peer: Option<SocketAddr>) -> Self {
        let forwarded = headers
            .get(FORWARDED_FOR)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|ip| !ip.is_empty() && ip.len() <= MAX_IP_LEN);

        match (forwarded, peer) {
            (Some(ip), _) => Self(ip.to_owned()),
            (None, Some(addr)) => Self(addr.ip().to_string()),
            (None, None) => Self(UNKNOWN_IP.to_owned()),
        }
    }
}

impl<S> FromRequestParts<S> for ClientIp
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| *addr);

        Ok(Self::resolve(&parts.headers, peer))
    }
}
