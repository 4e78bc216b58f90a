//! Caller identity resolution.
//!
//! Sessions are owned by the layer in front of this service. By the time a
//! request reaches us the session has been resolved to a user id and
//! forwarded in a trusted header; [`HeaderIdentity`] reads it back.

use crate::error::{PostboardError, Result};
use crate::model::UserId;
use axum::http::{HeaderMap, HeaderName};

/// Authenticated caller attached to a GraphQL request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserId,
}

impl Identity {
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }
}

pub trait IdentityProvider: Send + Sync {
    /// Resolves the caller from request headers; `None` means anonymous.
    fn identify(&self, headers: &HeaderMap) -> Option<Identity>;
}

pub struct HeaderIdentity {
    header: HeaderName,
}

impl HeaderIdentity {
    pub fn new(header: &str) -> Result<Self> {
        let header = HeaderName::from_bytes(header.as_bytes()).map_err(|e| {
            PostboardError::Config(format!("invalid identity header '{}': {}", header, e))
        })?;
        Ok(Self { header })
    }
}

impl IdentityProvider for HeaderIdentity {
    fn identify(&self, headers: &HeaderMap) -> Option<Identity> {
        let value = headers.get(&self.header)?.to_str().ok()?;
        match value.trim().parse::<UserId>() {
            Ok(user_id) => Some(Identity::new(user_id)),
            Err(_) => {
                tracing::debug!(header = %self.header, "ignoring malformed identity header");
                None
            }
        }
    }
}
