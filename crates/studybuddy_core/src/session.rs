//! Session identity resolution.
//!
//! # Responsibility
//! - Turn an optional auth token into the user id that owns a collection.
//! - Fall back to a shared anonymous id when no token is configured.
//!
//! # Invariants
//! - A configured token that fails verification never degrades to the
//!   anonymous user; the session halts instead.

use crate::model::collection::{CollectionPath, CollectionPathError};
use log::{error, info, warn};
use std::collections::HashMap;
use thiserror::Error;

/// User id used when no auth token is configured.
pub const ANONYMOUS_USER_ID: &str = "studybuddy-anon-user";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),
    #[error(transparent)]
    InvalidCollection(#[from] CollectionPathError),
}

/// Verifies an identity token issued by the identity provider.
pub trait IdentityVerifier {
    /// Returns the verified user id for `token`.
    fn verify(&self, token: &str) -> Result<String, String>;
}

/// Token table verifier for local development and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticIdentityVerifier {
    tokens: HashMap<String, String>,
}

impl StaticIdentityVerifier {
    pub fn new(tokens: HashMap<String, String>) -> Self {
        Self { tokens }
    }
}

impl IdentityVerifier for StaticIdentityVerifier {
    fn verify(&self, token: &str) -> Result<String, String> {
        self.tokens
            .get(token)
            .cloned()
            .ok_or_else(|| "token is not recognized".to_string())
    }
}

/// Resolved identity for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    collection: CollectionPath,
    anonymous: bool,
}

impl Session {
    pub fn user_id(&self) -> &str {
        self.collection.user_id()
    }

    pub fn is_anonymous(&self) -> bool {
        self.anonymous
    }

    /// Collection holding this user's notes.
    pub fn collection_path(&self) -> &CollectionPath {
        &self.collection
    }
}

/// Resolves the session user from an optional token.
///
/// # Errors
/// - `AuthenticationFailed` when a non-blank token does not verify.
/// - `InvalidCollection` when `app_id` or the verified uid cannot address a
///   collection.
pub fn resolve_session(
    app_id: &str,
    token: Option<&str>,
    verifier: &dyn IdentityVerifier,
) -> Result<Session, SessionError> {
    let token = token.map(str::trim).filter(|value| !value.is_empty());
    let Some(token) = token else {
        warn!("event=session_resolve module=session status=anonymous reason=no_token");
        return Ok(Session {
            collection: CollectionPath::new(app_id, ANONYMOUS_USER_ID)?,
            anonymous: true,
        });
    };

    let user_id = verifier.verify(token).map_err(|reason| {
        error!("event=session_resolve module=session status=error error={reason}");
        SessionError::AuthenticationFailed(reason)
    })?;
    info!("event=session_resolve module=session status=ok anonymous=false");
    Ok(Session {
        collection: CollectionPath::new(app_id, &user_id)?,
        anonymous: false,
    })
}
