//! Caller authentication port and the static-token implementation.

use crate::board::{
    domain::{BoardDomainError, OwnerId},
    services::CallerContext,
};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};

/// Resolves a bearer token to a caller.
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Returns the caller behind `token`, or `None` when it is not valid.
    async fn authenticate(&self, token: &str) -> Option<CallerContext>;
}

/// Extracts the token from an `Authorization: Bearer <token>` header value.
#[must_use]
pub fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, rest) = header.trim().split_once(' ')?;
    let token = rest.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

/// Authenticator backed by a fixed token-to-owner table.
#[derive(Debug, Clone, Default)]
pub struct StaticTokenAuthenticator {
    tokens: HashMap<String, OwnerId>,
}

impl StaticTokenAuthenticator {
    /// Creates an authenticator from resolved token entries.
    #[must_use]
    pub fn new(tokens: impl IntoIterator<Item = (String, OwnerId)>) -> Self {
        Self {
            tokens: tokens.into_iter().collect(),
        }
    }

    /// Creates an authenticator from configured `token -> owner uuid` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::InvalidOwnerId`] for the first owner id
    /// that is not a UUID.
    pub fn from_config(tokens: &BTreeMap<String, String>) -> Result<Self, BoardDomainError> {
        let resolved = tokens
            .iter()
            .map(|(token, owner)| Ok((token.clone(), owner.parse::<OwnerId>()?)))
            .collect::<Result<HashMap<_, _>, BoardDomainError>>()?;
        Ok(Self { tokens: resolved })
    }

    /// Returns `true` when no token is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[async_trait]
impl Authenticator for StaticTokenAuthenticator {
    async fn authenticate(&self, token: &str) -> Option<CallerContext> {
        self.tokens.get(token).copied().map(CallerContext::new)
    }
}
