//! Access-token blacklist.
//!
//! Logout cannot shorten a JWT's lifetime, so revoked access tokens are
//! held here until their natural expiry. The auth extractor rejects any
//! blacklisted token with 401.

use crate::pool::{RedisPool, RedisResult};

/// Key prefix for blacklisted access tokens
const BLACKLIST_PREFIX: &str = "token_blacklist:";

/// Redis-backed access-token blacklist
#[derive(Clone)]
pub struct TokenBlacklist {
    pool: RedisPool,
}

impl TokenBlacklist {
    /// Create a new blacklist over the given pool
    #[must_use]
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }

    fn key(token: &str) -> String {
        format!("{BLACKLIST_PREFIX}{token}")
    }

    /// Blacklist a token for `ttl_seconds` (its remaining lifetime).
    ///
    /// A zero TTL means the token is already expired; nothing is stored.
    pub async fn revoke(&self, token: &str, ttl_seconds: u64) -> RedisResult<()> {
        if ttl_seconds == 0 {
            return Ok(());
        }
        self.pool.set(&Self::key(token), &1u8, Some(ttl_seconds)).await?;
        tracing::debug!(ttl_seconds, "Access token blacklisted");
        Ok(())
    }

    /// Whether the token has been revoked
    pub async fn is_revoked(&self, token: &str) -> RedisResult<bool> {
        self.pool.exists(&Self::key(token)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_prefix() {
        assert_eq!(TokenBlacklist::key("tok"), "token_blacklist:tok");
    }
}
