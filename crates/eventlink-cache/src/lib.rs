//! # eventlink-cache
//!
//! Redis-backed stores: connection pool, refresh-token sessions, and
//! the access-token blacklist used for logout.

pub mod pool;
pub mod session;

pub use pool::{create_shared_pool, RedisPool, RedisPoolConfig, RedisPoolError, RedisResult, SharedRedisPool};
pub use session::{RefreshTokenData, RefreshTokenStore, TokenBlacklist};
