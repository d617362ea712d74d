//! Session stores - refresh tokens and the access-token blacklist

mod refresh_token;
mod token_blacklist;

pub use refresh_token::{RefreshTokenData, RefreshTokenStore};
pub use token_blacklist::TokenBlacklist;
