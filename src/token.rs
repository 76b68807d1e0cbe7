//! Recruiter login tokens (HS256 JWT).

use std::fmt;

use hmac::{Hmac, Mac};
use jwt::{SignWithKey, VerifyWithKey};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::{libs::headers::Bearer, Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Recruiter username.
    pub sub: String,
    /// Issued at, unix seconds.
    pub iat: i64,
    /// Expires at, unix seconds.
    pub exp: i64,
}

/// HMAC key tokens are signed and verified with.
#[derive(Clone)]
pub struct TokenKey(Hmac<Sha256>);

impl fmt::Debug for TokenKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TokenKey(..)")
    }
}

impl TokenKey {
    /// # Errors
    ///
    /// Returns [`Error::Token`] if the secret cannot key an HMAC.
    pub fn new(secret: &str) -> Result<Self> {
        Hmac::new_from_slice(secret.as_bytes())
            .map(Self)
            .map_err(|e| Error::Token(e.to_string()))
    }
}

pub enum TokenVerification {
    Ok(Claims),
    Expired,
    Error,
}

/// Request-scoped identity of a logged-in recruiter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recruiter {
    pub username: String,
}

/// Signs a token for `sub` valid for `ttl_secs` from `now`.
///
/// # Errors
///
/// Returns [`Error::Token`] if signing fails.
pub fn generate_jwt(key: &TokenKey, sub: &str, now: i64, ttl_secs: i64) -> Result<String> {
    let claims = Claims {
        sub: sub.to_owned(),
        iat: now,
        exp: now + ttl_secs,
    };
    Ok(claims.sign_with_key(&key.0)?)
}

pub fn parse_jwt(key: &TokenKey, bearer: &Bearer, now: i64) -> TokenVerification {
    let claims: Claims = match bearer.token().verify_with_key(&key.0) {
        Ok(claims) => claims,
        Err(_) => return TokenVerification::Error,
    };
    if claims.exp <= now {
        TokenVerification::Expired
    } else {
        TokenVerification::Ok(claims)
    }
}

/// Turns a [`Bearer`] into a [`Recruiter`], answering 401 for bad or stale tokens.
#[macro_export]
macro_rules! parse_jwt_macro {
    ($bearer:expr, $key:expr) => {
        match $crate::token::parse_jwt($key, $bearer, chrono::Utc::now().timestamp()) {
            $crate::token::TokenVerification::Ok(claims) => $crate::token::Recruiter {
                username: claims.sub,
            },
            $crate::token::TokenVerification::Expired => {
                return Err($crate::Response::token_error("Token expired"))
            }
            $crate::token::TokenVerification::Error => {
                return Err($crate::Response::token_error("Invalid token"))
            }
        }
    };
}
