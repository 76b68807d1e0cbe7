use axum::http::{
    header::{AUTHORIZATION, COOKIE},
    HeaderMap,
};

/// Cookie that carries the login token for browser clients.
pub const TOKEN_COOKIE: &str = "token";

/// Token presented by a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bearer {
    token: String,
}

impl Bearer {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
    pub fn token(&self) -> &str {
        &self.token
    }
    /// `Authorization: Bearer <token>` wins over the `token` cookie.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        Self::from_authorization(headers).or_else(|| Self::from_cookie(headers))
    }
    fn from_authorization(headers: &HeaderMap) -> Option<Self> {
        let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
        let token = value.strip_prefix("Bearer ")?.trim();
        if token.is_empty() {
            None
        } else {
            Some(Self::new(token))
        }
    }
    fn from_cookie(headers: &HeaderMap) -> Option<Self> {
        headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, value)| *name == TOKEN_COOKIE && !value.is_empty())
            .map(|(_, value)| Self::new(value))
    }
}

/// Pulls the [`Bearer`] out of a `HeaderMap`, answering 401 when there is none.
#[macro_export]
macro_rules! bearer {
    ($headers:expr) => {
        match $crate::libs::headers::Bearer::from_headers($headers) {
            Some(bearer) => bearer,
            None => return Err($crate::Response::token_error("Missing token")),
        }
    };
}

/// `Set-Cookie` value storing `token` for the rest of the session.
pub fn token_cookie(token: &str, max_age_secs: i64) -> String {
    format!("{TOKEN_COOKIE}={token}; HttpOnly; SameSite=Lax; Path=/; Max-Age={max_age_secs}")
}

/// `Set-Cookie` value that drops the login cookie.
pub fn expired_token_cookie() -> String {
    format!("{TOKEN_COOKIE}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0")
}
