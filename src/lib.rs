pub mod response;
pub mod token;

pub mod bonus;
pub mod config;
pub mod database;
pub mod error;
pub mod libs;
pub mod logging;
pub mod pages;
pub mod record;

use std::sync::Arc;

use axum::{extract::DefaultBodyLimit, http::Method, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use config::{AuthConfig, Config};
use database::ReferralStore;
pub use error::{Error, Result};
use libs::time::Clock;
pub use response::Response;
use token::TokenKey;

pub type ResponseResult = std::result::Result<Response, Response>;

/// Shared by every handler; holds no per-login state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ReferralStore>,
    pub clock: Arc<dyn Clock>,
    pub auth: Arc<AuthConfig>,
    pub key: TokenKey,
}

impl AppState {
    /// # Errors
    ///
    /// Returns [`Error::Token`] if the configured secret cannot key the token HMAC.
    pub fn new(
        auth: AuthConfig,
        store: Arc<dyn ReferralStore>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        let key = TokenKey::new(&auth.secret_key)?;
        Ok(Self {
            store,
            clock,
            auth: Arc::new(auth),
            key,
        })
    }
}

/// The full service: every page router with its middleware.
pub fn app(state: AppState, config: &Config) -> Router {
    pages::pages_router()
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST])
                .allow_headers(Any),
        )
        .layer(DefaultBodyLimit::max(config.server.body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
