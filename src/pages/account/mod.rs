use axum::{routing::post, Router};

mod login;

use crate::AppState;

pub fn account_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login::user_login))
        .route("/logout", post(login::user_logout))
}
