use axum::{
    extract::State,
    http::header::SET_COOKIE,
    response::IntoResponse,
    Form,
};
use serde_json::json;
use tracing::{info, warn};

use crate::{
    libs::headers::{expired_token_cookie, token_cookie},
    token::generate_jwt,
    AppState, Response,
};

#[derive(serde::Deserialize, Default)]
#[serde(default)]
pub struct LoginID {
    username: String,
    password: String,
}

pub async fn user_login(
    State(state): State<AppState>,
    Form(user): Form<LoginID>,
) -> Result<impl IntoResponse, Response> {
    if user.username != state.auth.username || user.password != state.auth.password {
        warn!("rejected login for {:?}", user.username);
        return Err(Response::wrong_password());
    }
    let ttl = state.auth.token_ttl_hours * 3600;
    let token = generate_jwt(
        &state.key,
        &user.username,
        chrono::Utc::now().timestamp(),
        ttl,
    )?;
    info!("recruiter {} logged in", user.username);
    Ok((
        [(SET_COOKIE, token_cookie(&token, ttl))],
        Response::ok(json!({ "token": token })),
    ))
}

pub async fn user_logout() -> impl IntoResponse {
    ([(SET_COOKIE, expired_token_cookie())], Response::empty())
}
