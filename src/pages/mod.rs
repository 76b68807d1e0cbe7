use axum::Router;

mod account;
pub mod referral;

use crate::AppState;

pub use referral::QueryOptions;

pub fn pages_router() -> Router<AppState> {
    account::account_router().merge(referral::referral_router())
}

#[cfg(test)]
mod tests;
