use std::collections::HashMap;

use axum::{extract::State, Form};
use serde_json::json;
use tracing::info;

use crate::{
    database::ReferralStore, libs::time::Clock, record::ReferralRecord, AppState, Response,
    ResponseResult, Result,
};

/// Normalizes an intake submission and appends it to the store.
///
/// Nothing is validated: absent fields are stored empty.
pub fn submit_referral(
    store: &dyn ReferralStore,
    clock: &dyn Clock,
    fields: HashMap<String, String>,
) -> Result<ReferralRecord> {
    let record = ReferralRecord::submitted(fields, clock.today());
    store.append(&record)?;
    Ok(record)
}

/// Collapses repeated form fields, keeping the first value sent.
fn first_values(pairs: Vec<(String, String)>) -> HashMap<String, String> {
    let mut fields = HashMap::with_capacity(pairs.len());
    for (name, value) in pairs {
        fields.entry(name).or_insert(value);
    }
    fields
}

pub async fn submit(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> ResponseResult {
    let fields = first_values(pairs);
    let record = submit_referral(state.store.as_ref(), state.clock.as_ref(), fields)?;
    info!(
        candidate = %record.candidate_name,
        referrer = %record.referrer_name,
        "referral submitted"
    );
    Ok(Response::ok(json!(record)))
}
