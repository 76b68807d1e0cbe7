use axum::{extract::State, Form};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use crate::{
    bonus::{check_bonus_eligibility, Eligibility},
    database::ReferralStore,
    libs::{fold, time::Clock},
    record::ReferralRecord,
    AppState, Response, ResponseResult,
};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LookupForm {
    referrer_name: String,
}

/// A stored row with its bonus flags as of the lookup date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LookupRow {
    #[serde(flatten)]
    pub record: ReferralRecord,
    #[serde(flatten)]
    pub eligibility: Eligibility,
}

/// Every row whose referrer contains `query`, ignoring case and surrounding
/// whitespace, in store order. An empty query matches every row.
pub fn lookup_referrer(
    records: Vec<ReferralRecord>,
    query: &str,
    today: NaiveDate,
) -> Vec<LookupRow> {
    let needle = fold(query.trim());
    records
        .into_iter()
        .filter(|record| {
            let referrer = fold(record.referrer_name.trim());
            debug!("checking against: {referrer}");
            referrer.contains(&needle)
        })
        .map(|record| {
            let eligibility = check_bonus_eligibility(Some(record.start_date.as_str()), today);
            LookupRow {
                record,
                eligibility,
            }
        })
        .collect()
}

/// Lookup page before a name is submitted.
pub async fn lookup_page() -> Response {
    Response::ok(json!({ "results": [] }))
}

pub async fn lookup(
    State(state): State<AppState>,
    Form(form): Form<LookupForm>,
) -> ResponseResult {
    let results = lookup_referrer(
        state.store.scan_all()?,
        &form.referrer_name,
        state.clock.today(),
    );
    Ok(Response::ok(json!({ "results": results })))
}
