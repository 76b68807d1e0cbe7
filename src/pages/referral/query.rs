use axum::{
    extract::{Query, State},
    http::HeaderMap,
};
use serde_json::json;
use tracing::debug;

use super::{contains_folded, QueryOptions};
use crate::{
    bearer, database::ReferralStore, libs::fold, parse_jwt_macro, record::ReferralRecord,
    AppState, Response, ResponseResult,
};

/// Dashboard view of the store.
///
/// Text filters are case-insensitive substrings except `status_filter`, which
/// must match the whole status. Date bounds compare the raw `YYYY-MM-DD` text
/// and are skipped for rows whose date is empty. Sorting is ascending by the
/// named column and is skipped for unknown columns.
pub fn filter_referrals(
    records: Vec<ReferralRecord>,
    options: &QueryOptions,
) -> Vec<ReferralRecord> {
    let options = options.normalized();
    let mut referrals: Vec<_> = records
        .into_iter()
        .filter(|record| matches_dashboard(record, &options))
        .collect();
    let sort_by = options.sort_by.as_str();
    if !sort_by.is_empty() && referrals.first().is_some_and(|r| r.get(sort_by).is_some()) {
        referrals.sort_by(|a, b| a.get(sort_by).cmp(&b.get(sort_by)));
    }
    referrals
}

fn matches_dashboard(record: &ReferralRecord, options: &QueryOptions) -> bool {
    if !contains_folded(&record.location, &options.location)
        || !contains_folded(&record.role, &options.role)
        || !contains_folded(&record.candidate_name, &options.candidate_filter)
        || !contains_folded(&record.referrer_name, &options.referrer_filter)
    {
        return false;
    }
    if !options.status_filter.is_empty() && fold(&record.status) != options.status_filter {
        return false;
    }
    if !options.applied_after.is_empty()
        && !record.submission_date.is_empty()
        && record.submission_date < options.applied_after
    {
        return false;
    }
    if !options.start_before.is_empty()
        && !record.start_date.is_empty()
        && record.start_date > options.start_before
    {
        return false;
    }
    true
}

pub async fn dashboard(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(options): Query<QueryOptions>,
) -> ResponseResult {
    let bearer = bearer!(&headers);
    let recruiter = parse_jwt_macro!(&bearer, &state.key);
    let referrals = filter_referrals(state.store.scan_all()?, &options);
    debug!(
        recruiter = %recruiter.username,
        rows = referrals.len(),
        "dashboard query"
    );
    Ok(Response::ok(json!({
        "referrals": referrals,
        "filters": options.normalized(),
    })))
}
