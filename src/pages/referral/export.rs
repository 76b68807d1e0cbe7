use std::convert::Infallible;

use axum::{
    body::{Body, Bytes},
    extract::{Query, State},
    http::{
        header::{CONTENT_DISPOSITION, CONTENT_TYPE},
        HeaderMap,
    },
    response::IntoResponse,
};
use chrono::NaiveDate;
use tracing::info;

use super::{contains_folded, QueryOptions};
use crate::{
    bearer,
    database::{csv_writer, ReferralStore},
    libs::{fold, time::parse_date},
    parse_jwt_macro,
    record::{ReferralRecord, FIELDNAMES},
    AppState, Response, Result,
};

pub const EXPORT_FILENAME: &str = "referrals_export.csv";

/// Rows selected for download together with the header row to write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportTable {
    /// Empty when nothing matched.
    pub headers: Vec<&'static str>,
    pub rows: Vec<ReferralRecord>,
}

impl ExportTable {
    /// Encodes the table in the store's CSV dialect. No matches encode to nothing.
    pub fn to_csv(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        if self.headers.is_empty() {
            return Ok(buf);
        }
        {
            let mut writer = csv_writer(&mut buf);
            writer.write_record(&self.headers)?;
            for row in &self.rows {
                writer.write_record(row.values())?;
            }
            writer.flush()?;
        }
        Ok(buf)
    }
}

/// Export selection.
///
/// `search` matches the candidate or the referrer name; `location` and `role`
/// are substrings. `applied_after` bounds `date_applied` and `start_before`
/// bounds `start_date`, both compared as calendar dates. A row with an empty
/// date skips that bound; an unparseable date on either side excludes the row.
pub fn export_referrals(records: Vec<ReferralRecord>, options: &QueryOptions) -> ExportTable {
    let options = options.normalized();
    let rows: Vec<_> = records
        .into_iter()
        .filter(|record| matches_export(record, &options))
        .collect();
    let headers = if rows.is_empty() {
        Vec::new()
    } else {
        FIELDNAMES.to_vec()
    };
    ExportTable { headers, rows }
}

fn matches_export(record: &ReferralRecord, options: &QueryOptions) -> bool {
    let search_hit = fold(&record.candidate_name).contains(&options.search)
        || fold(&record.referrer_name).contains(&options.search);
    search_hit
        && contains_folded(&record.location, &options.location)
        && contains_folded(&record.role, &options.role)
        && within_bound(&record.date_applied, &options.applied_after, |d, b| d >= b)
        && within_bound(&record.start_date, &options.start_before, |d, b| d <= b)
}

fn within_bound(value: &str, bound: &str, keep: impl Fn(NaiveDate, NaiveDate) -> bool) -> bool {
    if bound.is_empty() || value.is_empty() {
        return true;
    }
    match (parse_date(value), parse_date(bound)) {
        (Some(value), Some(bound)) => keep(value, bound),
        _ => false,
    }
}

pub async fn export(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(options): Query<QueryOptions>,
) -> std::result::Result<impl IntoResponse, Response> {
    let bearer = bearer!(&headers);
    let recruiter = parse_jwt_macro!(&bearer, &state.key);
    let table = export_referrals(state.store.scan_all()?, &options);
    info!(
        recruiter = %recruiter.username,
        rows = table.rows.len(),
        "exporting referrals"
    );
    let csv = table.to_csv()?;
    let lines: Vec<std::result::Result<Bytes, Infallible>> = csv
        .split_inclusive(|b| *b == b'\n')
        .map(|line| Ok(Bytes::copy_from_slice(line)))
        .collect();
    let body = Body::from_stream(tokio_stream::iter(lines));
    Ok((
        [
            (CONTENT_TYPE, mime::TEXT_CSV_UTF_8.to_string()),
            (CONTENT_DISPOSITION, format!("attachment; filename={EXPORT_FILENAME}")),
        ],
        body,
    ))
}
