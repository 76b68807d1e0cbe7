mod export;
mod insert;
mod lookup;
mod query;

use axum::{
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};

pub use export::{export_referrals, ExportTable, EXPORT_FILENAME};
pub use insert::submit_referral;
pub use lookup::{lookup_referrer, LookupRow};
pub use query::filter_referrals;

use crate::{libs::fold, AppState};

pub fn referral_router() -> Router<AppState> {
    Router::new()
        .route("/submit", post(insert::submit))
        .route("/dashboard", get(query::dashboard))
        .route("/export", get(export::export))
        .route("/lookup", get(lookup::lookup_page).post(lookup::lookup))
}

/// Named string options accepted by the dashboard and the export.
/// An empty value means "no filter".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryOptions {
    pub sort_by: String,
    pub search: String,
    pub location: String,
    pub role: String,
    pub applied_after: String,
    pub start_before: String,
    pub candidate_filter: String,
    pub referrer_filter: String,
    pub status_filter: String,
}

impl QueryOptions {
    /// Copy with the text filters lower-cased. Dates and `sort_by` are kept as given.
    pub fn normalized(&self) -> Self {
        Self {
            sort_by: self.sort_by.clone(),
            search: fold(&self.search),
            location: fold(&self.location),
            role: fold(&self.role),
            applied_after: self.applied_after.clone(),
            start_before: self.start_before.clone(),
            candidate_filter: fold(&self.candidate_filter),
            referrer_filter: fold(&self.referrer_filter),
            status_filter: fold(&self.status_filter),
        }
    }
}

/// Case-insensitive substring test; `needle` must already be lower-case.
fn contains_folded(field: &str, needle: &str) -> bool {
    needle.is_empty() || fold(field).contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_lowercases_text_only() {
        let options = QueryOptions {
            sort_by: "Role".to_string(),
            location: "NY".to_string(),
            status_filter: "Submitted".to_string(),
            applied_after: "2024-01-01".to_string(),
            ..Default::default()
        };
        let n = options.normalized();
        assert_eq!(n.location, "ny");
        assert_eq!(n.status_filter, "submitted");
        assert_eq!(n.sort_by, "Role");
        assert_eq!(n.applied_after, "2024-01-01");
    }

    #[test]
    fn empty_needle_matches_everything() {
        assert!(contains_folded("", ""));
        assert!(contains_folded("New York", "york"));
        assert!(!contains_folded("Boston", "york"));
    }
}
