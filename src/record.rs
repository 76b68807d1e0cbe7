//! The referral row and its fixed column schema.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::libs::time::{format_date, TimeFormat};

/// Column order of the referral table.
pub const FIELDNAMES: [&str; 12] = [
    "candidate_name",
    "referrer_name",
    "role",
    "location",
    "applied_in_ukg",
    "submission_date",
    "date_applied",
    "start_date",
    "notes",
    "status",
    "bonus_30_paid",
    "bonus_90_paid",
];

pub const STATUS_SUBMITTED: &str = "Submitted";
pub const BONUS_NOT_PAID: &str = "No";

/// One row of the referral table. Every column is a string; absent values are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferralRecord {
    pub candidate_name: String,
    pub referrer_name: String,
    pub role: String,
    pub location: String,
    pub applied_in_ukg: String,
    /// `YYYY-MM-DD`, stamped by the server at intake.
    pub submission_date: String,
    pub date_applied: String,
    /// `YYYY-MM-DD`, empty until the hire starts.
    pub start_date: String,
    pub notes: String,
    pub status: String,
    pub bonus_30_paid: String,
    pub bonus_90_paid: String,
}

impl ReferralRecord {
    /// Builds the row stored for an intake submission.
    ///
    /// Unknown keys are ignored and missing ones become empty strings. The
    /// submission date, status, start date and both bonus flags are always
    /// server-assigned, whatever the caller sent.
    pub fn submitted(mut fields: HashMap<String, String>, today: NaiveDate) -> Self {
        let mut take = |name: &str| fields.remove(name).unwrap_or_default();
        Self {
            candidate_name: take("candidate_name"),
            referrer_name: take("referrer_name"),
            role: take("role"),
            location: take("location"),
            applied_in_ukg: take("applied_in_ukg"),
            submission_date: format_date(today, TimeFormat::YYYYMMDD),
            date_applied: take("date_applied"),
            start_date: String::new(),
            notes: take("notes"),
            status: STATUS_SUBMITTED.to_owned(),
            bonus_30_paid: BONUS_NOT_PAID.to_owned(),
            bonus_90_paid: BONUS_NOT_PAID.to_owned(),
        }
    }

    /// Value of the named column, `None` for names outside the schema.
    pub fn get(&self, field: &str) -> Option<&str> {
        let value = match field {
            "candidate_name" => &self.candidate_name,
            "referrer_name" => &self.referrer_name,
            "role" => &self.role,
            "location" => &self.location,
            "applied_in_ukg" => &self.applied_in_ukg,
            "submission_date" => &self.submission_date,
            "date_applied" => &self.date_applied,
            "start_date" => &self.start_date,
            "notes" => &self.notes,
            "status" => &self.status,
            "bonus_30_paid" => &self.bonus_30_paid,
            "bonus_90_paid" => &self.bonus_90_paid,
            _ => return None,
        };
        Some(value.as_str())
    }

    fn get_mut(&mut self, field: &str) -> Option<&mut String> {
        let value = match field {
            "candidate_name" => &mut self.candidate_name,
            "referrer_name" => &mut self.referrer_name,
            "role" => &mut self.role,
            "location" => &mut self.location,
            "applied_in_ukg" => &mut self.applied_in_ukg,
            "submission_date" => &mut self.submission_date,
            "date_applied" => &mut self.date_applied,
            "start_date" => &mut self.start_date,
            "notes" => &mut self.notes,
            "status" => &mut self.status,
            "bonus_30_paid" => &mut self.bonus_30_paid,
            "bonus_90_paid" => &mut self.bonus_90_paid,
            _ => return None,
        };
        Some(value)
    }

    /// Column values in [`FIELDNAMES`] order.
    pub fn values(&self) -> [&str; 12] {
        [
            self.candidate_name.as_str(),
            self.referrer_name.as_str(),
            self.role.as_str(),
            self.location.as_str(),
            self.applied_in_ukg.as_str(),
            self.submission_date.as_str(),
            self.date_applied.as_str(),
            self.start_date.as_str(),
            self.notes.as_str(),
            self.status.as_str(),
            self.bonus_30_paid.as_str(),
            self.bonus_90_paid.as_str(),
        ]
    }

    /// Rebuilds a row from `(column, value)` pairs, matching columns by name.
    /// Columns outside the schema are dropped.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut record = Self::default();
        for (name, value) in pairs {
            if let Some(slot) = record.get_mut(name) {
                *slot = value.to_owned();
            }
        }
        record
    }
}
