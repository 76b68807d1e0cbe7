//! Referral bonus eligibility windows.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{do_if, libs::time::parse_date};

/// Days after the start date before the first bonus is due.
pub const FIRST_BONUS_DAYS: u64 = 30;
/// Days after the start date before the second bonus is due.
pub const SECOND_BONUS_DAYS: u64 = 90;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Flag {
    Yes,
    No,
    #[serde(rename = "Invalid Date")]
    InvalidDate,
}

impl Flag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Flag::Yes => "Yes",
            Flag::No => "No",
            Flag::InvalidDate => "Invalid Date",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Eligibility {
    pub eligible_30: Flag,
    pub eligible_90: Flag,
}

impl Eligibility {
    const NONE: Self = Self {
        eligible_30: Flag::No,
        eligible_90: Flag::No,
    };
    const INVALID: Self = Self {
        eligible_30: Flag::InvalidDate,
        eligible_90: Flag::InvalidDate,
    };
}

/// Bonus flags for a hire that started on `start_date`, as of `today`.
///
/// No start date yields `No`/`No`; an unparseable one yields `Invalid Date`
/// for both flags. Each window is checked on its own.
pub fn check_bonus_eligibility(start_date: Option<&str>, today: NaiveDate) -> Eligibility {
    let start_date = match start_date {
        Some(s) if !s.is_empty() => s,
        _ => return Eligibility::NONE,
    };
    let Some(start) = parse_date(start_date) else {
        return Eligibility::INVALID;
    };
    Eligibility {
        eligible_30: window_flag(start, FIRST_BONUS_DAYS, today),
        eligible_90: window_flag(start, SECOND_BONUS_DAYS, today),
    }
}

fn window_flag(start: NaiveDate, days: u64, today: NaiveDate) -> Flag {
    match start.checked_add_days(Days::new(days)) {
        Some(due) => do_if!(today >= due => Flag::Yes, Flag::No),
        // due date past the calendar's end can never be reached
        None => Flag::No,
    }
}
