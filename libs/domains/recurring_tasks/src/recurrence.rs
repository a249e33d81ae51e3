//! Next-occurrence arithmetic for recurring tasks.
//!
//! Everything here works on calendar days: callers strip time-of-day before
//! handing dates in. The functions are pure, so the same rule and reference
//! date always yield the same answer.
//!
//! Month and year steps clamp to the last valid day of the target month
//! (Jan 31 + 1 month = Feb 29 in a leap year). Each candidate is computed from
//! the anchor rather than from the previous candidate, so a clamped month does
//! not drag later occurrences earlier.

use chrono::{Datelike, Days, Months, NaiveDate};

use crate::models::{RecurrenceRule, RecurrenceUnit, Weekday};

/// Upper bound on the day-by-day walk for weekly rules
pub const WEEKLY_SCAN_LIMIT: u32 = 366;

/// Next date strictly after `reference` on which the rule fires.
///
/// Returns `None` when the series is exhausted, when a weekly rule has no
/// weekdays, when the weekly scan finds nothing within [`WEEKLY_SCAN_LIMIT`]
/// days, or when the arithmetic leaves chrono's representable range.
pub fn next_occurrence(rule: &RecurrenceRule, reference: NaiveDate) -> Option<NaiveDate> {
    if rule.is_exhausted() {
        return None;
    }

    let anchor = rule.anchor_date();
    let interval = rule.interval();

    match rule.unit() {
        RecurrenceUnit::Day => {
            let step = u64::from(interval);
            let first = skip_ahead(days_between(anchor, reference), step);
            first_after(reference, first, |k| {
                anchor.checked_add_days(Days::new(k.checked_mul(step)?))
            })
        }
        RecurrenceUnit::Month => step_months(anchor, reference, u64::from(interval)),
        RecurrenceUnit::Year => step_months(anchor, reference, u64::from(interval) * 12),
        RecurrenceUnit::Week => next_weekly(rule, reference),
    }
}

fn step_months(anchor: NaiveDate, reference: NaiveDate, step: u64) -> Option<NaiveDate> {
    let first = skip_ahead(months_between(anchor, reference), step);
    first_after(reference, first, |k| {
        let months = u32::try_from(k.checked_mul(step)?).ok()?;
        anchor.checked_add_months(Months::new(months))
    })
}

/// Walk k = first, first + 1, ... until the k-th candidate passes `reference`.
///
/// Candidates must be strictly increasing in k; every k below `first` must
/// land on or before `reference`.
fn first_after<F>(reference: NaiveDate, first: u64, nth: F) -> Option<NaiveDate>
where
    F: Fn(u64) -> Option<NaiveDate>,
{
    let mut k = first;
    loop {
        let candidate = nth(k)?;
        if candidate > reference {
            return Some(candidate);
        }
        k = k.checked_add(1)?;
    }
}

/// Number of whole steps that certainly do not pass the reference
fn skip_ahead(units_between: i64, step: u64) -> u64 {
    u64::try_from(units_between).map_or(0, |units| units / step)
}

fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

fn months_between(from: NaiveDate, to: NaiveDate) -> i64 {
    i64::from(to.year() - from.year()) * 12 + i64::from(to.month()) - i64::from(from.month())
}

fn next_weekly(rule: &RecurrenceRule, reference: NaiveDate) -> Option<NaiveDate> {
    if rule.weekdays().is_empty() {
        return None;
    }

    // Weeks end on Saturday; with interval > 1 the walk jumps over the idle weeks
    let idle_weeks = Days::new(u64::from(rule.interval() - 1) * 7);
    let mut candidate = rule.anchor_date();

    for _ in 0..WEEKLY_SCAN_LIMIT {
        if candidate > reference && rule.weekdays().contains(&Weekday::from(candidate.weekday())) {
            return Some(candidate);
        }

        if candidate.weekday() == chrono::Weekday::Sat && rule.interval() > 1 {
            candidate = candidate.checked_add_days(idle_weeks)?;
        }
        candidate = candidate.succ_opt()?;
    }

    None
}
