//! Campus-access eligibility evaluator.
//!
//! Pure over its inputs plus a caller-supplied "today": five independent
//! rule predicates, a NOR verdict, and a single dominant reason resolved
//! by a fixed priority order.

use chrono::{Duration, NaiveDate};

use crate::models::{
    CovidInformation, CovidReason, CovidValidation, CovidValidations, Residence,
};
use crate::questionnaire::qr;

/// Day windows for each restriction. These are policy values, not
/// algorithmic constants, so they are injectable.
#[derive(Debug, Clone, Copy)]
pub struct DayThresholds {
    pub arrival_internal: i64,
    pub arrival_external: i64,
    pub suspicion: i64,
    pub covid: i64,
}

impl Default for DayThresholds {
    fn default() -> Self {
        Self {
            arrival_internal: 5,
            arrival_external: 7,
            suspicion: 7,
            covid: 14,
        }
    }
}

/// Evaluates a declaration snapshot into a [`CovidValidation`] verdict.
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    thresholds: DayThresholds,
}

impl Evaluator {
    pub fn new(thresholds: DayThresholds) -> Self {
        Self { thresholds }
    }

    /// Compute the full verdict for one user.
    ///
    /// `today` is date-only; time of day never participates. Callers pass
    /// the wall-clock date in production and a fixed date in tests.
    pub fn evaluate(
        &self,
        info: &CovidInformation,
        has_responsive_letter: bool,
        residence: Residence,
        user_id: &str,
        today: NaiveDate,
    ) -> CovidValidation {
        let validations = CovidValidations {
            recent_arrival: self.recent_arrival(info, residence, today),
            is_suspect: self.is_suspect(info, today),
            have_covid: self.have_covid(info, today),
            is_in_quarantine: is_in_quarantine(info, today),
            no_responsive_letter: !has_responsive_letter,
        };

        let allow_access = !(validations.recent_arrival
            || validations.is_suspect
            || validations.have_covid
            || validations.is_in_quarantine
            || validations.no_responsive_letter);

        CovidValidation {
            allow_access,
            reason: reason_for(&validations),
            qr_url: qr::access_qr_url(user_id, allow_access, residence),
            validations,
            used_data: info.clone(),
        }
    }

    /// Arrived fewer than N days ago, N chosen by residence. Internal
    /// students get the shorter window; unknown residence falls to the
    /// external one.
    fn recent_arrival(
        &self,
        info: &CovidInformation,
        residence: Residence,
        today: NaiveDate,
    ) -> bool {
        let window = match residence {
            Residence::Internal => self.thresholds.arrival_internal,
            Residence::External | Residence::Unknown => self.thresholds.arrival_external,
        };
        info.arrival_date
            .map_or(false, |arrival| within_window(arrival, window, today))
    }

    /// Confirmed positive and fewer than 14 days since the start date.
    /// No start date means the restriction holds indefinitely.
    fn have_covid(&self, info: &CovidInformation, today: NaiveDate) -> bool {
        info.have_covid
            && info
                .start_covid_date
                .map_or(true, |start| within_window(start, self.thresholds.covid, today))
    }

    /// Flagged as a possible case and fewer than 7 days since the start
    /// date. No start date means the restriction holds indefinitely.
    fn is_suspect(&self, info: &CovidInformation, today: NaiveDate) -> bool {
        info.is_suspect
            && info
                .start_suspicion_date
                .map_or(true, |start| within_window(start, self.thresholds.suspicion, today))
    }
}

/// In quarantine with no end date, or an end date of today or later.
fn is_in_quarantine(info: &CovidInformation, today: NaiveDate) -> bool {
    info.is_in_quarantine && info.quarantine_end_date.map_or(true, |end| end >= today)
}

/// Fewer than `days` days have elapsed since `start`: strict comparison,
/// so the restriction lifts the day the window closes.
fn within_window(start: NaiveDate, days: i64, today: NaiveDate) -> bool {
    today < start + Duration::days(days)
}

/// Resolve the single surfaced cause. The list is ordered by priority and
/// scanned top to bottom; `validations` still carries the full picture
/// when several rules fire at once.
pub fn reason_for(validations: &CovidValidations) -> CovidReason {
    let ordered = [
        (validations.no_responsive_letter, CovidReason::NoResponsiveLetter),
        (validations.is_in_quarantine, CovidReason::IsInQuarantine),
        (validations.have_covid, CovidReason::HaveCovid),
        (validations.is_suspect, CovidReason::IsSuspect),
        (validations.recent_arrival, CovidReason::RecentArrival),
    ];

    ordered
        .into_iter()
        .find_map(|(fired, reason)| fired.then_some(reason))
        .unwrap_or(CovidReason::None)
}
