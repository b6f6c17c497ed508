use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Per-user COVID declaration snapshot held by the academic gateway.
///
/// A true flag with an absent date means the condition holds indefinitely.
/// The zero value (all flags false, all dates absent) doubles as the
/// fallback when the upstream read fails.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CovidInformation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrival_date: Option<NaiveDate>,
    pub is_vaccinated: bool,
    pub have_covid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_covid_date: Option<NaiveDate>,
    pub is_suspect: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_suspicion_date: Option<NaiveDate>,
    pub is_in_quarantine: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quarantine_end_date: Option<NaiveDate>,
}

/// Outcome of each access rule, independently reported so clients see the
/// full picture even though `reason` surfaces a single cause.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CovidValidations {
    pub recent_arrival: bool,
    pub is_suspect: bool,
    pub have_covid: bool,
    pub is_in_quarantine: bool,
    pub no_responsive_letter: bool,
}

/// Dominant cause surfaced with a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CovidReason {
    RecentArrival,
    IsSuspect,
    HaveCovid,
    IsInQuarantine,
    NoResponsiveLetter,
    None,
}

/// Full eligibility verdict returned to the mobile app. Computed per
/// request, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CovidValidation {
    pub allow_access: bool,
    pub reason: CovidReason,
    pub qr_url: String,
    pub validations: CovidValidations,
    /// Echo of the declaration the verdict was computed from.
    pub used_data: CovidInformation,
}

/// Whether a student lives on campus. Affects the recent-arrival window
/// and the QR color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Residence {
    Internal,
    External,
    Unknown,
}

impl Residence {
    /// Map the gateway's `residencia` field. Unrecognized values fall to
    /// `Unknown`, which the evaluator treats like `External`.
    pub fn from_upstream(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "INTERNO" | "INTERNA" | "I" => Residence::Internal,
            "EXTERNO" | "EXTERNA" | "E" => Residence::External,
            _ => Residence::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reason_serializes_as_camel_case() {
        let json = serde_json::to_string(&CovidReason::NoResponsiveLetter).unwrap();
        assert_eq!(json, "\"noResponsiveLetter\"");
        let json = serde_json::to_string(&CovidReason::None).unwrap();
        assert_eq!(json, "\"none\"");
    }

    #[test]
    fn information_zero_value_has_no_dates() {
        let info = CovidInformation::default();
        assert!(info.arrival_date.is_none());
        assert!(!info.have_covid);
        let json = serde_json::to_value(&info).unwrap();
        // Absent dates are omitted from the wire shape
        assert!(json.get("arrivalDate").is_none());
        assert_eq!(json["haveCovid"], false);
    }

    #[test]
    fn information_roundtrip_with_dates() {
        let info = CovidInformation {
            arrival_date: NaiveDate::from_ymd_opt(2021, 9, 20),
            is_in_quarantine: true,
            ..Default::default()
        };
        let json = serde_json::to_string(&info).unwrap();
        let back: CovidInformation = serde_json::from_str(&json).unwrap();
        assert_eq!(info, back);
    }

    #[test]
    fn residence_from_upstream_values() {
        assert_eq!(Residence::from_upstream("INTERNO"), Residence::Internal);
        assert_eq!(Residence::from_upstream("interna"), Residence::Internal);
        assert_eq!(Residence::from_upstream("EXTERNO"), Residence::External);
        assert_eq!(Residence::from_upstream("E"), Residence::External);
        assert_eq!(Residence::from_upstream(""), Residence::Unknown);
        assert_eq!(Residence::from_upstream("DESCONOCIDO"), Residence::Unknown);
    }
}
