use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

/// One recent-travel declaration. The legacy wire shape is an object with
/// three optional fields of which exactly one must be present, so the
/// domain type is a sum, not three `Option`s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TravelEntry {
    Country(String),
    City(String),
    Date(NaiveDate),
}

#[derive(Serialize, Deserialize, Default)]
struct TravelEntryWire {
    #[serde(skip_serializing_if = "Option::is_none")]
    country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    date: Option<NaiveDate>,
}

impl Serialize for TravelEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut wire = TravelEntryWire::default();
        match self {
            TravelEntry::Country(name) => wire.country = Some(name.clone()),
            TravelEntry::City(name) => wire.city = Some(name.clone()),
            TravelEntry::Date(date) => wire.date = Some(*date),
        }
        wire.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TravelEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = TravelEntryWire::deserialize(deserializer)?;
        match (wire.country, wire.city, wire.date) {
            (Some(name), None, None) => Ok(TravelEntry::Country(name)),
            (None, Some(name), None) => Ok(TravelEntry::City(name)),
            (None, None, Some(date)) => Ok(TravelEntry::Date(date)),
            (None, None, None) => Err(D::Error::custom(
                "travel entry requires one of: country, city, date",
            )),
            _ => Err(D::Error::custom(
                "travel entry fields country/city/date are mutually exclusive",
            )),
        }
    }
}

/// Whether the user was recently near a confirmed case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentContact {
    pub yes: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub when: Option<NaiveDate>,
}

/// Submitted daily questionnaire, as received from the mobile app.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CovidQuestionnaireAnswer {
    #[serde(default)]
    pub countries: Vec<TravelEntry>,
    pub recent_contact: RecentContact,
    pub major_symptoms: BTreeMap<String, bool>,
    pub minor_symptoms: BTreeMap<String, bool>,
}

/// A questionnaire answer as persisted: the submission plus the same-day
/// verdict and server-assigned timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredAnswer {
    pub id: Uuid,
    pub can_pass: bool,
    pub countries: Vec<TravelEntry>,
    pub recent_contact: RecentContact,
    pub major_symptoms: BTreeMap<String, bool>,
    pub minor_symptoms: BTreeMap<String, bool>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The per-user answer record: id is the user id, answers are append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredAnswers {
    pub id: String,
    pub answers: Vec<StoredAnswer>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn travel_entry_country_roundtrip() {
        let entry = TravelEntry::Country("Francia".to_string());
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(json, r#"{"country":"Francia"}"#);
        let back: TravelEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(entry, back);
    }

    #[test]
    fn travel_entry_date_roundtrip() {
        let entry = TravelEntry::Date(NaiveDate::from_ymd_opt(2021, 12, 1).unwrap());
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(json, r#"{"date":"2021-12-01"}"#);
        let back: TravelEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(entry, back);
    }

    #[test]
    fn travel_entry_rejects_empty_object() {
        let err = serde_json::from_str::<TravelEntry>("{}");
        assert!(err.is_err());
    }

    #[test]
    fn travel_entry_rejects_two_fields() {
        let err = serde_json::from_str::<TravelEntry>(r#"{"country":"Francia","city":"Paris"}"#);
        assert!(err.is_err());
    }

    #[test]
    fn answer_deserializes_from_app_payload() {
        let raw = r#"{
            "countries": [{"country": "Francia"}, {"date": "2021-11-20"}],
            "recentContact": {"yes": true, "when": "2021-11-25"},
            "majorSymptoms": {"fever": true, "headache": false},
            "minorSymptoms": {"soreThroat": false}
        }"#;
        let answer: CovidQuestionnaireAnswer = serde_json::from_str(raw).unwrap();
        assert_eq!(answer.countries.len(), 2);
        assert!(answer.recent_contact.yes);
        assert_eq!(answer.major_symptoms["fever"], true);
    }

    #[test]
    fn answer_countries_default_to_empty() {
        let raw = r#"{
            "recentContact": {"yes": false},
            "majorSymptoms": {},
            "minorSymptoms": {}
        }"#;
        let answer: CovidQuestionnaireAnswer = serde_json::from_str(raw).unwrap();
        assert!(answer.countries.is_empty());
        assert!(answer.recent_contact.when.is_none());
    }
}
