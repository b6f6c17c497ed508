//! Per-user questionnaire answer store.
//!
//! One logical record per user id holding an append-only list of
//! answers; submissions insert, nothing ever updates or deletes.
//! Concurrent submissions by the same user are safe to interleave since
//! every answer carries its own id and timestamps.

use chrono::{DateTime, Local, NaiveDate, Utc};
use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::{StoredAnswer, StoredAnswers};

/// Append one answer to the user's record (creates the record implicitly).
pub fn append_answer(
    conn: &Connection,
    user_id: &str,
    answer: &StoredAnswer,
) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO covid_answers (id, user_id, can_pass, countries, recent_contact,
         major_symptoms, minor_symptoms, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            answer.id.to_string(),
            user_id,
            answer.can_pass as i32,
            serde_json::to_string(&answer.countries)?,
            serde_json::to_string(&answer.recent_contact)?,
            serde_json::to_string(&answer.major_symptoms)?,
            serde_json::to_string(&answer.minor_symptoms)?,
            answer.created_at,
            answer.updated_at,
        ],
    )?;
    Ok(())
}

/// The user's full answer record, oldest first. A user with no
/// submissions gets an empty record, not an error.
pub fn answers_for_user(
    conn: &Connection,
    user_id: &str,
) -> Result<StoredAnswers, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, can_pass, countries, recent_contact, major_symptoms, minor_symptoms,
         created_at, updated_at
         FROM covid_answers WHERE user_id = ?1 ORDER BY created_at ASC",
    )?;

    let rows = stmt.query_map(params![user_id], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, i32>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, String>(3)?,
            row.get::<_, String>(4)?,
            row.get::<_, String>(5)?,
            row.get::<_, DateTime<Utc>>(6)?,
            row.get::<_, DateTime<Utc>>(7)?,
        ))
    })?;

    let mut answers = Vec::new();
    for row in rows {
        let (id, can_pass, countries, contact, majors, minors, created_at, updated_at) = row?;
        answers.push(StoredAnswer {
            id: Uuid::parse_str(&id).unwrap_or_default(),
            can_pass: can_pass != 0,
            countries: serde_json::from_str(&countries)?,
            recent_contact: serde_json::from_str(&contact)?,
            major_symptoms: serde_json::from_str(&majors)?,
            minor_symptoms: serde_json::from_str(&minors)?,
            created_at,
            updated_at,
        });
    }

    Ok(StoredAnswers {
        id: user_id.to_string(),
        answers,
    })
}

/// Answers whose creation date, in server-local time, falls on `day`.
/// Year, month and day-of-month must match; time of day is ignored.
pub fn answers_created_on(
    conn: &Connection,
    user_id: &str,
    day: NaiveDate,
) -> Result<Vec<StoredAnswer>, DatabaseError> {
    let record = answers_for_user(conn, user_id)?;
    Ok(record
        .answers
        .into_iter()
        .filter(|answer| answer.created_at.with_timezone(&Local).date_naive() == day)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::open_memory_database;
    use crate::models::{RecentContact, TravelEntry};
    use chrono::Duration;
    use std::collections::BTreeMap;

    fn stored(can_pass: bool, created_at: DateTime<Utc>) -> StoredAnswer {
        StoredAnswer {
            id: Uuid::new_v4(),
            can_pass,
            countries: vec![TravelEntry::Country("Francia".to_string())],
            recent_contact: RecentContact {
                yes: false,
                when: None,
            },
            major_symptoms: BTreeMap::from([("headache".to_string(), false)]),
            minor_symptoms: BTreeMap::new(),
            created_at,
            updated_at: created_at,
        }
    }

    #[test]
    fn append_then_read_back() {
        let conn = open_memory_database().unwrap();
        let answer = stored(true, Utc::now());

        append_answer(&conn, "1190123", &answer).unwrap();
        let record = answers_for_user(&conn, "1190123").unwrap();

        assert_eq!(record.id, "1190123");
        assert_eq!(record.answers.len(), 1);
        assert_eq!(record.answers[0].id, answer.id);
        assert_eq!(record.answers[0].countries, answer.countries);
        assert!(record.answers[0].can_pass);
    }

    #[test]
    fn unknown_user_gets_empty_record() {
        let conn = open_memory_database().unwrap();
        let record = answers_for_user(&conn, "1190123").unwrap();
        assert!(record.answers.is_empty());
    }

    #[test]
    fn answers_are_isolated_per_user() {
        let conn = open_memory_database().unwrap();
        append_answer(&conn, "1190123", &stored(true, Utc::now())).unwrap();
        append_answer(&conn, "1070456", &stored(false, Utc::now())).unwrap();

        assert_eq!(answers_for_user(&conn, "1190123").unwrap().answers.len(), 1);
        assert_eq!(answers_for_user(&conn, "1070456").unwrap().answers.len(), 1);
    }

    #[test]
    fn answers_keep_append_order() {
        let conn = open_memory_database().unwrap();
        let first = stored(true, Utc::now() - Duration::hours(2));
        let second = stored(false, Utc::now());
        append_answer(&conn, "1190123", &first).unwrap();
        append_answer(&conn, "1190123", &second).unwrap();

        let record = answers_for_user(&conn, "1190123").unwrap();
        assert_eq!(record.answers[0].id, first.id);
        assert_eq!(record.answers[1].id, second.id);
    }

    #[test]
    fn today_filter_excludes_other_days() {
        let conn = open_memory_database().unwrap();
        let now = Utc::now();
        let today_answer = stored(true, now);
        let yesterday = stored(true, now - Duration::days(1));
        let tomorrow = stored(true, now + Duration::days(1));

        append_answer(&conn, "1190123", &today_answer).unwrap();
        append_answer(&conn, "1190123", &yesterday).unwrap();
        append_answer(&conn, "1190123", &tomorrow).unwrap();

        let today = Local::now().date_naive();
        let filtered = answers_created_on(&conn, "1190123", today).unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, today_answer.id);
    }
}
