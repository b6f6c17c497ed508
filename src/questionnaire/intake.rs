//! Same-day questionnaire decision.
//!
//! A fixed medical rule table over the submitted symptoms and contact
//! declaration. Evaluated in order, short-circuiting at the first rule
//! that fires; the thresholds come from campus medical staff and are not
//! tunable at runtime.

use std::collections::BTreeMap;

use crate::models::CovidQuestionnaireAnswer;

/// Major symptoms that alone deny a same-day pass.
const SERIOUS_MAJOR_SYMPTOMS: &[&str] = &["fever", "frequentCough", "difficultyBreathing"];

/// Two or more majors of any kind deny the pass.
const MAJOR_LIMIT: usize = 2;
/// Four or more minors deny the pass.
const MINOR_LIMIT: usize = 4;

/// Decide whether a submitted questionnaire passes for the day.
pub fn can_pass(answer: &CovidQuestionnaireAnswer) -> bool {
    let majors = count_reported(&answer.major_symptoms);
    let minors = count_reported(&answer.minor_symptoms);

    if answer.recent_contact.yes {
        return false;
    }
    if SERIOUS_MAJOR_SYMPTOMS
        .iter()
        .any(|symptom| reported(&answer.major_symptoms, symptom))
    {
        return false;
    }
    if majors >= MAJOR_LIMIT {
        return false;
    }
    if minors >= MINOR_LIMIT {
        return false;
    }
    if majors >= 1 && minors >= 1 {
        return false;
    }

    true
}

fn reported(symptoms: &BTreeMap<String, bool>, key: &str) -> bool {
    symptoms.get(key).copied().unwrap_or(false)
}

fn count_reported(symptoms: &BTreeMap<String, bool>) -> usize {
    symptoms.values().filter(|&&present| present).count()
}
