//! Next-question selection for quiz play
//!
//! The quiz is stateless on the server: every request carries the category being played
//! and the ids already shown. Selection is uniform over every question that matches the
//! category and has not been shown yet. Running out of questions is an expected outcome
//! ([`NextQuestion::Exhausted`]), serialized as `false`.

use crate::question::Question;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::collections::HashSet;

/// Quiz play request body
#[derive(Debug, Deserialize, Clone, Default)]
pub struct QuizRequest {
    #[serde(default)]
    pub quiz_category: Option<QuizCategory>,
    #[serde(default)]
    pub previous_questions: Option<Vec<i64>>,
}

/// Category being played, `id` 0 or null means all categories
#[derive(Debug, Deserialize, Clone, Default)]
pub struct QuizCategory {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<i64>,
}

/// Category restriction applied to the candidate set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryFilter {
    Any,
    Category(i64),
}

impl CategoryFilter {
    pub fn from_id(id: Option<i64>) -> Self {
        match id {
            None | Some(0) => CategoryFilter::Any,
            Some(id) => CategoryFilter::Category(id),
        }
    }

    pub fn matches(&self, question: &Question) -> bool {
        match self {
            CategoryFilter::Any => true,
            CategoryFilter::Category(id) => question.category == *id,
        }
    }
}

impl QuizRequest {
    pub fn filter(&self) -> CategoryFilter {
        CategoryFilter::from_id(self.quiz_category.as_ref().and_then(|c| c.id))
    }

    pub fn previous_ids(&self) -> HashSet<i64> {
        self.previous_questions
            .as_deref()
            .unwrap_or_default()
            .iter()
            .copied()
            .collect()
    }
}

/// Outcome of a next-question request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextQuestion {
    Question(Question),
    Exhausted,
}

impl NextQuestion {
    pub fn is_exhausted(&self) -> bool {
        matches!(self, NextQuestion::Exhausted)
    }
}

impl Serialize for NextQuestion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            NextQuestion::Question(question) => question.serialize(serializer),
            NextQuestion::Exhausted => serializer.serialize_bool(false),
        }
    }
}

/// Accept the category id as an integer, a numeric string, or null
fn lenient_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_i64()
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("invalid category id: {n}"))),
        Some(Value::String(s)) => s
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("invalid category id: {s:?}"))),
        Some(other) => Err(de::Error::custom(format!("invalid category id: {other}"))),
    }
}

/// Keep the questions that match `filter` and were not shown yet
pub fn eligible_candidates(
    questions: Vec<Question>,
    filter: CategoryFilter,
    previous: &HashSet<i64>,
) -> Vec<Question> {
    questions
        .into_iter()
        .filter(|q| filter.matches(q) && !previous.contains(&q.id))
        .collect()
}

/// Pick one candidate uniformly at random
pub fn choose_question<R: Rng + ?Sized>(candidates: &[Question], rng: &mut R) -> NextQuestion {
    match candidates.choose(rng) {
        Some(question) => NextQuestion::Question(question.clone()),
        None => NextQuestion::Exhausted,
    }
}

/// Select the next quiz question out of `questions`
pub fn select_next_question<R: Rng + ?Sized>(
    questions: Vec<Question>,
    filter: CategoryFilter,
    previous: &HashSet<i64>,
    rng: &mut R,
) -> NextQuestion {
    let candidates = eligible_candidates(questions, filter, previous);
    choose_question(&candidates, rng)
}
