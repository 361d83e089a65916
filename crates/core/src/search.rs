//! Case-insensitive substring search over question text

use crate::question::Question;
use serde::Deserialize;

/// Search request body
#[derive(Debug, Deserialize, Clone, Default)]
pub struct SearchRequest {
    /// Missing term behaves like the empty term and matches every question
    #[serde(rename = "searchTerm", default)]
    pub search_term: Option<String>,
}

impl SearchRequest {
    pub fn term(&self) -> &str {
        self.search_term.as_deref().unwrap_or("")
    }
}

/// Case-insensitive substring test
pub fn matches_term(text: &str, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    text.to_lowercase().contains(&term.to_lowercase())
}

/// Keep the questions whose text contains `term`, preserving their order
pub fn search_questions(questions: Vec<Question>, term: &str) -> Vec<Question> {
    questions
        .into_iter()
        .filter(|q| matches_term(&q.question, term))
        .collect()
}
