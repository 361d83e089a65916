//! Question and category models, plus validation of create-question requests

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Trivia question in its public (formatted) shape
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Question {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: i64,
}

/// Question category
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
}

/// A validated question that has not been stored yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: i64,
}

/// Create-question request body as received, before validation.
///
/// Every field is kept as a raw JSON value because clients send `category` and
/// `difficulty` either as numbers or as numeric strings.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct QuestionDraft {
    #[serde(default)]
    pub question: Option<Value>,
    #[serde(default)]
    pub answer: Option<Value>,
    #[serde(default)]
    pub category: Option<Value>,
    #[serde(default)]
    pub difficulty: Option<Value>,
}

/// Error type for question validation
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Field '{0}' is required")]
    MissingField(&'static str),

    #[error("Field '{0}' must be an integer")]
    NotAnInteger(&'static str),

    #[error("Field '{0}' must be a string")]
    NotAString(&'static str),
}

impl QuestionDraft {
    /// Validate the draft into a [`NewQuestion`]
    ///
    /// A field is blank when it is absent, `null`, or a string that is empty after
    /// trimming. Blank fields are rejected before any type checks run.
    pub fn validate(&self) -> Result<NewQuestion, ValidationError> {
        let question = required_text("question", self.question.as_ref())?;
        let answer = required_text("answer", self.answer.as_ref())?;
        let category = required_integer("category", self.category.as_ref())?;
        let difficulty = required_integer("difficulty", self.difficulty.as_ref())?;

        Ok(NewQuestion {
            question,
            answer,
            category,
            difficulty,
        })
    }
}

fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

fn required_text(field: &'static str, value: Option<&Value>) -> Result<String, ValidationError> {
    if is_blank(value) {
        return Err(ValidationError::MissingField(field));
    }

    match value {
        Some(Value::String(s)) => Ok(s.clone()),
        _ => Err(ValidationError::NotAString(field)),
    }
}

fn required_integer(field: &'static str, value: Option<&Value>) -> Result<i64, ValidationError> {
    if is_blank(value) {
        return Err(ValidationError::MissingField(field));
    }

    match value {
        Some(Value::Number(n)) => n.as_i64().ok_or(ValidationError::NotAnInteger(field)),
        Some(Value::String(s)) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| ValidationError::NotAnInteger(field)),
        _ => Err(ValidationError::NotAnInteger(field)),
    }
}

/// Format categories as an `{id: type}` map
///
/// Integer keys serialize as JSON object keys ("1", "2", ...) and stay in numeric order.
pub fn format_categories(categories: &[Category]) -> BTreeMap<i64, String> {
    categories
        .iter()
        .map(|c| (c.id, c.kind.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn draft(body: Value) -> QuestionDraft {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_validate_accepts_complete_draft() {
        let new = draft(json!({
            "question": "What is the largest planet?",
            "answer": "Jupiter",
            "category": 1,
            "difficulty": 2
        }))
        .validate()
        .unwrap();

        assert_eq!(new.question, "What is the largest planet?");
        assert_eq!(new.answer, "Jupiter");
        assert_eq!(new.category, 1);
        assert_eq!(new.difficulty, 2);
    }

    #[test]
    fn test_validate_accepts_numeric_strings() {
        let new = draft(json!({
            "question": "Q",
            "answer": "A",
            "category": "3",
            "difficulty": " 4 "
        }))
        .validate()
        .unwrap();

        assert_eq!(new.category, 3);
        assert_eq!(new.difficulty, 4);
    }

    #[test]
    fn test_validate_keeps_text_as_submitted() {
        let new = draft(json!({
            "question": "  Name the   planet ",
            "answer": " Mars\n",
            "category": 1,
            "difficulty": 1
        }))
        .validate()
        .unwrap();

        assert_eq!(new.question, "  Name the   planet ");
        assert_eq!(new.answer, " Mars\n");
    }

    #[test]
    fn test_validate_rejects_empty_category() {
        let result = draft(json!({
            "question": "Q",
            "answer": "A",
            "category": "",
            "difficulty": 1
        }))
        .validate();

        assert_eq!(result, Err(ValidationError::MissingField("category")));
    }

    #[test]
    fn test_validate_rejects_missing_fields() {
        let result = draft(json!({ "question": "Q", "answer": "A", "category": 1 })).validate();
        assert_eq!(result, Err(ValidationError::MissingField("difficulty")));

        let result = draft(json!({})).validate();
        assert_eq!(result, Err(ValidationError::MissingField("question")));
    }

    #[test]
    fn test_validate_rejects_whitespace_and_null() {
        let result = draft(json!({
            "question": "   ",
            "answer": "A",
            "category": 1,
            "difficulty": 1
        }))
        .validate();
        assert_eq!(result, Err(ValidationError::MissingField("question")));

        let result = draft(json!({
            "question": "Q",
            "answer": null,
            "category": 1,
            "difficulty": 1
        }))
        .validate();
        assert_eq!(result, Err(ValidationError::MissingField("answer")));
    }

    #[test]
    fn test_validate_rejects_non_integer_category() {
        let result = draft(json!({
            "question": "Q",
            "answer": "A",
            "category": "science",
            "difficulty": 1
        }))
        .validate();
        assert_eq!(result, Err(ValidationError::NotAnInteger("category")));

        let result = draft(json!({
            "question": "Q",
            "answer": "A",
            "category": 1,
            "difficulty": 1.5
        }))
        .validate();
        assert_eq!(result, Err(ValidationError::NotAnInteger("difficulty")));
    }

    #[test]
    fn test_validate_rejects_non_string_text() {
        let result = draft(json!({
            "question": 42,
            "answer": "A",
            "category": 1,
            "difficulty": 1
        }))
        .validate();
        assert_eq!(result, Err(ValidationError::NotAString("question")));
    }

    #[test]
    fn test_format_categories_orders_by_numeric_id() {
        let categories = vec![
            Category {
                id: 10,
                kind: "Sports".to_string(),
            },
            Category {
                id: 2,
                kind: "Art".to_string(),
            },
        ];

        let formatted = format_categories(&categories);
        let json = serde_json::to_string(&formatted).unwrap();

        assert_eq!(json, r#"{"2":"Art","10":"Sports"}"#);
    }

    #[test]
    fn test_category_serializes_type_field() {
        let category = Category {
            id: 1,
            kind: "Science".to_string(),
        };
        let json = serde_json::to_value(&category).unwrap();
        assert_eq!(json, json!({ "id": 1, "type": "Science" }));
    }
}
