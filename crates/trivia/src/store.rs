//! SQLite storage for questions and categories

use rusqlite::{params, Connection, OptionalExtension};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use trivia_core::question::{Category, NewQuestion, Question};

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Question {0} not found")]
    NotFound(i64),

    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Database connection lock poisoned")]
    Poisoned,

    #[error("Failed to prepare database directory: {0}")]
    Io(#[from] std::io::Error),
}

/// Category row to insert, `id` is assigned by the database when absent
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct NewCategory {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Get the default database path
pub fn default_db_path() -> Option<PathBuf> {
    dirs_next::data_dir().map(|dir| dir.join("trivia").join("trivia.db"))
}

/// Shared handle to the question database
///
/// Cloning is cheap, every clone talks to the same connection.
#[derive(Clone)]
pub struct Store {
    conn: Arc<Mutex<Connection>>,
}

impl Store {
    /// Open or create the database at `path`
    pub fn open(path: &Path) -> StoreResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        Self::from_connection(Connection::open(path)?)
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> StoreResult<Self> {
        migrate(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn conn(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }

    // ==================== Categories ====================

    /// All categories ordered by id
    pub fn categories(&self) -> StoreResult<Vec<Category>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT id, type FROM categories ORDER BY id")?;
        let rows = stmt.query_map([], row_to_category)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Get a category by id
    pub fn category(&self, id: i64) -> StoreResult<Option<Category>> {
        let conn = self.conn()?;
        Ok(conn
            .query_row(
                "SELECT id, type FROM categories WHERE id = ?1",
                params![id],
                row_to_category,
            )
            .optional()?)
    }

    // ==================== Questions ====================

    /// All questions ordered by id
    pub fn questions(&self) -> StoreResult<Vec<Question>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, question, answer, category, difficulty FROM questions ORDER BY id",
        )?;
        let rows = stmt.query_map([], row_to_question)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Questions of one category ordered by id
    pub fn questions_in_category(&self, category: i64) -> StoreResult<Vec<Question>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, question, answer, category, difficulty
            FROM questions
            WHERE category = ?1
            ORDER BY id
            "#,
        )?;
        let rows = stmt.query_map(params![category], row_to_question)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Insert a question and return its id
    pub fn insert_question(&self, question: &NewQuestion) -> StoreResult<i64> {
        let conn = self.conn()?;
        insert_question(&conn, question)
    }

    /// Delete a question by id
    pub fn delete_question(&self, id: i64) -> StoreResult<()> {
        let conn = self.conn()?;
        let deleted = conn.execute("DELETE FROM questions WHERE id = ?1", params![id])?;
        if deleted == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    /// Insert categories and questions in a single transaction
    ///
    /// Categories with an existing id are updated in place.
    pub fn seed(&self, categories: &[NewCategory], questions: &[NewQuestion]) -> StoreResult<()> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        for category in categories {
            tx.execute(
                r#"
                INSERT INTO categories (id, type) VALUES (?1, ?2)
                ON CONFLICT(id) DO UPDATE SET type = ?2
                "#,
                params![category.id, category.kind],
            )?;
        }

        for question in questions {
            insert_question(&tx, question)?;
        }

        tx.commit()?;
        Ok(())
    }
}

fn migrate(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS categories (
            id INTEGER PRIMARY KEY,
            type TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS questions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            question TEXT NOT NULL,
            answer TEXT NOT NULL,
            category INTEGER NOT NULL,
            difficulty INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_questions_category ON questions(category);
        "#,
    )
}

fn insert_question(conn: &Connection, question: &NewQuestion) -> StoreResult<i64> {
    conn.execute(
        r#"
        INSERT INTO questions (question, answer, category, difficulty)
        VALUES (?1, ?2, ?3, ?4)
        "#,
        params![
            question.question,
            question.answer,
            question.category,
            question.difficulty,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

fn row_to_category(row: &rusqlite::Row) -> rusqlite::Result<Category> {
    Ok(Category {
        id: row.get(0)?,
        kind: row.get(1)?,
    })
}

fn row_to_question(row: &rusqlite::Row) -> rusqlite::Result<Question> {
    Ok(Question {
        id: row.get(0)?,
        question: row.get(1)?,
        answer: row.get(2)?,
        category: row.get(3)?,
        difficulty: row.get(4)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn new_question(text: &str, category: i64) -> NewQuestion {
        NewQuestion {
            question: text.to_string(),
            answer: format!("answer to {text}"),
            category,
            difficulty: 1,
        }
    }

    fn new_category(id: i64, kind: &str) -> NewCategory {
        NewCategory {
            id: Some(id),
            kind: kind.to_string(),
        }
    }

    /// Store with {1: "Q1" cat 1, 2: "Q2" cat 1, 3: "Q3" cat 2}
    fn seeded_store() -> Store {
        let store = Store::open_in_memory().expect("Failed to open in-memory store");
        store
            .seed(
                &[new_category(1, "Science"), new_category(2, "Art")],
                &[
                    new_question("Q1", 1),
                    new_question("Q2", 1),
                    new_question("Q3", 2),
                ],
            )
            .expect("Failed to seed store");
        store
    }

    #[test]
    fn test_seed_and_list() {
        let store = seeded_store();

        let categories = store.categories().expect("Failed to list categories");
        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0].kind, "Science");

        let questions = store.questions().expect("Failed to list questions");
        let ids: Vec<i64> = questions.iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![1, 2, 3], "Questions should be ordered by id");
        assert_eq!(questions[2].question, "Q3");
        assert_eq!(questions[2].category, 2);
    }

    #[test]
    fn test_questions_in_category() {
        let store = seeded_store();

        let questions = store
            .questions_in_category(1)
            .expect("Failed to filter questions");
        let ids: Vec<i64> = questions.iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![1, 2]);

        assert!(store.questions_in_category(42).unwrap().is_empty());
    }

    #[test]
    fn test_category_lookup() {
        let store = seeded_store();

        let category = store.category(2).unwrap().expect("Category should exist");
        assert_eq!(category.kind, "Art");
        assert!(store.category(99).unwrap().is_none());
    }

    #[test]
    fn test_insert_question_returns_new_id() {
        let store = seeded_store();

        let id = store
            .insert_question(&new_question("Q4", 2))
            .expect("Failed to insert question");
        assert_eq!(id, 4);

        let questions = store.questions().unwrap();
        assert_eq!(questions.last().map(|q| q.id), Some(4));
    }

    #[test]
    fn test_delete_question() {
        let store = seeded_store();

        store.delete_question(2).expect("Failed to delete question");
        let ids: Vec<i64> = store.questions().unwrap().iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_delete_missing_question_is_not_found() {
        let store = seeded_store();

        match store.delete_question(99) {
            Err(StoreError::NotFound(id)) => assert_eq!(id, 99),
            other => panic!("Expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_deleted_ids_are_not_reused() {
        let store = seeded_store();

        store.delete_question(3).unwrap();
        let id = store.insert_question(&new_question("Q5", 1)).unwrap();
        assert_eq!(id, 4);
    }

    #[test]
    fn test_seed_updates_existing_category() {
        let store = seeded_store();

        store
            .seed(&[new_category(2, "Entertainment")], &[])
            .expect("Failed to reseed");
        assert_eq!(store.category(2).unwrap().unwrap().kind, "Entertainment");
        assert_eq!(store.categories().unwrap().len(), 2);
    }

    #[test]
    fn test_open_on_disk_persists() {
        let dir = tempdir().expect("Failed to create temp directory");
        let path = dir.path().join("nested").join("trivia.db");

        {
            let store = Store::open(&path).expect("Failed to open store");
            store.seed(&[new_category(1, "History")], &[new_question("Q", 1)]).unwrap();
        }

        let reopened = Store::open(&path).expect("Failed to reopen store");
        assert_eq!(reopened.questions().unwrap().len(), 1);
        assert_eq!(reopened.categories().unwrap()[0].kind, "History");
    }
}
