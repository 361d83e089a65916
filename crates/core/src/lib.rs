//! Core library for trivia
//!
//! This crate implements the **Functional Core** of the trivia application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! - **`trivia_core`** (this crate): Pure transformation functions with zero I/O
//! - **`trivia`**: the HTTP API, the SQLite store and the CLI (the Imperative Shell)
//!
//! The shell loads rows from the store, hands them to the functions in this crate, and
//! serializes what comes back. Nothing here knows where questions are stored.
//!
//! # Module Organization
//!
//! - [`question`]: Question and category models, create-request validation
//! - [`pagination`]: Fixed-size page windows over question lists
//! - [`search`]: Case-insensitive substring search
//! - [`quiz`]: Random next-question selection that skips questions already shown
//!
//! Randomness is injected: [`quiz::select_next_question`] takes any [`rand::Rng`], so tests
//! use a seeded generator while the server uses a thread-local one.
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use trivia_core::pagination::paginate;
//! use trivia_core::quiz::{select_next_question, CategoryFilter};
//!
//! let page = paginate(&questions, 2);
//!
//! let seen = [1, 2].into_iter().collect();
//! let next = select_next_question(questions, CategoryFilter::Category(1), &seen, &mut rng);
//! ```

pub mod pagination;
pub mod question;
pub mod quiz;
pub mod search;
