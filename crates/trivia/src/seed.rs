use crate::prelude::{println, *};
use crate::store::NewCategory;
use colored::Colorize;
use serde::Deserialize;
use std::path::PathBuf;
use trivia_core::question::{NewQuestion, QuestionDraft};

#[derive(Debug, clap::Args)]
pub struct SeedOptions {
    /// JSON file with `categories` and `questions` arrays
    pub file: PathBuf,
}

/// Seed file layout
#[derive(Debug, Deserialize, Default)]
pub struct SeedFile {
    #[serde(default)]
    pub categories: Vec<NewCategory>,
    #[serde(default)]
    pub questions: Vec<QuestionDraft>,
}

/// Parse a seed file and validate every question in it
///
/// Questions go through the same validation as the create endpoint. The first invalid
/// question aborts the whole seed, reported with its 1-based position.
pub fn parse_seed(contents: &str) -> Result<(Vec<NewCategory>, Vec<NewQuestion>)> {
    let seed: SeedFile = serde_json::from_str(contents).context("Invalid seed file")?;

    let questions = seed
        .questions
        .iter()
        .enumerate()
        .map(|(index, draft)| {
            draft
                .validate()
                .map_err(|e| eyre!("Question #{}: {}", index + 1, e))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok((seed.categories, questions))
}

pub fn run(options: SeedOptions, global: crate::Global) -> Result<()> {
    let contents = std::fs::read_to_string(&options.file)
        .map_err(|e| eyre!("Failed to read file '{}': {}", options.file.display(), e))?;

    let (categories, questions) = parse_seed(&contents)?;

    let store = global.open_store()?;
    store.seed(&categories, &questions)?;

    log::info!(
        "Seeded {} categories and {} questions from {}",
        categories.len(),
        questions.len(),
        options.file.display()
    );

    println!(
        "{}",
        format!(
            "Seeded {} categories and {} questions",
            categories.len(),
            questions.len()
        )
        .green()
        .bold()
    );

    Ok(())
}
