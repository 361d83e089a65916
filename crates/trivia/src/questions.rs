use crate::prelude::{println, *};
use serde::Serialize;
use trivia_core::pagination::paginate;
use trivia_core::question::{format_categories, Question};

#[derive(Debug, clap::Args)]
pub struct QuestionsOptions {
    /// Page number (1-indexed)
    #[arg(short, long, default_value = "1")]
    page: i64,

    /// Only list questions of this category
    #[arg(short, long)]
    category: Option<i64>,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, clap::Args)]
pub struct CategoriesOptions {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct QuestionsOutput {
    page: i64,
    total_questions: usize,
    questions: Vec<Question>,
}

pub fn list_questions(options: QuestionsOptions, global: crate::Global) -> Result<()> {
    let store = global.open_store()?;

    let questions = match options.category {
        Some(category) => store.questions_in_category(category)?,
        None => store.questions()?,
    };

    let output = QuestionsOutput {
        page: options.page,
        total_questions: questions.len(),
        questions: paginate(&questions, options.page),
    };

    if options.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!(
        "Page {} of {} question(s):\n",
        output.page, output.total_questions
    );

    if output.questions.is_empty() {
        println!("No questions found.");
        return Ok(());
    }

    let mut table = new_table();
    table.add_row(prettytable::row![
        "ID",
        "Question",
        "Answer",
        "Category",
        "Difficulty"
    ]);

    for question in &output.questions {
        table.add_row(prettytable::row![
            question.id,
            &question.question,
            &question.answer,
            question.category,
            question.difficulty
        ]);
    }

    table.printstd();

    if !paginate(&questions, options.page + 1).is_empty() {
        println!("\nNext page: trivia questions --page {}", options.page + 1);
    }

    Ok(())
}

pub fn list_categories(options: CategoriesOptions, global: crate::Global) -> Result<()> {
    let store = global.open_store()?;
    let categories = store.categories()?;

    if options.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&format_categories(&categories))?
        );
        return Ok(());
    }

    if categories.is_empty() {
        println!("No categories found.");
        return Ok(());
    }

    let mut table = new_table();
    table.add_row(prettytable::row!["ID", "Type"]);
    for category in &categories {
        table.add_row(prettytable::row![category.id, &category.kind]);
    }
    table.printstd();

    Ok(())
}
