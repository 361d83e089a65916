use crate::prelude::{eprintln, *};
use clap::Parser;
use std::path::PathBuf;

mod error;
mod prelude;
mod questions;
mod seed;
mod server;
mod store;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Trivia questions API, quiz server and store maintenance"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Path to the SQLite database (defaults to <data dir>/trivia/trivia.db)
    #[clap(long, env = "TRIVIA_DATABASE", global = true)]
    database: Option<PathBuf>,

    /// Whether to display additional information.
    #[clap(long, env = "TRIVIA_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

impl Global {
    pub fn database_path(&self) -> Result<PathBuf> {
        match &self.database {
            Some(path) => Ok(path.clone()),
            None => store::default_db_path()
                .ok_or_else(|| eyre!("Unable to determine data directory, pass --database")),
        }
    }

    pub fn open_store(&self) -> Result<store::Store> {
        let path = self.database_path()?;
        if self.verbose {
            eprintln!("Using database {}", path.display());
        }
        log::debug!("Opening store at {}", path.display());
        store::Store::open(&path)
            .with_context(|| format!("Failed to open database {}", path.display()))
    }
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Serve the trivia HTTP API
    Serve(crate::server::ServeOptions),

    /// List a page of questions
    Questions(crate::questions::QuestionsOptions),

    /// List categories
    Categories(crate::questions::CategoriesOptions),

    /// Load categories and questions from a JSON file
    Seed(crate::seed::SeedOptions),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::Serve(options) => crate::server::run(options, app.global).await,
        SubCommands::Questions(options) => crate::questions::list_questions(options, app.global),
        SubCommands::Categories(options) => {
            crate::questions::list_categories(options, app.global)
        }
        SubCommands::Seed(options) => crate::seed::run(options, app.global),
    }
}
