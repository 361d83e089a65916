use crate::prelude::{eprintln, *};
use crate::store::Store;
use axum::http::{header, Method};
use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

mod handlers;

pub use handlers::AppState;

#[derive(Debug, clap::Args)]
pub struct ServeOptions {
    /// Port to listen on
    #[arg(short, long, env = "TRIVIA_PORT", default_value = "5000")]
    pub port: u16,

    /// Host to bind to
    #[arg(long, env = "TRIVIA_HOST", default_value = "127.0.0.1")]
    pub host: String,
}

/// Build the API router around an open store
pub fn router(store: Store) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        .route("/categories/", get(handlers::list_categories))
        .route(
            "/categories/{category_id}/questions",
            get(handlers::questions_by_category),
        )
        .route("/questions/", get(handlers::list_questions))
        .route("/questions/{question_id}", delete(handlers::delete_question))
        .route("/questions/search/", post(handlers::search))
        .route("/add/", post(handlers::create_question))
        .route("/play/", post(handlers::play_quiz))
        .fallback(handlers::not_found)
        .method_not_allowed_fallback(handlers::method_not_allowed)
        .layer(cors)
        .with_state(AppState { store })
}

pub async fn run(options: ServeOptions, global: crate::Global) -> Result<()> {
    let store = global.open_store()?;
    let addr = format!("{}:{}", options.host, options.port);

    if global.verbose {
        eprintln!("Trivia API listening on http://{}", addr);
        eprintln!("Categories endpoint: http://{}/categories/", addr);
        eprintln!("Questions endpoint: http://{}/questions/", addr);
        eprintln!("Quiz endpoint: http://{}/play/", addr);
    }

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| eyre!("Failed to bind to {}: {}", addr, e))?;

    log::info!("Serving trivia API on {addr}");

    axum::serve(listener, router(store))
        .await
        .map_err(|e| eyre!("Server error: {e}"))?;

    Ok(())
}
