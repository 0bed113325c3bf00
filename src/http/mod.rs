//! HTTP transport for the movie store. Uses axum for routing.
//!
//! Requires the `http` feature.
//!
//! ## Routes
//!
//! - `GET /` greeting (`?format=html` for HTML).
//! - `GET /health` returns `{ "ok": true, "movies": <count> }`.
//! - `GET /movies` lists movies, optionally filtered with `?genre=`.
//! - `POST /movies` creates a movie (201).
//! - `GET|PATCH|DELETE /movies/:id` reads, merges into, or removes one movie.
//! - `OPTIONS` on any path is answered by the CORS middleware.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use movies_service::http::{self, AllowList, OriginPolicy};
//! use movies_service::InMemoryMovieStore;
//!
//! let store = Arc::new(InMemoryMovieStore::new());
//! let policy: Arc<dyn OriginPolicy> = Arc::new(AllowList::new(["http://localhost:3000"]));
//!
//! // Get the router to compose with other axum routes
//! let app = http::router(store.clone(), policy.clone());
//!
//! // Or serve directly
//! http::serve(store, policy, "0.0.0.0:1234").await?;
//! ```

mod cors;
mod error;
mod handlers;

use std::sync::Arc;

use axum::middleware;
use axum::routing::get;
use axum::Router;

use crate::store::MovieStore;

pub use cors::{apply_cors, AllowList, OriginPolicy, ALLOWED_METHODS};
pub use error::ApiError;

/// Build an axum `Router` serving the movie routes over `store`, with the
/// CORS middleware wrapped around every route.
pub fn router<S: MovieStore + 'static>(store: Arc<S>, policy: Arc<dyn OriginPolicy>) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health::<S>))
        .route(
            "/movies",
            get(handlers::list_movies::<S>).post(handlers::create_movie::<S>),
        )
        .route(
            "/movies/:id",
            get(handlers::get_movie::<S>)
                .patch(handlers::update_movie::<S>)
                .delete(handlers::delete_movie::<S>),
        )
        .with_state(store)
        .layer(middleware::from_fn_with_state(policy, cors::apply_cors))
}

/// Serve the movie routes over HTTP at the given address (e.g. `"0.0.0.0:1234"`).
pub async fn serve<S: MovieStore + 'static>(
    store: Arc<S>,
    policy: Arc<dyn OriginPolicy>,
    addr: &str,
) -> Result<(), std::io::Error> {
    let app = router(store, policy);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "movies service listening");
    axum::serve(listener, app).await
}
