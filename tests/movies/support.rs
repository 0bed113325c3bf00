//! Shared fixtures: a candidate payload and a server bound to an ephemeral port.

use serde_json::{json, Value};

/// The canonical valid candidate (no `rate`, so it picks up the default).
pub fn dune() -> Value {
    json!({
        "title": "Dune",
        "year": 2021,
        "director": "D.Villeneuve",
        "duration": 155,
        "poster": "http://x.com/p.jpg",
        "genre": ["Sci-Fi"]
    })
}

pub fn heat() -> Value {
    json!({
        "title": "Heat",
        "year": 1995,
        "director": "M.Mann",
        "duration": 170,
        "poster": "https://img.example/heat.jpg",
        "genre": ["Crime", "Drama"],
        "rate": 8.3
    })
}

#[cfg(feature = "http")]
pub use server::*;

#[cfg(feature = "http")]
mod server {
    use std::sync::Arc;

    use movies_service::http::{self, AllowList, OriginPolicy};
    use movies_service::InMemoryMovieStore;

    pub const ALLOWED_ORIGIN: &str = "http://localhost:3000";

    /// Bind to port 0 and return the base URL.
    pub async fn start_server(store: InMemoryMovieStore) -> String {
        let policy: Arc<dyn OriginPolicy> = Arc::new(AllowList::new([ALLOWED_ORIGIN]));
        let app = http::router(Arc::new(store), policy);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }
}
