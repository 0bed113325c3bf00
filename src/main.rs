use std::error::Error;
use std::sync::Arc;

use movies_service::http::{self, AllowList, OriginPolicy};
use movies_service::{InMemoryMovieStore, MovieStore, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = ServerConfig::from_env()?;

    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .init();

    let store = Arc::new(InMemoryMovieStore::with_movies(config.load_seed()?)?);
    tracing::info!(
        movies = store.len()?,
        seed = %config.seed,
        origins = ?config.allowed_origins,
        "catalogue ready"
    );

    let policy: Arc<dyn OriginPolicy> = Arc::new(AllowList::new(config.allowed_origins.clone()));
    http::serve(store, policy, &config.addr()).await?;
    Ok(())
}
