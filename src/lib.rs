pub mod config;
pub mod movie;
pub mod store;

// HTTP transport (requires "http" feature)
#[cfg(feature = "http")]
pub mod http;

pub use config::{ConfigError, Seed, ServerConfig};
pub use movie::{
    validate_full, validate_partial, Genre, IssueCode, Movie, MoviePatch, NewMovie,
    ValidationErrors, ValidationIssue,
};
pub use store::{InMemoryMovieStore, MovieStore, StoreError};
