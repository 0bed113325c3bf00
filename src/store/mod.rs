//! Resource store for movie records.
//!
//! `MovieStore` is the contract the HTTP handlers depend on;
//! [`InMemoryMovieStore`] is the process-memory implementation.
//!
//! "Not found" is an ordinary outcome here (`Option` / `bool`), never a
//! `StoreError`. Errors are reserved for the store itself failing.

mod in_memory;

use std::fmt;

use crate::movie::{Movie, MoviePatch, NewMovie};

pub use in_memory::InMemoryMovieStore;

/// Predicate used to filter `list` results.
pub type MovieFilter<'a> = &'a dyn Fn(&Movie) -> bool;

/// Storage for movie records, in insertion order.
pub trait MovieStore: Send + Sync {
    /// All movies, or only those matching `filter`. Order is insertion order.
    fn list(&self, filter: Option<MovieFilter<'_>>) -> Result<Vec<Movie>, StoreError>;

    /// Get a movie by id.
    fn get(&self, id: &str) -> Result<Option<Movie>, StoreError>;

    /// Assign a fresh id and append the movie.
    fn insert(&self, movie: NewMovie) -> Result<Movie, StoreError>;

    /// Merge `patch` over an existing movie. `None` if the id is unknown.
    fn update(&self, id: &str, patch: MoviePatch) -> Result<Option<Movie>, StoreError>;

    /// Remove a movie by id. Returns true if it existed.
    fn remove(&self, id: &str) -> Result<bool, StoreError>;

    /// Number of stored movies.
    fn len(&self) -> Result<usize, StoreError>;

    fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

/// Error type for store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A previous holder of the lock panicked.
    LockPoisoned(&'static str),
    /// A seeded record reused an id already in the store.
    DuplicateId(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::LockPoisoned(operation) => {
                write!(f, "movie store lock poisoned during {}", operation)
            }
            StoreError::DuplicateId(id) => write!(f, "duplicate movie id: {}", id),
        }
    }
}

impl std::error::Error for StoreError {}
