//! InMemoryMovieStore - insertion-ordered, id-indexed movie storage.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};

use uuid::Uuid;

use super::{MovieFilter, MovieStore, StoreError};
use crate::movie::{Movie, MoviePatch, NewMovie};

/// Records keyed by a monotonically increasing sequence number, plus an
/// id → sequence index. Iterating `records` yields insertion order.
#[derive(Default)]
struct Inner {
    records: BTreeMap<u64, Movie>,
    index: HashMap<String, u64>,
    next_seq: u64,
}

impl Inner {
    fn append(&mut self, movie: Movie) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.index.insert(movie.id.clone(), seq);
        self.records.insert(seq, movie);
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if !self.index.contains_key(&id) {
                return id;
            }
        }
    }
}

/// In-memory movie store. Clone-friendly via Arc; clones share storage.
///
/// Every operation holds the lock for its whole duration, so inserts,
/// merges and removals are atomic with respect to each other.
#[derive(Clone, Default)]
pub struct InMemoryMovieStore {
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryMovieStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `movies`.
    pub fn with_movies(movies: Vec<Movie>) -> Result<Self, StoreError> {
        let store = Self::new();
        store.seed(movies)?;
        Ok(store)
    }

    /// Append records that already carry ids (e.g. a startup catalogue).
    ///
    /// Fails without storing anything if an id repeats, either within
    /// `movies` or against what is already stored.
    pub fn seed(&self, movies: Vec<Movie>) -> Result<usize, StoreError> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| StoreError::LockPoisoned("seed"))?;

        let mut seen = std::collections::HashSet::with_capacity(movies.len());
        for movie in &movies {
            if inner.index.contains_key(&movie.id) || !seen.insert(movie.id.as_str()) {
                return Err(StoreError::DuplicateId(movie.id.clone()));
            }
        }

        let count = movies.len();
        for movie in movies {
            inner.append(movie);
        }
        Ok(count)
    }
}

impl MovieStore for InMemoryMovieStore {
    fn list(&self, filter: Option<MovieFilter<'_>>) -> Result<Vec<Movie>, StoreError> {
        let inner = self
            .inner
            .read()
            .map_err(|_| StoreError::LockPoisoned("list"))?;

        let movies = inner.records.values();
        Ok(match filter {
            Some(predicate) => movies.filter(|m| predicate(m)).cloned().collect(),
            None => movies.cloned().collect(),
        })
    }

    fn get(&self, id: &str) -> Result<Option<Movie>, StoreError> {
        let inner = self
            .inner
            .read()
            .map_err(|_| StoreError::LockPoisoned("get"))?;

        Ok(inner
            .index
            .get(id)
            .and_then(|seq| inner.records.get(seq))
            .cloned())
    }

    fn insert(&self, movie: NewMovie) -> Result<Movie, StoreError> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| StoreError::LockPoisoned("insert"))?;

        let movie = movie.with_id(inner.fresh_id());
        inner.append(movie.clone());
        Ok(movie)
    }

    fn update(&self, id: &str, patch: MoviePatch) -> Result<Option<Movie>, StoreError> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| StoreError::LockPoisoned("update"))?;

        let Some(seq) = inner.index.get(id).copied() else {
            return Ok(None);
        };
        Ok(inner.records.get_mut(&seq).map(|movie| {
            movie.apply(patch);
            movie.clone()
        }))
    }

    fn remove(&self, id: &str) -> Result<bool, StoreError> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| StoreError::LockPoisoned("remove"))?;

        match inner.index.remove(id) {
            Some(seq) => Ok(inner.records.remove(&seq).is_some()),
            None => Ok(false),
        }
    }

    fn len(&self) -> Result<usize, StoreError> {
        let inner = self
            .inner
            .read()
            .map_err(|_| StoreError::LockPoisoned("len"))?;
        Ok(inner.records.len())
    }
}
