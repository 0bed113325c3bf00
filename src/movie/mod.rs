//! Movie records and the schema that admits them.
//!
//! Three shapes of the same data flow through the service:
//!
//! - [`NewMovie`]: a fully validated candidate, with defaults applied, not yet stored.
//! - [`Movie`]: a stored record carrying its server-generated id.
//! - [`MoviePatch`]: a validated partial update; absent fields mean "leave unchanged".
//!
//! ## Example
//!
//! ```ignore
//! use movies_service::movie::{validate_full, validate_partial};
//! use serde_json::json;
//!
//! let new_movie = validate_full(&json!({
//!     "title": "Dune",
//!     "year": 2021,
//!     "director": "D.Villeneuve",
//!     "duration": 155,
//!     "poster": "http://x.com/p.jpg",
//!     "genre": ["Sci-Fi"]
//! }))?;
//! assert_eq!(new_movie.rate, 5.0);
//!
//! let patch = validate_partial(&json!({ "title": "Dune: Part One" }))?;
//! assert!(patch.year.is_none());
//! ```

mod error;
mod genre;
mod schema;

use serde::{Deserialize, Serialize};

pub use error::{IssueCode, ValidationErrors, ValidationIssue};
pub use genre::Genre;
pub use schema::{validate_full, validate_partial, DEFAULT_RATE, MAX_RATE, MAX_YEAR, MIN_RATE, MIN_YEAR};

/// A movie held by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: String,
    pub title: String,
    pub year: i32,
    pub director: String,
    pub duration: u32,
    pub poster: String,
    pub genre: Vec<Genre>,
    #[serde(default = "default_rate")]
    pub rate: f64,
}

fn default_rate() -> f64 {
    DEFAULT_RATE
}

impl Movie {
    /// True if any of this movie's genres matches `name`, ignoring case.
    pub fn has_genre(&self, name: &str) -> bool {
        self.genre.iter().any(|g| g.matches(name))
    }

    /// Shallow merge: every field present in `patch` overwrites the current value.
    /// The id is never touched.
    pub fn apply(&mut self, patch: MoviePatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(year) = patch.year {
            self.year = year;
        }
        if let Some(director) = patch.director {
            self.director = director;
        }
        if let Some(duration) = patch.duration {
            self.duration = duration;
        }
        if let Some(poster) = patch.poster {
            self.poster = poster;
        }
        if let Some(genre) = patch.genre {
            self.genre = genre;
        }
        if let Some(rate) = patch.rate {
            self.rate = rate;
        }
    }
}

/// A fully validated movie that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMovie {
    pub title: String,
    pub year: i32,
    pub director: String,
    pub duration: u32,
    pub poster: String,
    pub genre: Vec<Genre>,
    pub rate: f64,
}

impl NewMovie {
    /// Attach an id, producing a storable record.
    pub fn with_id(self, id: impl Into<String>) -> Movie {
        Movie {
            id: id.into(),
            title: self.title,
            year: self.year,
            director: self.director,
            duration: self.duration,
            poster: self.poster,
            genre: self.genre,
            rate: self.rate,
        }
    }
}

/// A validated partial update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MoviePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<Vec<Genre>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate: Option<f64>,
}

impl MoviePatch {
    /// True when the patch would change nothing.
    pub fn is_empty(&self) -> bool {
        self == &MoviePatch::default()
    }
}
