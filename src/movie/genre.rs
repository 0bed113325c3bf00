//! The closed set of genre names a movie can be tagged with.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Genre {
    Action,
    Adventure,
    Animation,
    Biography,
    Comedy,
    Crime,
    Drama,
    Fantasy,
    Horror,
    Mystery,
    Romance,
    #[serde(rename = "Sci-Fi")]
    SciFi,
}

impl Genre {
    /// Every genre, in catalogue order.
    pub const ALL: [Genre; 12] = [
        Genre::Action,
        Genre::Adventure,
        Genre::Animation,
        Genre::Biography,
        Genre::Comedy,
        Genre::Crime,
        Genre::Drama,
        Genre::Fantasy,
        Genre::Horror,
        Genre::Mystery,
        Genre::Romance,
        Genre::SciFi,
    ];

    /// The wire name of this genre (e.g. `"Sci-Fi"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Genre::Action => "Action",
            Genre::Adventure => "Adventure",
            Genre::Animation => "Animation",
            Genre::Biography => "Biography",
            Genre::Comedy => "Comedy",
            Genre::Crime => "Crime",
            Genre::Drama => "Drama",
            Genre::Fantasy => "Fantasy",
            Genre::Horror => "Horror",
            Genre::Mystery => "Mystery",
            Genre::Romance => "Romance",
            Genre::SciFi => "Sci-Fi",
        }
    }

    /// Exact, case-sensitive lookup by wire name.
    pub fn from_name(name: &str) -> Option<Genre> {
        Genre::ALL.into_iter().find(|g| g.as_str() == name)
    }

    /// Case-insensitive comparison against a wire name, used by list filters.
    pub fn matches(&self, name: &str) -> bool {
        self.as_str().eq_ignore_ascii_case(name)
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
