use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Store-assigned identifier of a movie record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovieId(i64);

impl MovieId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw integer value.
    pub fn get(&self) -> i64 {
        self.0
    }
}

impl From<i64> for MovieId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl Display for MovieId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored movie record.
///
/// Only `title` and `genre` carry meaning for the catalog queries; the
/// remaining fields are descriptive and passed through untouched. Two records
/// are equal when every field, identifier included, is equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    pub genre: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub director: Option<String>,
    #[serde(default)]
    pub runtime_minutes: Option<u32>,
}

/// A movie that has not been persisted yet and therefore has no identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMovie {
    pub title: String,
    pub genre: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub director: Option<String>,
    #[serde(default)]
    pub runtime_minutes: Option<u32>,
}

impl NewMovie {
    /// Creates a new movie with only the fields the catalog queries on.
    pub fn new(title: impl Into<String>, genre: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            genre: genre.into(),
            year: None,
            director: None,
            runtime_minutes: None,
        }
    }

    /// Attaches the store-assigned identifier.
    pub fn with_id(self, id: MovieId) -> Movie {
        Movie {
            id,
            title: self.title,
            genre: self.genre,
            year: self.year,
            director: self.director,
            runtime_minutes: self.runtime_minutes,
        }
    }
}

impl From<Movie> for NewMovie {
    fn from(movie: Movie) -> Self {
        Self {
            title: movie.title,
            genre: movie.genre,
            year: movie.year,
            director: movie.director,
            runtime_minutes: movie.runtime_minutes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_id_keeps_descriptive_fields() {
        let new = NewMovie {
            year: Some(2021),
            director: Some("Denis Villeneuve".to_string()),
            ..NewMovie::new("Dune", "Sci-Fi")
        };

        let movie = new.clone().with_id(MovieId::new(7));
        assert_eq!(movie.id.get(), 7);
        assert_eq!(movie.title, "Dune");
        assert_eq!(movie.year, Some(2021));
        assert_eq!(NewMovie::from(movie), new);
    }

    #[test]
    fn equality_covers_every_field() {
        let a = NewMovie::new("Dune", "Sci-Fi").with_id(MovieId::new(1));
        let b = NewMovie::new("Dune", "Sci-Fi").with_id(MovieId::new(2));
        assert_ne!(a, b);

        let mut c = a.clone();
        assert_eq!(a, c);
        c.runtime_minutes = Some(155);
        assert_ne!(a, c);
    }

    #[test]
    fn id_serializes_as_plain_integer() {
        let movie = NewMovie::new("Amelie", "Drama").with_id(MovieId::new(3));
        let json = serde_json::to_value(&movie).unwrap();
        assert_eq!(json["id"], 3);
        assert_eq!(json["title"], "Amelie");
    }

    #[test]
    fn optional_fields_default_when_missing() {
        let new: NewMovie =
            serde_json::from_str(r#"{"title":"Heat","genre":"Crime"}"#).unwrap();
        assert_eq!(new, NewMovie::new("Heat", "Crime"));
    }
}
