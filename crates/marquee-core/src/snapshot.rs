//! In-memory queries over a point-in-time copy of the catalog.
//!
//! A [`Snapshot`] is fetched fresh from the record store at the start of each
//! catalog call and dropped at its end. Everything here is a pure function of
//! the snapshot contents and, for the random selections, the generator passed
//! in.

use crate::error::CatalogError;
use crate::movie::Movie;
use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;
use std::collections::HashSet;

/// An ordered, request-scoped copy of movie records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    movies: Vec<Movie>,
}

impl Snapshot {
    pub fn new(movies: Vec<Movie>) -> Self {
        Self { movies }
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn as_slice(&self) -> &[Movie] {
        &self.movies
    }

    pub fn into_vec(self) -> Vec<Movie> {
        self.movies
    }

    /// All titles in ascending order. Duplicates are kept.
    pub fn titles(&self) -> Vec<String> {
        Self::sorted(self.movies.iter().map(|movie| movie.title.clone()))
    }

    /// All genres in ascending order. Duplicates are kept.
    pub fn genres(&self) -> Vec<String> {
        Self::sorted(self.movies.iter().map(|movie| movie.genre.clone()))
    }

    /// Keeps the movies whose title equals `title`, ignoring case on both sides.
    pub fn with_exact_title(self, title: &str) -> Snapshot {
        let wanted = title.to_lowercase();
        self.retain(|movie| movie.title.to_lowercase() == wanted)
    }

    /// Keeps the movies whose title contains `keyword` (case-sensitive).
    pub fn with_title_containing(self, keyword: &str) -> Snapshot {
        self.retain(|movie| movie.title.contains(keyword))
    }

    /// Keeps the movies whose genre contains `genre` (case-sensitive).
    pub fn with_genre_containing(self, genre: &str) -> Snapshot {
        self.retain(|movie| movie.genre.contains(genre))
    }

    /// Picks one movie uniformly at random.
    ///
    /// Returns `None` for an empty snapshot.
    pub fn pick_one<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Movie> {
        self.movies.choose(rng)
    }

    /// Draws `count` pairwise-distinct movies in random order.
    ///
    /// Distinctness is whole-record equality: the snapshot is first reduced
    /// to its distinct pool, keeping the first occurrence of each value. The
    /// pool is shuffled and its first `count` entries returned, so the call
    /// always terminates. Asking for more movies than the pool holds is an
    /// [`CatalogError::InvalidArgument`]. A zero count never touches `rng`.
    pub fn pick_distinct<R: Rng + ?Sized>(
        self,
        count: usize,
        rng: &mut R,
    ) -> Result<Vec<Movie>, CatalogError> {
        if count == 0 {
            return Ok(Vec::new());
        }

        let mut pool = self.distinct();
        if count > pool.len() {
            return Err(CatalogError::InvalidArgument(format!(
                "requested {} distinct movies but only {} are available",
                count,
                pool.len()
            )));
        }

        pool.shuffle(rng);
        pool.truncate(count);
        Ok(pool)
    }

    fn distinct(self) -> Vec<Movie> {
        let mut seen = HashSet::with_capacity(self.movies.len());
        self.movies
            .into_iter()
            .filter(|movie| seen.insert(movie.clone()))
            .collect()
    }

    fn retain(mut self, predicate: impl FnMut(&Movie) -> bool) -> Snapshot {
        self.movies.retain(predicate);
        self
    }

    fn sorted(values: impl Iterator<Item = String>) -> Vec<String> {
        let mut values: Vec<String> = values.collect();
        values.sort();
        values
    }
}
