use async_trait::async_trait;
use dashmap::DashMap;
use marquee_core::error::{Result, StorageError};
use marquee_core::movie::{Movie, MovieId, NewMovie};
use marquee_core::store::{MovieStore, ReadStore};
use std::sync::atomic::{AtomicI64, Ordering};

/// In-memory implementation of the record store using DashMap.
///
/// DashMap provides better concurrency than RwLock<HashMap> because it
/// uses sharded locks, allowing concurrent reads and writes to different
/// buckets without blocking. Identifiers come from a monotonically increasing
/// counter starting at 1 and are never reused, even after removal.
#[derive(Debug)]
pub struct InMemoryStore {
    storage: DashMap<MovieId, Movie>,
    next_id: AtomicI64,
}

impl InMemoryStore {
    /// Creates a new, empty in-memory store.
    pub fn new() -> Self {
        Self {
            storage: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }

    /// Creates a store pre-populated with `movies`, assigning ids in order.
    pub fn seeded(movies: impl IntoIterator<Item = NewMovie>) -> Self {
        let store = Self::new();
        for movie in movies {
            store.insert_new(movie);
        }
        store
    }

    fn insert_new(&self, movie: NewMovie) -> Movie {
        let id = MovieId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        let movie = movie.with_id(id);
        self.storage.insert(id, movie.clone());
        movie
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReadStore for InMemoryStore {
    async fn list_all(&self) -> Result<Vec<Movie>> {
        let mut movies: Vec<Movie> = self
            .storage
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        movies.sort_by_key(|movie| movie.id);
        Ok(movies)
    }

    async fn find_by_id(&self, id: MovieId) -> Result<Option<Movie>> {
        Ok(self.storage.get(&id).map(|entry| entry.value().clone()))
    }
}

#[async_trait]
impl MovieStore for InMemoryStore {
    async fn add(&self, movie: NewMovie) -> Result<Movie> {
        Ok(self.insert_new(movie))
    }

    async fn update(&self, movie: Movie) -> Result<()> {
        // Only overwrite an entry that is still there; a removed movie must
        // not be resurrected by a late save.
        match self.storage.get_mut(&movie.id) {
            Some(mut entry) => {
                *entry = movie;
                Ok(())
            }
            None => Err(StorageError::Conflict(movie.id.to_string())),
        }
    }

    async fn remove(&self, id: MovieId) -> Result<bool> {
        Ok(self.storage.remove(&id).is_some())
    }
}
