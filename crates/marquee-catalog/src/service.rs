use crate::random::RandomSource;
use async_trait::async_trait;
use marquee_core::{
    CatalogError, Movie, MovieCatalog, MovieId, MovieStore, NewMovie, Snapshot, StorageError,
};
use std::sync::Arc;
use tracing::{debug, trace, warn};

type Result<T> = std::result::Result<T, CatalogError>;

/// A concrete implementation of the [`MovieCatalog`] trait.
///
/// This service wraps a [`MovieStore`] and a [`RandomSource`]:
/// - every query takes a fresh [`Snapshot`] from the store and computes its
///   answer in memory
/// - random selections draw from the injected source
/// - store save conflicts are resolved into `NotFound` or `Conflict`
///
/// No retries are performed; every failure is returned to the caller.
#[derive(Debug)]
pub struct CatalogService<S, R> {
    store: Arc<S>,
    random: Arc<R>,
}

impl<S, R> Clone for CatalogService<S, R> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            random: Arc::clone(&self.random),
        }
    }
}

impl<S: MovieStore, R: RandomSource> CatalogService<S, R> {
    /// Creates a new `CatalogService` over `store`, drawing from `random`.
    pub fn new(store: S, random: R) -> Self {
        Self {
            store: Arc::new(store),
            random: Arc::new(random),
        }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    async fn snapshot(&self) -> Result<Snapshot> {
        let movies = self.store.list_all().await?;
        trace!(size = movies.len(), "took catalog snapshot");
        Ok(Snapshot::new(movies))
    }

    fn pick_one(&self, snapshot: &Snapshot, scope: &str) -> Result<Movie> {
        self.random
            .with_rng(|rng| snapshot.pick_one(rng).cloned())
            .ok_or_else(|| CatalogError::EmptySelection(scope.to_string()))
    }

    async fn resolve_conflict(&self, id: MovieId, source: StorageError) -> CatalogError {
        match self.store.find_by_id(id).await {
            Ok(None) => CatalogError::NotFound(id.to_string()),
            Ok(Some(_)) => {
                warn!(id = %id, error = %source, "concurrent update on existing movie");
                CatalogError::Conflict(source.to_string())
            }
            Err(err) => CatalogError::Storage(err),
        }
    }
}

#[async_trait]
impl<S: MovieStore, R: RandomSource> MovieCatalog for CatalogService<S, R> {
    async fn list_movies(&self) -> Result<Vec<Movie>> {
        Ok(self.snapshot().await?.into_vec())
    }

    async fn get_movie(&self, id: MovieId) -> Result<Movie> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }

    async fn create_movie(&self, movie: NewMovie) -> Result<Movie> {
        let created = self.store.add(movie).await?;
        debug!(id = %created.id, title = %created.title, "created movie");
        Ok(created)
    }

    async fn update_movie(&self, id: MovieId, movie: Movie) -> Result<()> {
        if movie.id != id {
            return Err(CatalogError::InvalidArgument(format!(
                "movie id {} does not match target id {}",
                movie.id, id
            )));
        }

        match self.store.update(movie).await {
            Ok(()) => {
                debug!(id = %id, "updated movie");
                Ok(())
            }
            Err(err @ StorageError::Conflict(_)) => Err(self.resolve_conflict(id, err).await),
            Err(err) => Err(err.into()),
        }
    }

    async fn delete_movie(&self, id: MovieId) -> Result<()> {
        if !self.store.remove(id).await? {
            return Err(CatalogError::NotFound(id.to_string()));
        }
        debug!(id = %id, "deleted movie");
        Ok(())
    }

    async fn list_titles(&self) -> Result<Vec<String>> {
        Ok(self.snapshot().await?.titles())
    }

    async fn list_genres(&self) -> Result<Vec<String>> {
        Ok(self.snapshot().await?.genres())
    }

    async fn search_exact_title(&self, title: &str) -> Result<Vec<Movie>> {
        Ok(self.snapshot().await?.with_exact_title(title).into_vec())
    }

    async fn search_by_title(&self, keyword: &str) -> Result<Vec<Movie>> {
        Ok(self.snapshot().await?.with_title_containing(keyword).into_vec())
    }

    async fn search_by_genre(&self, genre: &str) -> Result<Vec<Movie>> {
        Ok(self.snapshot().await?.with_genre_containing(genre).into_vec())
    }

    async fn random_movie(&self) -> Result<Movie> {
        let snapshot = self.snapshot().await?;
        self.pick_one(&snapshot, "the catalog is empty")
    }

    async fn random_movie_by_genre(&self, genre: &str) -> Result<Movie> {
        let snapshot = self.snapshot().await?.with_genre_containing(genre);
        self.pick_one(&snapshot, &format!("no movie matches genre '{}'", genre))
    }

    async fn random_movies(&self, count: i64) -> Result<Vec<Movie>> {
        let count = usize::try_from(count).map_err(|_| {
            CatalogError::InvalidArgument(format!("count must not be negative, got {}", count))
        })?;

        if count == 0 {
            return Ok(Vec::new());
        }

        let snapshot = self.snapshot().await?;
        self.random.with_rng(|rng| snapshot.pick_distinct(count, rng))
    }
}
