use crate::error::Result;
use crate::movie::{Movie, MovieId, NewMovie};
use async_trait::async_trait;

/// A read-only view of a record store.
///
/// The catalog queries only ever need these two operations, so tests and
/// read replicas can implement just this half.
#[async_trait]
pub trait ReadStore: Send + Sync + 'static {
    /// Returns a materialized snapshot of every stored movie.
    ///
    /// Implementations return records in a stable order (ascending id for
    /// the shipped stores) so repeated calls over unchanged data agree.
    async fn list_all(&self) -> Result<Vec<Movie>>;

    /// Looks a movie up by its identifier.
    /// Returns `None` if no such record exists.
    async fn find_by_id(&self, id: MovieId) -> Result<Option<Movie>>;
}

#[async_trait]
pub trait MovieStore: ReadStore {
    /// Inserts a new movie and returns it with its store-assigned identifier.
    async fn add(&self, movie: NewMovie) -> Result<Movie>;

    /// Saves every field of an existing movie.
    ///
    /// Returns `Err(Conflict)` when the write could not be applied because
    /// the stored row changed or vanished underneath it.
    async fn update(&self, movie: Movie) -> Result<()>;

    /// Removes a movie.
    /// Returns `true` if the record existed and was removed.
    async fn remove(&self, id: MovieId) -> Result<bool>;
}
