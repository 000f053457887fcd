use crate::error::CatalogError;
use crate::movie::{Movie, MovieId, NewMovie};
use async_trait::async_trait;

type Result<T> = std::result::Result<T, CatalogError>;

/// The operations the movie catalog offers to a request layer.
///
/// Every query fetches its own snapshot from the record store, so concurrent
/// callers never observe each other's intermediate results.
#[async_trait]
pub trait MovieCatalog: Send + Sync + 'static {
    /// Returns every movie in store order.
    async fn list_movies(&self) -> Result<Vec<Movie>>;

    /// Returns one movie, or `Err(NotFound)`.
    async fn get_movie(&self, id: MovieId) -> Result<Movie>;

    /// Stores a new movie and returns it with its assigned identifier.
    async fn create_movie(&self, movie: NewMovie) -> Result<Movie>;

    /// Replaces the movie stored under `id`.
    ///
    /// `movie.id` must equal `id`. A save conflict becomes `Err(NotFound)`
    /// when the movie no longer exists and `Err(Conflict)` otherwise.
    async fn update_movie(&self, id: MovieId, movie: Movie) -> Result<()>;

    /// Removes a movie, or returns `Err(NotFound)`.
    async fn delete_movie(&self, id: MovieId) -> Result<()>;

    /// All titles in ascending order, duplicates kept.
    async fn list_titles(&self) -> Result<Vec<String>>;

    /// All genres in ascending order, duplicates kept.
    async fn list_genres(&self) -> Result<Vec<String>>;

    /// Movies whose title equals `title`, ignoring case.
    async fn search_exact_title(&self, title: &str) -> Result<Vec<Movie>>;

    /// Movies whose title contains `keyword`.
    async fn search_by_title(&self, keyword: &str) -> Result<Vec<Movie>>;

    /// Movies whose genre contains `genre`.
    async fn search_by_genre(&self, genre: &str) -> Result<Vec<Movie>>;

    /// One uniformly random movie, or `Err(EmptySelection)`.
    async fn random_movie(&self) -> Result<Movie>;

    /// One uniformly random movie among those whose genre contains `genre`.
    async fn random_movie_by_genre(&self, genre: &str) -> Result<Movie>;

    /// `count` distinct movies in random order.
    ///
    /// Negative counts and counts above the number of distinct movies are
    /// `Err(InvalidArgument)`.
    async fn random_movies(&self, count: i64) -> Result<Vec<Movie>>;
}
