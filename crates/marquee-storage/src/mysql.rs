use async_trait::async_trait;
use marquee_core::error::{Result, StorageError};
use marquee_core::movie::{Movie, MovieId, NewMovie};
use marquee_core::store::{MovieStore, ReadStore};
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};
use tracing::debug;

/// DDL for the `movies` table used by [`MySqlStore`].
pub const MOVIES_DDL: &str = include_str!("../ddl/mysql/movies.sql");

/// MySQL implementation of the record store contract.
///
/// Rows are hard-deleted. Snapshots are returned ordered by `id`.
#[derive(Debug, Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    /// Creates a store from an existing MySQL connection pool.
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Creates a store by opening a new MySQL connection pool.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = MySqlPool::connect(database_url)
            .await
            .map_err(map_sqlx_error)?;
        Ok(Self::new(pool))
    }

    /// Creates the `movies` table if it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(MOVIES_DDL)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }

    async fn exists(&self, id: MovieId) -> Result<bool> {
        let exists = sqlx::query(
            r#"
            SELECT 1
            FROM movies
            WHERE id = ?
            LIMIT 1
            "#,
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?
        .is_some();

        Ok(exists)
    }
}

fn movie_from_row(row: &MySqlRow) -> Result<Movie> {
    let id: i64 = row.try_get("id").map_err(map_sqlx_error)?;
    let runtime_minutes: Option<u32> = row.try_get("runtime_minutes").map_err(map_sqlx_error)?;

    Ok(Movie {
        id: MovieId::new(id),
        title: row.try_get("title").map_err(map_sqlx_error)?,
        genre: row.try_get("genre").map_err(map_sqlx_error)?,
        year: row.try_get("year").map_err(map_sqlx_error)?,
        director: row.try_get("director").map_err(map_sqlx_error)?,
        runtime_minutes,
    })
}

fn map_sqlx_error(err: sqlx::Error) -> StorageError {
    let message = err.to_string();

    match err {
        sqlx::Error::PoolTimedOut => StorageError::Timeout(message),
        sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => StorageError::Unavailable(message),
        sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::TypeNotFound { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::RowNotFound => StorageError::InvalidData(message),
        _ => StorageError::Query(message),
    }
}

#[async_trait]
impl ReadStore for MySqlStore {
    async fn list_all(&self) -> Result<Vec<Movie>> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, genre, year, director, runtime_minutes
            FROM movies
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        rows.iter().map(movie_from_row).collect()
    }

    async fn find_by_id(&self, id: MovieId) -> Result<Option<Movie>> {
        let row = sqlx::query(
            r#"
            SELECT id, title, genre, year, director, runtime_minutes
            FROM movies
            WHERE id = ?
            LIMIT 1
            "#,
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.as_ref().map(movie_from_row).transpose()
    }
}

#[async_trait]
impl MovieStore for MySqlStore {
    async fn add(&self, movie: NewMovie) -> Result<Movie> {
        let result = sqlx::query(
            r#"
            INSERT INTO movies (title, genre, year, director, runtime_minutes)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&movie.title)
        .bind(&movie.genre)
        .bind(movie.year)
        .bind(&movie.director)
        .bind(movie.runtime_minutes)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        let id = i64::try_from(result.last_insert_id()).map_err(|_| {
            StorageError::InvalidData(format!(
                "insert id {} does not fit a movie id",
                result.last_insert_id()
            ))
        })?;

        Ok(movie.with_id(MovieId::new(id)))
    }

    async fn update(&self, movie: Movie) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE movies
            SET title = ?, genre = ?, year = ?, director = ?, runtime_minutes = ?
            WHERE id = ?
            "#,
        )
        .bind(&movie.title)
        .bind(&movie.genre)
        .bind(movie.year)
        .bind(&movie.director)
        .bind(movie.runtime_minutes)
        .bind(movie.id.get())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() > 0 {
            return Ok(());
        }

        // MySQL reports changed rows, not matched rows, so an update that
        // writes identical values also affects zero rows.
        if self.exists(movie.id).await? {
            debug!(id = %movie.id, "update left movie unchanged");
            return Ok(());
        }

        Err(StorageError::Conflict(movie.id.to_string()))
    }

    async fn remove(&self, id: MovieId) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM movies
            WHERE id = ?
            "#,
        )
        .bind(id.get())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }
}
