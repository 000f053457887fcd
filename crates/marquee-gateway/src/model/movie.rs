use marquee_core::{Movie, MovieId, NewMovie};
use serde::Deserialize;

/// Body of `POST /api/movies`.
#[derive(Debug, Deserialize)]
pub struct CreateMovieRequest {
    pub title: String,
    pub genre: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub director: Option<String>,
    #[serde(default)]
    pub runtime_minutes: Option<u32>,
}

/// Body of `PUT /api/movies/{id}`; `id` must repeat the path id.
#[derive(Debug, Deserialize)]
pub struct UpdateMovieRequest {
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

fn validate_fields(title: &str, genre: &str) -> Result<(), String> {
    if title.trim().is_empty() {
        return Err("title must not be blank".to_string());
    }
    if genre.trim().is_empty() {
        return Err("genre must not be blank".to_string());
    }
    Ok(())
}

impl CreateMovieRequest {
    pub fn validate(&self) -> Result<(), String> {
        validate_fields(&self.title, &self.genre)
    }
}

impl UpdateMovieRequest {
    pub fn validate(&self) -> Result<(), String> {
        validate_fields(&self.title, &self.genre)
    }
}

impl From<CreateMovieRequest> for NewMovie {
    fn from(request: CreateMovieRequest) -> Self {
        NewMovie {
            title: request.title,
            genre: request.genre,
            year: request.year,
            director: request.director,
            runtime_minutes: request.runtime_minutes,
        }
    }
}

impl From<UpdateMovieRequest> for Movie {
    fn from(request: UpdateMovieRequest) -> Self {
        Movie {
            id: request.id,
            title: request.title,
            genre: request.genre,
            year: request.year,
            director: request.director,
            runtime_minutes: request.runtime_minutes,
        }
    }
}
