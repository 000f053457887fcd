use crate::error::{AppError, Result};
use crate::model::{CreateMovieRequest, UpdateMovieRequest};
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use marquee_core::{Movie, MovieId};

fn parse_id(raw: &str) -> Result<MovieId> {
    raw.parse::<i64>()
        .map(MovieId::new)
        .map_err(|_| AppError::validation(format!("'{}' is not a valid movie id", raw)))
}

pub async fn list_movies_handler(State(state): State<AppState>) -> Result<Json<Vec<Movie>>> {
    Ok(Json(state.catalog().list_movies().await?))
}

pub async fn create_movie_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateMovieRequest>, JsonRejection>,
) -> Result<Response> {
    let Json(request) = payload?;
    request.validate().map_err(AppError::validation)?;

    let movie = state.catalog().create_movie(request.into()).await?;
    let location = format!("/api/movies/{}", movie.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(movie),
    )
        .into_response())
}

pub async fn get_movie_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Movie>> {
    let id = parse_id(&id)?;
    Ok(Json(state.catalog().get_movie(id).await?))
}

pub async fn update_movie_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
    payload: std::result::Result<Json<UpdateMovieRequest>, JsonRejection>,
) -> Result<StatusCode> {
    let id = parse_id(&id)?;
    let Json(request) = payload?;
    request.validate().map_err(AppError::validation)?;

    state.catalog().update_movie(id, request.into()).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_movie_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode> {
    let id = parse_id(&id)?;
    state.catalog().delete_movie(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_titles_handler(State(state): State<AppState>) -> Result<Json<Vec<String>>> {
    Ok(Json(state.catalog().list_titles().await?))
}

pub async fn list_genres_handler(State(state): State<AppState>) -> Result<Json<Vec<String>>> {
    Ok(Json(state.catalog().list_genres().await?))
}

pub async fn search_title_handler(
    Path(title): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Vec<Movie>>> {
    Ok(Json(state.catalog().search_exact_title(&title).await?))
}

pub async fn search_keyword_handler(
    Path(keyword): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Vec<Movie>>> {
    Ok(Json(state.catalog().search_by_title(&keyword).await?))
}

pub async fn search_genre_handler(
    Path(genre): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Vec<Movie>>> {
    Ok(Json(state.catalog().search_by_genre(&genre).await?))
}

pub async fn random_movie_handler(State(state): State<AppState>) -> Result<Json<Movie>> {
    Ok(Json(state.catalog().random_movie().await?))
}

pub async fn random_movie_by_genre_handler(
    Path(genre): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Movie>> {
    Ok(Json(state.catalog().random_movie_by_genre(&genre).await?))
}

pub async fn random_movies_handler(
    Path(count): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Vec<Movie>>> {
    let count = count
        .parse::<i64>()
        .map_err(|_| AppError::validation(format!("'{}' is not a valid count", count)))?;

    Ok(Json(state.catalog().random_movies(count).await?))
}
