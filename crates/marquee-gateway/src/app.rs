use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers::{
    create_movie_handler, delete_movie_handler, get_movie_handler, health_handler,
    list_genres_handler, list_movies_handler, list_titles_handler, random_movie_by_genre_handler,
    random_movie_handler, random_movies_handler, search_genre_handler, search_keyword_handler,
    search_title_handler, update_movie_handler,
};
use crate::state::AppState;

pub struct App {}

impl App {
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/health", get(health_handler))
            .nest(
                "/api/movies",
                Router::new()
                    .route("/", get(list_movies_handler).post(create_movie_handler))
                    .route("/titles", get(list_titles_handler))
                    .route("/genres", get(list_genres_handler))
                    .route("/search/title/{title}", get(search_title_handler))
                    .route("/search/keyword/{keyword}", get(search_keyword_handler))
                    .route("/search/genre/{genre}", get(search_genre_handler))
                    .route("/random", get(random_movie_handler))
                    .route("/random/genre/{genre}", get(random_movie_by_genre_handler))
                    .route("/random/list/{count}", get(random_movies_handler))
                    .route(
                        "/{id}",
                        get(get_movie_handler)
                            .put(update_movie_handler)
                            .delete(delete_movie_handler),
                    ),
            )
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }
}
