use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::handlers;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().nest("/community", community_routes())
}

fn community_routes() -> Router<AppState> {
    Router::new()
        .nest("/posts", post_routes())
        .nest("/users", user_routes())
}

fn post_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::posts::list_posts).post(handlers::posts::create_post),
        )
        .route("/{id}", get(handlers::posts::get_post))
        .route("/{id}/update", post(handlers::posts::update_post))
        .route("/{id}/delete", post(handlers::posts::delete_post))
        .route(
            "/{id}/comments",
            get(handlers::comments::list_comments).post(handlers::comments::create_comment),
        )
        .route(
            "/{id}/comments/{comment_id}",
            delete(handlers::comments::delete_comment),
        )
        .route(
            "/{id}/like",
            post(handlers::likes::like_post).delete(handlers::likes::unlike_post),
        )
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/{id}", get(handlers::users::get_user_page))
        .route(
            "/{id}/follow",
            post(handlers::users::follow_user).delete(handlers::users::unfollow_user),
        )
}
