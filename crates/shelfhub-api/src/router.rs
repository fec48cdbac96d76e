//! Route definitions for the ShelfHub HTTP API.
//!
//! Application routes are mounted under `/api`; operational routes under
//! `/admin`. The router receives `AppState` and passes it to all handlers
//! via Axum's `State` extractor.

use axum::{
    Router,
    routing::{delete, get, post},
};

use shelfhub_database::repositories::{
    BookRepository, CatalogRepository, MovieRepository, MusicRepository, ShowRepository,
};

use crate::handlers;
use crate::state::{AppState, CatalogState};

/// Build the Axum router with every route, bound to `state`.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(session_routes())
        .merge(user_routes())
        .merge(location_routes())
        .merge(case_routes())
        .merge(shelf_routes())
        .merge(catalog_routes::<BookRepository>())
        .merge(catalog_routes::<MovieRepository>())
        .merge(catalog_routes::<MusicRepository>())
        .merge(catalog_routes::<ShowRepository>());

    Router::new()
        .nest("/api", api_routes)
        .nest("/admin", admin_routes())
        .with_state(state)
}

/// Login, refresh, revoke
fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(handlers::auth::login))
        .route("/refresh", post(handlers::auth::refresh))
        .route("/revoke", post(handlers::auth::revoke))
        .route("/revoke-all", post(handlers::auth::revoke_all))
}

/// Registration and user lookups
fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users",
            post(handlers::user::register)
                .put(handlers::user::update)
                .get(handlers::user::list),
        )
        .route("/users/{id}", get(handlers::user::get))
        .route("/users/{id}/locations", get(handlers::user::locations))
        .route("/users/{id}/invites", get(handlers::user::invites))
        .route("/search/users", get(handlers::user::find_by_email))
}

/// Locations, members, invitations
fn location_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/locations",
            post(handlers::location::create).get(handlers::location::list_joined),
        )
        .route("/locations/{id}", get(handlers::location::get))
        .route(
            "/locations/{id}/members",
            get(handlers::location::members).post(handlers::location::join),
        )
        .route(
            "/locations/{id}/members/{user_id}",
            delete(handlers::location::remove_member),
        )
        .route(
            "/locations/{id}/invites",
            get(handlers::location::invites).post(handlers::location::invite),
        )
        .route(
            "/locations/{id}/invites/{user_id}",
            delete(handlers::location::remove_invite),
        )
        .route("/search/locations", get(handlers::location::find_by_owner))
}

fn case_routes() -> Router<AppState> {
    Router::new()
        .route("/cases", post(handlers::case::create))
        .route(
            "/cases/{id}",
            get(handlers::case::get)
                .put(handlers::case::rename)
                .delete(handlers::case::delete),
        )
        .route(
            "/locations/{id}/cases",
            get(handlers::case::list_by_location),
        )
}

fn shelf_routes() -> Router<AppState> {
    Router::new()
        .route("/shelves", post(handlers::shelf::create))
        .route(
            "/shelves/{id}",
            get(handlers::shelf::get)
                .put(handlers::shelf::rename)
                .delete(handlers::shelf::delete),
        )
        .route("/cases/{id}/shelves", get(handlers::shelf::list_by_case))
}

/// CRUD, listings, search, and barcode lookup for one item kind
fn catalog_routes<R>() -> Router<AppState>
where
    R: CatalogRepository,
    AppState: CatalogState<R>,
{
    let table = R::TABLE;
    let kind = R::KIND;

    Router::new()
        .route(&format!("/{table}"), post(handlers::catalog::create::<R>))
        .route(
            &format!("/{table}/{{id}}"),
            get(handlers::catalog::get::<R>)
                .put(handlers::catalog::replace::<R>)
                .delete(handlers::catalog::delete::<R>),
        )
        .route(
            &format!("/shelves/{{id}}/{table}"),
            get(handlers::catalog::list_by_shelf::<R>),
        )
        .route(
            &format!("/locations/{{id}}/{table}"),
            get(handlers::catalog::list_by_location::<R>),
        )
        .route(
            &format!("/search/{table}"),
            get(handlers::catalog::search::<R>),
        )
        .route(
            &format!("/search/{kind}_barcodes/{{barcode}}"),
            get(handlers::catalog::find_by_barcode::<R>),
        )
}

fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/healthz", get(handlers::admin::healthz))
        .route("/reset", post(handlers::admin::reset))
}
